/// Side-by-side layout of duplicated products ("packs")
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::endpoints::element_width;
use crate::error::{MeasureError, MeasureResult};
use crate::fragments::BoundsSource;
use crate::geometry::{Axis, FragmentId};
use crate::transform::Transform;

/// Gap between copies: 2 inches, in feet
pub const DEFAULT_PACK_BUFFER: f64 = 2.0 / 12.0;

/// Offsets for `count` extra copies laid out after the original.
///
/// Copy `i` sits at `(width + buffer) * (i + 1)` along the layout axis. Fails
/// with `InvalidParams` when the copies would coincide or the offsets overflow.
pub fn compute_duplicate_offsets(width: f64, count: usize, buffer: f64) -> MeasureResult<Vec<f64>> {
    if !width.is_finite() || width < 0.0 {
        return Err(MeasureError::invalid_params(format!(
            "width must be finite and non-negative, got {width}"
        )));
    }
    if !buffer.is_finite() || buffer < 0.0 {
        return Err(MeasureError::invalid_params(format!(
            "buffer must be finite and non-negative, got {buffer}"
        )));
    }

    let pitch = width + buffer;
    if !pitch.is_finite() || (count > 0 && !(pitch * count as f64).is_finite()) {
        return Err(MeasureError::invalid_params(format!(
            "pack of {count} copies at pitch {width} + {buffer} overflows"
        )));
    }
    // copies at a zero pitch would all land on the same spot
    if count > 1 && pitch <= 0.0 {
        return Err(MeasureError::invalid_params(
            "width + buffer must be positive to separate copies",
        ));
    }

    Ok((0..count).map(|i| pitch * (i + 1) as f64).collect())
}

/// How a pack is arranged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackLayout {
    /// Products shown in total, the original included
    pub quantity: usize,
    pub buffer: f64,
    pub axis: Axis,
}

impl Default for PackLayout {
    fn default() -> Self {
        Self {
            quantity: 2,
            buffer: DEFAULT_PACK_BUFFER,
            axis: Axis::Y,
        }
    }
}

/// Offsets and translations for every copy in a pack
#[derive(Debug, Clone, PartialEq)]
pub struct PackPlan {
    pub width: f64,
    pub axis: Axis,
    pub offsets: Vec<f64>,
}

impl PackPlan {
    /// Translation applied on top of a copy's world matrix
    pub fn translations(&self) -> impl Iterator<Item = Matrix4<f64>> + '_ {
        self.offsets
            .iter()
            .map(move |offset| Transform::translation_along(self.axis, *offset))
    }

    /// World matrix of each copy of a fragment placed at `world`
    pub fn copy_matrices(&self, world: &Matrix4<f64>) -> Vec<Matrix4<f64>> {
        self.translations().map(|t| t * world).collect()
    }

    pub fn copies(&self) -> usize {
        self.offsets.len()
    }
}

impl PackLayout {
    pub fn new(quantity: usize) -> Self {
        Self {
            quantity,
            ..Self::default()
        }
    }

    pub fn with_buffer(mut self, buffer: f64) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Copies to create beyond the original
    pub fn copies(&self) -> usize {
        self.quantity.saturating_sub(1)
    }

    pub fn plan(&self, width: f64) -> MeasureResult<PackPlan> {
        let offsets = compute_duplicate_offsets(width, self.copies(), self.buffer)?;
        debug!(width, copies = offsets.len(), axis = ?self.axis, "planned pack");
        Ok(PackPlan {
            width,
            axis: self.axis,
            offsets,
        })
    }

    /// Plan a pack for an element, measuring its width along the layout axis
    pub fn plan_for<S>(&self, fragments: &[FragmentId], source: &S) -> MeasureResult<PackPlan>
    where
        S: BoundsSource + ?Sized,
    {
        self.plan(element_width(fragments, source, self.axis))
    }
}
