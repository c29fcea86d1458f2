/// Screen-space layout of a dimension tag
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::{MeasureError, MeasureResult};
use crate::geometry::ScreenPoint;
use crate::projection::Projector;

/// Where to draw a dimension tag: a label at the midpoint, a marker at each
/// end and a line from end A to end B.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TagLayout {
    pub label: ScreenPoint,
    pub end_a: ScreenPoint,
    pub end_b: ScreenPoint,
    /// Line origin, always the projection of end A
    pub line_origin: ScreenPoint,
    /// Pixel length of the line
    pub line_length: f64,
    /// Clockwise rotation from the +x screen axis, in degrees (screen y grows down)
    pub line_angle: f64,
}

fn check_finite(name: &str, point: &Point3<f64>) -> MeasureResult<()> {
    if point.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(MeasureError::degenerate(format!(
            "{name} is not finite: ({}, {}, {})",
            point.x, point.y, point.z
        )))
    }
}

fn check_projected(name: &str, point: ScreenPoint) -> MeasureResult<ScreenPoint> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(MeasureError::degenerate(format!(
            "{name} projects to a non-finite screen point ({}, {})",
            point.x, point.y
        )))
    }
}

/// Lay out a dimension tag between two world-space ends.
///
/// The label sits on the projection of the world midpoint, which is not in
/// general the screen midpoint under perspective. Coincident ends give a zero
/// length and a zero angle.
pub fn compute_tag_layout<P>(
    end_a: &Point3<f64>,
    end_b: &Point3<f64>,
    projector: &P,
) -> MeasureResult<TagLayout>
where
    P: Projector + ?Sized,
{
    check_finite("end A", end_a)?;
    check_finite("end B", end_b)?;

    let midpoint = nalgebra::center(end_a, end_b);

    let label = check_projected("midpoint", projector.project(&midpoint))?;
    let a = check_projected("end A", projector.project(end_a))?;
    let b = check_projected("end B", projector.project(end_b))?;

    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let line_angle = if dx == 0.0 && dy == 0.0 {
        0.0
    } else {
        dy.atan2(dx).to_degrees()
    };

    Ok(TagLayout {
        label,
        end_a: a,
        end_b: b,
        line_origin: a,
        line_length: dx.hypot(dy),
        line_angle,
    })
}
