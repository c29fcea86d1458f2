/// Geometry primitives for measurement: boxes, axes, screen points and fragment buffers
use std::str::FromStr;

use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::MeasureError;

/// A coordinate axis in world space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vector3<f64> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }

    /// Index of this axis into a point or vector
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl FromStr for Axis {
    type Err = MeasureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => Err(MeasureError::invalid_params(format!("unknown axis '{other}'"))),
        }
    }
}

/// Axis-aligned bounding box
///
/// A box starts out as [`Box3::empty`] (min = +inf, max = -inf) so the first
/// union establishes real bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Box3 {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Box3 {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// True while no point or box has been merged in
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    pub fn expand_by_point(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    pub fn union(&mut self, other: &Box3) {
        self.min = self.min.inf(&other.min);
        self.max = self.max.sup(&other.max);
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Per-axis extent; zero for an empty box
    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    pub fn extent(&self, axis: Axis) -> f64 {
        self.size()[axis.index()]
    }

    /// Bounds of the eight corners after applying `matrix`
    pub fn transformed(&self, matrix: &Matrix4<f64>) -> Box3 {
        if self.is_empty() {
            return *self;
        }
        let mut bounds = Box3::empty();
        for &x in &[self.min.x, self.max.x] {
            for &y in &[self.min.y, self.max.y] {
                for &z in &[self.min.z, self.max.z] {
                    bounds.expand_by_point(&matrix.transform_point(&Point3::new(x, y, z)));
                }
            }
        }
        bounds
    }
}

impl Default for Box3 {
    fn default() -> Self {
        Self::empty()
    }
}

/// A 2D point in viewport pixel space (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &ScreenPoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Opaque handle for one piece of renderable geometry owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentId(pub usize);

/// Sub-range of an index buffer drawn with a base vertex offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRange {
    pub start: usize,
    pub count: usize,
    /// Added to every index read from the range
    pub index: u32,
}

/// Triangle vertex buffer as a viewer keeps it for a single fragment
///
/// Positions are flat `f32` triples; `stride` is the number of floats between
/// consecutive vertices, so interleaved buffers (position + normal + uv) work
/// unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentGeometry {
    pub positions: Vec<f32>,
    pub stride: usize,
    pub indices: Option<Vec<u32>>,
    pub ranges: Vec<DrawRange>,
}

impl FragmentGeometry {
    /// Non-indexed, tightly packed triangle soup
    pub fn from_positions(positions: Vec<f32>) -> Self {
        Self {
            positions,
            stride: 3,
            indices: None,
            ranges: Vec::new(),
        }
    }

    pub fn indexed(positions: Vec<f32>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            stride: 3,
            indices: Some(indices),
            ranges: Vec::new(),
        }
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride.max(3);
        self
    }

    pub fn with_ranges(mut self, ranges: Vec<DrawRange>) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn vertex_count(&self) -> usize {
        if self.stride == 0 || self.positions.len() < 3 {
            return 0;
        }
        (self.positions.len() - 3) / self.stride + 1
    }

    fn position(&self, vertex: usize) -> Option<Point3<f64>> {
        let offset = vertex.checked_mul(self.stride)?;
        let xyz = self.positions.get(offset..offset.checked_add(3)?)?;
        Some(Point3::new(xyz[0] as f64, xyz[1] as f64, xyz[2] as f64))
    }

    /// Expand every triangle into world-space vertices, three per triangle
    ///
    /// Triangles that reference vertices outside the buffer are dropped.
    pub fn world_vertices(&self, matrix: &Matrix4<f64>) -> Vec<Point3<f64>> {
        let mut vertices = Vec::new();
        let mut push_triangle = |corners: [usize; 3]| {
            let (Some(a), Some(b), Some(c)) = (
                self.position(corners[0]),
                self.position(corners[1]),
                self.position(corners[2]),
            ) else {
                return;
            };
            vertices.push(matrix.transform_point(&a));
            vertices.push(matrix.transform_point(&b));
            vertices.push(matrix.transform_point(&c));
        };

        match &self.indices {
            Some(indices) => {
                let whole = [DrawRange {
                    start: 0,
                    count: indices.len(),
                    index: 0,
                }];
                let ranges = if self.ranges.is_empty() {
                    &whole[..]
                } else {
                    &self.ranges[..]
                };

                for range in ranges {
                    let end = range.start.saturating_add(range.count).min(indices.len());
                    let mut i = range.start;
                    while end.saturating_sub(i) >= 3 {
                        let base = range.index as usize;
                        push_triangle([
                            base + indices[i] as usize,
                            base + indices[i + 1] as usize,
                            base + indices[i + 2] as usize,
                        ]);
                        i += 3;
                    }
                }
            }
            None => {
                let triangles = self.vertex_count() / 3;
                for t in 0..triangles {
                    push_triangle([t * 3, t * 3 + 1, t * 3 + 2]);
                }
            }
        }

        vertices
    }

    /// Bounds of the raw buffer in fragment-local space
    pub fn local_bounds(&self) -> Box3 {
        let mut bounds = Box3::empty();
        for vertex in 0..self.vertex_count() {
            if let Some(point) = self.position(vertex) {
                bounds.expand_by_point(&point);
            }
        }
        bounds
    }

    /// Axis-aligned cube centered on the origin, as indexed triangles
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        #[rustfmt::skip]
        let positions = vec![
            -h, -h, -h,   h, -h, -h,   h,  h, -h,  -h,  h, -h,
            -h, -h,  h,   h, -h,  h,   h,  h,  h,  -h,  h,  h,
        ];
        #[rustfmt::skip]
        let indices = vec![
            4, 5, 6,  4, 6, 7, // front
            0, 3, 2,  0, 2, 1, // back
            3, 7, 6,  3, 6, 2, // top
            0, 1, 5,  0, 5, 4, // bottom
            1, 2, 6,  1, 6, 5, // right
            0, 4, 7,  0, 7, 3, // left
        ];
        Self::indexed(positions, indices)
    }
}
