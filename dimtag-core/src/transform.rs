/// 4x4 transformation matrix builders
use nalgebra::{Matrix4, Point3, Vector3};

use crate::geometry::Axis;

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a translation matrix
    pub fn translation_matrix(x: f64, y: f64, z: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Translation by `distance` along a single world axis
    pub fn translation_along(axis: Axis, distance: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&(axis.unit() * distance))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f64, sy: f64, sz: f64) -> Matrix4<f64> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    pub fn uniform_scale_matrix(scale: f64) -> Matrix4<f64> {
        Matrix4::new_scaling(scale)
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f64>,
        view: &Matrix4<f64>,
        projection: &Matrix4<f64>,
    ) -> Matrix4<f64> {
        projection * view * model
    }

    /// Apply a matrix to a point, including the homogeneous divide
    pub fn apply(matrix: &Matrix4<f64>, point: &Point3<f64>) -> Point3<f64> {
        matrix.transform_point(point)
    }
}
