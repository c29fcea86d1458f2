/// Camera and world-to-screen projection utilities
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::geometry::ScreenPoint;
use crate::transform::Transform;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    Orthographic,
    #[default]
    Perspective,
}

/// Maps a world-space point to viewport pixels
///
/// Implemented for plain closures, so a host can hand over its own
/// world-to-client function.
pub trait Projector {
    fn project(&self, point: &Point3<f64>) -> ScreenPoint;
}

impl<F> Projector for F
where
    F: Fn(&Point3<f64>) -> ScreenPoint,
{
    fn project(&self, point: &Point3<f64>) -> ScreenPoint {
        self(point)
    }
}

/// Camera configuration for 3D viewing
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f64>,
    pub target: Point3<f64>,
    pub up: Vector3<f64>,
    pub fov: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f64::consts::PI / 4.0, // 45 degrees
            aspect: width as f64 / height.max(1) as f64,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f64> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = (self.position - self.target).norm();
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    pub fn view_projection_matrix(&self) -> Matrix4<f64> {
        Transform::mvp_matrix(
            &Matrix4::identity(),
            &self.view_matrix(),
            &self.projection_matrix(),
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Convert normalized device coordinates to client pixels (y down)
fn ndc_to_client(ndc: &Point3<f64>, width: u32, height: u32) -> ScreenPoint {
    ScreenPoint::new(
        (ndc.x + 1.0) * 0.5 * width as f64,
        (1.0 - ndc.y) * 0.5 * height as f64,
    )
}

/// Projector over a raw view-projection matrix, as handed out by a host viewer
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixProjector {
    pub view_projection: Matrix4<f64>,
    pub width: u32,
    pub height: u32,
}

impl MatrixProjector {
    pub fn new(view_projection: Matrix4<f64>, width: u32, height: u32) -> Self {
        Self {
            view_projection,
            width,
            height,
        }
    }

    /// Build from 16 column-major elements
    pub fn from_column_slice(elements: &[f64], width: u32, height: u32) -> Option<Self> {
        if elements.len() != 16 {
            return None;
        }
        Some(Self::new(Matrix4::from_column_slice(elements), width, height))
    }
}

impl Projector for MatrixProjector {
    fn project(&self, point: &Point3<f64>) -> ScreenPoint {
        let ndc = self.view_projection.transform_point(point);
        ndc_to_client(&ndc, self.width, self.height)
    }
}

/// A camera looking through a viewport of a given pixel size
///
/// Points are not clipped: anything off screen simply lands outside
/// `0..width` / `0..height`.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub camera: Camera,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(camera: Camera, width: u32, height: u32) -> Self {
        Self {
            camera,
            width,
            height,
        }
    }

    pub fn world_to_client(&self, point: &Point3<f64>) -> ScreenPoint {
        let ndc = self.camera.view_projection_matrix().transform_point(point);
        ndc_to_client(&ndc, self.width, self.height)
    }
}

impl Projector for Viewport {
    fn project(&self, point: &Point3<f64>) -> ScreenPoint {
        self.world_to_client(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-12);
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix();
        assert!(view.norm() > 0.0);
    }

    #[test]
    fn test_target_projects_to_viewport_center() {
        for mode in [ProjectionMode::Perspective, ProjectionMode::Orthographic] {
            let mut camera = Camera::new(800, 600);
            camera.mode = mode;
            let viewport = Viewport::new(camera, 800, 600);
            let center = viewport.project(&Point3::origin());
            assert!((center.x - 400.0).abs() < 1e-6, "{mode:?}: {center:?}");
            assert!((center.y - 300.0).abs() < 1e-6, "{mode:?}: {center:?}");
        }
    }

    #[test]
    fn test_screen_y_points_down() {
        let viewport = Viewport::new(Camera::new(800, 600), 800, 600);
        let up = viewport.project(&Point3::new(0.0, 1.0, 0.0));
        let right = viewport.project(&Point3::new(1.0, 0.0, 0.0));
        assert!(up.y < 300.0);
        assert!(right.x > 400.0);
    }

    #[test]
    fn test_matrix_projector_identity() {
        let projector = MatrixProjector::from_column_slice(
            Matrix4::<f64>::identity().as_slice(),
            200,
            100,
        )
        .unwrap();
        let p = projector.project(&Point3::new(1.0, 1.0, 0.0));
        assert_eq!(p, ScreenPoint::new(200.0, 0.0));
        assert!(MatrixProjector::from_column_slice(&[0.0; 15], 1, 1).is_none());
    }

    #[test]
    fn test_closure_projector() {
        let flat = |p: &Point3<f64>| ScreenPoint::new(p.x * 10.0, p.y * 10.0);
        assert_eq!(
            flat.project(&Point3::new(1.0, 2.0, 3.0)),
            ScreenPoint::new(10.0, 20.0)
        );
    }
}
