/// TOML configuration for the command-line front end
use std::path::{Path, PathBuf};

use dimtag_core::{Camera, PackLayout, ProjectionMode, Viewport};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Camera and viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f64; 3],
    pub target: [f64; 3],
    pub up: [f64; 3],
    /// Vertical field of view in degrees
    pub fov: f64,
    pub near: f64,
    pub far: f64,
    pub width: u32,
    pub height: u32,
    pub mode: ProjectionMode,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 5.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            width: 800,
            height: 600,
            mode: ProjectionMode::Perspective,
        }
    }
}

impl CameraConfig {
    pub fn viewport(&self) -> Viewport {
        let mut camera = Camera::new(self.width, self.height);
        camera.position = Point3::from(self.position);
        camera.target = Point3::from(self.target);
        camera.up = Vector3::from(self.up);
        camera.fov = self.fov.to_radians();
        camera.near = self.near;
        camera.far = self.far;
        camera.mode = self.mode;
        Viewport::new(camera, self.width, self.height)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pack: PackLayout,
    pub camera: CameraConfig,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimtag_core::{Axis, DEFAULT_PACK_BUFFER};
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.pack.quantity, 2);
        assert_eq!(config.pack.buffer, DEFAULT_PACK_BUFFER);
        assert_eq!(config.pack.axis, Axis::Y);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml(
            r#"
            [pack]
            quantity = 4
            axis = "x"

            [camera]
            mode = "orthographic"
            width = 1024
            "#,
        )
        .unwrap();
        assert_eq!(config.pack.quantity, 4);
        assert_eq!(config.pack.axis, Axis::X);
        assert_eq!(config.pack.buffer, DEFAULT_PACK_BUFFER);
        assert_eq!(config.camera.mode, ProjectionMode::Orthographic);
        assert_eq!(config.camera.width, 1024);
        assert_eq!(config.camera.height, 600);
    }

    #[test]
    fn test_viewport_from_config() {
        let viewport = CameraConfig::default().viewport();
        assert_eq!(viewport.width, 800);
        assert!((viewport.camera.fov - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert!((viewport.camera.aspect - 800.0 / 600.0).abs() < 1e-12);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pack]\nbuffer = 0.5").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.pack.buffer, 0.5);

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        writeln!(broken, "[pack]\nquantity = \"many\"").unwrap();
        assert!(matches!(Config::load(broken.path()), Err(ConfigError::Parse { .. })));

        let missing = Config::load(Path::new("/nonexistent/dimtag.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
