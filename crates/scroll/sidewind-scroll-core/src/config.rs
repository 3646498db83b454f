//! Engine configuration and viewport derivation.

use serde::{Deserialize, Serialize};

/// Orthographic camera description, measured once at startup.
/// The world moves around the camera, so the camera itself never re-derives
/// the viewport mid-session; a resize means rebuilding the engine.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Orthographic half-height in world units.
    pub orthographic_size: f64,
    /// Width / height.
    pub aspect: f64,
    /// Camera center x in world units.
    pub position_x: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            orthographic_size: 5.0,
            aspect: 16.0 / 9.0,
            position_x: 0.0,
        }
    }
}

/// Visible span of the scroll axis, derived once from the camera.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Viewport {
    pub window_width: f64,
    pub camera_left: f64,
}

impl Viewport {
    pub fn from_camera(cam: &CameraConfig) -> Self {
        let window_width = 2.0 * cam.orthographic_size * cam.aspect;
        Self {
            window_width,
            camera_left: cam.position_x - window_width / 2.0,
        }
    }
}

/// Engine-wide configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    pub camera: CameraConfig,
}

/// Per-layer configuration supplied at layer creation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LayerCfg {
    /// Initial value of the running layout cursor.
    pub scroll_start: f64,
    /// Per-layer parallax factor applied to the world scroll speed.
    pub scroll_multiplier: f64,
    /// Wrap the strip at its period instead of running off the end.
    pub looping: bool,
}

impl Default for LayerCfg {
    fn default() -> Self {
        Self {
            scroll_start: 0.0,
            scroll_multiplier: 1.0,
            looping: false,
        }
    }
}
