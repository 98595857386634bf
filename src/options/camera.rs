use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;

/// Camera projection and placement options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Eye (camera) position in world space.
    pub eye: [f32; 3],
    /// Look-at target position.
    pub target: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            eye: [0.0, 20.0, 90.0],
            target: [0.0, 0.0, 0.0],
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl CameraOptions {
    /// Camera for the given viewport aspect ratio.
    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: Vec3::from_array(self.eye),
            target: Vec3::from_array(self.target),
            up: Vec3::Y,
            aspect,
            fovy: self.fovy,
            znear: self.znear,
            zfar: self.zfar,
        }
    }
}
