use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::renderer::RenderConfig;

/// Instanced rendering options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderOptions {
    /// Uniform scale applied to each instanced boid.
    pub object_scale: [f32; 3],
    /// Freeze flag (0/1 integer sentinel) passed through to the shader.
    pub freeze: i32,
    /// Clear color for the demo viewer.
    pub background: [f32; 3],
    /// Number of boids the demo scatter source places.
    pub boid_count: u32,
    /// Radius of the demo simulation domain.
    pub area_radius: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            object_scale: [0.5; 3],
            freeze: 0,
            background: [0.02, 0.03, 0.06],
            boid_count: 4096,
            area_radius: 32.0,
        }
    }
}

impl RenderOptions {
    /// Renderer configuration derived from these options.
    pub fn config(&self) -> RenderConfig {
        RenderConfig {
            object_scale: Vec3::from_array(self.object_scale),
            freeze: self.freeze,
        }
    }
}
