//! Simulation collaborator contract and per-boid GPU state.
//!
//! The flocking simulation itself lives outside this crate. Anything that
//! can report an instance count, a device-resident buffer of [`BoidData`],
//! and a bounding domain can drive the renderer by implementing
//! [`BoidSimulationSource`].

pub mod scatter;

use glam::Vec3;
pub use scatter::ScatterSource;

/// Per-boid state as laid out in the instance storage buffer.
///
/// Must match the WGSL `BoidData` struct layout exactly: `vec3` fields are
/// 16-byte aligned, so each carries an explicit pad word.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BoidData {
    /// World-space position.
    pub position: [f32; 3],
    pub(crate) _pad0: f32,
    /// Velocity; the shader orients each instance along it.
    pub velocity: [f32; 3],
    pub(crate) _pad1: f32,
}

impl BoidData {
    /// Build a record from position and velocity vectors.
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position: position.to_array(),
            _pad0: 0.0,
            velocity: velocity.to_array(),
            _pad1: 0.0,
        }
    }
}

/// The simulation collaborator consumed by the renderer.
///
/// The renderer reads these once per frame and never writes back; the
/// instance buffer is treated as read-only storage.
pub trait BoidSimulationSource {
    /// Current number of live boids.
    fn instance_count(&self) -> u32;

    /// Device buffer of [`BoidData`] records, one per boid.
    fn instance_data_buffer(&self) -> &wgpu::Buffer;

    /// World-space center of the simulation domain.
    fn simulation_area_center(&self) -> Vec3;

    /// Full extents of the simulation domain.
    ///
    /// Radius-only (spherical) domains report `(r, 0, 0)`; see
    /// [`crate::renderer::BoundingRegion::from_simulation_area`].
    fn simulation_area_size(&self) -> Vec3;
}
