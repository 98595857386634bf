//! Static scatter source for demos and smoke tests.
//!
//! Places a fixed flock uniformly inside a spherical domain with random
//! headings and uploads it once. Nothing moves: this is a stand-in for a
//! real compute-driven simulation, useful for exercising the render path
//! without one.

use glam::Vec3;
use rand::Rng;

use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::sim::{BoidData, BoidSimulationSource};

/// A [`BoidSimulationSource`] holding static, randomly scattered boids.
pub struct ScatterSource {
    buffer: TypedBuffer<BoidData>,
    center: Vec3,
    radius: f32,
}

impl ScatterSource {
    /// Scatter `count` boids inside a sphere of `radius` around `center`.
    pub fn new(
        device: &wgpu::Device,
        count: u32,
        center: Vec3,
        radius: f32,
    ) -> Self {
        let mut rng = rand::rng();
        let boids: Vec<BoidData> = (0..count)
            .map(|_| {
                let position = center + sample_in_ball(&mut rng) * radius;
                let velocity = sample_in_ball(&mut rng).normalize_or(Vec3::Z);
                BoidData::new(position, velocity)
            })
            .collect();

        log::info!("scattered {count} boids in radius {radius} domain");

        let buffer = TypedBuffer::new_with_data(
            device,
            "Boid Instance Data",
            &boids,
            wgpu::BufferUsages::STORAGE,
        );

        Self {
            buffer,
            center,
            radius,
        }
    }
}

impl BoidSimulationSource for ScatterSource {
    fn instance_count(&self) -> u32 {
        self.buffer.count() as u32
    }

    fn instance_data_buffer(&self) -> &wgpu::Buffer {
        self.buffer.buffer()
    }

    fn simulation_area_center(&self) -> Vec3 {
        self.center
    }

    fn simulation_area_size(&self) -> Vec3 {
        // Radius-only domain; the renderer expands this to a cube.
        Vec3::new(self.radius, 0.0, 0.0)
    }
}

/// Uniform sample inside the unit ball (rejection from the unit cube).
fn sample_in_ball<R: Rng>(rng: &mut R) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        );
        if v.length_squared() <= 1.0 {
            return v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::render_context::RenderContext;
    use crate::material::BoidMaterial;

    #[test]
    fn test_ball_samples_stay_inside_unit_sphere() {
        let mut rng = rand::rng();
        for _ in 0..1000 {
            let v = sample_in_ball(&mut rng);
            assert!(v.length() <= 1.0 + f32::EPSILON);
        }
    }

    #[test]
    fn test_empty_flock_reports_zero_and_stays_bindable() {
        let Ok(context) = pollster::block_on(RenderContext::headless(4, 4))
        else {
            return;
        };
        let source = ScatterSource::new(&context.device, 0, Vec3::ZERO, 8.0);
        assert_eq!(source.instance_count(), 0);
        // The instance buffer must never be zero-sized, or binding it as
        // the storage input would fail device validation
        assert!(source.instance_data_buffer().size() > 0);

        let mut material = BoidMaterial::new(&context);
        material.set_instance_buffer(
            &context.device,
            source.instance_data_buffer(),
        );
        // Pump the device so a validation error would surface
        let encoder = context.create_encoder();
        context.submit(encoder);
    }
}
