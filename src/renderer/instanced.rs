//! Indirect instanced rendering of the whole flock.
//!
//! One renderer, one draw: every frame the current index count and
//! instance count are written into a five-word argument record, uploaded,
//! and consumed by a single `draw_indexed_indirect`. The renderer owns no
//! simulation state; everything per-boid comes from the injected
//! [`BoidSimulationSource`].

use glam::Vec3;

use crate::camera::Camera;
use crate::gpu::render_context::RenderContext;
use crate::material::BoidMaterial;
use crate::mesh::InstanceMesh;
use crate::renderer::{BoundingRegion, IndirectDrawArgs};
use crate::sim::BoidSimulationSource;

/// Submesh of the instance mesh drawn for every boid.
const SUBMESH: usize = 0;

/// Per-renderer configuration, immutable during a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Uniform scale applied to every instance.
    pub object_scale: Vec3,
    /// Freeze flag, 0/1 integer sentinel (the shader contract expects an
    /// integer, so it is carried as one end to end).
    pub freeze: i32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            object_scale: Vec3::splat(0.5),
            freeze: 0,
        }
    }
}

/// Renders the flock with one indirect instanced draw per frame.
///
/// Lifecycle: Uninitialized → Initialized ([`Self::initialize`] allocates
/// the device-side argument record) → Shutdown ([`Self::shutdown`]
/// releases it). [`Self::render_frame`] only does work while initialized;
/// missing configuration degrades to a silent skip so the frame loop is
/// never interrupted.
pub struct InstancedBoidRenderer {
    config: RenderConfig,
    mesh: Option<InstanceMesh>,
    material: Option<BoidMaterial>,
    source: Option<Box<dyn BoidSimulationSource>>,
    args: IndirectDrawArgs,
    args_buffer: Option<wgpu::Buffer>,
}

impl InstancedBoidRenderer {
    /// Renderer with no mesh, material, or source bound yet.
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            mesh: None,
            material: None,
            source: None,
            args: IndirectDrawArgs::default(),
            args_buffer: None,
        }
    }

    /// Assign the mesh instanced across the flock.
    pub fn set_mesh(&mut self, mesh: InstanceMesh) {
        self.mesh = Some(mesh);
    }

    /// Assign the material (pipeline + shader inputs).
    pub fn set_material(&mut self, material: BoidMaterial) {
        self.material = Some(material);
    }

    /// Inject the simulation collaborator.
    pub fn set_source(&mut self, source: Box<dyn BoidSimulationSource>) {
        self.source = Some(source);
    }

    /// Set the freeze flag (0/1 sentinel) for subsequent frames.
    pub fn set_freeze(&mut self, freeze: i32) {
        self.config.freeze = freeze;
    }

    /// Set the per-instance scale for subsequent frames.
    pub fn set_object_scale(&mut self, scale: Vec3) {
        self.config.object_scale = scale;
    }

    /// The material, for wiring camera bind groups.
    pub fn material(&self) -> Option<&BoidMaterial> {
        self.material.as_ref()
    }

    /// Whether the device-side argument record is allocated.
    pub fn is_initialized(&self) -> bool {
        self.args_buffer.is_some()
    }

    /// Allocate the device-side indirect argument record.
    ///
    /// A second call releases the previous record and allocates a fresh
    /// one (release-then-reallocate).
    pub fn initialize(&mut self, device: &wgpu::Device) {
        if let Some(previous) = self.args_buffer.take() {
            log::debug!("re-initialize: releasing previous args buffer");
            previous.destroy();
        }
        self.args_buffer =
            Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Boid Indirect Args"),
                size: IndirectDrawArgs::SIZE,
                usage: wgpu::BufferUsages::INDIRECT
                    | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
    }

    /// Release the device-side argument record.
    ///
    /// Idempotent; safe before [`Self::initialize`].
    pub fn shutdown(&mut self) {
        if let Some(buffer) = self.args_buffer.take() {
            log::debug!("releasing args buffer");
            buffer.destroy();
        }
    }

    /// Draw the flock into the given targets. Called once per frame tick.
    ///
    /// Silent no-op when the material or source is unset, the renderer is
    /// uninitialized, or the adapter cannot execute indirect draws. Each
    /// valid frame re-reads the instance count from the source, uploads
    /// the argument record, refreshes the material's shader inputs, and
    /// issues exactly one indirect draw of submesh 0 — skipped only when
    /// the simulation's bounding region falls outside the camera frustum.
    ///
    /// Device-level faults (allocation, upload, draw) are not handled
    /// here; they propagate through wgpu to the device's owner.
    pub fn render_frame(
        &mut self,
        context: &RenderContext,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        camera: &Camera,
        camera_bind_group: &wgpu::BindGroup,
        time: f32,
    ) {
        if !self.preconditions_met(context.supports_indirect_draw) {
            log::trace!("skipping boid draw: preconditions not met");
            return;
        }
        let Self {
            config,
            mesh,
            material: Some(material),
            source: Some(source),
            args,
            args_buffer: Some(args_buffer),
        } = self
        else {
            return;
        };

        // Argument record: submesh-0 index count and the live instance
        // count, read fresh from the source every frame.
        let index_count =
            mesh.as_ref().map_or(0, |m| m.index_count(SUBMESH));
        *args = IndirectDrawArgs::for_frame(
            index_count,
            source.instance_count(),
        );
        context
            .queue
            .write_buffer(args_buffer, 0, bytemuck::bytes_of(args));

        // Shader inputs: instance buffer, scale, freeze, clock.
        material.set_instance_buffer(
            &context.device,
            source.instance_data_buffer(),
        );
        material.set_object_scale(&context.queue, config.object_scale);
        material.set_freeze(&context.queue, config.freeze);
        material.set_time(&context.queue, time);

        let Some(mesh) = mesh.as_ref() else {
            // Args uploaded with index count 0; nothing to bind or draw.
            return;
        };

        let region = BoundingRegion::from_simulation_area(
            source.simulation_area_center(),
            source.simulation_area_size(),
        );
        if !camera.frustum().intersects_region(&region) {
            log::trace!("flock bounding region culled");
            return;
        }

        let mut encoder = context.create_encoder();
        {
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("boid instanced pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: color_view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Load,
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: depth_view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Load,
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

            if material.bind(&mut render_pass, camera_bind_group) {
                render_pass
                    .set_vertex_buffer(0, mesh.vertex_buffer().slice(..));
                render_pass.set_index_buffer(
                    mesh.index_buffer().slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                render_pass.draw_indexed_indirect(args_buffer, 0);
            }
        }
        context.submit(encoder);
    }

    /// The graceful-degradation gate: all of these must hold before any
    /// buffer write or draw happens.
    fn preconditions_met(&self, supports_indirect_draw: bool) -> bool {
        supports_indirect_draw
            && self.material.is_some()
            && self.source.is_some()
            && self.args_buffer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{MeshData, MeshVertex};

    struct NullSource;

    impl BoidSimulationSource for NullSource {
        fn instance_count(&self) -> u32 {
            5000
        }

        fn instance_data_buffer(&self) -> &wgpu::Buffer {
            unreachable!("CPU-side tests never touch the device buffer")
        }

        fn simulation_area_center(&self) -> Vec3 {
            Vec3::ZERO
        }

        fn simulation_area_size(&self) -> Vec3 {
            Vec3::new(10.0, 0.0, 0.0)
        }
    }

    #[test]
    fn test_shutdown_before_initialize_is_safe() {
        let mut renderer = InstancedBoidRenderer::new(RenderConfig::default());
        renderer.shutdown();
        assert!(!renderer.is_initialized());
    }

    #[test]
    fn test_double_shutdown_is_safe() {
        let mut renderer = InstancedBoidRenderer::new(RenderConfig::default());
        renderer.shutdown();
        renderer.shutdown();
        assert!(!renderer.is_initialized());
    }

    #[test]
    fn test_preconditions_fail_without_material_or_source() {
        let mut renderer = InstancedBoidRenderer::new(RenderConfig::default());
        assert!(!renderer.preconditions_met(true));

        // A source alone is not enough: material and args buffer missing
        renderer.set_source(Box::new(NullSource));
        assert!(!renderer.preconditions_met(true));
    }

    #[test]
    fn test_preconditions_fail_without_indirect_support() {
        let renderer = InstancedBoidRenderer::new(RenderConfig::default());
        assert!(!renderer.preconditions_met(false));
    }

    #[test]
    fn test_frame_scenario_args_and_bounds() {
        // 900-index mesh, 5000 instances, radius-only area of 10
        let vertex = MeshVertex {
            position: [0.0; 3],
            normal: [0.0, 1.0, 0.0],
            uv: [0.0; 2],
        };
        let data = MeshData::single(vec![vertex], vec![0; 900]);
        let source = NullSource;

        let args = IndirectDrawArgs::for_frame(
            data.index_count(SUBMESH),
            source.instance_count(),
        );
        assert_eq!(args.to_array(), [900, 5000, 0, 0, 0]);

        let region = BoundingRegion::from_simulation_area(
            source.simulation_area_center(),
            source.simulation_area_size(),
        );
        assert_eq!(region.center, Vec3::ZERO);
        assert_eq!(region.size, Vec3::splat(20.0));
    }

    #[test]
    fn test_unset_mesh_yields_zero_index_count() {
        let renderer = InstancedBoidRenderer::new(RenderConfig::default());
        let index_count =
            renderer.mesh.as_ref().map_or(0, |m| m.index_count(SUBMESH));
        let args = IndirectDrawArgs::for_frame(index_count, 42);
        assert_eq!(args.to_array(), [0, 42, 0, 0, 0]);
    }
}
