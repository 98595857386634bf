//! The boid instancing material: pipeline plus shader-input state.
//!
//! A material couples the instancing render pipeline with the three
//! shader inputs the renderer mutates every frame. The original contract
//! named them; here each name maps to a fixed binding:
//!
//! | Name              | Binding                  | Meaning                    |
//! |-------------------|--------------------------|----------------------------|
//! | `_BoidDataBuffer` | group 1, binding 0       | per-instance boid state    |
//! | `_ObjectScale`    | params uniform, offset 0 | uniform per-instance scale |
//! | `_IsFreeze`       | params uniform, offset 12| pauses shading-stage motion|
//!
//! Shader-input state is shared: anything else drawing with the same
//! material instance sees the same bindings. All mutation happens on the
//! render thread, serialized by the frame loop.

use glam::Vec3;

use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DEPTH_FORMAT;
use crate::mesh::MeshVertex;

/// Uniform block carrying the scalar shader inputs.
///
/// Must match the WGSL `BoidParams` struct layout (vec3 is 16-byte
/// aligned; the block rounds up to 32 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct BoidParams {
    object_scale: [f32; 3],
    // 0/1 integer sentinel, not a bool: the shader contract expects i32
    is_freeze: i32,
    time: f32,
    _pad: [f32; 3],
}

impl Default for BoidParams {
    fn default() -> Self {
        Self {
            object_scale: [1.0; 3],
            is_freeze: 0,
            time: 0.0,
            _pad: [0.0; 3],
        }
    }
}

/// Render pipeline and shader-input bindings for the instanced boid draw.
pub struct BoidMaterial {
    pipeline: wgpu::RenderPipeline,
    camera_layout: wgpu::BindGroupLayout,
    instance_layout: wgpu::BindGroupLayout,
    params_buffer: wgpu::Buffer,
    params: BoidParams,
    instance_bind_group: Option<wgpu::BindGroup>,
}

impl BoidMaterial {
    /// Build the instancing pipeline against the context's surface format.
    pub fn new(context: &RenderContext) -> Self {
        let device = &context.device;
        let shader =
            device.create_shader_module(wgpu::include_wgsl!("boids.wgsl"));

        let camera_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Boid Camera Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let instance_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Boid Instance Layout"),
                entries: &[
                    // _BoidDataBuffer
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Storage {
                                read_only: true,
                            },
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    // _ObjectScale / _IsFreeze params
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::VERTEX
                            | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            });

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Boid Material Layout"),
                bind_group_layouts: &[&camera_layout, &instance_layout],
                push_constant_ranges: &[],
            });

        let pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Boid Material Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[MeshVertex::LAYOUT],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        let params = BoidParams::default();
        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Boid Params"),
            size: size_of::<BoidParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            camera_layout,
            instance_layout,
            params_buffer,
            params,
            instance_bind_group: None,
        }
    }

    /// Layout for the camera bind group (group 0).
    pub fn camera_layout(&self) -> &wgpu::BindGroupLayout {
        &self.camera_layout
    }

    /// Create a camera bind group over the given uniform buffer.
    pub fn create_camera_bind_group(
        &self,
        device: &wgpu::Device,
        camera_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Boid Camera Bind Group"),
            layout: &self.camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        })
    }

    /// Bind the per-instance state buffer (`_BoidDataBuffer`).
    ///
    /// Recreates the instance bind group; called every frame since the
    /// simulation may swap or reallocate its buffer between frames.
    pub fn set_instance_buffer(
        &mut self,
        device: &wgpu::Device,
        buffer: &wgpu::Buffer,
    ) {
        self.instance_bind_group =
            Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Boid Instance Bind Group"),
                layout: &self.instance_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: self.params_buffer.as_entire_binding(),
                    },
                ],
            }));
    }

    /// Set the uniform per-instance scale (`_ObjectScale`).
    pub fn set_object_scale(&mut self, queue: &wgpu::Queue, scale: Vec3) {
        self.params.object_scale = scale.to_array();
        self.upload_params(queue);
    }

    /// Set the freeze flag (`_IsFreeze`, 0/1 integer sentinel).
    pub fn set_freeze(&mut self, queue: &wgpu::Queue, freeze: i32) {
        self.params.is_freeze = freeze;
        self.upload_params(queue);
    }

    /// Advance the shading-stage clock driving wing flap.
    pub fn set_time(&mut self, queue: &wgpu::Queue, time: f32) {
        self.params.time = time;
        self.upload_params(queue);
    }

    fn upload_params(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.params_buffer,
            0,
            bytemuck::bytes_of(&self.params),
        );
    }

    /// Set the pipeline and both bind groups on the pass.
    ///
    /// Returns `false` (nothing bound) if no instance buffer has been set.
    pub fn bind<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) -> bool {
        let Some(ref instance_bind_group) = self.instance_bind_group else {
            return false;
        };
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, instance_bind_group, &[]);
        true
    }
}
