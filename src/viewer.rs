//! Standalone flock visualization window backed by winit.
//!
//! Wires a scatter source, the butterfly instance mesh, and the boid
//! material into an [`InstancedBoidRenderer`] and drives `render_frame`
//! once per redraw. Space toggles the freeze flag.
//!
//! ```no_run
//! # use flockvis::viewer::Viewer;
//! Viewer::builder().with_title("Flock").build().run().unwrap();
//! ```

use std::{sync::Arc, time::Instant};

use glam::Vec3;
use wgpu::util::DeviceExt;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    camera::CameraUniform,
    error::FlockvisError,
    gpu::{render_context::RenderContext, texture::DepthTarget},
    material::BoidMaterial,
    mesh::{butterfly, InstanceMesh},
    options::Options,
    renderer::InstancedBoidRenderer,
    sim::ScatterSource,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: "Flockvis".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays a scattered flock.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns `FlockvisError::Viewer` if the event loop cannot be created
    /// or exits with an error.
    pub fn run(self) -> Result<(), FlockvisError> {
        let event_loop = EventLoop::new()
            .map_err(|e| FlockvisError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            state: None,
            start_time: Instant::now(),
            options: self.options,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| FlockvisError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// GPU-side state created once the window exists.
struct ViewerState {
    context: RenderContext,
    renderer: InstancedBoidRenderer,
    depth: DepthTarget,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
}

impl ViewerState {
    fn new(
        window: Arc<Window>,
        size: (u32, u32),
        options: &Options,
    ) -> Result<Self, FlockvisError> {
        let context = pollster::block_on(RenderContext::new(window, size))?;

        let material = BoidMaterial::new(&context);
        let camera_uniform = CameraUniform::new();
        let camera_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform"),
                contents: bytemuck::bytes_of(&camera_uniform),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );
        let camera_bind_group = material
            .create_camera_bind_group(&context.device, &camera_buffer);

        let source = ScatterSource::new(
            &context.device,
            options.render.boid_count,
            Vec3::ZERO,
            options.render.area_radius,
        );
        let mesh = InstanceMesh::from_data(
            &context.device,
            "Butterfly",
            &butterfly(1.0, 1.0),
        );

        let mut renderer =
            InstancedBoidRenderer::new(options.render.config());
        renderer.set_material(material);
        renderer.set_mesh(mesh);
        renderer.set_source(Box::new(source));
        renderer.initialize(&context.device);

        let depth = DepthTarget::new(&context.device, size.0, size.1);

        Ok(Self {
            context,
            renderer,
            depth,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.depth = DepthTarget::new(&self.context.device, width, height);
    }

    fn render(&mut self, options: &Options, time: f32) {
        let aspect = self.context.config.width as f32
            / self.context.config.height.max(1) as f32;
        let camera = options.camera.camera(aspect);
        self.camera_uniform.update(&camera);
        self.context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&self.camera_uniform),
        );

        let frame = match self.context.get_next_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) =
                    (self.context.config.width, self.context.config.height);
                self.resize(w, h);
                return;
            }
            Err(e) => {
                log::error!("surface error: {e:?}");
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Clear pass; the boid pass loads on top of it.
        let [r, g, b] = options.render.background;
        let mut encoder = self.context.create_encoder();
        {
            let _clear =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("clear pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: f64::from(r),
                                    g: f64::from(g),
                                    b: f64::from(b),
                                    a: 1.0,
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
        }
        self.context.submit(encoder);

        self.renderer.render_frame(
            &self.context,
            &view,
            &self.depth.view,
            &camera,
            &self.camera_bind_group,
            time,
        );

        frame.present();
    }
}

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    state: Option<ViewerState>,
    start_time: Instant,
    options: Options,
    title: String,
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let size = (inner.width.max(1), inner.height.max(1));
        let state =
            match ViewerState::new(window.clone(), size, &self.options) {
                Ok(s) => s,
                Err(e) => {
                    log::error!("failed to initialize GPU state: {e}");
                    event_loop.exit();
                    return;
                }
            };

        window.request_redraw();
        self.window = Some(window);
        self.state = Some(state);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(state) = &mut self.state {
                    state.renderer.shutdown();
                }
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(state) = &mut self.state {
                    state.resize(size.width.max(1), size.height.max(1));
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key
                        == PhysicalKey::Code(KeyCode::Space)
                {
                    // Space toggles the 0/1 freeze sentinel
                    self.options.render.freeze =
                        1 - self.options.render.freeze;
                    if let Some(state) = &mut self.state {
                        state
                            .renderer
                            .set_freeze(self.options.render.freeze);
                    }
                    log::info!(
                        "freeze = {}",
                        self.options.render.freeze
                    );
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(state)) =
                    (&self.window, &mut self.state)
                {
                    let time = self.start_time.elapsed().as_secs_f32();
                    state.render(&self.options, time);
                    window.request_redraw();
                }
            }

            _ => (),
        }
    }
}
