use std::sync::Arc;

use anyhow::Context;
use winit::window::Window;

use crate::rendering::camera::Camera;
use crate::rendering::render_config::RenderConfig;
use crate::rendering::resources::SceneResources;
use crate::rendering::scene::Scene;

const BACKGROUND: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.03,
    a: 1.0,
};

// Draws a Scene into a window
pub struct Renderer {
    pub window: Arc<Window>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub size: winit::dpi::PhysicalSize<u32>,
    pub surface: wgpu::Surface<'static>,

    // Pipelines and bind group layouts
    pub render_config: RenderConfig,

    // Per-frame buffers
    resources: SceneResources,

    pub camera: Camera,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, camera: Camera) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .context("creating the window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no graphics adapter can draw to this window")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("requesting a graphics device")?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let surface_format = caps
            .formats
            .first()
            .copied()
            .context("the surface reports no supported formats")?;

        let render_config = RenderConfig::new(&device, surface_format);
        let resources = SceneResources::new(&device, &render_config);

        let renderer = Self {
            window,
            device,
            queue,
            size,
            surface,
            render_config,
            resources,
            camera,
        };

        // Configure surface for the first time
        renderer.configure_surface();
        renderer.update_view();

        Ok(renderer)
    }

    pub fn get_window(&self) -> &Window {
        &self.window
    }

    pub fn configure_surface(&self) {
        // A minimized window has no area to draw into
        if self.size.width == 0 || self.size.height == 0 {
            return;
        }
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: self.render_config.surface_format,
            // Request compatibility with the sRGB-format texture view we're going to create later.
            view_formats: vec![self.render_config.surface_format.add_srgb_suffix()],
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            width: self.size.width,
            height: self.size.height,
            desired_maximum_frame_latency: 2,
            present_mode: wgpu::PresentMode::AutoVsync,
        };
        self.surface.configure(&self.device, &surface_config);
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.size = new_size;
        self.configure_surface();
        self.update_view();
    }

    fn aspect(&self) -> f32 {
        if self.size.height == 0 {
            1.0
        } else {
            self.size.width as f32 / self.size.height as f32
        }
    }

    fn update_view(&self) {
        self.resources
            .update_view(&self.queue, self.camera.view_projection(self.aspect()));
    }

    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        if self.size.width == 0 || self.size.height == 0 {
            return Ok(());
        }

        let instances = scene.marker_instances();
        let (trail_vertices, trail_ranges) = scene.trail_vertices();
        self.resources
            .update_markers(&self.device, &self.queue, &instances);
        self.resources
            .update_trails(&self.device, &self.queue, &trail_vertices);

        // Create texture view
        let surface_texture = self.surface.get_current_texture()?;
        let texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor {
                format: Some(self.render_config.surface_format.add_srgb_suffix()),
                ..Default::default()
            });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Playback Command Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Playback Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(BACKGROUND),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_bind_group(0, &self.resources.bind_group, &[]);

            // Trails go underneath the markers
            if !trail_ranges.is_empty() {
                render_pass.set_pipeline(&self.render_config.trail_pipeline);
                render_pass.set_vertex_buffer(0, self.resources.trails.buffer().slice(..));
                for range in trail_ranges {
                    render_pass.draw(range, 0..1);
                }
            }

            // Draw 6 vertices (2 triangles) per marker instance
            let marker_count = self.resources.markers.len();
            if marker_count > 0 {
                render_pass.set_pipeline(&self.render_config.marker_pipeline);
                render_pass.set_vertex_buffer(0, self.resources.markers.buffer().slice(..));
                render_pass.draw(0..6, 0..marker_count);
            }
        }

        // Submit command buffer
        self.queue.submit([encoder.finish()]);

        self.window.pre_present_notify();
        surface_texture.present();

        Ok(())
    }
}
