use std::sync::Arc;
use std::time::Instant;

use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::playback::{AnimationDriver, PlaybackOptions, RenderState};
use crate::rendering::{Camera, Renderer, Scene};

// Window front end for a playback
pub struct App {
    name: String,
    state: RenderState,
    scene: Scene,
    driver: AnimationDriver,
    camera: Camera,
    renderer: Option<Renderer>,
    // First fatal error, returned from run() once the loop exits
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(name: impl Into<String>, state: RenderState, options: &PlaybackOptions) -> Self {
        let camera = Camera::fit(state.bounds());
        let mut scene = Scene::new(camera.marker_radius());
        state.attach(&mut scene);

        Self {
            name: name.into(),
            state,
            scene,
            driver: AnimationDriver::new(options),
            camera,
            renderer: None,
            error: None,
        }
    }

    fn title(&self) -> String {
        format!(
            "{} - frame {}/{} - t = {:.3}",
            self.name,
            self.state.frame() + 1,
            self.state.frame_count(),
            self.state.time()
        )
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{err:#}");
        self.error.get_or_insert(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let advanced = match self
            .driver
            .tick(Instant::now(), &mut self.state, &mut self.scene)
        {
            Ok(frame) => frame,
            Err(err) => return self.fail(event_loop, err.into()),
        };
        let title = advanced.map(|_| self.title());

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        if let Some(title) = title {
            renderer.get_window().set_title(&title);
        }

        match renderer.render(&self.scene) {
            Ok(()) => {}
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                renderer.configure_surface();
            }
            Err(wgpu::SurfaceError::Timeout) => warn!("Surface timeout"),
            Err(err) => return self.fail(event_loop, anyhow::anyhow!("rendering failed: {err}")),
        }

        // Emits a new redraw requested event.
        renderer.get_window().request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }

        let attributes = Window::default_attributes().with_title(self.title());
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err.into()),
        };

        match pollster::block_on(Renderer::new(window.clone(), self.camera)) {
            Ok(renderer) => {
                info!("Window created for {}", self.name);
                self.renderer = Some(renderer);
                window.request_redraw();
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                info!("Window closed; stopping");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::Resized(size) => {
                // Reconfigures the size of the surface. We do not re-render
                // here as this event is always followed up by redraw request.
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
            }
            _ => (),
        }
    }
}

/// Opens a window and plays `state` until it is closed.
pub fn run(name: &str, state: RenderState, options: &PlaybackOptions) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(name, state, options);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
