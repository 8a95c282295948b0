pub mod camera;
pub mod render_config;
pub mod renderer;
pub(crate) mod resources;
pub mod scene;
pub mod surface;

pub use camera::Camera;
pub use render_config::RenderConfig;
pub use renderer::Renderer;
pub use scene::Scene;
pub use surface::RenderSurface;
