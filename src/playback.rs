pub mod driver;
pub mod palette;
pub mod render_state;
pub mod series;

pub use driver::{AnimationDriver, PlaybackOptions};
pub use palette::{Color, Palette, VisualStyle};
pub use render_state::{RenderObject, RenderState};
pub use series::{CoordinateSeries, PositionSeries};
