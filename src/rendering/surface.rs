use crate::playback::palette::VisualStyle;
use crate::simulation::types::{BodyId, Point2D};

/// Anything that can draw the bodies of a playback.
///
/// The render state calls `create_body` once per body and then the setters
/// after every frame advance. Implementations only store what they're given;
/// redrawing is up to whoever owns the surface.
pub trait RenderSurface {
    fn create_body(&mut self, body: &BodyId, style: &VisualStyle);

    fn set_marker(&mut self, body: &BodyId, position: Point2D);

    fn set_trail(&mut self, body: &BodyId, trail: &[Point2D]);

    fn set_label_anchor(&mut self, body: &BodyId, anchor: Point2D);
}
