use glam::{Mat4, Vec2};

use crate::simulation::types::Bounds;

// Fixed 2D camera framing the whole run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    center: Vec2,
    half_extent: f32, // half the side of the square that must stay visible
}

impl Camera {
    // Leave some room around the outermost positions
    const MARGIN: f32 = 1.1;
    // Marker size relative to the visible area
    const MARKER_SCALE: f32 = 0.015;

    pub fn fit(bounds: Bounds) -> Self {
        let half = (bounds.width().max(bounds.height()) / 2.0) as f32 * Self::MARGIN;
        Self {
            center: bounds.center().into(),
            // A run where nothing moves still needs a visible area
            half_extent: if half > f32::EPSILON { half } else { 1.0 },
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn marker_radius(&self) -> f32 {
        self.half_extent * Self::MARKER_SCALE
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        // Keep the square in view on both wide and tall windows
        let (half_width, half_height) = if aspect >= 1.0 {
            (self.half_extent * aspect, self.half_extent)
        } else {
            (self.half_extent, self.half_extent / aspect.max(f32::EPSILON))
        };

        Mat4::orthographic_rh(
            self.center.x - half_width,  // Left
            self.center.x + half_width,  // Right
            self.center.y - half_height, // Bottom
            self.center.y + half_height, // Top
            -1.0,                        // Near
            1.0,                         // Far
        )
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;
    use crate::simulation::types::Point2D;

    fn bounds(min: (f64, f64), max: (f64, f64)) -> Bounds {
        Bounds {
            min: Point2D::new(min.0, min.1),
            max: Point2D::new(max.0, max.1),
        }
    }

    fn project(camera: &Camera, aspect: f32, x: f32, y: f32) -> Vec2 {
        let clip = camera.view_projection(aspect) * Vec4::new(x, y, 0.0, 1.0);
        Vec2::new(clip.x / clip.w, clip.y / clip.w)
    }

    #[test]
    fn center_maps_to_the_middle_of_the_screen() {
        let camera = Camera::fit(bounds((0.0, 0.0), (10.0, 4.0)));
        assert_eq!(camera.center(), Vec2::new(5.0, 2.0));
        let p = project(&camera, 1.0, 5.0, 2.0);
        assert!(p.length() < 1e-6);
    }

    #[test]
    fn everything_stays_visible_on_any_aspect() {
        let camera = Camera::fit(bounds((-10.0, -3.0), (10.0, 3.0)));
        for aspect in [0.5, 1.0, 2.0] {
            for (x, y) in [(-10.0, -3.0), (10.0, 3.0), (10.0, -3.0)] {
                let p = project(&camera, aspect, x, y);
                assert!(p.x.abs() <= 1.0 && p.y.abs() <= 1.0, "{aspect}: {p:?}");
            }
        }
    }

    #[test]
    fn still_scenes_get_a_default_size() {
        let camera = Camera::fit(bounds((3.0, 3.0), (3.0, 3.0)));
        assert_eq!(camera.marker_radius(), Camera::MARKER_SCALE);
    }
}
