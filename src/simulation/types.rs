use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// Identifies one simulated body for the lifetime of a run
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(String);

impl BodyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BodyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BodyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// A position in simulation units
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    // GPU buffers are single precision
    pub fn to_f32_array(self) -> [f32; 2] {
        [self.x as f32, self.y as f32]
    }
}

impl From<Point2D> for glam::Vec2 {
    fn from(p: Point2D) -> Self {
        glam::Vec2::new(p.x as f32, p.y as f32)
    }
}

// Positions of every tracked body at one simulated instant
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: f64,
    pub positions: HashMap<BodyId, Point2D>,
}

impl Snapshot {
    pub fn new(time: f64, positions: HashMap<BodyId, Point2D>) -> Self {
        Self { time, positions }
    }

    pub fn position(&self, body: &BodyId) -> Option<Point2D> {
        self.positions.get(body).copied()
    }
}

// Axis-aligned box around every position in a run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point2D,
    pub max: Point2D,
}

impl Bounds {
    pub fn around(p: Point2D) -> Self {
        Self { min: p, max: p }
    }

    pub fn include(&mut self, p: Point2D) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_grow_to_cover_points() {
        let mut bounds = Bounds::around(Point2D::new(1.0, 1.0));
        bounds.include(Point2D::new(-3.0, 2.0));
        bounds.include(Point2D::new(0.0, -1.0));

        assert_eq!(bounds.min, Point2D::new(-3.0, -1.0));
        assert_eq!(bounds.max, Point2D::new(1.0, 2.0));
        assert_eq!(bounds.width(), 4.0);
        assert_eq!(bounds.height(), 3.0);
        assert_eq!(bounds.center(), Point2D::new(-1.0, 0.5));
    }

    #[test]
    fn snapshot_deserializes_solver_layout() {
        let json = r#"{"time": 2.5, "positions": {"earth": {"x": 1.0, "y": -1.0}}}"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.time, 2.5);
        assert_eq!(
            snapshot.position(&BodyId::from("earth")),
            Some(Point2D::new(1.0, -1.0))
        );
        assert_eq!(snapshot.position(&BodyId::from("mars")), None);
    }
}
