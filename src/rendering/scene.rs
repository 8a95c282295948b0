use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use indexmap::IndexMap;
use log::warn;

use crate::playback::palette::{Color, VisualStyle};
use crate::rendering::surface::RenderSurface;
use crate::simulation::types::{BodyId, Point2D};

// Trails are drawn at half opacity, label tags slightly faded
const TRAIL_ALPHA: f32 = 0.5;
const LABEL_ALPHA: f32 = 0.8;
const LABEL_SCALE: f32 = 0.5;

// One circle drawn as an instanced quad
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MarkerInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub color: [f32; 4],
}

// One point of a trail line strip
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TrailVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

#[derive(Debug)]
struct SceneBody {
    color: Color,
    marker: Option<Point2D>,
    trail: Vec<[f32; 2]>,
    label_anchor: Option<Point2D>,
}

/// CPU-side copy of everything on screen, laid out for the GPU.
///
/// This is the [`RenderSurface`] the window draws from; the renderer uploads
/// the instance and vertex lists once per redraw.
#[derive(Debug)]
pub struct Scene {
    bodies: IndexMap<BodyId, SceneBody>,
    marker_radius: f32,
}

impl Scene {
    pub fn new(marker_radius: f32) -> Self {
        Self {
            bodies: IndexMap::new(),
            marker_radius,
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn marker(&self, body: &BodyId) -> Option<Point2D> {
        self.bodies.get(body).and_then(|b| b.marker)
    }

    pub fn trail_len(&self, body: &BodyId) -> usize {
        self.bodies.get(body).map_or(0, |b| b.trail.len())
    }

    pub fn label_anchor(&self, body: &BodyId) -> Option<Point2D> {
        self.bodies.get(body).and_then(|b| b.label_anchor)
    }

    /// Body markers first, then a small tag at every label anchor.
    pub fn marker_instances(&self) -> Vec<MarkerInstance> {
        let markers = self.bodies.values().filter_map(|body| {
            body.marker.map(|p| MarkerInstance {
                center: p.to_f32_array(),
                radius: self.marker_radius,
                color: body.color.to_array(),
            })
        });

        // Tags sit up and to the right of the anchor, like a text label would
        let offset = self.marker_radius * 1.5;
        let labels = self.bodies.values().filter_map(|body| {
            body.label_anchor.map(|p| MarkerInstance {
                center: [p.x as f32 + offset, p.y as f32 + offset],
                radius: self.marker_radius * LABEL_SCALE,
                color: body.color.with_alpha(LABEL_ALPHA).to_array(),
            })
        });

        markers.chain(labels).collect()
    }

    /// All trails in one vertex list, plus the range of each body's line strip.
    /// Trails with fewer than two points draw nothing and are left out.
    pub fn trail_vertices(&self) -> (Vec<TrailVertex>, Vec<Range<u32>>) {
        let total = self.bodies.values().map(|b| b.trail.len()).sum();
        let mut vertices = Vec::with_capacity(total);
        let mut ranges = Vec::with_capacity(self.bodies.len());

        for body in self.bodies.values() {
            if body.trail.len() < 2 {
                continue;
            }
            let color = body.color.with_alpha(TRAIL_ALPHA).to_array();
            let start = vertices.len() as u32;
            vertices.extend(body.trail.iter().map(|&position| TrailVertex { position, color }));
            ranges.push(start..vertices.len() as u32);
        }

        (vertices, ranges)
    }

    fn body_mut(&mut self, body: &BodyId) -> Option<&mut SceneBody> {
        let found = self.bodies.get_mut(body);
        if found.is_none() {
            warn!("Ignoring update for {body}, which was never created");
        }
        found
    }
}

impl RenderSurface for Scene {
    fn create_body(&mut self, body: &BodyId, style: &VisualStyle) {
        self.bodies.insert(
            body.clone(),
            SceneBody {
                color: style.color,
                marker: None,
                trail: Vec::new(),
                label_anchor: None,
            },
        );
    }

    fn set_marker(&mut self, body: &BodyId, position: Point2D) {
        if let Some(b) = self.body_mut(body) {
            b.marker = Some(position);
        }
    }

    fn set_trail(&mut self, body: &BodyId, trail: &[Point2D]) {
        if let Some(b) = self.body_mut(body) {
            b.trail.clear();
            b.trail.extend(trail.iter().map(|p| p.to_f32_array()));
        }
    }

    fn set_label_anchor(&mut self, body: &BodyId, anchor: Point2D) {
        if let Some(b) = self.body_mut(body) {
            b.label_anchor = Some(anchor);
        }
    }
}
