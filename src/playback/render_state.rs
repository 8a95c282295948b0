use std::ops::Range;

use indexmap::IndexMap;

use crate::error::{PlaybackError, Result};
use crate::playback::palette::{Palette, VisualStyle};
use crate::playback::series::{CoordinateSeries, PositionSeries};
use crate::rendering::surface::RenderSurface;
use crate::simulation::trajectory::Trajectory;
use crate::simulation::types::{BodyId, Bounds, Point2D};

/// What the surface draws for one body.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderObject {
    style: VisualStyle,
    marker: Point2D,
    trail: Vec<Point2D>,
    label_anchor: Option<Point2D>,
}

impl RenderObject {
    pub fn style(&self) -> &VisualStyle {
        &self.style
    }

    pub fn marker(&self) -> Point2D {
        self.marker
    }

    /// Every position from frame 0 to the current frame, inclusive.
    pub fn trail(&self) -> &[Point2D] {
        &self.trail
    }

    /// `None` when labels are turned off.
    pub fn label_anchor(&self) -> Option<Point2D> {
        self.label_anchor
    }
}

#[derive(Debug)]
struct Track {
    series: CoordinateSeries,
    object: RenderObject,
}

impl Track {
    fn show_frame(&mut self, frame: usize) {
        let marker = self.series.point(frame);
        self.object.marker = marker;

        // The trail is a prefix of the series: cut it back on rewind, extend it
        // going forward. Either way it ends up exactly frame + 1 long.
        let trail = &mut self.object.trail;
        let len = frame + 1;
        if trail.len() > len {
            trail.truncate(len);
        } else {
            let have = trail.len();
            trail.extend(self.series.prefix(frame).skip(have));
        }

        if self.object.label_anchor.is_some() {
            self.object.label_anchor = Some(marker);
        }
    }
}

/// The visual state of every tracked body at one frame.
///
/// Created at frame 0; only [`RenderState::advance`] changes it afterwards,
/// and the state after `advance(i)` depends on nothing but `i`.
#[derive(Debug)]
pub struct RenderState {
    times: Vec<f64>,
    bounds: Bounds,
    tracks: IndexMap<BodyId, Track>,
    frame: usize,
}

impl RenderState {
    pub fn new(series: PositionSeries, palette: &Palette, show_labels: bool) -> Self {
        let styles = palette.assign(series.bodies());
        let (times, by_body, bounds) = series.into_parts();

        // Both maps are in tracked-body order
        let tracks = by_body
            .into_iter()
            .zip(styles.into_values())
            .map(|((body, series), style)| {
                let start = series.point(0);
                let object = RenderObject {
                    style,
                    marker: start,
                    trail: vec![start],
                    label_anchor: show_labels.then_some(start),
                };
                (body, Track { series, object })
            })
            .collect();

        Self {
            times,
            bounds,
            tracks,
            frame: 0,
        }
    }

    /// Builds the series and the frame-0 state in one go.
    pub fn from_trajectory(
        trajectory: Trajectory,
        tracked_bodies: &[BodyId],
        palette: &Palette,
        show_labels: bool,
    ) -> Result<Self> {
        let series = PositionSeries::build(trajectory, tracked_bodies)?;
        Ok(Self::new(series, palette, show_labels))
    }

    /// Moves every body to `frame_index`. Out-of-range frames are refused
    /// without touching the current state.
    pub fn advance(&mut self, frame_index: usize) -> Result<()> {
        if frame_index >= self.frame_count() {
            return Err(PlaybackError::FrameIndexOutOfRange {
                index: frame_index,
                valid_range: self.valid_frames(),
            });
        }

        for track in self.tracks.values_mut() {
            track.show_frame(frame_index);
        }
        self.frame = frame_index;
        Ok(())
    }

    /// Registers every body with the surface and draws the current frame.
    pub fn attach<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        for (body, track) in &self.tracks {
            surface.create_body(body, &track.object.style);
        }
        self.present(surface);
    }

    /// Pushes the current state of every body to the surface.
    pub fn present<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        for (body, track) in &self.tracks {
            let object = &track.object;
            surface.set_marker(body, object.marker);
            surface.set_trail(body, &object.trail);
            if let Some(anchor) = object.label_anchor {
                surface.set_label_anchor(body, anchor);
            }
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn frame_count(&self) -> usize {
        self.times.len()
    }

    pub fn valid_frames(&self) -> Range<usize> {
        0..self.frame_count()
    }

    /// Simulated time of the current frame.
    pub fn time(&self) -> f64 {
        self.times[self.frame]
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn body_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn get(&self, body: &BodyId) -> Option<&RenderObject> {
        self.tracks.get(body).map(|track| &track.object)
    }

    pub fn objects(&self) -> impl Iterator<Item = (&BodyId, &RenderObject)> {
        self.tracks.iter().map(|(body, track)| (body, &track.object))
    }
}
