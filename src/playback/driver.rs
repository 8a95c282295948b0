use std::time::{Duration, Instant};

use log::debug;

use crate::error::Result;
use crate::playback::render_state::RenderState;
use crate::rendering::surface::RenderSurface;

#[derive(Clone, Debug)]
pub struct PlaybackOptions {
    // Minimum wall-clock time between frames
    pub frame_interval: Duration,
    // Start over from frame 0 after the last frame
    pub repeat: bool,
    pub show_labels: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(1),
            repeat: true,
            show_labels: true,
        }
    }
}

/// Steps a [`RenderState`] through frames 0..N-1 at a fixed cadence.
///
/// The driver owns no state of its own beyond the frame cursor; the render
/// state and the surface are handed in on every tick.
#[derive(Debug)]
pub struct AnimationDriver {
    interval: Duration,
    repeat: bool,
    next_frame: usize,
    last_advance: Option<Instant>,
    finished: bool,
}

impl AnimationDriver {
    pub fn new(options: &PlaybackOptions) -> Self {
        Self {
            interval: options.frame_interval,
            repeat: options.repeat,
            next_frame: 0,
            last_advance: None,
            finished: false,
        }
    }

    pub fn next_frame(&self) -> usize {
        self.next_frame
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances to the next frame if at least one interval has passed since
    /// the last one, and pushes it to the surface. Returns the frame shown.
    pub fn tick<S: RenderSurface + ?Sized>(
        &mut self,
        now: Instant,
        state: &mut RenderState,
        surface: &mut S,
    ) -> Result<Option<usize>> {
        if self.finished {
            return Ok(None);
        }
        if let Some(last) = self.last_advance {
            if now.saturating_duration_since(last) < self.interval {
                return Ok(None);
            }
        }

        let frame = self.next_frame;
        state.advance(frame)?;
        state.present(surface);
        self.last_advance = Some(now);
        debug!("frame {frame} at t = {}", state.time());

        self.next_frame = frame + 1;
        if self.next_frame >= state.frame_count() {
            if self.repeat {
                self.next_frame = 0;
            } else {
                self.finished = true;
            }
        }
        Ok(Some(frame))
    }

    /// Shows every remaining frame back to back, ignoring the interval, and
    /// stops. Returns how many frames were shown.
    pub fn run_to_end<S: RenderSurface + ?Sized>(
        &mut self,
        state: &mut RenderState,
        surface: &mut S,
    ) -> Result<usize> {
        if self.finished {
            return Ok(0);
        }
        let start = self.next_frame;
        for frame in start..state.frame_count() {
            state.advance(frame)?;
            state.present(surface);
        }
        self.finished = true;
        Ok(state.frame_count() - start)
    }
}
