//! Plays back precomputed multi-body trajectories as an animation: one
//! colored marker per body, a trail of everywhere it has been so far, and an
//! optional label tag.

pub mod app;
pub mod error;
pub mod playback;
pub mod rendering;
pub mod simulation;

pub use error::{PlaybackError, Result};
