//! Error types for playback.
//!
//! Everything except [`PlaybackError::FrameIndexOutOfRange`] is raised while
//! loading or building, before the first frame is shown.

use std::ops::Range;
use std::path::PathBuf;

use crate::simulation::types::BodyId;

pub type Result<T, E = PlaybackError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// A snapshot lacks the position of a tracked body.
    #[error("snapshot {snapshot_index} has no position for body {body}")]
    MissingBodyInSnapshot {
        body: BodyId,
        snapshot_index: usize,
    },

    /// `advance` was called with a frame the series doesn't have.
    #[error(
        "frame {index} is outside the valid range [{}, {})",
        .valid_range.start,
        .valid_range.end
    )]
    FrameIndexOutOfRange {
        index: usize,
        valid_range: Range<usize>,
    },

    #[error("no bodies are tracked")]
    EmptyTrackedBodyList,

    #[error("body {0} is tracked more than once")]
    DuplicateTrackedBody(BodyId),

    /// A palette entry that isn't a known color. Usually two names run together.
    #[error("malformed palette entry {entry:?}: {reason}")]
    MalformedPaletteEntry { entry: String, reason: String },

    #[error("palette entry {entry:?} repeats the color of entry {first_index}")]
    DuplicatePaletteEntry { entry: String, first_index: usize },

    #[error("palette has no entries")]
    EmptyPalette,

    #[error("trajectory has no snapshots")]
    EmptyTrajectory,

    #[error("snapshot {index} goes back in time: {previous} then {current}")]
    TimeOutOfOrder {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
