use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlaybackError, Result};
use crate::simulation::types::Snapshot;

/// The full, time-ordered history of a run. Never empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Snapshot>", into = "Vec<Snapshot>")]
pub struct Trajectory {
    snapshots: Vec<Snapshot>,
}

impl Trajectory {
    pub fn new(snapshots: Vec<Snapshot>) -> Result<Self> {
        if snapshots.is_empty() {
            return Err(PlaybackError::EmptyTrajectory);
        }
        for (index, pair) in snapshots.windows(2).enumerate() {
            // NaN never compares as ordered, so it's rejected here too
            if !(pair[0].time <= pair[1].time) {
                return Err(PlaybackError::TimeOutOfOrder {
                    index: index + 1,
                    previous: pair[0].time,
                    current: pair[1].time,
                });
            }
        }
        Ok(Self { snapshots })
    }

    /// Reads the `[{"time": .., "positions": {..}}, ..]` layout.
    pub fn load_json(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| PlaybackError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| PlaybackError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn start_time(&self) -> f64 {
        self.snapshots[0].time
    }

    pub fn end_time(&self) -> f64 {
        self.snapshots[self.snapshots.len() - 1].time
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

impl TryFrom<Vec<Snapshot>> for Trajectory {
    type Error = PlaybackError;

    fn try_from(snapshots: Vec<Snapshot>) -> Result<Self> {
        Self::new(snapshots)
    }
}

impl From<Trajectory> for Vec<Snapshot> {
    fn from(trajectory: Trajectory) -> Self {
        trajectory.snapshots
    }
}
