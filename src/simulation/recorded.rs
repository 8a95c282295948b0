use std::path::PathBuf;

use log::info;

use crate::error::Result;
use crate::simulation::scenario::ScenarioConfig;
use crate::simulation::trait_def::TrajectorySource;
use crate::simulation::trajectory::Trajectory;

// Replays snapshots an external solver wrote to disk
pub struct RecordedTrajectory {
    path: PathBuf,
}

impl RecordedTrajectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TrajectorySource for RecordedTrajectory {
    fn name(&self) -> &str {
        "Recorded trajectory"
    }

    fn description(&self) -> &str {
        "Snapshots loaded from a JSON file produced by an external solver"
    }

    // The scenario only picks which recorded bodies get tracked
    fn simulate(&self, _scenario: &ScenarioConfig) -> Result<Trajectory> {
        let trajectory = Trajectory::load_json(&self.path)?;
        info!(
            "Loaded {} snapshots from {} (t = {} to {})",
            trajectory.len(),
            self.path.display(),
            trajectory.start_time(),
            trajectory.end_time()
        );
        Ok(trajectory)
    }
}
