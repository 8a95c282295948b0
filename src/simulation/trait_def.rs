use crate::error::Result;
use crate::simulation::scenario::ScenarioConfig;
use crate::simulation::trajectory::Trajectory;

/// A trait that defines the interface for anything that can produce a trajectory
pub trait TrajectorySource {
    /// Name of the source
    fn name(&self) -> &str;

    /// Description of the source
    fn description(&self) -> &str;

    /// Produce the whole trajectory for a scenario in one synchronous call
    fn simulate(&self, scenario: &ScenarioConfig) -> Result<Trajectory>;
}
