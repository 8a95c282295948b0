use std::collections::HashMap;

use log::info;

use crate::error::{PlaybackError, Result};
use crate::simulation::scenario::{BodyConfig, ScenarioConfig};
use crate::simulation::trait_def::TrajectorySource;
use crate::simulation::trajectory::Trajectory;
use crate::simulation::types::{BodyId, Point2D, Snapshot};

// Closed-form uniform circular motion. Each body either rests at its
// `position` or circles its parent (or its `position`) with a fixed radius and
// period, so positions are exact at every sample and nothing is integrated.
pub struct CircularOrbits;

impl CircularOrbits {
    // Absorbs rounding in total_time / time_step so 1.0 / 0.1 gives 10 steps, not 11
    const STEP_TOLERANCE: f64 = 1e-9;
    /// Upper bound on generated snapshots; longer runs are refused.
    pub const MAX_SNAPSHOTS: usize = 10_000_000;

    /// Number of snapshots for a scenario: the initial one plus one per step
    /// until the elapsed time reaches `total_time`.
    pub fn snapshot_count(scenario: &ScenarioConfig) -> Result<usize> {
        let steps = (scenario.total_time / scenario.time_step - Self::STEP_TOLERANCE)
            .ceil()
            .max(0.0);
        if !steps.is_finite() || steps >= Self::MAX_SNAPSHOTS as f64 {
            return Err(PlaybackError::InvalidScenario(format!(
                "{} / {} needs more than {} snapshots",
                scenario.total_time,
                scenario.time_step,
                Self::MAX_SNAPSHOTS
            )));
        }
        Ok((steps as usize).saturating_add(1))
    }

    fn position_at(
        body: &BodyConfig,
        time: f64,
        by_id: &HashMap<&BodyId, &BodyConfig>,
    ) -> Point2D {
        let Some(orbit) = &body.orbit else {
            return body.position;
        };

        // Parents were checked to exist and not form a loop
        let center = match orbit.around.as_ref().and_then(|id| by_id.get(id)) {
            Some(parent) => Self::position_at(parent, time, by_id),
            None => body.position,
        };

        let angle = orbit.phase + std::f64::consts::TAU * time / orbit.period;
        Point2D::new(
            center.x + orbit.radius * angle.cos(),
            center.y + orbit.radius * angle.sin(),
        )
    }
}

impl TrajectorySource for CircularOrbits {
    fn name(&self) -> &str {
        "Circular orbits"
    }

    fn description(&self) -> &str {
        "Bodies on fixed circular orbits, evaluated exactly at every time step"
    }

    fn simulate(&self, scenario: &ScenarioConfig) -> Result<Trajectory> {
        scenario.validate()?;

        let by_id: HashMap<&BodyId, &BodyConfig> =
            scenario.bodies.iter().map(|body| (&body.id, body)).collect();

        let count = Self::snapshot_count(scenario)?;
        let mut snapshots = Vec::with_capacity(count);
        for step in 0..count {
            let time = step as f64 * scenario.time_step;
            let positions = scenario
                .bodies
                .iter()
                .map(|body| (body.id.clone(), Self::position_at(body, time, &by_id)))
                .collect();
            snapshots.push(Snapshot::new(time, positions));
        }

        info!(
            "Generated {} snapshots for {} bodies in {}",
            count,
            scenario.bodies.len(),
            scenario.display_name()
        );
        Trajectory::new(snapshots)
    }
}
