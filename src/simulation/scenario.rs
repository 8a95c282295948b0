//! Scenario files.
//!
//! A scenario names the bodies to track, in the order they should be styled,
//! and how long to run. The layout follows the planet simulator's
//! `config.json`; physical fields such as `mass` or `velocity` are accepted and
//! ignored, since playback only needs the body list.
//!
//! ```json
//! {
//!   "name": "Earth-Moon",
//!   "time_step": 0.01,
//!   "total_time": 2.0,
//!   "planets": [
//!     { "id": "sun" },
//!     { "id": "earth", "orbit": { "radius": 1.0, "period": 1.0 } },
//!     { "id": "moon", "orbit": { "around": "earth", "radius": 0.2, "period": 0.075 } }
//!   ],
//!   "palette": ["gold", "dodgerblue", "slategray"]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{PlaybackError, Result};
use crate::playback::palette::Palette;
use crate::simulation::types::{BodyId, Point2D};

#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub time_step: f64,
    pub total_time: f64,
    #[serde(alias = "planets")]
    pub bodies: Vec<BodyConfig>,
    // Color names or #rrggbb, in body order; the default palette when absent
    #[serde(default)]
    pub palette: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub id: BodyId,
    // Resting position, or orbit center when the orbit has no parent
    #[serde(default)]
    pub position: Point2D,
    #[serde(default)]
    pub orbit: Option<OrbitConfig>,
}

/// Uniform circular motion, `radius` away from the parent (or `position`).
#[derive(Deserialize, Debug, Clone)]
pub struct OrbitConfig {
    #[serde(default)]
    pub around: Option<BodyId>,
    pub radius: f64,
    // Negative periods orbit clockwise
    pub period: f64,
    // Starting angle in radians
    #[serde(default)]
    pub phase: f64,
}

impl ScenarioConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| PlaybackError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario: ScenarioConfig =
            serde_json::from_str(&contents).map_err(|source| PlaybackError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Untitled scenario")
    }

    /// Bodies in the order they appear in the file.
    pub fn tracked_bodies(&self) -> Vec<BodyId> {
        self.bodies.iter().map(|body| body.id.clone()).collect()
    }

    pub fn palette(&self) -> Result<Palette> {
        match &self.palette {
            Some(names) => Palette::from_names(names),
            None => Ok(Palette::default()),
        }
    }

    pub fn body(&self, id: &BodyId) -> Option<&BodyConfig> {
        self.bodies.iter().find(|body| &body.id == id)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bodies.is_empty() {
            return Err(PlaybackError::EmptyTrackedBodyList);
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(PlaybackError::InvalidScenario(format!(
                "time_step must be positive, got {}",
                self.time_step
            )));
        }
        if !(self.total_time.is_finite() && self.total_time >= 0.0) {
            return Err(PlaybackError::InvalidScenario(format!(
                "total_time must not be negative, got {}",
                self.total_time
            )));
        }

        let mut parents: HashMap<&BodyId, Option<&BodyId>> = HashMap::new();
        for body in &self.bodies {
            let parent = body.orbit.as_ref().and_then(|orbit| orbit.around.as_ref());
            if parents.insert(&body.id, parent).is_some() {
                return Err(PlaybackError::DuplicateTrackedBody(body.id.clone()));
            }
            if let Some(orbit) = &body.orbit {
                if !(orbit.period.is_finite() && orbit.period != 0.0) {
                    return Err(PlaybackError::InvalidScenario(format!(
                        "{} has orbital period {}",
                        body.id, orbit.period
                    )));
                }
                if !orbit.radius.is_finite() || !orbit.phase.is_finite() {
                    return Err(PlaybackError::InvalidScenario(format!(
                        "{} has a non-finite orbit",
                        body.id
                    )));
                }
            }
        }

        for body in &self.bodies {
            // A chain longer than the body count must revisit someone
            let mut current = &body.id;
            for _ in 0..=self.bodies.len() {
                match parents.get(current) {
                    Some(Some(parent)) => current = *parent,
                    Some(None) => break,
                    None => {
                        return Err(PlaybackError::InvalidScenario(format!(
                            "{} orbits unknown body {current}",
                            body.id
                        )));
                    }
                }
                if current == &body.id {
                    return Err(PlaybackError::InvalidScenario(format!(
                        "orbit of {} loops back on itself",
                        body.id
                    )));
                }
            }
        }

        Ok(())
    }
}
