pub mod circular_orbits;
pub mod recorded;
pub mod scenario;
pub mod trait_def;
pub mod trajectory;
pub mod types;

pub use circular_orbits::CircularOrbits;
pub use recorded::RecordedTrajectory;
pub use scenario::{BodyConfig, OrbitConfig, ScenarioConfig};
pub use trait_def::TrajectorySource;
pub use trajectory::Trajectory;
pub use types::{BodyId, Bounds, Point2D, Snapshot};
