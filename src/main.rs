use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use orbit_playback::playback::{AnimationDriver, PlaybackOptions, RenderState};
use orbit_playback::rendering::{Camera, Scene};
use orbit_playback::simulation::{
    CircularOrbits, RecordedTrajectory, ScenarioConfig, TrajectorySource,
};

#[derive(Parser, Debug)]
#[command(about = "Animate precomputed multi-body trajectories")]
struct Args {
    /// Scenario file (JSON) naming the bodies to track
    #[arg(short, long, default_value = "scenarios/earth_moon.json")]
    scenario: PathBuf,

    /// Play a recorded trajectory instead of computing circular orbits
    #[arg(short, long)]
    trajectory: Option<PathBuf>,

    /// Minimum time between frames, in milliseconds
    #[arg(long, default_value_t = 1)]
    interval_ms: u64,

    /// Stop on the last frame instead of starting over
    #[arg(long)]
    no_repeat: bool,

    /// Don't draw label tags
    #[arg(long)]
    no_labels: bool,

    /// Play every frame once without opening a window
    #[arg(long)]
    headless: bool,
}

impl Args {
    fn playback_options(&self) -> PlaybackOptions {
        PlaybackOptions {
            frame_interval: Duration::from_millis(self.interval_ms),
            repeat: !self.no_repeat,
            show_labels: !self.no_labels,
        }
    }
}

fn run_headless(mut state: RenderState, options: &PlaybackOptions) -> Result<()> {
    let mut scene = Scene::new(Camera::fit(state.bounds()).marker_radius());
    state.attach(&mut scene);

    let mut driver = AnimationDriver::new(options);
    let shown = driver.run_to_end(&mut state, &mut scene)?;
    info!("Played {shown} frames, ending at t = {}", state.time());

    for (id, object) in state.objects() {
        let marker = object.marker();
        info!(
            "{id}: ({:.4}, {:.4}), trail of {} points",
            marker.x,
            marker.y,
            scene.trail_len(id)
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scenario = ScenarioConfig::load(&args.scenario)
        .with_context(|| format!("loading scenario {}", args.scenario.display()))?;
    info!("Loaded scenario {}", scenario.display_name());

    let source: Box<dyn TrajectorySource> = match &args.trajectory {
        Some(path) => Box::new(RecordedTrajectory::new(path)),
        None => Box::new(CircularOrbits),
    };
    info!("Trajectory source: {} - {}", source.name(), source.description());
    let trajectory = source.simulate(&scenario)?;

    let options = args.playback_options();
    let state = RenderState::from_trajectory(
        trajectory,
        &scenario.tracked_bodies(),
        &scenario.palette()?,
        options.show_labels,
    )?;

    // No text rendering, so the legend goes to the log
    for (id, object) in state.objects() {
        info!("{id} is drawn in {}", object.style().name);
    }

    if args.headless {
        run_headless(state, &options)
    } else {
        orbit_playback::app::run(scenario.display_name(), state, &options)
    }
}
