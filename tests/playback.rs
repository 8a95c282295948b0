use std::collections::HashMap;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use orbit_playback::PlaybackError;
use orbit_playback::playback::{Palette, RenderState};
use orbit_playback::rendering::{RenderSurface, Scene};
use orbit_playback::simulation::{
    BodyId, CircularOrbits, Point2D, ScenarioConfig, Snapshot, Trajectory, TrajectorySource,
};

/// Build a snapshot from (id, x, y) triples
fn snapshot(time: f64, positions: &[(&str, f64, f64)]) -> Snapshot {
    Snapshot::new(
        time,
        positions
            .iter()
            .map(|&(id, x, y)| (BodyId::from(id), Point2D::new(x, y)))
            .collect::<HashMap<_, _>>(),
    )
}

fn ids(names: &[&str]) -> Vec<BodyId> {
    names.iter().map(|&name| BodyId::from(name)).collect()
}

/// Sun at rest, earth a quarter turn further each snapshot
fn sun_and_earth() -> Trajectory {
    Trajectory::new(vec![
        snapshot(0.0, &[("sun", 0.0, 0.0), ("earth", 1.0, 0.0)]),
        snapshot(0.25, &[("sun", 0.0, 0.0), ("earth", 0.0, 1.0)]),
        snapshot(0.5, &[("sun", 0.0, 0.0), ("earth", -1.0, 0.0)]),
    ])
    .unwrap()
}

/// Render state for `bodies` with the default palette
fn play(trajectory: Trajectory, bodies: &[BodyId], show_labels: bool) -> RenderState {
    RenderState::from_trajectory(trajectory, bodies, &Palette::default(), show_labels).unwrap()
}

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

/// A random walk for `bodies` over `frames` snapshots
fn random_trajectory(rng: &mut StdRng, bodies: &[BodyId], frames: usize) -> Trajectory {
    let mut current: Vec<Point2D> = bodies.iter().map(|_| Point2D::ORIGIN).collect();
    let snapshots = (0..frames)
        .map(|i| {
            for p in current.iter_mut() {
                p.x += rng.gen_range(-1.0..1.0);
                p.y += rng.gen_range(-1.0..1.0);
            }
            let positions = bodies.iter().cloned().zip(current.iter().copied()).collect();
            Snapshot::new(i as f64 * 0.1, positions)
        })
        .collect();
    Trajectory::new(snapshots).unwrap()
}

#[test]
fn third_frame_shows_whole_path_so_far() {
    let mut state = play(sun_and_earth(), &ids(&["sun", "earth"]), true);
    state.advance(2).unwrap();

    let earth = state.get(&"earth".into()).unwrap();
    assert_eq!(earth.marker(), Point2D::new(-1.0, 0.0));
    assert_eq!(
        earth.trail(),
        &[Point2D::new(1.0, 0.0), Point2D::new(0.0, 1.0), Point2D::new(-1.0, 0.0)]
    );
    assert_eq!(earth.label_anchor(), Some(Point2D::new(-1.0, 0.0)));

    let sun = state.get(&"sun".into()).unwrap();
    assert_eq!(sun.trail(), &[Point2D::ORIGIN; 3]);
    assert_eq!(state.time(), 0.5);
}

#[test]
fn out_of_range_frame_is_refused() {
    let mut state = play(sun_and_earth(), &ids(&["sun", "earth"]), true);
    state.advance(1).unwrap();
    let before: Vec<_> = state.objects().map(|(_, o)| o.clone()).collect();

    match state.advance(5) {
        Err(PlaybackError::FrameIndexOutOfRange { index, valid_range }) => {
            assert_eq!(index, 5);
            assert_eq!(valid_range, 0..3);
        }
        other => panic!("expected FrameIndexOutOfRange, got {other:?}"),
    }

    let after: Vec<_> = state.objects().map(|(_, o)| o.clone()).collect();
    assert_eq!(before, after);
    assert_eq!(state.frame(), 1);
}

#[test]
fn body_missing_from_a_snapshot_fails_the_build() {
    let trajectory = Trajectory::new(vec![
        snapshot(0.0, &[("sun", 0.0, 0.0), ("earth", 1.0, 0.0)]),
        snapshot(1.0, &[("sun", 0.0, 0.0)]),
    ])
    .unwrap();

    let err =
        RenderState::from_trajectory(trajectory, &ids(&["sun", "earth"]), &Palette::default(), true)
            .unwrap_err();
    match err {
        PlaybackError::MissingBodyInSnapshot { body, snapshot_index } => {
            assert_eq!(body, BodyId::from("earth"));
            assert_eq!(snapshot_index, 1);
        }
        other => panic!("expected MissingBodyInSnapshot, got {other:?}"),
    }
}

#[test]
fn nothing_to_track_is_an_error() {
    let err =
        RenderState::from_trajectory(sun_and_earth(), &[], &Palette::default(), true).unwrap_err();
    assert!(matches!(err, PlaybackError::EmptyTrackedBodyList));
}

#[test]
fn small_palette_is_reused_in_order() {
    let palette = Palette::from_names(&["red", "green", "blue"]).unwrap();
    let bodies = ids(&["a", "b", "c", "d", "e"]);
    let trajectory = Trajectory::new(vec![snapshot(
        0.0,
        &[("a", 0.0, 0.0), ("b", 1.0, 0.0), ("c", 2.0, 0.0), ("d", 3.0, 0.0), ("e", 4.0, 0.0)],
    )])
    .unwrap();

    let state = RenderState::from_trajectory(trajectory, &bodies, &palette, false).unwrap();
    let names: Vec<&str> = state.objects().map(|(_, o)| o.style().name.as_str()).collect();
    assert_eq!(names, vec!["red", "green", "blue", "red", "green"]);
}

#[test]
fn run_together_palette_entry_is_rejected() {
    let err = Palette::from_names(&["red", "greenblue"]).unwrap_err();
    assert!(matches!(
        err,
        PlaybackError::MalformedPaletteEntry { entry, .. } if entry == "greenblue"
    ));
}

#[test]
fn advancing_twice_changes_nothing() {
    let mut rng = StdRng::seed_from_u64(7);
    let bodies = ids(&["a", "b", "c", "d"]);

    for _ in 0..20 {
        let frames = rng.gen_range(1..40);
        let trajectory = random_trajectory(&mut rng, &bodies, frames);
        let mut state = play(trajectory, &bodies, true);

        let i = rng.gen_range(0..frames);
        state.advance(i).unwrap();
        let once: Vec<_> = state.objects().map(|(_, o)| o.clone()).collect();
        state.advance(i).unwrap();
        let twice: Vec<_> = state.objects().map(|(_, o)| o.clone()).collect();
        assert_eq!(once, twice);
    }
}

#[test]
fn rewinding_matches_a_fresh_advance() {
    let mut rng = StdRng::seed_from_u64(42);
    let bodies = ids(&["a", "b", "c"]);

    for _ in 0..20 {
        let frames = rng.gen_range(2..50);
        let trajectory = random_trajectory(&mut rng, &bodies, frames);
        let mut fresh = play(trajectory.clone(), &bodies, true);
        let mut wandering = play(trajectory, &bodies, true);

        let i = rng.gen_range(0..frames);
        let j = rng.gen_range(0..frames);
        wandering.advance(j).unwrap();
        wandering.advance(i).unwrap();
        fresh.advance(i).unwrap();

        for ((_, a), (_, b)) in wandering.objects().zip(fresh.objects()) {
            assert_eq!(a, b);
            assert_eq!(a.trail().len(), i + 1);
            assert_eq!(a.trail().last().copied(), Some(a.marker()));
        }
    }
}

#[test]
fn scene_follows_the_render_state() {
    let mut state = play(sun_and_earth(), &ids(&["sun", "earth"]), true);
    let mut scene = Scene::new(0.1);
    state.attach(&mut scene);
    assert_eq!(scene.body_count(), 2);
    assert_eq!(scene.trail_len(&"earth".into()), 1);

    state.advance(2).unwrap();
    state.present(&mut scene);
    assert_eq!(scene.marker(&"earth".into()), Some(Point2D::new(-1.0, 0.0)));
    assert_eq!(scene.trail_len(&"earth".into()), 3);

    // Rewind
    state.advance(0).unwrap();
    state.present(&mut scene);
    assert_eq!(scene.trail_len(&"earth".into()), 1);
}

#[test]
fn render_surface_is_object_safe() {
    let mut state = play(sun_and_earth(), &ids(&["sun", "earth"]), false);
    let mut scene = Scene::new(0.1);
    let surface: &mut dyn RenderSurface = &mut scene;
    state.attach(&mut *surface);
    state.advance(1).unwrap();
    state.present(surface);
    assert_eq!(scene.label_anchor(&"earth".into()), None);
    assert_eq!(scene.marker(&"earth".into()), Some(Point2D::new(0.0, 1.0)));
}

#[test]
fn recorded_trajectory_json_plays_back() {
    let json = r#"[
        {"time": 0.0, "positions": {"sun": {"x": 0.0, "y": 0.0}, "earth": {"x": 1.0, "y": 0.0}}},
        {"time": 0.5, "positions": {"sun": {"x": 0.0, "y": 0.0}, "earth": {"x": -1.0, "y": 0.0}}}
    ]"#;
    let trajectory: Trajectory = serde_json::from_str(json).unwrap();
    let mut state = play(trajectory, &ids(&["earth"]), true);
    state.advance(1).unwrap();
    assert_eq!(state.body_count(), 1);
    assert_eq!(state.get(&"earth".into()).unwrap().trail().len(), 2);
}

#[test]
fn recorded_trajectory_must_not_go_back_in_time() {
    let json = r#"[
        {"time": 1.0, "positions": {"sun": {"x": 0.0, "y": 0.0}}},
        {"time": 0.5, "positions": {"sun": {"x": 0.0, "y": 0.0}}}
    ]"#;
    assert!(serde_json::from_str::<Trajectory>(json).is_err());
}

#[test]
fn bundled_scenarios_play_to_the_end() {
    for name in ["earth_moon.json", "solar_system.json"] {
        let scenario = ScenarioConfig::load(&scenario_path(name)).unwrap();
        let trajectory = CircularOrbits.simulate(&scenario).unwrap();
        let expected = CircularOrbits::snapshot_count(&scenario).unwrap();
        assert_eq!(trajectory.len(), expected);

        let palette = scenario.palette().unwrap();
        let bodies = scenario.tracked_bodies();
        let mut state = RenderState::from_trajectory(trajectory, &bodies, &palette, true).unwrap();
        let last = state.frame_count() - 1;
        state.advance(last).unwrap();
        for (_, object) in state.objects() {
            assert_eq!(object.trail().len(), last + 1);
        }
    }
}

#[test]
fn solar_system_reuses_the_default_palette() {
    let scenario = ScenarioConfig::load(&scenario_path("solar_system.json")).unwrap();
    let palette = scenario.palette().unwrap();
    assert_eq!(palette.len(), Palette::DEFAULT_NAMES.len());

    let trajectory = CircularOrbits.simulate(&scenario).unwrap();
    let bodies = scenario.tracked_bodies();
    let state = RenderState::from_trajectory(trajectory, &bodies, &palette, true).unwrap();
    let styles: Vec<_> = state.objects().map(|(_, o)| o.style().clone()).collect();
    assert_eq!(styles.len(), 10);
    assert_eq!(styles[8], styles[0]);
    assert_eq!(styles[9], styles[1]);
    assert_ne!(styles[7], styles[0]);
}
