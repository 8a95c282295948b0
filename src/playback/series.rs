use indexmap::IndexMap;

use crate::error::{PlaybackError, Result};
use crate::simulation::trajectory::Trajectory;
use crate::simulation::types::{BodyId, Bounds, Point2D};

/// One body's positions, indexed by frame.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateSeries {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl CoordinateSeries {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, p: Point2D) {
        self.xs.push(p.x);
        self.ys.push(p.y);
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Panics if `frame` is out of range; callers validate first.
    pub fn point(&self, frame: usize) -> Point2D {
        Point2D::new(self.xs[frame], self.ys[frame])
    }

    /// Positions from frame 0 up to and including `frame`.
    pub fn prefix(&self, frame: usize) -> impl Iterator<Item = Point2D> + '_ {
        self.xs[..=frame]
            .iter()
            .zip(&self.ys[..=frame])
            .map(|(&x, &y)| Point2D::new(x, y))
    }
}

/// Per-body coordinate series for a whole run, in tracked-body order.
///
/// Building one consumes the [`Trajectory`]; only the series, the snapshot
/// times and the overall bounds are kept.
#[derive(Clone, Debug)]
pub struct PositionSeries {
    times: Vec<f64>,
    bodies: IndexMap<BodyId, CoordinateSeries>,
    bounds: Bounds,
}

impl PositionSeries {
    pub fn build(trajectory: Trajectory, tracked_bodies: &[BodyId]) -> Result<Self> {
        if tracked_bodies.is_empty() {
            return Err(PlaybackError::EmptyTrackedBodyList);
        }

        let frames = trajectory.len();
        let mut bodies: IndexMap<BodyId, CoordinateSeries> =
            IndexMap::with_capacity(tracked_bodies.len());
        for body in tracked_bodies {
            if bodies
                .insert(body.clone(), CoordinateSeries::with_capacity(frames))
                .is_some()
            {
                return Err(PlaybackError::DuplicateTrackedBody(body.clone()));
            }
        }

        let mut times = Vec::with_capacity(frames);
        let mut bounds: Option<Bounds> = None;
        for (snapshot_index, snapshot) in trajectory.into_snapshots().into_iter().enumerate() {
            for (body, series) in bodies.iter_mut() {
                let Some(p) = snapshot.position(body) else {
                    return Err(PlaybackError::MissingBodyInSnapshot {
                        body: body.clone(),
                        snapshot_index,
                    });
                };
                series.push(p);
                match bounds.as_mut() {
                    Some(bounds) => bounds.include(p),
                    None => bounds = Some(Bounds::around(p)),
                }
            }
            times.push(snapshot.time);
        }

        // A trajectory always has a snapshot and we track at least one body
        let bounds = bounds.ok_or(PlaybackError::EmptyTrajectory)?;

        Ok(Self {
            times,
            bodies,
            bounds,
        })
    }

    /// Number of frames, N.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn bodies(&self) -> impl Iterator<Item = &BodyId> {
        self.bodies.keys()
    }

    pub fn get(&self, body: &BodyId) -> Option<&CoordinateSeries> {
        self.bodies.get(body)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BodyId, &CoordinateSeries)> {
        self.bodies.iter()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub(crate) fn into_parts(self) -> (Vec<f64>, IndexMap<BodyId, CoordinateSeries>, Bounds) {
        (self.times, self.bodies, self.bounds)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::simulation::types::Snapshot;

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

    #[test]
    fn splits_snapshots_into_per_body_columns() {
        let trajectory = Trajectory::new(vec![
            snapshot(0.0, &[("a", 1.0, 2.0), ("b", 5.0, 5.0)]),
            snapshot(1.0, &[("a", 3.0, 4.0), ("b", -5.0, 6.0)]),
        ])
        .unwrap();
        let series = PositionSeries::build(trajectory, &ids(&["b", "a"])).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.times(), &[0.0, 1.0]);
        assert_eq!(
            series.bodies().cloned().collect::<Vec<_>>(),
            ids(&["b", "a"])
        );

        let a = series.get(&"a".into()).unwrap();
        assert_eq!(a.xs(), &[1.0, 3.0]);
        assert_eq!(a.ys(), &[2.0, 4.0]);
        assert_eq!(a.point(1), Point2D::new(3.0, 4.0));
        assert_eq!(
            a.prefix(0).collect::<Vec<_>>(),
            vec![Point2D::new(1.0, 2.0)]
        );

        let bounds = series.bounds();
        assert_eq!(bounds.min, Point2D::new(-5.0, 2.0));
        assert_eq!(bounds.max, Point2D::new(5.0, 6.0));
    }

    #[test]
    fn untracked_bodies_are_ignored() {
        let trajectory =
            Trajectory::new(vec![snapshot(0.0, &[("a", 0.0, 0.0), ("comet", 9.0, 9.0)])])
                .unwrap();
        let series = PositionSeries::build(trajectory, &ids(&["a"])).unwrap();

        assert_eq!(series.body_count(), 1);
        assert!(series.get(&"comet".into()).is_none());
    }

    #[test]
    fn reports_first_missing_body() {
        let trajectory = Trajectory::new(vec![
            snapshot(0.0, &[("a", 0.0, 0.0), ("b", 0.0, 0.0)]),
            snapshot(1.0, &[("a", 0.0, 0.0)]),
            snapshot(2.0, &[]),
        ])
        .unwrap();

        match PositionSeries::build(trajectory, &ids(&["a", "b"])) {
            Err(PlaybackError::MissingBodyInSnapshot {
                body,
                snapshot_index,
            }) => {
                assert_eq!(body.as_str(), "b");
                assert_eq!(snapshot_index, 1);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn needs_distinct_tracked_bodies() {
        let trajectory = Trajectory::new(vec![snapshot(0.0, &[("a", 0.0, 0.0)])]).unwrap();
        assert!(matches!(
            PositionSeries::build(trajectory.clone(), &[]),
            Err(PlaybackError::EmptyTrackedBodyList)
        ));
        assert!(matches!(
            PositionSeries::build(trajectory, &ids(&["a", "a"])),
            Err(PlaybackError::DuplicateTrackedBody(_))
        ));
    }
}
