//! Integration tests for the frame loop: scheduler, motion and link consumer
//! working together the way a host loop drives them.

use glam::Vec3;
use nearfar::{
    link_segments, ClosestAndFarthest, Drift, FrameScheduler, LinkKind, Placement, PointSet,
    SchedulerConfig, SchedulerError, SolverConfig,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn scheduler_with(solver: SolverConfig) -> FrameScheduler {
    FrameScheduler::new(SchedulerConfig {
        worker_threads: Some(3),
        solver,
        placement: Placement::Ball { radius: 100.0 },
        ..SchedulerConfig::default()
    })
    .expect("pool should build")
}

#[test]
fn test_moving_points_each_frame_matches_its_snapshot() {
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let mut sched = scheduler_with(SolverConfig {
        parallel: true,
        min_parallel_len: 0,
    });
    let mut points = PointSet::new();
    sched.spawn_points(&mut points, 300, &mut rng);

    let mut drift = Drift::new(100.0, 40.0);
    drift.sync(&points, &mut rng);

    for frame in 0..20u64 {
        let snapshot = points.positions().to_vec();
        sched.tick_dispatch(&points).unwrap();
        drift.advance(&mut points, 0.1);

        let results = sched.tick_complete().unwrap();
        assert_eq!(results.frame, frame);
        assert_eq!(results.positions, snapshot);
        assert_eq!(results.links, closest_farthest::compute(&snapshot));
    }
}

#[test]
fn test_link_segments_follow_live_positions() {
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let mut sched = scheduler_with(SolverConfig::default());
    let mut points = PointSet::new();
    sched.spawn_points(&mut points, 50, &mut rng);
    let mut drift = Drift::new(100.0, 20.0);
    drift.sync(&points, &mut rng);

    sched.tick_dispatch(&points).unwrap();
    drift.advance(&mut points, 0.5);
    let results = sched.tick_complete().unwrap();

    let segments = link_segments(&results.links, points.positions());
    assert_eq!(segments.len(), 50 * 4);
    for s in &segments {
        assert_ne!(s.from, s.to);
        assert_eq!(s.start, points.positions()[s.from]);
        assert_eq!(s.end, points.positions()[s.to]);
    }
    let farthest = segments
        .iter()
        .filter(|s| s.kind == LinkKind::Farthest)
        .count();
    assert_eq!(farthest, 50);
}

#[test]
fn test_growing_point_set_between_frames() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut sched = scheduler_with(SolverConfig::serial());
    let mut points = PointSet::new();

    for (frame, expected_len) in [(0u64, 0usize), (1, 2), (2, 4), (3, 6)] {
        sched.tick_dispatch(&points).unwrap();
        sched.spawn_points(&mut points, 2, &mut rng);
        let results = sched.tick_complete().unwrap();
        assert_eq!(results.frame, frame);
        assert_eq!(results.len(), expected_len);
        match expected_len {
            0 => assert!(results.is_empty()),
            2 => {
                assert_eq!(results.links[0].first(), Some(1));
                assert_eq!(results.links[0].second(), None);
                assert_eq!(results.links[0].farthest(), Some(1));
            }
            _ => assert!(results.links.iter().all(|r| r.first().is_some())),
        }
    }
}

#[test]
fn test_contract_violations_do_not_disturb_the_pass() {
    let mut sched = scheduler_with(SolverConfig::default());
    let points = PointSet::from_positions(vec![Vec3::ZERO, Vec3::X, Vec3::NEG_X]);

    assert!(matches!(
        sched.tick_complete(),
        Err(SchedulerError::NoPendingPass)
    ));

    sched.tick_dispatch(&points).unwrap();
    assert!(matches!(
        sched.tick_dispatch(&points),
        Err(SchedulerError::PassInFlight { frame: 0 })
    ));

    let results = sched.tick_complete().unwrap();
    assert_eq!(
        results.links[0],
        ClosestAndFarthest {
            first: 1,
            second: 2,
            third: nearfar::INVALID_INDEX,
            farthest: 1,
        }
    );

    assert!(matches!(
        sched.tick_complete(),
        Err(SchedulerError::NoPendingPass)
    ));
}
