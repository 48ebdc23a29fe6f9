//! Public API integration tests for closest-farthest.

use closest_farthest::{
    closest_and_farthest, compute, compute_into, compute_with, ClosestAndFarthest, SolverConfig,
    INVALID_INDEX,
};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate points uniformly distributed inside a cube of half-width `extent`.
fn random_cloud(n: usize, extent: f32, seed: u64) -> Vec<Vec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
            )
        })
        .collect()
}

/// Snap a cloud onto an integer lattice so that many distances tie exactly.
fn lattice_cloud(n: usize, seed: u64) -> Vec<Vec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-3..=3) as f32,
                rng.gen_range(-3..=3) as f32,
                rng.gen_range(-3..=3) as f32,
            )
        })
        .collect()
}

/// Reference answer: sort every other point by (distance, index).
fn reference(points: &[Vec3], i: usize) -> ClosestAndFarthest {
    let mut others: Vec<(f32, usize)> = (0..points.len())
        .filter(|&j| j != i)
        .map(|j| (points[i].distance(points[j]), j))
        .collect();
    others.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let slot = |k: usize| others.get(k).map(|&(_, j)| j as u32).unwrap_or(INVALID_INDEX);
    // Largest distance, lowest index among ties
    let farthest = others
        .iter()
        .fold(None::<(f32, usize)>, |best, &(d, j)| match best {
            Some((bd, _)) if d <= bd => best,
            _ => Some((d, j)),
        })
        .map(|(_, j)| j as u32)
        .unwrap_or(INVALID_INDEX);

    ClosestAndFarthest {
        first: slot(0),
        second: slot(1),
        third: slot(2),
        farthest,
    }
}

fn dist(points: &[Vec3], i: usize, j: u32) -> f32 {
    points[i].distance(points[j as usize])
}

#[test]
fn test_compute_empty() {
    let points: Vec<Vec3> = Vec::new();
    assert!(compute(&points).is_empty());
}

#[test]
fn test_compute_single_point() {
    let links = compute(&[Vec3::new(3.0, 4.0, 5.0)]);
    assert_eq!(links, vec![ClosestAndFarthest::EMPTY]);
    assert_eq!(links[0].nearest(), [None, None, None]);
    assert_eq!(links[0].farthest(), None);
}

#[test]
fn test_compute_two_points() {
    let links = compute(&[[0.0f32, 0.0, 0.0], [0.0, 2.0, 0.0]]);
    for (i, other) in [(0usize, 1usize), (1, 0)] {
        assert_eq!(links[i].first(), Some(other));
        assert_eq!(links[i].second(), None);
        assert_eq!(links[i].third(), None);
        assert_eq!(links[i].farthest(), Some(other));
        assert!(!links[i].is_complete());
    }
}

#[test]
fn test_compute_tie_break_example() {
    let links = compute(&[
        (0.0f32, 0.0f32, 0.0f32),
        (1.0, 0.0, 0.0),
        (-1.0, 0.0, 0.0),
    ]);
    assert_eq!(links[0].first, 1);
    assert_eq!(links[0].second, 2);
    assert_eq!(links[0].third, INVALID_INDEX);
}

#[test]
fn test_compute_ties_on_distance_not_squared_distance() {
    // 1.3400002 vs 1.34 squared, both 1.1575837 after the square root
    let points = [
        Vec3::ZERO,
        Vec3::new(1.0, 0.500_000_1, 0.3),
        Vec3::new(1.0, 0.5, 0.3),
    ];
    let links = compute(&points);
    assert_eq!(links[0].first, 1);
    assert_eq!(links[0].second, 2);
    assert_eq!(links[0].farthest, 1);
    assert_eq!(links[0], reference(&points, 0));
}

#[test]
fn test_compute_line_example() {
    let points = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 0.0),
    ];
    let links = compute(&points);
    assert_eq!(
        links[0],
        ClosestAndFarthest {
            first: 1,
            second: 2,
            third: 3,
            farthest: 3
        }
    );
    assert!(links.iter().all(ClosestAndFarthest::is_complete));
}

#[test]
fn test_compute_matches_reference() {
    for (n, seed) in [(5, 1u64), (40, 2), (300, 3), (700, 4)] {
        let points = random_cloud(n, 100.0, seed);
        let links = compute(&points);
        assert_eq!(links.len(), n);
        for i in 0..n {
            assert_eq!(links[i], reference(&points, i), "n={} i={}", n, i);
        }
    }
}

#[test]
fn test_compute_matches_reference_with_ties() {
    // Lattice points produce many exactly-equal distances and duplicates
    let points = lattice_cloud(400, 77);
    let links = compute(&points);
    for i in 0..points.len() {
        assert_eq!(links[i], reference(&points, i), "i={}", i);
    }
}

#[test]
fn test_nearest_distances_non_decreasing() {
    let points = random_cloud(500, 50.0, 12345);
    let links = compute(&points);

    for (i, r) in links.iter().enumerate() {
        let d1 = dist(&points, i, r.first);
        let d2 = dist(&points, i, r.second);
        let d3 = dist(&points, i, r.third);
        assert!(d1 <= d2 && d2 <= d3, "i={}: {} {} {}", i, d1, d2, d3);
    }
}

#[test]
fn test_farthest_is_maximal() {
    let points = random_cloud(400, 100.0, 999);
    let links = compute(&points);

    for (i, r) in links.iter().enumerate() {
        let far = dist(&points, i, r.farthest);
        for j in 0..points.len() {
            if j != i {
                assert!(dist(&points, i, j as u32) <= far, "i={} j={}", i, j);
            }
        }
    }
}

#[test]
fn test_never_links_to_self() {
    for n in [1usize, 2, 3, 4, 64] {
        let points = random_cloud(n, 10.0, n as u64);
        for (i, r) in compute(&points).iter().enumerate() {
            let i = i as u32;
            assert!(r.first != i && r.second != i && r.third != i && r.farthest != i);
        }
    }
}

#[test]
fn test_compute_idempotent() {
    let points = random_cloud(600, 100.0, 42);
    assert_eq!(compute(&points), compute(&points));
}

#[test]
fn test_serial_and_parallel_agree() {
    let points = lattice_cloud(1500, 5);
    let serial = compute_with(&points, SolverConfig::serial());
    let parallel = compute_with(
        &points,
        SolverConfig {
            parallel: true,
            min_parallel_len: 0,
        },
    );
    assert_eq!(serial, parallel);
}

#[test]
fn test_compute_into_reuses_buffer() {
    let points = random_cloud(100, 10.0, 8);
    let mut out = vec![ClosestAndFarthest::EMPTY; 500];
    compute_into(&points, &mut out, &SolverConfig::default());
    assert_eq!(out.len(), 100);
    assert_eq!(out, compute(&points));

    compute_into(&points[..3], &mut out, &SolverConfig::default());
    assert_eq!(out.len(), 3);
    assert_eq!(out[0], closest_and_farthest(&points[..3], 0));
}
