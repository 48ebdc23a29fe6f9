//! Per-point brute-force scan.

use glam::Vec3;

use crate::slots::{FarthestSlot, NeighborSlots};
use crate::types::ClosestAndFarthest;

/// Visit every point other than `idx` in ascending index order with its
/// Euclidean distance to `points[idx]`.
///
/// Squared distances are not compared directly: two different squared values
/// can round to the same distance, and that has to count as a tie.
#[inline]
fn for_each_other(points: &[Vec3], idx: usize, mut visit: impl FnMut(u32, f32)) {
    let query = points[idx];
    for (j, &p) in points.iter().enumerate() {
        if j == idx {
            continue;
        }
        visit(j as u32, query.distance(p));
    }
}

/// Three nearest and the farthest neighbor of `points[idx]`.
///
/// # Panics
/// Panics if `idx >= points.len()`.
pub fn closest_and_farthest(points: &[Vec3], idx: usize) -> ClosestAndFarthest {
    let mut nearest = NeighborSlots::<3>::new();
    let mut farthest = FarthestSlot::new();

    for_each_other(points, idx, |j, dist| {
        nearest.offer(j, dist);
        farthest.offer(j, dist);
    });

    let [first, second, third] = nearest.indices();
    ClosestAndFarthest {
        first,
        second,
        third,
        farthest: farthest.index(),
    }
}

/// The `K` nearest neighbors of `points[idx]`, closest first.
///
/// Same tie-breaking as [`closest_and_farthest`]; empty slots hold
/// [`INVALID_INDEX`](crate::INVALID_INDEX).
///
/// # Panics
/// Panics if `idx >= points.len()`.
pub fn k_nearest<const K: usize>(points: &[Vec3], idx: usize) -> [u32; K] {
    let mut nearest = NeighborSlots::<K>::new();
    for_each_other(points, idx, |j, dist| nearest.offer(j, dist));
    nearest.indices()
}
