//! Three-nearest and farthest neighbor queries over 3D point sets.
//!
//! For every point the solver reports the indices of its three nearest other
//! points (closest first) and of its single farthest point. The search is a
//! brute-force all-pairs scan; each output index depends only on the shared,
//! read-only input, so the work splits across threads without coordination.
//!
//! # Example
//!
//! ```
//! use closest_farthest::{compute, INVALID_INDEX};
//!
//! let points = vec![
//!     [0.0f32, 0.0, 0.0],
//!     [1.0, 0.0, 0.0],
//!     [2.0, 0.0, 0.0],
//!     [10.0, 0.0, 0.0],
//! ];
//!
//! let links = compute(&points);
//! assert_eq!(links[0].first, 1);
//! assert_eq!(links[0].second, 2);
//! assert_eq!(links[0].third, 3);
//! assert_eq!(links[0].farthest, 3);
//!
//! let pair = compute(&points[..2]);
//! assert_eq!(pair[0].second, INVALID_INDEX);
//! ```

mod kernel;
mod slots;
mod timing;
mod types;

use glam::Vec3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub use kernel::{closest_and_farthest, k_nearest};
pub use slots::{FarthestSlot, NeighborSlots};
pub use types::{ClosestAndFarthest, Point3Like, INVALID_INDEX};

/// Configuration for a solver pass.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Split the pass across the current rayon pool. Ignored without the
    /// `parallel` feature.
    pub parallel: bool,
    /// Inputs shorter than this run on the calling thread.
    pub min_parallel_len: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            parallel: cfg!(feature = "parallel"),
            min_parallel_len: 256,
        }
    }
}

impl SolverConfig {
    /// Single-threaded configuration.
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }
}

/// Compute three-nearest and farthest links for every point with default settings.
///
/// The output is index-aligned with `points`.
pub fn compute<P: Point3Like>(points: &[P]) -> Vec<ClosestAndFarthest> {
    compute_with(points, SolverConfig::default())
}

/// Compute links with explicit configuration.
pub fn compute_with<P: Point3Like>(points: &[P], config: SolverConfig) -> Vec<ClosestAndFarthest> {
    // Convert input points to Vec3 for the kernel
    let vec3_points: Vec<Vec3> = points.iter().map(Point3Like::to_vec3).collect();

    let mut out = Vec::with_capacity(vec3_points.len());
    compute_into(&vec3_points, &mut out, &config);
    out
}

/// Compute links into a caller-owned buffer.
///
/// `out` is cleared and refilled with exactly `points.len()` records, so a
/// buffer from an earlier pass can be handed back in without reallocating.
///
/// Indices are stored as `u32` with [`INVALID_INDEX`] reserved, so `points`
/// must hold fewer than `u32::MAX` entries.
pub fn compute_into(points: &[Vec3], out: &mut Vec<ClosestAndFarthest>, config: &SolverConfig) {
    let n = points.len();
    debug_assert!(
        n < INVALID_INDEX as usize,
        "{} points overflow the u32 index space",
        n
    );
    let total = timing::Stopwatch::start();

    out.clear();
    out.resize(n, ClosestAndFarthest::EMPTY);

    let run_parallel = cfg!(feature = "parallel") && config.parallel && n >= config.min_parallel_len;

    let scan = timing::Stopwatch::start();
    let chunks = if run_parallel {
        scan_parallel(points, out)
    } else {
        scan_serial(points, out)
    };

    #[cfg(feature = "timing")]
    {
        let timings = timing::PassTimings {
            scan: scan.elapsed(),
            total: total.elapsed(),
            chunks,
            parallel: run_parallel,
        };
        timings.report(n);
    }
    #[cfg(not(feature = "timing"))]
    let _ = (total, scan, chunks);
}

fn scan_serial(points: &[Vec3], out: &mut [ClosestAndFarthest]) -> usize {
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = closest_and_farthest(points, i);
    }
    1
}

#[cfg(feature = "parallel")]
fn scan_parallel(points: &[Vec3], out: &mut [ClosestAndFarthest]) -> usize {
    let n = out.len();
    let threads = rayon::current_num_threads().max(1);
    let chunk_size = (n / (threads * 8)).clamp(16, 1024).max(1);

    out.par_chunks_mut(chunk_size)
        .enumerate()
        .for_each(|(chunk_idx, chunk)| {
            let start = chunk_idx * chunk_size;
            for (offset, slot) in chunk.iter_mut().enumerate() {
                *slot = closest_and_farthest(points, start + offset);
            }
        });

    n.div_ceil(chunk_size)
}

#[cfg(not(feature = "parallel"))]
fn scan_parallel(points: &[Vec3], out: &mut [ClosestAndFarthest]) -> usize {
    scan_serial(points, out)
}
