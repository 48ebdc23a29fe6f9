//! Consumer side: turn completed results into drawable link segments.
//!
//! Must only run after [`FrameScheduler::tick_complete`](crate::FrameScheduler::tick_complete)
//! has returned for the frame. Indices are resolved against whatever position
//! slice the caller passes in, normally the live point set.

use closest_farthest::ClosestAndFarthest;
use glam::Vec3;

/// Which slot a link came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Nearest-neighbor rank, 0 = closest.
    Nearest(u8),
    Farthest,
}

impl LinkKind {
    /// Debug color: green for nearest (dimming with rank), red for farthest.
    pub fn color(self) -> Vec3 {
        match self {
            LinkKind::Nearest(rank) => Vec3::new(0.0, 1.0 - 0.25 * rank as f32, 0.0),
            LinkKind::Farthest => Vec3::new(1.0, 0.0, 0.0),
        }
    }
}

/// One line from a point to one of its linked neighbors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkSegment {
    pub from: usize,
    pub to: usize,
    pub start: Vec3,
    pub end: Vec3,
    pub kind: LinkKind,
}

/// Build line segments for every filled slot.
///
/// Empty slots, and indices past the end of `positions`, produce no segment.
pub fn link_segments(links: &[ClosestAndFarthest], positions: &[Vec3]) -> Vec<LinkSegment> {
    let mut segments = Vec::with_capacity(links.len() * 4);
    for (from, record) in links.iter().enumerate() {
        let Some(&start) = positions.get(from) else {
            continue;
        };

        let targets = record
            .nearest()
            .into_iter()
            .enumerate()
            .map(|(rank, idx)| (idx, LinkKind::Nearest(rank as u8)))
            .chain(std::iter::once((record.farthest(), LinkKind::Farthest)));

        for (idx, kind) in targets {
            let Some(to) = idx else { continue };
            let Some(&end) = positions.get(to) else {
                continue;
            };
            segments.push(LinkSegment {
                from,
                to,
                start,
                end,
                kind,
            });
        }
    }
    segments
}

/// Summary of one frame's links, for logging and export.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinkStats {
    pub num_points: usize,
    /// Mean distance to the closest neighbor.
    pub mean_nearest: f32,
    /// Mean distance to the farthest neighbor.
    pub mean_farthest: f32,
    /// Largest farthest-neighbor distance (the set's diameter).
    pub max_farthest: f32,
    /// Points with at least one empty slot.
    pub incomplete: usize,
}

impl LinkStats {
    pub fn from_links(links: &[ClosestAndFarthest], positions: &[Vec3]) -> Self {
        let mut nearest_sum = 0.0f64;
        let mut nearest_count = 0usize;
        let mut farthest_sum = 0.0f64;
        let mut farthest_count = 0usize;
        let mut max_farthest = 0.0f32;
        let mut incomplete = 0usize;

        let dist = |a: usize, b: usize| match (positions.get(a), positions.get(b)) {
            (Some(&pa), Some(&pb)) => Some(pa.distance(pb)),
            _ => None,
        };

        for (i, record) in links.iter().enumerate() {
            if !record.is_complete() {
                incomplete += 1;
            }
            if let Some(d) = record.first().and_then(|j| dist(i, j)) {
                nearest_sum += d as f64;
                nearest_count += 1;
            }
            if let Some(d) = record.farthest().and_then(|j| dist(i, j)) {
                farthest_sum += d as f64;
                farthest_count += 1;
                max_farthest = max_farthest.max(d);
            }
        }

        let mean = |sum: f64, count: usize| {
            if count == 0 {
                0.0
            } else {
                (sum / count as f64) as f32
            }
        };

        Self {
            num_points: links.len(),
            mean_nearest: mean(nearest_sum, nearest_count),
            mean_farthest: mean(farthest_sum, farthest_count),
            max_farthest,
            incomplete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Vec<Vec3> {
        [0.0, 1.0, 2.0, 10.0]
            .iter()
            .map(|&x| Vec3::new(x, 0.0, 0.0))
            .collect()
    }

    #[test]
    fn test_segments_cover_every_filled_slot() {
        let positions = line();
        let links = closest_farthest::compute(&positions);
        let segments = link_segments(&links, &positions);
        assert_eq!(segments.len(), 4 * 4);

        let from_zero: Vec<_> = segments.iter().filter(|s| s.from == 0).collect();
        assert_eq!(from_zero[0].kind, LinkKind::Nearest(0));
        assert_eq!(from_zero[0].to, 1);
        assert_eq!(from_zero[0].end, Vec3::X);
        assert_eq!(from_zero[3].kind, LinkKind::Farthest);
        assert_eq!(from_zero[3].end, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_segments_skip_empty_slots() {
        let positions = vec![Vec3::ZERO, Vec3::Y];
        let links = closest_farthest::compute(&positions);
        let segments = link_segments(&links, &positions);
        // first + farthest for each of the two points
        assert_eq!(segments.len(), 4);
        assert!(segments
            .iter()
            .all(|s| matches!(s.kind, LinkKind::Nearest(0) | LinkKind::Farthest)));
    }

    #[test]
    fn test_segments_ignore_out_of_range() {
        let links = [ClosestAndFarthest {
            first: 1,
            second: 7,
            third: closest_farthest::INVALID_INDEX,
            farthest: 1,
        }];
        let positions = vec![Vec3::ZERO, Vec3::Z];
        let segments = link_segments(&links, &positions);
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_stats_on_line() {
        let positions = line();
        let links = closest_farthest::compute(&positions);
        let stats = LinkStats::from_links(&links, &positions);
        assert_eq!(stats.num_points, 4);
        assert_eq!(stats.incomplete, 0);
        // nearest: 1, 1, 1, 8
        assert!((stats.mean_nearest - 2.75).abs() < 1e-6);
        // farthest: 10, 9, 8, 10
        assert!((stats.mean_farthest - 9.25).abs() < 1e-6);
        assert_eq!(stats.max_farthest, 10.0);
    }

    #[test]
    fn test_stats_empty() {
        let stats = LinkStats::from_links(&[], &[]);
        assert_eq!(stats, LinkStats::default());
    }

    #[test]
    fn test_colors() {
        assert_eq!(LinkKind::Farthest.color(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(LinkKind::Nearest(0).color(), Vec3::new(0.0, 1.0, 0.0));
    }
}
