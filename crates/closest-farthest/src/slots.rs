//! Bounded candidate buffers for the per-point scan.
//!
//! Uses a fixed-size sorted array rather than a heap: for the small `K` this
//! crate cares about, a linear shift is cheaper than heap bookkeeping and the
//! k-th distance is always at a known offset.

use crate::types::INVALID_INDEX;

/// The `K` closest candidates seen so far, sorted ascending by distance.
///
/// Ties never displace: a candidate is inserted before the first stored entry
/// whose distance is strictly greater, so among equal distances the one offered
/// first keeps the earlier slot.
#[derive(Debug, Clone, Copy)]
pub struct NeighborSlots<const K: usize> {
    /// (distance, point_idx)
    candidates: [(f32, u32); K],
}

impl<const K: usize> NeighborSlots<K> {
    #[inline]
    pub fn new() -> Self {
        Self {
            candidates: [(f32::INFINITY, INVALID_INDEX); K],
        }
    }

    /// Offer a candidate. NaN distances are ignored.
    #[inline]
    pub fn offer(&mut self, idx: u32, dist: f32) {
        if K == 0 || dist.is_nan() || dist >= self.candidates[K - 1].0 {
            return;
        }

        let insert_pos = self.candidates.partition_point(|&(d, _)| d <= dist);

        // Shift right, dropping the last entry
        for i in (insert_pos..K - 1).rev() {
            self.candidates[i + 1] = self.candidates[i];
        }
        self.candidates[insert_pos] = (dist, idx);
    }

    /// Distance to the k-th candidate (1-based), infinity if that slot is empty.
    #[inline]
    pub fn kth_dist(&self, k: usize) -> f32 {
        if k == 0 || k > K {
            return f32::INFINITY;
        }
        self.candidates[k - 1].0
    }

    /// Candidate indices, closest first; empty slots hold [`INVALID_INDEX`].
    #[inline]
    pub fn indices(&self) -> [u32; K] {
        self.candidates.map(|(_, idx)| idx)
    }

    /// Number of filled slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.candidates
            .iter()
            .take_while(|&&(_, idx)| idx != INVALID_INDEX)
            .count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const K: usize> Default for NeighborSlots<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Running maximum; first seen wins on ties.
#[derive(Debug, Clone, Copy)]
pub struct FarthestSlot {
    dist: f32,
    idx: u32,
}

impl FarthestSlot {
    #[inline]
    pub fn new() -> Self {
        Self {
            dist: f32::NEG_INFINITY,
            idx: INVALID_INDEX,
        }
    }

    #[inline]
    pub fn offer(&mut self, idx: u32, dist: f32) {
        if dist > self.dist {
            self.dist = dist;
            self.idx = idx;
        }
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.idx
    }

    #[inline]
    pub fn dist(&self) -> f32 {
        self.dist
    }
}

impl Default for FarthestSlot {
    fn default() -> Self {
        Self::new()
    }
}
