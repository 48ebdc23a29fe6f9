use std::fmt;
use std::ops::Range;

use glam::Vec3;
use rand::Rng;
use rand_distr::{Distribution, UnitBall, UnitSphere};

/// Initial placement strategy for spawned points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Uniformly distributed inside a sphere.
    Ball { radius: f32 },
    /// Uniformly distributed on the surface of a sphere.
    Shell { radius: f32 },
}

impl Placement {
    pub fn radius(&self) -> f32 {
        match *self {
            Placement::Ball { radius } | Placement::Shell { radius } => radius,
        }
    }

    /// Draw one position.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        match *self {
            Placement::Ball { radius } => {
                let p: [f32; 3] = UnitBall.sample(rng);
                Vec3::from_array(p) * radius
            }
            Placement::Shell { radius } => {
                let p: [f32; 3] = UnitSphere.sample(rng);
                Vec3::from_array(p) * radius
            }
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Ball { radius } => write!(f, "ball(r={})", radius),
            Placement::Shell { radius } => write!(f, "shell(r={})", radius),
        }
    }
}

/// Ordered, append-only collection of live point positions.
///
/// A point's index is its identity. Points are never removed or reordered, so
/// an index produced from any earlier snapshot still names the same point.
#[derive(Debug, Clone, Default)]
pub struct PointSet {
    positions: Vec<Vec3>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        Self { positions }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Mutable access for the motion layer. The slice cannot grow or shrink.
    #[inline]
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    #[inline]
    pub fn position(&self, idx: usize) -> Option<Vec3> {
        self.positions.get(idx).copied()
    }

    /// Append `count` points drawn from `placement`. Returns the new indices.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        placement: &Placement,
        rng: &mut R,
    ) -> Range<usize> {
        let start = self.positions.len();
        self.positions.reserve(count);
        self.positions
            .extend((0..count).map(|_| placement.sample(rng)));
        start..self.positions.len()
    }

    /// Append a single point at a known position. Returns its index.
    pub fn push(&mut self, position: Vec3) -> usize {
        self.positions.push(position);
        self.positions.len() - 1
    }
}
