use glam::Vec3;

/// Sentinel stored in a neighbor slot that never received a candidate.
pub const INVALID_INDEX: u32 = u32::MAX;

/// Anything that can be read as a 3D position.
pub trait Point3Like {
    fn x(&self) -> f32;
    fn y(&self) -> f32;
    fn z(&self) -> f32;

    #[inline]
    fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x(), self.y(), self.z())
    }
}

impl Point3Like for Vec3 {
    #[inline]
    fn x(&self) -> f32 {
        self.x
    }
    #[inline]
    fn y(&self) -> f32 {
        self.y
    }
    #[inline]
    fn z(&self) -> f32 {
        self.z
    }
    #[inline]
    fn to_vec3(&self) -> Vec3 {
        *self
    }
}

impl Point3Like for [f32; 3] {
    #[inline]
    fn x(&self) -> f32 {
        self[0]
    }
    #[inline]
    fn y(&self) -> f32 {
        self[1]
    }
    #[inline]
    fn z(&self) -> f32 {
        self[2]
    }
}

impl Point3Like for (f32, f32, f32) {
    #[inline]
    fn x(&self) -> f32 {
        self.0
    }
    #[inline]
    fn y(&self) -> f32 {
        self.1
    }
    #[inline]
    fn z(&self) -> f32 {
        self.2
    }
}

/// Three nearest neighbors (ascending distance) and the farthest neighbor of one point.
///
/// Each field is an index into the position slice that produced the record, or
/// [`INVALID_INDEX`] when fewer than enough other points exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClosestAndFarthest {
    pub first: u32,
    pub second: u32,
    pub third: u32,
    pub farthest: u32,
}

impl ClosestAndFarthest {
    /// Record with every slot empty.
    pub const EMPTY: Self = Self {
        first: INVALID_INDEX,
        second: INVALID_INDEX,
        third: INVALID_INDEX,
        farthest: INVALID_INDEX,
    };

    #[inline]
    pub fn first(&self) -> Option<usize> {
        slot(self.first)
    }

    #[inline]
    pub fn second(&self) -> Option<usize> {
        slot(self.second)
    }

    #[inline]
    pub fn third(&self) -> Option<usize> {
        slot(self.third)
    }

    #[inline]
    pub fn farthest(&self) -> Option<usize> {
        slot(self.farthest)
    }

    /// The three nearest slots, closest first.
    #[inline]
    pub fn nearest(&self) -> [Option<usize>; 3] {
        [self.first(), self.second(), self.third()]
    }

    /// Returns true if every slot holds a real neighbor.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.first != INVALID_INDEX
            && self.second != INVALID_INDEX
            && self.third != INVALID_INDEX
            && self.farthest != INVALID_INDEX
    }
}

impl Default for ClosestAndFarthest {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[inline]
fn slot(idx: u32) -> Option<usize> {
    (idx != INVALID_INDEX).then_some(idx as usize)
}
