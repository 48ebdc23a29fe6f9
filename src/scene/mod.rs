//! The live point set and the collaborators that feed it: initial placement
//! and per-frame motion.

mod motion;
mod points;

pub use motion::Drift;
pub use points::{Placement, PointSet};

/// Point count used when none is configured.
pub const DEFAULT_POINT_COUNT: usize = 500;

/// Radius of the bounding sphere points spawn in and drift inside.
pub const DEFAULT_SPAWN_RADIUS: f32 = 100.0;

/// Startup membership and motion of the point set.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Points spawned at startup.
    pub point_count: usize,
    /// Initial placement strategy.
    pub placement: Placement,
    /// Maximum drift speed in units per second.
    pub max_speed: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            placement: Placement::Ball {
                radius: DEFAULT_SPAWN_RADIUS,
            },
            max_speed: 10.0,
        }
    }
}

impl SceneConfig {
    /// Radius of the region points are kept inside.
    pub fn bounds_radius(&self) -> f32 {
        self.placement.radius()
    }
}
