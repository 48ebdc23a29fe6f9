//! Per-frame three-nearest and farthest neighbor links for a moving point set.
//!
//! The all-pairs search lives in the `closest-farthest` crate. This crate wraps
//! it in a two-phase frame scheduler and supplies the collaborators a host loop
//! needs: the live point set, initial placement, motion, and link consumption.

pub mod links;
pub mod scene;
pub mod scheduler;
pub mod util;

pub use closest_farthest::{ClosestAndFarthest, SolverConfig, INVALID_INDEX};
pub use links::{link_segments, LinkKind, LinkSegment, LinkStats};
pub use scene::{Drift, Placement, PointSet, SceneConfig};
pub use scheduler::{FrameResults, FrameScheduler, SchedulerConfig, SchedulerError};
