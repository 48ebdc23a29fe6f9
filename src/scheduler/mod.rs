//! Two-phase frame scheduling for the nearest/farthest solver.
//!
//! Each frame the host loop calls [`FrameScheduler::tick_dispatch`] early and
//! [`FrameScheduler::tick_complete`] late:
//!
//! ```text
//! frame k:  tick_dispatch ──► (pass k runs on the worker pool) ──► tick_complete
//!              snapshot k          host mutates live positions        results k
//! ```
//!
//! Dispatch copies the live positions into a snapshot owned by the pass and
//! returns immediately. Completion blocks until that pass reports back over a
//! one-shot channel, which is the only point where results become visible.
//! At most one pass is ever in flight. A pass that times out keeps its slot
//! until its worker reports back, so dispatch refuses to start another.

mod error;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::{Duration, Instant};

use closest_farthest::{ClosestAndFarthest, SolverConfig};
use glam::Vec3;
use rand::Rng;

use crate::scene::{Placement, PointSet};

pub use error::SchedulerError;

/// Configuration for a [`FrameScheduler`].
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Worker threads in the pass pool. `None` uses rayon's default.
    pub worker_threads: Option<usize>,
    /// Settings forwarded to every solver pass.
    pub solver: SolverConfig,
    /// Fail a pass that has not finished within this long of `tick_complete`
    /// starting to wait.
    pub pass_timeout: Option<Duration>,
    /// Placement used by [`FrameScheduler::spawn_points`].
    pub placement: Placement,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            worker_threads: None,
            solver: SolverConfig::default(),
            pass_timeout: None,
            placement: Placement::Ball {
                radius: crate::scene::DEFAULT_SPAWN_RADIUS,
            },
        }
    }
}

/// Results of one completed pass.
#[derive(Debug, Clone)]
pub struct FrameResults {
    /// Frame whose dispatch produced these results.
    pub frame: u64,
    /// Positions the pass ran on, as snapshotted at dispatch.
    pub positions: Vec<Vec3>,
    /// One record per snapshot position, index-aligned.
    pub links: Vec<ClosestAndFarthest>,
    /// Time from dispatch to completion.
    pub latency: Duration,
}

impl FrameResults {
    #[inline]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// What a worker sends back when a pass ends, successfully or not.
struct PassOutcome {
    frame: u64,
    snapshot: Vec<Vec3>,
    links: std::thread::Result<Vec<ClosestAndFarthest>>,
}

type PassFn = fn(&[Vec3], &mut Vec<ClosestAndFarthest>, &SolverConfig);

struct PendingPass {
    frame: u64,
    dispatched_at: Instant,
    done: Receiver<PassOutcome>,
}

/// Snapshots positions, runs the solver off-thread, and publishes results at an
/// explicit completion barrier.
pub struct FrameScheduler {
    pool: rayon::ThreadPool,
    config: SchedulerConfig,
    next_frame: u64,
    pending: Option<PendingPass>,
    /// Pass that timed out and may still be running on the pool.
    abandoned: Option<PendingPass>,
    latest: Option<FrameResults>,
    /// Snapshot buffer recovered from a failed pass.
    spare_positions: Option<Vec<Vec3>>,
    pass_fn: PassFn,
}

impl FrameScheduler {
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        let mut builder =
            rayon::ThreadPoolBuilder::new().thread_name(|i| format!("nearfar-pass-{}", i));
        if let Some(threads) = config.worker_threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;
        log::debug!(
            "Frame scheduler: {} worker threads, parallel solver={}",
            pool.current_num_threads(),
            config.solver.parallel
        );

        Ok(Self {
            pool,
            config,
            next_frame: 0,
            pending: None,
            abandoned: None,
            latest: None,
            spare_positions: None,
            pass_fn: closest_farthest::compute_into,
        })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Number of frames dispatched so far.
    pub fn frames_dispatched(&self) -> u64 {
        self.next_frame
    }

    /// Returns true between a dispatch and its completion.
    ///
    /// A timed-out pass is no longer pending, but it still blocks dispatch
    /// until its worker finishes.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Most recently completed results, until the next dispatch recycles them.
    pub fn latest(&self) -> Option<&FrameResults> {
        self.latest.as_ref()
    }

    /// Append `count` points to `points` using the configured placement.
    ///
    /// Safe while a pass is in flight: the pass only reads its own snapshot, and
    /// the point set is append-only so the pending results stay valid.
    pub fn spawn_points<R: Rng + ?Sized>(
        &self,
        points: &mut PointSet,
        count: usize,
        rng: &mut R,
    ) -> std::ops::Range<usize> {
        let added = points.spawn(count, &self.config.placement, rng);
        log::debug!(
            "Spawned {} points ({}), total {}",
            added.len(),
            self.config.placement,
            points.len()
        );
        added
    }

    /// Snapshot `points` and start a pass on the worker pool. Never blocks.
    pub fn tick_dispatch(&mut self, points: &PointSet) -> Result<(), SchedulerError> {
        if let Some(pending) = &self.pending {
            return Err(SchedulerError::PassInFlight {
                frame: pending.frame,
            });
        }
        self.reap_abandoned()?;

        let frame = self.next_frame;
        self.next_frame += 1;

        // Recycle the buffers of the results this pass supersedes
        let (mut snapshot, links) = match self.latest.take() {
            Some(prev) => (prev.positions, prev.links),
            None => (self.spare_positions.take().unwrap_or_default(), Vec::new()),
        };
        snapshot.clear();
        snapshot.extend_from_slice(points.positions());

        let solver = self.config.solver.clone();
        let pass_fn = self.pass_fn;
        let (tx, rx) = mpsc::sync_channel(1);
        log::trace!("Dispatch frame {}: {} points", frame, snapshot.len());
        let dispatched_at = Instant::now();

        self.pool.spawn(move || {
            let mut links = links;
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                pass_fn(&snapshot, &mut links, &solver);
            }));
            let outcome = PassOutcome {
                frame,
                snapshot,
                links: result.map(|()| links),
            };
            // The receiver is gone if the scheduler was dropped mid-pass
            let _ = tx.send(outcome);
        });

        self.pending = Some(PendingPass {
            frame,
            dispatched_at,
            done: rx,
        });
        Ok(())
    }

    /// Block until the pending pass finishes and expose its results.
    pub fn tick_complete(&mut self) -> Result<&FrameResults, SchedulerError> {
        let pending = self.pending.take().ok_or(SchedulerError::NoPendingPass)?;
        let frame = pending.frame;

        let wait_start = Instant::now();
        let outcome = match self.config.pass_timeout {
            Some(limit) => match pending.done.recv_timeout(limit) {
                Ok(outcome) => outcome,
                Err(RecvTimeoutError::Timeout) => {
                    log::warn!("Pass for frame {} exceeded {:?}", frame, limit);
                    self.abandoned = Some(pending);
                    return Err(SchedulerError::Timeout {
                        frame,
                        waited: limit,
                    });
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(SchedulerError::WorkerLost { frame });
                }
            },
            None => pending
                .done
                .recv()
                .map_err(|_| SchedulerError::WorkerLost { frame })?,
        };
        log::trace!(
            "Complete frame {}: blocked {:.3?}",
            frame,
            wait_start.elapsed()
        );

        debug_assert_eq!(outcome.frame, frame);

        let links = match outcome.links {
            Ok(links) => links,
            Err(payload) => {
                self.spare_positions = Some(outcome.snapshot);
                return Err(SchedulerError::PassPanicked {
                    frame,
                    message: panic_message(payload.as_ref()),
                });
            }
        };
        debug_assert_eq!(links.len(), outcome.snapshot.len());

        Ok(&*self.latest.insert(FrameResults {
            frame,
            positions: outcome.snapshot,
            links,
            latency: pending.dispatched_at.elapsed(),
        }))
    }

    /// Release a timed-out pass once its worker has reported or gone away.
    fn reap_abandoned(&mut self) -> Result<(), SchedulerError> {
        let Some(abandoned) = &self.abandoned else {
            return Ok(());
        };
        match abandoned.done.try_recv() {
            Ok(outcome) => {
                log::debug!(
                    "Timed-out pass for frame {} finished after {:.3?}",
                    outcome.frame,
                    abandoned.dispatched_at.elapsed()
                );
                self.spare_positions = Some(outcome.snapshot);
            }
            Err(TryRecvError::Empty) => {
                return Err(SchedulerError::PassInFlight {
                    frame: abandoned.frame,
                });
            }
            Err(TryRecvError::Disconnected) => {}
        }
        self.abandoned = None;
        Ok(())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
