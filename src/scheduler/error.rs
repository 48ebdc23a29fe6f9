use std::time::Duration;

/// Errors from the frame scheduler.
///
/// `NoPendingPass` and `PassInFlight` are contract violations by the caller.
/// `PassInFlight` is also returned while a timed-out pass is still running.
/// The rest mean the pass for `frame` failed; its results are discarded and
/// nothing partial is exposed.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("tick_complete called without a matching tick_dispatch")]
    NoPendingPass,

    #[error("tick_dispatch called while the pass for frame {frame} is still running")]
    PassInFlight { frame: u64 },

    #[error("pass for frame {frame} panicked: {message}")]
    PassPanicked { frame: u64, message: String },

    #[error("worker for frame {frame} exited without reporting")]
    WorkerLost { frame: u64 },

    #[error("pass for frame {frame} did not finish within {waited:?}")]
    Timeout { frame: u64, waited: Duration },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl SchedulerError {
    /// Returns true for errors caused by calling the two phases out of order.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            SchedulerError::NoPendingPass | SchedulerError::PassInFlight { .. }
        )
    }
}
