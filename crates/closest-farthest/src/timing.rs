//! Zero-cost timing instrumentation for solver passes.
//!
//! When the `timing` feature is enabled, this module measures and reports the
//! wall time of each pass. When disabled, all timing code compiles away.
//!
//! Usage:
//!   cargo run --release --features timing

#[cfg(feature = "timing")]
use std::time::{Duration, Instant};

/// Phase timings for one solver pass.
#[cfg(feature = "timing")]
#[derive(Debug, Clone)]
pub struct PassTimings {
    pub total: Duration,
    pub scan: Duration,
    pub chunks: usize,
    pub parallel: bool,
}

#[cfg(feature = "timing")]
impl PassTimings {
    pub fn report(&self, n: usize) {
        let pairs = n.saturating_mul(n.saturating_sub(1));
        let scan_secs = self.scan.as_secs_f64();
        let pairs_per_sec = if scan_secs > 0.0 {
            pairs as f64 / scan_secs
        } else {
            0.0
        };
        log::debug!(
            "[timing] closest_farthest n={} chunks={} parallel={} scan={:.3}ms total={:.3}ms ({:.1} Mpairs/s)",
            n,
            self.chunks,
            self.parallel,
            scan_secs * 1000.0,
            self.total.as_secs_f64() * 1000.0,
            pairs_per_sec / 1e6
        );
    }
}

/// Stopwatch that is a no-op when the feature is disabled.
#[cfg(feature = "timing")]
pub struct Stopwatch(Instant);

#[cfg(feature = "timing")]
impl Stopwatch {
    #[inline]
    pub fn start() -> Self {
        Self(Instant::now())
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// Dummy stopwatch when feature is disabled (zero-sized).
#[cfg(not(feature = "timing"))]
pub struct Stopwatch;

#[cfg(not(feature = "timing"))]
impl Stopwatch {
    #[inline(always)]
    pub fn start() -> Self {
        Self
    }
}
