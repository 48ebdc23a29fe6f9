//! Small helpers shared by the binaries: setup timing and count parsing.

use std::time::{Duration, Instant};

/// Scope timer for setup phases; logs the elapsed time when dropped or finished.
///
/// # Example
/// ```ignore
/// let _t = Timed::info("Spawn points");
/// // ... do work ...
/// // logs "Spawn points: 1.234ms" when _t is dropped
/// ```
pub struct Timed {
    name: &'static str,
    start: Instant,
    level: log::Level,
    logged: bool,
}

impl Timed {
    pub fn new(name: &'static str, level: log::Level) -> Self {
        log::trace!("{}...", name);
        Self {
            name,
            start: Instant::now(),
            level,
            logged: false,
        }
    }

    pub fn info(name: &'static str) -> Self {
        Self::new(name, log::Level::Info)
    }

    pub fn debug(name: &'static str) -> Self {
        Self::new(name, log::Level::Debug)
    }

    /// Log now and return the elapsed time instead of waiting for drop.
    pub fn finish(mut self) -> Duration {
        let elapsed = self.start.elapsed();
        self.emit(elapsed);
        elapsed
    }

    fn emit(&mut self, elapsed: Duration) {
        if !self.logged {
            self.logged = true;
            log::log!(self.level, "{}: {:.3?}", self.name, elapsed);
        }
    }
}

impl Drop for Timed {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        self.emit(elapsed);
    }
}

/// Parse a point count with an optional `k`/`m` suffix ("2k" = 2000).
pub fn parse_count(s: &str) -> Result<usize, String> {
    let s = s.to_lowercase();
    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('m') {
        (stripped, 1_000_000)
    } else if let Some(stripped) = s.strip_suffix('k') {
        (stripped, 1_000)
    } else {
        (s.as_str(), 1)
    };

    num_str
        .parse::<f64>()
        .map(|n| (n * multiplier as f64) as usize)
        .map_err(|e| format!("Invalid number '{}': {}", s, e))
}

/// Parse a finite, non-negative float.
pub fn parse_non_negative(s: &str) -> Result<f32, String> {
    let value = s
        .parse::<f32>()
        .map_err(|e| format!("Invalid number '{}': {}", s, e))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("'{}' must be a non-negative number", s))
    }
}
