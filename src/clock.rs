// src/clock.rs

//! Monotonic time measurement.
//!
//! Built on `tokio::time::Instant`, so a paused test clock
//! (`tokio::time::pause`) drives every measurement deterministically.

use std::time::Duration;

use tokio::time::Instant;

/// Measures elapsed time since a fixed starting point.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Return the elapsed time and restart from now.
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let lap = now.saturating_duration_since(self.started);
        self.started = now;
        lap
    }
}

/// Whole milliseconds of a duration, saturating at `u64::MAX`.
pub fn as_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
