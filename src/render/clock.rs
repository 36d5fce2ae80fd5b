//! Monotonic time sources for frame budgeting.

use std::cell::Cell;

use web_time::Instant;

/// Monotonic millisecond clock.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock starting now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that advances by a fixed step every time it is read.
///
/// Lets tests exhaust the frame budget after a known number of reads.
#[derive(Debug, Clone, Default)]
pub struct SteppingClock {
    now: Cell<f64>,
    step_ms: f64,
}

impl SteppingClock {
    /// Create a clock advancing `step_ms` per read.
    pub fn new(step_ms: f64) -> Self {
        Self {
            now: Cell::new(0.0),
            step_ms,
        }
    }
}

impl Clock for SteppingClock {
    fn now_ms(&self) -> f64 {
        let now = self.now.get();
        self.now.set(now + self.step_ms);
        now
    }
}
