//! Clock sources. The session never reads time itself; the caller samples a
//! clock once per tick and passes the value in.

use std::cell::Cell;
use std::time::Instant;

use crate::types::Seconds;

pub trait Clock {
    /// Monotonic seconds since an arbitrary origin.
    fn now(&self) -> Seconds;
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
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
    fn now(&self) -> Seconds {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for headless runs and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Seconds>,
}

impl ManualClock {
    pub fn new(start: Seconds) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, by: Seconds) -> Seconds {
        self.now.set(self.now.get() + by);
        self.now.get()
    }

    pub fn set(&self, now: Seconds) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Seconds {
        self.now.get()
    }
}
