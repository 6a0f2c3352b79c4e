//! Monotonic clocks

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic time source in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by `Instant`, zero at construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock for tests and headless runs.
///
/// Clones share the same time, so a driver can keep a handle while the game
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    /// Move time forward; negative steps are ignored
    pub fn advance(&self, ms: f64) {
        if ms > 0.0 {
            self.now.set(self.now.get() + ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
