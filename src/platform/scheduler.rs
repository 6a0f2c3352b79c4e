//! Frame scheduling
//!
//! The game asks for "one more tick" after each completed tick; the host
//! decides when that tick actually runs (display refresh, timer, test loop).

use std::cell::Cell;
use std::rc::Rc;

/// Cooperative next-tick scheduler
pub trait Scheduler {
    /// Request exactly one future call to `Game::process_cycle`
    fn schedule_next_tick(&mut self);

    /// Drop a pending request, if any
    fn cancel(&mut self);
}

/// Single-slot request queue polled by the host loop.
///
/// Clones share the slot so the host can poll while the game owns a handle.
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    pending: Rc<Cell<bool>>,
    requested: Rc<Cell<u64>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending request; true if a tick should run now
    pub fn take(&self) -> bool {
        self.pending.replace(false)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Total requests ever made
    pub fn requested(&self) -> u64 {
        self.requested.get()
    }
}

impl Scheduler for FrameQueue {
    fn schedule_next_tick(&mut self) {
        // Requests coalesce: one refresh runs one tick
        self.pending.set(true);
        self.requested.set(self.requested.get() + 1);
    }

    fn cancel(&mut self) {
        self.pending.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_consumes() {
        let mut queue = FrameQueue::new();
        let host = queue.clone();
        assert!(!host.take());
        queue.schedule_next_tick();
        queue.schedule_next_tick();
        assert!(host.take());
        assert!(!host.take());
        assert_eq!(host.requested(), 2);
    }

    #[test]
    fn test_cancel() {
        let mut queue = FrameQueue::new();
        queue.schedule_next_tick();
        queue.cancel();
        assert!(!queue.is_pending());
    }
}
