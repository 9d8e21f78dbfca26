//! Injected time and deferral capabilities.
//!
//! The focus debouncer compares instants and defers work onto the host UI
//! loop. Both capabilities are traits so the state machines can run under
//! test against a hand-cranked clock and scheduler.

use std::time::{Duration, Instant};

/// Monotonic time source.
pub trait Clock {
    /// Current instant, as elapsed time from an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// One-shot deferral onto the host UI loop.
///
/// There is no cancellation: scheduled callbacks always fire, and any work
/// they would do must re-check live state first.
pub trait Scheduler {
    /// Run `callback` once, roughly `delay` after now, on the UI thread.
    fn schedule_once(&self, delay: Duration, callback: Box<dyn FnOnce()>);

    /// Run `callback` once at the next idle slot of the UI loop.
    fn schedule_idle(&self, callback: Box<dyn FnOnce()>);
}

/// Clock backed by [`std::time::Instant`].
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
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
