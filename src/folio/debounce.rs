//! Trailing-edge debouncing.
//!
//! Triggers that arrive within `window` of each other coalesce into a single
//! execution, fired once the window has passed with no new trigger. Time is
//! passed in explicitly as a [`Duration`] on any monotonic clock, so the
//! policy does not depend on a timer primitive and is trivially testable.

use std::time::Duration;

pub const DEFAULT_RESIZE_WINDOW: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Duration>,
    coalesced: usize,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
            coalesced: 0,
        }
    }

    /// Registers a trigger at `now`, pushing the deadline back.
    pub fn trigger(&mut self, now: Duration) {
        self.deadline = Some(now + self.window);
        self.coalesced += 1;
    }

    /// Returns `true` exactly once per burst, when `now` reaches the deadline.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                tracing::debug!(coalesced = self.coalesced, "debounced burst fired");
                self.deadline = None;
                self.coalesced = 0;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Triggers absorbed by the pending burst.
    pub fn coalesced(&self) -> usize {
        self.coalesced
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_RESIZE_WINDOW)
    }
}
