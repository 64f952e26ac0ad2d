//! Quiet-window debouncing with an explicit clock.

use std::time::Duration;

/// Coalesces bursts of events into one.
///
/// Each `schedule` replaces the pending value and pushes the deadline to
/// `now + window`. The value is released by the first `poll` at or after
/// the deadline. Times are offsets from any fixed origin chosen by the host.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(Duration, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `value`, cancelling whatever was pending.
    pub fn schedule(&mut self, now: Duration, value: T) {
        self.pending = Some((now + self.window, value));
    }

    /// Release the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now >= *deadline => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    /// Drop the pending value, returning it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, v)| v)
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
