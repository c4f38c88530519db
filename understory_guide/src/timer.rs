// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A host-clocked debounce timer.
//!
//! Times are milliseconds on any monotonic clock the host chooses.

/// Fires once `delay_ms` have passed since the last [`trigger`](Self::trigger).
///
/// Each trigger resets the deadline, so a steady stream of triggers keeps the
/// timer from firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debounce {
    delay_ms: u64,
    deadline: Option<u64>,
}

impl Debounce {
    /// Creates an idle timer.
    #[must_use]
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    /// Restarts the quiet period at `now`.
    pub fn trigger(&mut self, now: u64) {
        self.deadline = Some(now.saturating_add(self.delay_ms));
    }

    /// Returns `true` exactly once when the deadline has been reached.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drops a pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` while a deadline is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_quiet_period() {
        let mut timer = Debounce::new(300);
        timer.trigger(1_000);
        assert!(!timer.poll(1_299));
        assert!(timer.poll(1_300));
        assert!(!timer.poll(1_301));
        assert!(!timer.is_pending());
    }

    #[test]
    fn retrigger_resets_deadline() {
        let mut timer = Debounce::new(300);
        timer.trigger(0);
        timer.trigger(200);
        assert!(!timer.poll(300));
        assert_eq!(timer.deadline(), Some(500));
        assert!(timer.poll(500));
    }

    #[test]
    fn idle_and_cancelled_timers_never_fire() {
        let mut timer = Debounce::new(300);
        assert!(!timer.poll(u64::MAX));

        timer.trigger(0);
        timer.cancel();
        assert!(!timer.poll(1_000));
    }
}
