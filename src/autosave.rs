//! Periodic auto-save scheduling
//!
//! The timer does no I/O. The runtime polls it with the current instant and,
//! when it fires, dispatches an auto-save tick through the normal update loop,
//! so periodic saves are serialized with user edits and saves.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct AutoSaveTimer {
    period: Option<Duration>,
    next_due: Option<Instant>,
}

impl AutoSaveTimer {
    /// Start a timer firing every `period`; None never fires
    pub fn new(period: Option<Duration>, now: Instant) -> Self {
        Self {
            period,
            next_due: period.map(|p| now + p),
        }
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true once per elapsed period and schedules the next one.
    ///
    /// Missed periods are not replayed: after a long stall the timer fires
    /// once and reschedules from `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match (self.period, self.next_due) {
            (Some(period), Some(due)) if now >= due => {
                self.next_due = Some(now + period);
                true
            }
            _ => false,
        }
    }

    /// Stop firing; used on session teardown
    pub fn cancel(&mut self) {
        if self.next_due.take().is_some() {
            tracing::debug!("auto-save timer cancelled");
        }
    }
}
