//! # Timers
//!
//! Deadlines on a millisecond clock supplied by the presentation layer.

use log::debug;
use serde::{Deserialize, Serialize};

/// Things the session can schedule for later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Regenerate the maze after a win
    AutoReset,
    /// Close a resolved combat if the defeat sound never reports back
    CloseEncounter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Timer {
    kind: TimerKind,
    deadline_ms: u64,
}

/// Pending timers, at most one per kind.
///
/// # Examples
///
/// ```
/// use minotaur::{TimerKind, TimerQueue};
///
/// let mut timers = TimerQueue::new();
/// timers.schedule(TimerKind::AutoReset, 10_000);
/// assert!(timers.advance(9_999).is_empty());
/// assert_eq!(timers.advance(10_000), vec![TimerKind::AutoReset]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerQueue {
    now_ms: u64,
    pending: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Arms `kind` to fire `delay_ms` from now, replacing any earlier one.
    pub fn schedule(&mut self, kind: TimerKind, delay_ms: u64) {
        self.cancel(kind);
        let deadline_ms = self.now_ms.saturating_add(delay_ms);
        debug!("Scheduling {:?} at {} ms", kind, deadline_ms);
        self.pending.push(Timer { kind, deadline_ms });
    }

    /// Disarms `kind`. Returns true if it was pending.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.kind != kind);
        before != self.pending.len()
    }

    /// Disarms everything.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|timer| timer.kind == kind)
    }

    /// Deadline of `kind`, if armed.
    pub fn deadline(&self, kind: TimerKind) -> Option<u64> {
        self.pending
            .iter()
            .find(|timer| timer.kind == kind)
            .map(|timer| timer.deadline_ms)
    }

    /// Moves the clock forward and returns the timers that came due, earliest first.
    ///
    /// A reading earlier than the current clock is ignored.
    pub fn advance(&mut self, now_ms: u64) -> Vec<TimerKind> {
        if now_ms < self.now_ms {
            debug!(
                "Ignoring clock reading {} ms behind current {} ms",
                now_ms, self.now_ms
            );
            return Vec::new();
        }
        self.now_ms = now_ms;

        let mut due: Vec<Timer> = self
            .pending
            .iter()
            .copied()
            .filter(|timer| timer.deadline_ms <= now_ms)
            .collect();
        self.pending.retain(|timer| timer.deadline_ms > now_ms);

        due.sort_by_key(|timer| timer.deadline_ms);
        due.into_iter().map(|timer| timer.kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_prevents_firing() {
        let mut timers = TimerQueue::new();
        timers.schedule(TimerKind::AutoReset, 100);
        assert!(timers.cancel(TimerKind::AutoReset));
        assert!(!timers.cancel(TimerKind::AutoReset));
        assert!(timers.advance(1_000).is_empty());
    }

    #[test]
    fn test_reschedule_replaces() {
        let mut timers = TimerQueue::new();
        timers.schedule(TimerKind::CloseEncounter, 100);
        timers.advance(50);
        timers.schedule(TimerKind::CloseEncounter, 100);
        assert_eq!(timers.deadline(TimerKind::CloseEncounter), Some(150));
        assert!(timers.advance(120).is_empty());
        assert_eq!(timers.advance(150), vec![TimerKind::CloseEncounter]);
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(TimerKind::AutoReset, 500);
        timers.schedule(TimerKind::CloseEncounter, 200);
        assert_eq!(
            timers.advance(1_000),
            vec![TimerKind::CloseEncounter, TimerKind::AutoReset]
        );
        assert!(!timers.is_pending(TimerKind::AutoReset));
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut timers = TimerQueue::new();
        timers.advance(500);
        timers.schedule(TimerKind::AutoReset, 100);
        assert!(timers.advance(10).is_empty());
        assert_eq!(timers.now(), 500);
        assert!(timers.is_pending(TimerKind::AutoReset));
    }
}
