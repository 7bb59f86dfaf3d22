//! Cancellable one-shot timers on a single-threaded event queue.

use std::{collections::BTreeSet, time::Duration};

/// Handle for one scheduled callback. Tokens are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(pub u64);

/// Deferred re-invocation service used by the player.
pub trait Scheduler {
    /// Schedule a one-shot timer `delay` from now.
    fn schedule(&mut self, delay: Duration) -> TimerToken;
    /// Invalidate `token`. Returns `false` if it already fired or was cancelled.
    fn cancel(&mut self, token: TimerToken) -> bool;
    fn is_pending(&self, token: TimerToken) -> bool;
}

/// Deterministic timer queue driven by explicit [`advance`](VirtualClock::advance) calls.
///
/// The real-time driver sleeps until [`next_deadline`](VirtualClock::next_deadline) and then
/// advances by the slept amount, so both modes share one code path.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now: Duration,
    next_token: u64,
    // (deadline, token) keeps deadline order with scheduling order as tie-break.
    queue: BTreeSet<(Duration, TimerToken)>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.first().map(|(at, _)| *at)
    }

    /// Time remaining until the next deadline.
    pub fn until_next(&self) -> Option<Duration> {
        self.next_deadline().map(|at| at.saturating_sub(self.now))
    }

    /// Move time forward by `by` and return the timers that came due, in firing order.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerToken> {
        self.now = self.now.saturating_add(by);
        let mut fired = Vec::new();
        while let Some(&(at, token)) = self.queue.first() {
            if at > self.now {
                break;
            }
            self.queue.remove(&(at, token));
            fired.push(token);
        }
        fired
    }

    /// Jump straight to the next deadline, if any.
    pub fn advance_to_next(&mut self) -> Vec<TimerToken> {
        match self.until_next() {
            Some(d) => self.advance(d),
            None => Vec::new(),
        }
    }
}

impl Scheduler for VirtualClock {
    fn schedule(&mut self, delay: Duration) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.queue.insert((self.now.saturating_add(delay), token));
        tracing::trace!(token = token.0, delay_ms = delay.as_millis() as u64, "timer scheduled");
        token
    }

    fn cancel(&mut self, token: TimerToken) -> bool {
        let key = self.queue.iter().find(|(_, t)| *t == token).copied();
        match key {
            Some(k) => {
                self.queue.remove(&k);
                tracing::trace!(token = token.0, "timer cancelled");
                true
            }
            None => false,
        }
    }

    fn is_pending(&self, token: TimerToken) -> bool {
        self.queue.iter().any(|(_, t)| *t == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn timers_fire_in_deadline_then_schedule_order() {
        let mut c = VirtualClock::new();
        let late = c.schedule(30 * MS);
        let a = c.schedule(10 * MS);
        let b = c.schedule(10 * MS);

        assert!(c.advance(9 * MS).is_empty());
        assert_eq!(c.advance(MS), vec![a, b]);
        assert_eq!(c.until_next(), Some(20 * MS));
        assert_eq!(c.advance_to_next(), vec![late]);
        assert_eq!(c.now(), 30 * MS);
        assert_eq!(c.pending(), 0);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut c = VirtualClock::new();
        let t = c.schedule(5 * MS);
        assert!(c.is_pending(t));
        assert!(c.cancel(t));
        assert!(!c.cancel(t));
        assert!(!c.is_pending(t));
        assert!(c.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn tokens_are_not_reused() {
        let mut c = VirtualClock::new();
        let a = c.schedule(MS);
        c.advance(MS);
        let b = c.schedule(MS);
        assert_ne!(a, b);
    }
}
