//! Cancellable single-slot timer.
//!
//! [`Debouncer`] coalesces rapid triggers into one deferred action. It holds
//! at most one pending action: scheduling supersedes whatever was pending
//! (last write wins, nothing is queued).
//!
//! Like the rest of the crate it performs no I/O and owns no clock. Time is
//! passed in, so the same code runs against `std::time::Instant` in
//! production and a virtual instant in tests.

use std::{
    ops::Sub,
    time::{Duration, Instant},
};

/// Pending action and when it was scheduled.
#[derive(Debug, Clone)]
struct Pending<I, A> {
    scheduled_at: I,
    delay: Duration,
    action: A,
}

/// Debounce timer owned by a single controller instance.
#[derive(Debug, Clone)]
pub struct Debouncer<A, I = Instant>
where
    I: Copy + Ord + Send + Sync + Sub<Output = Duration>,
{
    pending: Option<Pending<I, A>>,
}

impl<A, I> Default for Debouncer<A, I>
where
    I: Copy + Ord + Send + Sync + Sub<Output = Duration>,
{
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<A, I> Debouncer<A, I>
where
    I: Copy + Ord + Send + Sync + Sub<Output = Duration>,
{
    /// Create an idle debouncer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` after `delay` of quiescence starting at `now`.
    ///
    /// Cancels any pending action. Returns `true` if one was superseded.
    pub fn schedule(&mut self, now: I, delay: Duration, action: A) -> bool {
        self.pending.replace(Pending { scheduled_at: now, delay, action }).is_some()
    }

    /// Drop the pending action, if any. Idempotent.
    ///
    /// Returns `true` if something was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Whether an action is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending action is due. `None` if idle.
    pub fn remaining(&self, now: I) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.delay.saturating_sub(elapsed(p.scheduled_at, now)))
    }

    /// Take the pending action if it is due at `now`.
    ///
    /// Each scheduled action is yielded at most once.
    pub fn poll(&mut self, now: I) -> Option<A> {
        let due = self.pending.as_ref().is_some_and(|p| elapsed(p.scheduled_at, now) >= p.delay);
        if due { self.pending.take().map(|p| p.action) } else { None }
    }
}

/// Elapsed time from `since` to `now`, zero if the clock reads earlier.
fn elapsed<I>(since: I, now: I) -> Duration
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    if now > since { now - since } else { Duration::ZERO }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(200);

    #[test]
    fn fires_once_after_delay() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new();
        debouncer.schedule(t0, DELAY, "filter");

        assert_eq!(debouncer.poll(t0 + Duration::from_millis(199)), None);
        assert_eq!(debouncer.poll(t0 + DELAY), Some("filter"));
        assert_eq!(debouncer.poll(t0 + DELAY * 2), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn schedule_supersedes_pending() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new();

        assert!(!debouncer.schedule(t0, DELAY, 1));
        assert!(debouncer.schedule(t0 + Duration::from_millis(150), DELAY, 2));

        // The first deadline passes without firing.
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(250)), None);
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(350)), Some(2));
    }

    #[test]
    fn cancel_is_idempotent() {
        let t0 = Instant::now();
        let mut debouncer: Debouncer<()> = Debouncer::new();
        assert!(!debouncer.cancel());

        debouncer.schedule(t0, DELAY, ());
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());
        assert_eq!(debouncer.poll(t0 + DELAY), None);
    }

    #[test]
    fn remaining_counts_down() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new();
        assert_eq!(debouncer.remaining(t0), None);

        debouncer.schedule(t0, DELAY, ());
        assert_eq!(debouncer.remaining(t0 + Duration::from_millis(50)), Some(Duration::from_millis(150)));
        assert_eq!(debouncer.remaining(t0 + DELAY * 3), Some(Duration::ZERO));
    }
}
