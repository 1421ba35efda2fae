//! Virtual time.
//!
//! [`SimInstant`] is an offset from the start of a simulation. It satisfies
//! the instant bound of the core state machines, so debounce windows elapse
//! only when a test advances the [`SimClock`].

use std::{ops::Sub, time::Duration};

/// Point in virtual time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SimInstant(Duration);

impl SimInstant {
    /// Simulation start.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Instant `offset` after the start.
    pub fn from_start(offset: Duration) -> Self {
        Self(offset)
    }

    /// Offset from the start.
    pub fn since_start(self) -> Duration {
        self.0
    }

    /// Instant `delta` later.
    pub fn after(self, delta: Duration) -> Self {
        Self(self.0.saturating_add(delta))
    }
}

impl Sub for SimInstant {
    type Output = Duration;

    fn sub(self, earlier: Self) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

/// Manually advanced clock.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now: SimInstant,
}

impl SimClock {
    /// Clock at the simulation start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> SimInstant {
        self.now
    }

    /// Move time forward by `delta` and return the new time.
    pub fn advance(&mut self, delta: Duration) -> SimInstant {
        self.now = self.now.after(delta);
        self.now
    }

    /// Move time forward by `millis` milliseconds.
    pub fn advance_ms(&mut self, millis: u64) -> SimInstant {
        self.advance(Duration::from_millis(millis))
    }
}
