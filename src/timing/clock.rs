//! Monotonic clocks measured in milliseconds.
//!
//! [`ManualClock`] is the virtual clock used by tests and the headless
//! [`Pilot`](crate::testing::Pilot). [`SystemClock`] and [`TokioClock`] read
//! real (or tokio-paused) monotonic time relative to their creation.

use std::cell::Cell;
use std::rc::Rc;

/// Milliseconds since the clock's epoch.
pub type Millis = u64;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// A monotonic time source.
pub trait Clock {
    /// Current time in milliseconds since this clock's epoch.
    fn now(&self) -> Millis;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Millis {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> Millis {
        (**self).now()
    }
}

// ---------------------------------------------------------------------------
// ManualClock
// ---------------------------------------------------------------------------

/// A virtual clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can hand one clone to a
/// controller and keep another to advance it.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    /// Create a clock starting at `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock starting at `start`.
    pub fn starting_at(start: Millis) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Move the clock forward by `delta` milliseconds.
    pub fn advance(&self, delta: Millis) {
        self.now.set(self.now.get().saturating_add(delta));
    }

    /// Jump to an absolute time. Moving backwards is ignored.
    pub fn set(&self, at: Millis) {
        if at > self.now.get() {
            self.now.set(at);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}

// ---------------------------------------------------------------------------
// SystemClock
// ---------------------------------------------------------------------------

/// Real monotonic time, with the epoch at construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        self.epoch.elapsed().as_millis() as Millis
    }
}

// ---------------------------------------------------------------------------
// TokioClock
// ---------------------------------------------------------------------------

/// Tokio's monotonic time, with the epoch at construction.
///
/// Follows `tokio::time::pause()` / `advance()`, which is what the async
/// [`driver`](crate::driver) relies on in tests.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    epoch: tokio::time::Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            epoch: tokio::time::Instant::now(),
        }
    }

    /// The tokio instant corresponding to `at` on this clock.
    pub fn instant_at(&self, at: Millis) -> tokio::time::Instant {
        self.epoch + std::time::Duration::from_millis(at)
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Millis {
        self.epoch.elapsed().as_millis() as Millis
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_starts_at_zero() {
        assert_eq!(ManualClock::new().now(), 0);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let view = clock.clone();
        clock.advance(150);
        assert_eq!(view.now(), 150);
    }

    #[test]
    fn manual_clock_set_never_goes_backwards() {
        let clock = ManualClock::starting_at(500);
        clock.set(100);
        assert_eq!(clock.now(), 500);
        clock.set(650);
        assert_eq!(clock.now(), 650);
    }

    #[test]
    fn clock_through_reference_and_rc() {
        let clock = ManualClock::starting_at(42);
        let by_ref: &ManualClock = &clock;
        assert_eq!(Clock::now(&by_ref), 42);
        let shared = Rc::new(clock.clone());
        assert_eq!(shared.now(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_clock_follows_paused_time() {
        let clock = TokioClock::new();
        assert_eq!(clock.now(), 0);
        tokio::time::advance(std::time::Duration::from_millis(250)).await;
        assert_eq!(clock.now(), 250);
        assert_eq!(
            clock.instant_at(300) - clock.instant_at(0),
            std::time::Duration::from_millis(300)
        );
    }
}
