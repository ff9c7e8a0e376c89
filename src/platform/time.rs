//! Time sources for the game loop
//!
//! The simulation only ever sees a `Duration` since some epoch, so tests can
//! drive it with `ManualClock` instead of the wall clock.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic time source
pub trait Clock {
    /// Time elapsed since the clock's epoch
    fn now(&self) -> Duration;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
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
        self.epoch.elapsed()
    }
}

/// Hand-driven clock. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Fixed-interval tick source.
///
/// Real elapsed time goes into an accumulator; every full `interval` in it
/// is one tick due. At most `max_catch_up` ticks are handed out per call and
/// any backlog beyond that is dropped.
#[derive(Debug, Clone)]
pub struct FixedTicker {
    interval: Duration,
    max_catch_up: u32,
    accumulator: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration, max_catch_up: u32) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            max_catch_up: max_catch_up.max(1),
            accumulator: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Feed elapsed time, get the number of ticks to run now
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut due = 0;
        while self.accumulator >= self.interval && due < self.max_catch_up {
            self.accumulator -= self.interval;
            due += 1;
        }
        if due == self.max_catch_up && self.accumulator >= self.interval {
            log::debug!(
                "tick backlog of {:?} dropped after {} catch-up ticks",
                self.accumulator,
                due
            );
            self.accumulator = Duration::ZERO;
        }
        due
    }

    /// Time until the next tick is due
    pub fn until_next(&self) -> Duration {
        self.interval.saturating_sub(self.accumulator)
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.advance(MS * 1500);
        assert_eq!(other.now(), MS * 1500);
        other.set(Duration::from_secs(3));
        assert_eq!(clock.now(), Duration::from_secs(3));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_ticker_accumulates() {
        let mut ticker = FixedTicker::new(MS * 16, 8);
        assert_eq!(ticker.advance(MS * 10), 0);
        assert_eq!(ticker.until_next(), MS * 6);
        assert_eq!(ticker.advance(MS * 10), 1);
        assert_eq!(ticker.advance(MS * 28), 2);
        assert_eq!(ticker.until_next(), MS * 16);
    }

    #[test]
    fn test_ticker_caps_catch_up() {
        let mut ticker = FixedTicker::new(MS * 16, 8);
        assert_eq!(ticker.advance(Duration::from_secs(2)), 8);
        // Backlog was dropped
        assert_eq!(ticker.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_ticker_rate_over_one_second() {
        let mut ticker = FixedTicker::new(MS * 16, 8);
        let total: u32 = (0..1000).map(|_| ticker.advance(MS)).sum();
        assert_eq!(total, 62);
    }

    #[test]
    fn test_ticker_reset() {
        let mut ticker = FixedTicker::new(MS * 16, 8);
        ticker.advance(MS * 15);
        ticker.reset();
        assert_eq!(ticker.advance(MS * 15), 0);
        assert_eq!(ticker.interval(), MS * 16);
    }
}
