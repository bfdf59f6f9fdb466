//! Time source used to pace simulated measurements
//!
//! The executor asks the clock to advance by the instrument settle delay and
//! records how much time passed. [`SystemClock`] really waits; [`ManualClock`]
//! only moves a counter, so tests and `--fast` runs finish immediately while the
//! recorded durations stay the same.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub trait Clock: Send + Sync {
    /// Monotonic time since the clock was created
    fn elapsed(&self) -> Duration;

    /// Let `duration` pass
    fn advance(&self, duration: Duration);
}

/// Wall clock that blocks the calling thread
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }

    fn advance(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock; `advance` returns immediately
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Relaxed))
    }

    fn advance(&self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.fetch_add(nanos, Ordering::Relaxed);
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn elapsed(&self) -> Duration {
        (**self).elapsed()
    }

    fn advance(&self, duration: Duration) {
        (**self).advance(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances_without_waiting() {
        let clock = ManualClock::new();
        assert_eq!(clock.elapsed(), Duration::ZERO);

        let started = Instant::now();
        clock.advance(Duration::from_secs(3600));
        clock.advance(Duration::from_millis(250));

        assert_eq!(clock.elapsed(), Duration::from_millis(3_600_250));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_system_clock_waits() {
        let clock = SystemClock::new();
        let before = clock.elapsed();
        clock.advance(Duration::from_millis(5));
        assert!(clock.elapsed() - before >= Duration::from_millis(5));
    }

    #[test]
    fn test_boxed_clock() {
        let clock: Box<dyn Clock> = Box::new(ManualClock::new());
        clock.advance(Duration::from_millis(10));
        assert_eq!(clock.elapsed(), Duration::from_millis(10));
    }
}
