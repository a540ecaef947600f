use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Minimum gap between consecutive network attempts.
///
/// The first attempt never waits. Shared by reference, so a throttle
/// behind a lock spaces attempts across threads too.
#[derive(Debug)]
pub struct Throttle {
    min_gap: Duration,
    last: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(min_gap: Duration) -> Self {
        Self {
            min_gap,
            last: Mutex::new(None),
        }
    }

    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn min_gap(&self) -> Duration {
        self.min_gap
    }

    /// Block until `min_gap` has passed since the previous call.
    pub fn wait(&self) {
        let mut last = self.last.lock();
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_gap {
                thread::sleep(self.min_gap - elapsed);
            }
        }
        *last = Some(Instant::now());
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_does_not_wait() {
        let throttle = Throttle::new(Duration::from_secs(10));
        let started = Instant::now();
        throttle.wait();
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn consecutive_calls_are_spaced() {
        let throttle = Throttle::new(Duration::from_millis(100));
        let started = Instant::now();
        throttle.wait();
        throttle.wait();
        throttle.wait();
        assert!(started.elapsed() >= Duration::from_millis(200));
    }

    #[test]
    fn zero_gap_never_sleeps() {
        let throttle = Throttle::none();
        let started = Instant::now();
        for _ in 0..100 {
            throttle.wait();
        }
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
