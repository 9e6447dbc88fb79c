//! Randomized spacing between consecutive remote calls.

use std::time::Duration;

use parking_lot::Mutex;
use rand::Rng;
use tokio::time::{sleep_until, Instant};

/// Reserves call slots separated by a random delay in `[min, max]`.
///
/// Each caller reserves the next free slot under the lock and sleeps until
/// it outside the lock, so concurrent callers are spaced out too.
#[derive(Debug)]
pub struct Pacer {
    min: Duration,
    max: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl Pacer {
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min,
            max: max.max(min),
            next_slot: Mutex::new(None),
        }
    }

    /// Wait for this caller's slot. The first call never waits.
    pub async fn wait(&self) {
        let start = {
            let mut next = self.next_slot.lock();
            let now = Instant::now();
            let start = next.map_or(now, |slot| slot.max(now));
            *next = Some(start + self.jitter());
            start
        };
        sleep_until(start).await;
    }

    fn jitter(&self) -> Duration {
        if self.max.is_zero() {
            return Duration::ZERO;
        }
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_pacing_never_waits() {
        let pacer = Pacer::new(Duration::ZERO, Duration::ZERO);
        let before = Instant::now();
        for _ in 0..10 {
            pacer.wait().await;
        }
        assert!(before.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn consecutive_calls_are_spaced() {
        let pacer = Pacer::new(Duration::from_millis(20), Duration::from_millis(30));
        let before = Instant::now();
        pacer.wait().await;
        pacer.wait().await;
        pacer.wait().await;
        assert!(before.elapsed() >= Duration::from_millis(40));
    }
}
