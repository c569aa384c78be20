//! Submission Load Tracking
//!
//! Accepted submissions per period feed the difficulty schedule.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Process-wide accepted-submission counter
#[derive(Debug, Default)]
pub struct LoadCounter {
    count: Mutex<u64>,
}

impl LoadCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) {
        let mut count = self.count.lock();
        *count = count.saturating_add(1);
    }

    pub fn reset(&self) {
        *self.count.lock() = 0;
    }

    pub fn current(&self) -> u64 {
        *self.count.lock()
    }
}

/// Periodic reset of a [`LoadCounter`]
pub struct LoadResetTask;

impl LoadResetTask {
    /// Spawn the reset loop; it exits when `shutdown` is cancelled
    pub fn spawn(
        counter: Arc<LoadCounter>,
        period: Duration,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // the first tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        tracing::debug!("Load reset task stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        let previous = counter.current();
                        counter.reset();
                        tracing::debug!(previous, "Submission load counter reset");
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_increment_and_reset() {
        let counter = LoadCounter::new();
        assert_eq!(counter.current(), 0);
        counter.increment();
        counter.increment();
        assert_eq!(counter.current(), 2);
        counter.reset();
        assert_eq!(counter.current(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_task_zeroes_counter_each_period() {
        let counter = Arc::new(LoadCounter::new());
        let shutdown = CancellationToken::new();
        let handle = LoadResetTask::spawn(
            Arc::clone(&counter),
            Duration::from_secs(60),
            shutdown.clone(),
        );

        for _ in 0..7 {
            counter.increment();
        }
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(counter.current(), 7);

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(counter.current(), 0);

        shutdown.cancel();
        handle.await.unwrap();
    }
}
