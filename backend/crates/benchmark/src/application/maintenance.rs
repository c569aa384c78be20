//! Background sweeper for in-process state

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::application::read_cache::ReadCache;
use crate::application::throttle::AbuseThrottle;

/// Periodically drop idle throttle keys and expired cache entries
pub fn spawn_maintenance(
    throttle: Arc<AbuseThrottle>,
    cache: Arc<ReadCache>,
    interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::debug!("Maintenance task stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let now = Instant::now();
                    let sources = throttle.sweep_at(now);
                    let cached = cache.purge_expired_at(now);
                    if sources > 0 || cached > 0 {
                        tracing::debug!(sources, cached, "Pruned idle throttle keys and cache entries");
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::IngestConfig;

    #[tokio::test]
    async fn test_stops_on_cancel() {
        let shutdown = CancellationToken::new();
        let handle = spawn_maintenance(
            Arc::new(AbuseThrottle::new(&IngestConfig::default())),
            Arc::new(ReadCache::new(Duration::from_secs(5))),
            Duration::from_millis(10),
            shutdown.clone(),
        );

        tokio::time::sleep(Duration::from_millis(30)).await;
        shutdown.cancel();
        handle.await.unwrap();
    }
}
