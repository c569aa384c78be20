//! Per-call store deadline

use std::future::Future;
use std::time::Duration;

use crate::error::{StorageError, StorageResult};

/// Run one store round trip under `limit`
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> StorageResult<T>
where
    F: Future<Output = StorageResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(timeout_ms = limit.as_millis() as u64, "Store call timed out");
            Err(StorageError::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_slow_call_times_out() {
        let result = with_timeout(Duration::from_secs(5), async {
            tokio::time::sleep(Duration::from_secs(6)).await;
            Ok::<_, StorageError>(1)
        })
        .await;
        assert_eq!(result, Err(StorageError::Timeout));
    }

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let ok = with_timeout(Duration::from_secs(5), async { Ok::<_, StorageError>(7) }).await;
        assert_eq!(ok, Ok(7));

        let err: StorageResult<()> = with_timeout(Duration::from_secs(5), async {
            Err(StorageError::Query("syntax".into()))
        })
        .await;
        assert_eq!(err, Err(StorageError::Query("syntax".into())));
    }
}
