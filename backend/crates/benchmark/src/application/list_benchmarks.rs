//! List Benchmarks Use Case

use std::sync::Arc;
use std::time::Duration;

use crate::application::read_cache::ReadCache;
use crate::application::store_timeout::with_timeout;
use crate::domain::entities::BenchmarkResult;
use crate::domain::query::ListQuery;
use crate::domain::repository::{BenchmarkPage, BenchmarkRepository};
use crate::error::StorageResult;

pub struct ListBenchmarksUseCase<R>
where
    R: BenchmarkRepository,
{
    repo: Arc<R>,
    cache: Arc<ReadCache>,
    timeout: Duration,
}

impl<R> ListBenchmarksUseCase<R>
where
    R: BenchmarkRepository,
{
    pub fn new(repo: Arc<R>, cache: Arc<ReadCache>, timeout: Duration) -> Self {
        Self {
            repo,
            cache,
            timeout,
        }
    }

    /// Cached page if fresh, otherwise a store round trip that refills the cache
    pub async fn execute(&self, query: &ListQuery) -> StorageResult<BenchmarkPage> {
        let key = query.cache_key();
        if let Some(page) = self.cache.get(&key) {
            tracing::debug!(%key, "Benchmark list served from cache");
            return Ok(page);
        }

        let page = with_timeout(self.timeout, self.repo.list(query)).await?;
        let page = BenchmarkPage {
            benchmarks: page.benchmarks.iter().map(BenchmarkResult::redacted).collect(),
            total: page.total,
        };
        self.cache.put(key, page.clone());
        Ok(page)
    }
}
