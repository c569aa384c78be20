//! In-memory Repository Implementation

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use kernel::id::SubmissionId;
use std::cmp::Ordering;
use std::time::Duration;

use crate::domain::entities::{BenchmarkResult, SubmissionRecord};
use crate::domain::query::{ListQuery, SortField, SortOrder};
use crate::domain::repository::{BenchmarkPage, BenchmarkRepository, InsertOutcome};
use crate::error::StorageResult;

/// DashMap-backed repository
///
/// The map's per-key entry lock makes `insert_if_absent` atomic, matching
/// the unique key of the SQL table.
#[derive(Default)]
pub struct InMemoryBenchmarkRepository {
    records: DashMap<SubmissionId, SubmissionRecord>,
    latency: Option<Duration>,
}

impl InMemoryBenchmarkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps for `latency` first
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            records: DashMap::new(),
            latency: Some(latency),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

fn compare(a: &SubmissionRecord, b: &SubmissionRecord, field: SortField) -> Ordering {
    let (x, y) = (&a.result, &b.result);
    match field {
        SortField::Timestamp => x.timestamp.cmp(&y.timestamp),
        SortField::TokensPerSecond => x.tokens_per_second.total_cmp(&y.tokens_per_second),
        SortField::EvalCount => x.eval_count.cmp(&y.eval_count),
        SortField::Duration => x.duration.total_cmp(&y.duration),
        SortField::ModelName => x.model_name.cmp(&y.model_name),
        SortField::ReceivedAt => a.received_at.cmp(&b.received_at),
    }
}

impl BenchmarkRepository for InMemoryBenchmarkRepository {
    async fn exists(&self, submission_id: SubmissionId) -> StorageResult<bool> {
        self.simulate_latency().await;
        Ok(self.records.contains_key(&submission_id))
    }

    async fn insert_if_absent(&self, record: &SubmissionRecord) -> StorageResult<InsertOutcome> {
        self.simulate_latency().await;
        match self.records.entry(record.submission_id) {
            Entry::Occupied(_) => Ok(InsertOutcome::Duplicate),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(InsertOutcome::Inserted)
            }
        }
    }

    async fn find(&self, submission_id: SubmissionId) -> StorageResult<Option<BenchmarkResult>> {
        self.simulate_latency().await;
        Ok(self
            .records
            .get(&submission_id)
            .map(|record| record.result.clone()))
    }

    async fn list(&self, query: &ListQuery) -> StorageResult<BenchmarkPage> {
        self.simulate_latency().await;

        let mut matching: Vec<SubmissionRecord> = self
            .records
            .iter()
            .filter(|entry| {
                let r = &entry.value().result;
                query.filter.matches(
                    &r.model_name,
                    &r.ollama_version,
                    r.os(),
                    r.cpu_name(),
                    r.gpu_name(),
                )
            })
            .map(|entry| entry.value().clone())
            .collect();

        matching.sort_by(|a, b| {
            let primary = match query.order {
                SortOrder::Asc => compare(a, b, query.sort_by),
                SortOrder::Desc => compare(b, a, query.sort_by),
            };
            primary.then_with(|| a.submission_id.as_uuid().cmp(b.submission_id.as_uuid()))
        });

        let total = matching.len() as u64;
        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let benchmarks = matching
            .into_iter()
            .skip(offset)
            .take(query.limit as usize)
            .map(|record| record.result)
            .collect();

        Ok(BenchmarkPage { benchmarks, total })
    }
}
