//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::{BenchmarkResult, SubmissionRecord};
use crate::domain::query::ListQuery;
use crate::error::StorageResult;
use kernel::id::SubmissionId;

/// Outcome of an insert on the unique submission key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

/// One page of list results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkPage {
    pub benchmarks: Vec<BenchmarkResult>,
    /// Matching rows across all pages
    pub total: u64,
}

/// Benchmark repository trait
#[trait_variant::make(BenchmarkRepository: Send)]
pub trait LocalBenchmarkRepository {
    /// Whether a submission id has already been recorded
    async fn exists(&self, submission_id: SubmissionId) -> StorageResult<bool>;

    /// Atomic insert-if-absent keyed by submission id
    async fn insert_if_absent(&self, record: &SubmissionRecord) -> StorageResult<InsertOutcome>;

    async fn find(&self, submission_id: SubmissionId) -> StorageResult<Option<BenchmarkResult>>;

    /// Filtered, sorted page plus the total match count
    async fn list(&self, query: &ListQuery) -> StorageResult<BenchmarkPage>;
}
