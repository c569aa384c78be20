//! Benchmark Ingestion Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Benchmark entities, model catalog, list queries, repository traits
//! - `application/` - Submission pipeline, replay guard, throttling, read cache
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers
//! - `client/` - Building a submission on the sending side
//!
//! ## Submission pipeline
//! 1. Bearer token, `X-Submission-ID` binding and `X-Signature`
//! 2. Replay check on the submission id
//! 3. Global rate limit
//! 4. Envelope decryption
//! 5. Schema, metrics and model checks
//! 6. Proof-of-work verification
//! 7. Per-source rate limit
//! 8. Insert-if-absent, then the PoW load counter is bumped

pub mod application;
pub mod client;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::IngestConfig;
pub use application::maintenance::spawn_maintenance;
pub use application::submit_benchmark::{Stage, SubmissionRequest, SubmitBenchmarkUseCase};
pub use client::{ClientError, PreparedSubmission, prepare_submission, prepare_submission_as};
pub use domain::entities::{BenchmarkResult, GpuInfo, SubmissionRecord, SysInfo};
pub use domain::model_catalog::{MODELS, ModelInfo};
pub use domain::query::{BenchmarkFilter, ListQuery, SortField, SortOrder};
pub use domain::repository::{BenchmarkPage, BenchmarkRepository, InsertOutcome};
pub use error::{IngestError, IngestResult, RateLimitScope, StorageError, StorageResult};
pub use infra::memory::InMemoryBenchmarkRepository;
pub use infra::postgres::PgBenchmarkRepository;
pub use presentation::handlers::BenchmarkAppState;
pub use presentation::router::benchmark_router;
