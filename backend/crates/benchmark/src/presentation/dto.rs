//! API DTOs (Data Transfer Objects)

use kernel::id::SubmissionId;
use serde::{Deserialize, Serialize};

use crate::domain::entities::BenchmarkResult;
use crate::domain::model_catalog::ModelInfo;
use crate::domain::query::{BenchmarkFilter, ListQuery};
use crate::domain::repository::BenchmarkPage;

/// Response for POST /api/submit-benchmark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub message: String,
    pub submission_id: SubmissionId,
}

impl SubmitResponse {
    pub fn accepted(submission_id: SubmissionId) -> Self {
        Self {
            message: "Benchmark submitted successfully".to_string(),
            submission_id,
        }
    }
}

/// Query string for GET /api/benchmarks
///
/// Everything is taken as text so that a malformed number falls back to its
/// default instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub model: Option<String>,
    pub os: Option<String>,
    pub cpu: Option<String>,
    pub gpu: Option<String>,
    pub ollama_version: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl From<ListParams> for ListQuery {
    fn from(p: ListParams) -> Self {
        let filter = BenchmarkFilter::new(
            p.model.as_deref(),
            p.ollama_version.as_deref(),
            p.os.as_deref(),
            p.cpu.as_deref(),
            p.gpu.as_deref(),
        );
        ListQuery::parse(
            p.sort_by.as_deref(),
            p.order.as_deref(),
            p.page.as_deref(),
            p.limit.as_deref(),
            filter,
        )
    }
}

/// Response for GET /api/benchmarks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub benchmarks: Vec<BenchmarkResult>,
    pub total: u64,
}

impl From<BenchmarkPage> for ListResponse {
    fn from(page: BenchmarkPage) -> Self {
        Self {
            benchmarks: page.benchmarks,
            total: page.total,
        }
    }
}

/// Response for GET /api/model-list
#[derive(Debug, Clone, Serialize)]
pub struct ModelListResponse {
    pub models: &'static [ModelInfo],
}
