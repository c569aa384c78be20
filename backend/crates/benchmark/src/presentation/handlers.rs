//! HTTP Handlers

use crate::application::config::IngestConfig;
use crate::application::get_benchmark::GetBenchmarkUseCase;
use crate::application::list_benchmarks::ListBenchmarksUseCase;
use crate::application::read_cache::ReadCache;
use crate::application::replay_guard::ReplayGuard;
use crate::application::submit_benchmark::{SubmissionRequest, SubmitBenchmarkUseCase};
use crate::application::throttle::AbuseThrottle;
use crate::domain::entities::BenchmarkResult;
use crate::domain::model_catalog::MODELS;
use crate::domain::query::ListQuery;
use crate::domain::repository::BenchmarkRepository;
use crate::error::IngestError;
use crate::presentation::dto::{ListParams, ListResponse, ModelListResponse, SubmitResponse};
use auth::AuthGate;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{ConnectInfo, Path, Query, State};
use axum::http::HeaderMap;
use kernel::error::app_error::AppResult;
use pow::{LoadCounter, PowConfig, VerifySolutionUseCase};
use rsa::RsaPrivateKey;
use std::net::SocketAddr;
use std::sync::Arc;

/// Shared state for benchmark handlers
pub struct BenchmarkAppState<R>
where
    R: BenchmarkRepository,
{
    pub submit: Arc<SubmitBenchmarkUseCase<R>>,
    pub list: Arc<ListBenchmarksUseCase<R>>,
    pub get: Arc<GetBenchmarkUseCase<R>>,
    /// Shared with the maintenance task
    pub throttle: Arc<AbuseThrottle>,
    /// Shared with the maintenance task
    pub cache: Arc<ReadCache>,
    pub config: Arc<IngestConfig>,
}

impl<R> Clone for BenchmarkAppState<R>
where
    R: BenchmarkRepository,
{
    fn clone(&self) -> Self {
        Self {
            submit: self.submit.clone(),
            list: self.list.clone(),
            get: self.get.clone(),
            throttle: self.throttle.clone(),
            cache: self.cache.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R> BenchmarkAppState<R>
where
    R: BenchmarkRepository,
{
    /// Wire the use cases around one repository
    ///
    /// `load` must be the counter the PoW router issues challenges from.
    pub fn new(
        repo: Arc<R>,
        gate: Arc<AuthGate>,
        private_key: Arc<RsaPrivateKey>,
        pow_config: Arc<PowConfig>,
        load: Arc<LoadCounter>,
        config: IngestConfig,
    ) -> Self {
        let throttle = Arc::new(AbuseThrottle::new(&config));
        let cache = Arc::new(ReadCache::new(config.cache_ttl));

        let submit = SubmitBenchmarkUseCase::new(
            gate,
            ReplayGuard::new(repo.clone(), config.store_timeout),
            throttle.clone(),
            private_key,
            VerifySolutionUseCase::new(pow_config),
            load,
        );
        let list = ListBenchmarksUseCase::new(repo.clone(), cache.clone(), config.store_timeout);
        let get = GetBenchmarkUseCase::new(repo, config.store_timeout);

        Self {
            submit: Arc::new(submit),
            list: Arc::new(list),
            get: Arc::new(get),
            throttle,
            cache,
            config: Arc::new(config),
        }
    }
}

/// POST /api/submit-benchmark
pub async fn submit_benchmark<R>(
    State(state): State<BenchmarkAppState<R>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SubmitResponse>, IngestError>
where
    R: BenchmarkRepository + Send + Sync + 'static,
{
    let client_ip = platform::client::resolve_client_ip(
        &headers,
        peer.ip(),
        state.config.trust_forwarded_for,
    );

    let submission_id = state
        .submit
        .execute(SubmissionRequest {
            headers,
            body,
            client_ip,
        })
        .await?;

    Ok(Json(SubmitResponse::accepted(submission_id)))
}

/// GET /api/benchmarks
pub async fn list_benchmarks<R>(
    State(state): State<BenchmarkAppState<R>>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ListResponse>>
where
    R: BenchmarkRepository + Send + Sync + 'static,
{
    let query: ListQuery = params.into();
    let page = state.list.execute(&query).await.inspect_err(|e| {
        tracing::error!(error = %e, "Failed to list benchmarks");
    })?;

    Ok(Json(page.into()))
}

/// GET /api/benchmark/{id}
pub async fn get_benchmark<R>(
    State(state): State<BenchmarkAppState<R>>,
    Path(id): Path<String>,
) -> AppResult<Json<BenchmarkResult>>
where
    R: BenchmarkRepository + Send + Sync + 'static,
{
    let result = state.get.execute(&id).await.inspect_err(|e| {
        if e.is_server_error() {
            tracing::error!(error = ?e, benchmark_id = %id, "Failed to load benchmark");
        }
    })?;

    Ok(Json(result))
}

/// GET /api/model-list
pub async fn model_list() -> Json<ModelListResponse> {
    Json(ModelListResponse { models: MODELS })
}
