//! Benchmark Router

use crate::domain::repository::BenchmarkRepository;
use crate::presentation::handlers::{self, BenchmarkAppState};
use axum::{
    Router,
    routing::{get, post},
};

/// Create the benchmark router
///
/// The submit route reads the peer address, so the server must be run with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn benchmark_router<R>(state: BenchmarkAppState<R>) -> Router
where
    R: BenchmarkRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/model-list", get(handlers::model_list))
        .route("/benchmarks", get(handlers::list_benchmarks::<R>))
        .route("/benchmark/{id}", get(handlers::get_benchmark::<R>))
        .route("/submit-benchmark", post(handlers::submit_benchmark::<R>))
        .with_state(state)
}
