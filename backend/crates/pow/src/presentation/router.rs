//! PoW Router

use crate::application::config::PowConfig;
use crate::application::load::LoadCounter;
use crate::presentation::handlers::{self, PowAppState};
use axum::{Router, routing::get};
use std::sync::Arc;

/// Create the PoW router
///
/// The load counter is shared with the submission pipeline, which bumps it
/// for every accepted benchmark.
pub fn pow_router(load: Arc<LoadCounter>, config: Arc<PowConfig>) -> Router {
    let state = PowAppState { load, config };

    Router::new()
        .route("/pow-challenge", get(handlers::issue_challenge))
        .with_state(state)
}
