//! HTTP Handlers

use crate::application::config::PowConfig;
use crate::application::issue_challenge::IssueChallengeUseCase;
use crate::application::load::LoadCounter;
use crate::presentation::dto::ChallengeResponse;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;

/// Shared state for PoW handlers
#[derive(Clone)]
pub struct PowAppState {
    pub load: Arc<LoadCounter>,
    pub config: Arc<PowConfig>,
}

/// GET /api/pow-challenge
pub async fn issue_challenge(State(state): State<PowAppState>) -> Json<ChallengeResponse> {
    let use_case = IssueChallengeUseCase::new(state.load.clone(), state.config.clone());
    Json(use_case.execute().into())
}
