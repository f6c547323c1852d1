//! Health check endpoints

use axum::{extract::State, Json};

use crate::dto::HealthResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        store_backend: state.store.backend_name().to_string(),
    }))
}

/// Ready check endpoint (verifies store connectivity)
pub async fn ready_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    state.store.ping().await?;

    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        version: state.version.clone(),
        store_backend: state.store.backend_name().to_string(),
    }))
}
