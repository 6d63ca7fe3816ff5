//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::state::AppState;

/// Liveness check; never touches the database
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
    }))
}

/// Readiness check; verifies the database is reachable
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match state.db.health_check().await {
        Ok(true) => Ok(Json(serde_json::json!({
            "status": "ready",
            "database": "ok",
        }))),
        _ => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}
