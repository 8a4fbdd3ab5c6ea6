//! Health check endpoint
//!
//! - GET /api/health - `{ "status": "ok" }` when the database answers

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::middleware::{ApiError, AppState};

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.pool.ping().await.map_err(|e| {
        tracing::error!("Health check failed: {:#}", e);
        ApiError::internal_error("Database unavailable")
    })?;

    Ok(Json(json!({ "status": "ok" })))
}
