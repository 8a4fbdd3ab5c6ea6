//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints for the lang-portal backend.
//! It includes:
//! - Study activity API endpoints
//! - Study session creation
//! - Health check

pub mod common;
pub mod health;
pub mod middleware;
pub mod study_activities;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState};

/// Build the API router (mounted under `/api`)
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(study_activities::router())
}

/// Build the CORS layer for the configured frontend origin
///
/// An origin that is not a valid header value is logged and left out, so
/// cross-origin requests are refused rather than the server failing to start.
fn cors_layer(cors_origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match cors_origin.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            tracing::warn!("Ignoring invalid CORS origin {:?}: {}", cors_origin, e);
            cors
        }
    }
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    Router::new()
        .nest("/api", build_api_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_origin)),
        )
        .with_state(state)
}
