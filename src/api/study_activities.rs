//! Study activity API endpoints
//!
//! Handles HTTP requests for study activities and their sessions:
//! - GET /api/study_activities/{id} - Get a study activity
//! - GET /api/study_activities/{id}/study_sessions?page=N - List its sessions
//! - POST /api/study_activities - Start a study session for a group

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::api::common::PageQuery;
use crate::api::middleware::{ApiError, AppState};
use crate::models::{
    CreateStudySessionInput, Pagination, StudyActivity, StudySession, StudySessionResponse,
};

/// Response for a page of study sessions
#[derive(Debug, Serialize)]
pub struct StudySessionListResponse {
    pub items: Vec<StudySessionResponse>,
    pub pagination: Pagination,
}

/// Build the study activities router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/study_activities", post(create_study_session))
        .route("/study_activities/{id}", get(get_study_activity))
        .route(
            "/study_activities/{id}/study_sessions",
            get(get_study_activity_sessions),
        )
}

fn activity_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| ApiError::validation_error(format!("Invalid study activity ID: {}", e)))
}

/// GET /api/study_activities/{id}
async fn get_study_activity(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<StudyActivity>, ApiError> {
    let id = activity_id(path)?;

    let activity = state.study_activity_service.get_study_activity(id).await?;

    Ok(Json(activity))
}

/// GET /api/study_activities/{id}/study_sessions?page=N
async fn get_study_activity_sessions(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<StudySessionListResponse>, ApiError> {
    let id = activity_id(path)?;
    let Query(query) =
        query.map_err(|e| ApiError::validation_error(format!("Invalid page: {}", e)))?;

    let (items, pagination) = state
        .study_activity_service
        .get_study_activity_sessions(id, query.page)
        .await?;

    Ok(Json(StudySessionListResponse { items, pagination }))
}

/// POST /api/study_activities
async fn create_study_session(
    State(state): State<AppState>,
    body: Result<Json<CreateStudySessionInput>, JsonRejection>,
) -> Result<(StatusCode, Json<StudySession>), ApiError> {
    let Json(input) = body.map_err(|e| ApiError::validation_error(e.body_text()))?;

    let session = state
        .study_activity_service
        .create_study_session(input.group_id, input.study_activity_id)
        .await?;

    Ok((StatusCode::CREATED, Json(session)))
}
