//! Study activity service
//!
//! Business logic for study activities and their sessions:
//! - Look up a single activity
//! - Page through an activity's sessions, most recent first
//! - Start a new session for a word group after checking its references

use crate::db::repositories::StudyActivityRepository;
use crate::models::{ListParams, Pagination, StudyActivity, StudySession, StudySessionResponse};
use anyhow::Context;
use std::sync::Arc;

/// Sessions returned per page when listing an activity's sessions
pub const SESSIONS_PER_PAGE: i64 = 100;

/// Error types for study activity service operations
#[derive(Debug, thiserror::Error)]
pub enum StudyActivityServiceError {
    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A referenced group or activity does not exist
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Storage failure
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Service for study activities and study sessions
pub struct StudyActivityService {
    repo: Arc<dyn StudyActivityRepository>,
}

impl StudyActivityService {
    /// Create a new study activity service
    ///
    /// # Arguments
    /// * `repo` - Repository for database operations
    pub fn new(repo: Arc<dyn StudyActivityRepository>) -> Self {
        Self { repo }
    }

    /// Get a study activity by ID
    ///
    /// # Errors
    /// - `NotFound` if no activity has this ID
    pub async fn get_study_activity(
        &self,
        id: i64,
    ) -> Result<StudyActivity, StudyActivityServiceError> {
        self.repo
            .get_by_id(id)
            .await
            .context("Failed to get study activity")?
            .ok_or_else(|| {
                StudyActivityServiceError::NotFound(format!(
                    "Study activity with ID {} not found",
                    id
                ))
            })
    }

    /// List one page of the sessions recorded for an activity
    ///
    /// Pages are 1-indexed and hold [`SESSIONS_PER_PAGE`] sessions; pages
    /// below 1 are treated as page 1. The activity itself is not looked up,
    /// so an unknown ID yields an empty page rather than `NotFound`.
    ///
    /// # Returns
    /// The sessions, most recent first, and the pagination envelope
    pub async fn get_study_activity_sessions(
        &self,
        activity_id: i64,
        page: i64,
    ) -> Result<(Vec<StudySessionResponse>, Pagination), StudyActivityServiceError> {
        let params = ListParams::new(page, SESSIONS_PER_PAGE);

        let total_items = self
            .repo
            .count_sessions(activity_id)
            .await
            .context("Failed to count study sessions")?;

        let sessions = self
            .repo
            .list_sessions(activity_id, params.limit(), params.offset())
            .await
            .context("Failed to list study sessions")?;

        Ok((sessions, Pagination::new(&params, total_items)))
    }

    /// Start a new study session for a word group
    ///
    /// # Errors
    /// - `ValidationError` if the group or the activity does not exist; the
    ///   sessions table is left untouched
    pub async fn create_study_session(
        &self,
        group_id: i64,
        activity_id: i64,
    ) -> Result<StudySession, StudyActivityServiceError> {
        self.verify_group_and_activity(group_id, activity_id).await?;

        // A reference deleted after the checks above is caught by SQLite's
        // foreign key enforcement on the insert itself.
        let session = self
            .repo
            .create_session(group_id, activity_id)
            .await
            .context("Failed to create study session")?
            .ok_or_else(|| {
                StudyActivityServiceError::ValidationError(format!(
                    "group with ID {} or study activity with ID {} no longer exists",
                    group_id, activity_id
                ))
            })?;

        tracing::info!(
            "Created study session {} (group {}, activity {})",
            session.id,
            group_id,
            activity_id
        );

        Ok(session)
    }

    async fn verify_group_and_activity(
        &self,
        group_id: i64,
        activity_id: i64,
    ) -> Result<(), StudyActivityServiceError> {
        if !self
            .repo
            .group_exists(group_id)
            .await
            .context("Failed to check group")?
        {
            return Err(StudyActivityServiceError::ValidationError(format!(
                "group with ID {} does not exist",
                group_id
            )));
        }

        if !self
            .repo
            .activity_exists(activity_id)
            .await
            .context("Failed to check study activity")?
        {
            return Err(StudyActivityServiceError::ValidationError(format!(
                "study activity with ID {} does not exist",
                activity_id
            )));
        }

        Ok(())
    }
}
