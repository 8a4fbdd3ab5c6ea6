//! Study activity and study session models

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long a study session is considered to last after it starts.
pub const STUDY_SESSION_LENGTH_MINUTES: i64 = 10;

/// A study activity (flashcards, typing tutor, ...). Reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudyActivity {
    pub id: i64,
    pub name: String,
    pub thumbnail_url: String,
    pub description: String,
}

/// A study session as stored: one run of an activity against a word group.
///
/// Sessions are created once and never mutated. The end time is not stored;
/// see [`StudySessionResponse::end_time`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudySession {
    pub id: i64,
    pub group_id: i64,
    pub study_activity_id: i64,
    pub created_at: DateTime<Utc>,
}

impl StudySession {
    /// Derived end of the session.
    pub fn end_time(&self) -> DateTime<Utc> {
        self.created_at + Duration::minutes(STUDY_SESSION_LENGTH_MINUTES)
    }
}

/// Read-only projection of a session joined with its activity, its group and
/// the number of word reviews recorded in it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudySessionResponse {
    pub id: i64,
    pub activity_name: String,
    pub group_name: String,
    pub start_time: DateTime<Utc>,
    /// Always `start_time` + 10 minutes
    pub end_time: DateTime<Utc>,
    pub review_items_count: i64,
}

/// Input for creating a study session
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudySessionInput {
    pub group_id: i64,
    pub study_activity_id: i64,
}
