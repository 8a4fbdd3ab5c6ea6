//! Data models
//!
//! Database entities, read projections and request inputs used by the
//! lang-portal backend.

mod pagination;
mod study_activity;

pub use pagination::{total_pages, ListParams, Pagination};
pub use study_activity::{
    CreateStudySessionInput, StudyActivity, StudySession, StudySessionResponse,
    STUDY_SESSION_LENGTH_MINUTES,
};
