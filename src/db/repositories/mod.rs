//! Database repositories
//!
//! Repository pattern implementations for database access.

pub mod study_activity;

pub use study_activity::{SqlxStudyActivityRepository, StudyActivityRepository};
