//! Services layer - Business logic
//!
//! Services sit between the HTTP handlers and the repositories. They are
//! responsible for:
//! - Enforcing business rules such as reference checks
//! - Computing pagination
//! - Classifying failures into not-found, validation and storage errors

pub mod study_activity;

pub use study_activity::{StudyActivityService, StudyActivityServiceError, SESSIONS_PER_PAGE};
