//! Study activity repository
//!
//! Database operations for study activities and the sessions that reference
//! them.
//!
//! This module provides:
//! - `StudyActivityRepository` trait defining the interface for data access
//! - `SqlxStudyActivityRepository` implementing the trait for SQLite

use crate::db::DynDatabasePool;
use crate::models::{StudyActivity, StudySession, StudySessionResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// Study activity repository trait
#[async_trait]
pub trait StudyActivityRepository: Send + Sync {
    /// Get a study activity by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<StudyActivity>>;

    /// Count the sessions recorded for an activity
    async fn count_sessions(&self, activity_id: i64) -> Result<i64>;

    /// List one page of an activity's sessions, most recent first
    async fn list_sessions(
        &self,
        activity_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<StudySessionResponse>>;

    /// Check whether a word group exists
    async fn group_exists(&self, group_id: i64) -> Result<bool>;

    /// Check whether a study activity exists
    async fn activity_exists(&self, activity_id: i64) -> Result<bool>;

    /// Insert a session stamped with the database clock.
    ///
    /// Returns `None` when SQLite rejects the row because the group or the
    /// activity no longer exists.
    async fn create_session(&self, group_id: i64, activity_id: i64)
        -> Result<Option<StudySession>>;
}

/// SQLx-based study activity repository implementation
pub struct SqlxStudyActivityRepository {
    pool: DynDatabasePool,
}

impl SqlxStudyActivityRepository {
    /// Create a new SQLx study activity repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn StudyActivityRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl StudyActivityRepository for SqlxStudyActivityRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<StudyActivity>> {
        get_activity_by_id(self.pool.sqlite(), id).await
    }

    async fn count_sessions(&self, activity_id: i64) -> Result<i64> {
        count_activity_sessions(self.pool.sqlite(), activity_id).await
    }

    async fn list_sessions(
        &self,
        activity_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<StudySessionResponse>> {
        list_activity_sessions(self.pool.sqlite(), activity_id, limit, offset).await
    }

    async fn group_exists(&self, group_id: i64) -> Result<bool> {
        exists(self.pool.sqlite(), "SELECT EXISTS(SELECT 1 FROM groups WHERE id = ?)", group_id)
            .await
            .context("Failed to check group existence")
    }

    async fn activity_exists(&self, activity_id: i64) -> Result<bool> {
        exists(
            self.pool.sqlite(),
            "SELECT EXISTS(SELECT 1 FROM study_activities WHERE id = ?)",
            activity_id,
        )
        .await
        .context("Failed to check study activity existence")
    }

    async fn create_session(
        &self,
        group_id: i64,
        activity_id: i64,
    ) -> Result<Option<StudySession>> {
        create_study_session(self.pool.sqlite(), group_id, activity_id).await
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn get_activity_by_id(pool: &SqlitePool, id: i64) -> Result<Option<StudyActivity>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, thumbnail_url, description
        FROM study_activities
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get study activity by ID")?;

    row.map(|r| row_to_activity(&r)).transpose()
}

async fn count_activity_sessions(pool: &SqlitePool, activity_id: i64) -> Result<i64> {
    // Same joins as the listing, so sessions with a dangling group or
    // activity are excluded from both.
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM study_sessions ss
        JOIN groups g ON ss.group_id = g.id
        JOIN study_activities sa ON ss.study_activity_id = sa.id
        WHERE ss.study_activity_id = ?
        "#,
    )
    .bind(activity_id)
    .fetch_one(pool)
    .await
    .context("Failed to count study sessions")?;

    Ok(count)
}

async fn list_activity_sessions(
    pool: &SqlitePool,
    activity_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<StudySessionResponse>> {
    let mut rows = sqlx::query(
        r#"
        SELECT
            ss.id,
            sa.name AS activity_name,
            g.name AS group_name,
            ss.created_at AS start_time,
            DATETIME(ss.created_at, '+10 minutes') AS end_time,
            (SELECT COUNT(*) FROM word_review_items WHERE study_session_id = ss.id) AS review_items_count
        FROM study_sessions ss
        JOIN groups g ON ss.group_id = g.id
        JOIN study_activities sa ON ss.study_activity_id = sa.id
        WHERE ss.study_activity_id = ?
        ORDER BY ss.created_at DESC, ss.id DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(activity_id)
    .bind(limit)
    .bind(offset)
    .fetch(pool);

    let mut sessions = Vec::new();
    while let Some(row) = rows
        .try_next()
        .await
        .context("Failed to list study sessions")?
    {
        sessions.push(row_to_session_response(&row)?);
    }

    Ok(sessions)
}

async fn exists(pool: &SqlitePool, query: &str, id: i64) -> Result<bool> {
    let found: bool = sqlx::query_scalar(query).bind(id).fetch_one(pool).await?;
    Ok(found)
}

async fn create_study_session(
    pool: &SqlitePool,
    group_id: i64,
    activity_id: i64,
) -> Result<Option<StudySession>> {
    let result = sqlx::query(
        r#"
        INSERT INTO study_sessions (group_id, study_activity_id, created_at)
        VALUES (?, ?, CURRENT_TIMESTAMP)
        RETURNING id, group_id, study_activity_id, created_at
        "#,
    )
    .bind(group_id)
    .bind(activity_id)
    .fetch_one(pool)
    .await;

    match result {
        Ok(row) => Ok(Some(row_to_session(&row)?)),
        Err(e) if is_foreign_key_violation(&e) => Ok(None),
        Err(e) => Err(e).context("Failed to create study session"),
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_foreign_key_violation())
        .unwrap_or(false)
}

fn row_to_activity(row: &sqlx::sqlite::SqliteRow) -> Result<StudyActivity> {
    Ok(StudyActivity {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        thumbnail_url: row.try_get("thumbnail_url")?,
        description: row.try_get("description")?,
    })
}

fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> Result<StudySession> {
    Ok(StudySession {
        id: row.try_get("id")?,
        group_id: row.try_get("group_id")?,
        study_activity_id: row.try_get("study_activity_id")?,
        created_at: row.try_get("created_at")?,
    })
}

fn row_to_session_response(row: &sqlx::sqlite::SqliteRow) -> Result<StudySessionResponse> {
    Ok(StudySessionResponse {
        id: row.try_get("id")?,
        activity_name: row.try_get("activity_name")?,
        group_name: row.try_get("group_name")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        review_items_count: row.try_get("review_items_count")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};
    use chrono::Duration;

    async fn setup_test_repo() -> (DynDatabasePool, SqlxStudyActivityRepository) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::bootstrap_schema(&pool)
            .await
            .expect("Failed to bootstrap schema");
        let repo = SqlxStudyActivityRepository::new(pool.clone());
        (pool, repo)
    }

    async fn insert_activity(pool: &DynDatabasePool, name: &str) -> i64 {
        sqlx::query(
            "INSERT INTO study_activities (name, thumbnail_url, description) VALUES (?, ?, ?)",
        )
        .bind(name)
        .bind(format!("/thumbnails/{}.png", name))
        .bind(format!("{} practice", name))
        .execute(pool.sqlite())
        .await
        .expect("Failed to create test activity")
        .last_insert_rowid()
    }

    async fn insert_group(pool: &DynDatabasePool, name: &str) -> i64 {
        sqlx::query("INSERT INTO groups (name) VALUES (?)")
            .bind(name)
            .execute(pool.sqlite())
            .await
            .expect("Failed to create test group")
            .last_insert_rowid()
    }

    async fn insert_session_at(
        pool: &DynDatabasePool,
        group_id: i64,
        activity_id: i64,
        created_at: &str,
    ) -> i64 {
        sqlx::query(
            "INSERT INTO study_sessions (group_id, study_activity_id, created_at) VALUES (?, ?, ?)",
        )
        .bind(group_id)
        .bind(activity_id)
        .bind(created_at)
        .execute(pool.sqlite())
        .await
        .expect("Failed to create test session")
        .last_insert_rowid()
    }

    async fn insert_review(pool: &DynDatabasePool, session_id: i64, correct: bool) {
        sqlx::query("INSERT OR IGNORE INTO words (id, japanese, romaji, english) VALUES (1, '水', 'mizu', 'water')")
            .execute(pool.sqlite())
            .await
            .expect("Failed to create test word");
        sqlx::query(
            "INSERT INTO word_review_items (word_id, study_session_id, correct) VALUES (1, ?, ?)",
        )
        .bind(session_id)
        .bind(correct)
        .execute(pool.sqlite())
        .await
        .expect("Failed to create test review item");
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let (pool, repo) = setup_test_repo().await;
        let id = insert_activity(&pool, "flashcards").await;

        let activity = repo
            .get_by_id(id)
            .await
            .expect("Failed to get activity")
            .expect("Activity not found");

        assert_eq!(activity.id, id);
        assert_eq!(activity.name, "flashcards");
        assert_eq!(activity.thumbnail_url, "/thumbnails/flashcards.png");
        assert_eq!(activity.description, "flashcards practice");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let (_pool, repo) = setup_test_repo().await;

        let found = repo.get_by_id(404).await.expect("Failed to get activity");

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_exists_checks() {
        let (pool, repo) = setup_test_repo().await;
        let activity_id = insert_activity(&pool, "typing").await;
        let group_id = insert_group(&pool, "Adjectives").await;

        assert!(repo.group_exists(group_id).await.unwrap());
        assert!(!repo.group_exists(group_id + 1).await.unwrap());
        assert!(repo.activity_exists(activity_id).await.unwrap());
        assert!(!repo.activity_exists(activity_id + 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_sessions_enriched_rows() {
        let (pool, repo) = setup_test_repo().await;
        let activity_id = insert_activity(&pool, "flashcards").await;
        let group_id = insert_group(&pool, "Core Verbs").await;
        let session_id = insert_session_at(&pool, group_id, activity_id, "2024-05-01 09:00:00").await;
        insert_review(&pool, session_id, true).await;
        insert_review(&pool, session_id, false).await;

        let sessions = repo.list_sessions(activity_id, 100, 0).await.unwrap();

        assert_eq!(sessions.len(), 1);
        let session = &sessions[0];
        assert_eq!(session.id, session_id);
        assert_eq!(session.activity_name, "flashcards");
        assert_eq!(session.group_name, "Core Verbs");
        assert_eq!(session.review_items_count, 2);
        assert_eq!(session.end_time - session.start_time, Duration::minutes(10));
        assert_eq!(session.start_time.to_rfc3339(), "2024-05-01T09:00:00+00:00");
    }

    #[tokio::test]
    async fn test_list_sessions_most_recent_first() {
        let (pool, repo) = setup_test_repo().await;
        let activity_id = insert_activity(&pool, "flashcards").await;
        let group_id = insert_group(&pool, "Core Verbs").await;
        let oldest = insert_session_at(&pool, group_id, activity_id, "2024-05-01 09:00:00").await;
        let newest = insert_session_at(&pool, group_id, activity_id, "2024-05-03 09:00:00").await;
        let middle = insert_session_at(&pool, group_id, activity_id, "2024-05-02 09:00:00").await;

        let ids: Vec<i64> = repo
            .list_sessions(activity_id, 100, 0)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();

        assert_eq!(ids, vec![newest, middle, oldest]);
    }

    #[tokio::test]
    async fn test_list_sessions_filters_by_activity_and_pages() {
        let (pool, repo) = setup_test_repo().await;
        let flashcards = insert_activity(&pool, "flashcards").await;
        let typing = insert_activity(&pool, "typing").await;
        let group_id = insert_group(&pool, "Core Verbs").await;
        for day in 1..=5 {
            let at = format!("2024-05-0{} 09:00:00", day);
            insert_session_at(&pool, group_id, flashcards, &at).await;
        }
        insert_session_at(&pool, group_id, typing, "2024-05-09 09:00:00").await;

        assert_eq!(repo.count_sessions(flashcards).await.unwrap(), 5);
        assert_eq!(repo.count_sessions(typing).await.unwrap(), 1);

        let second_page = repo.list_sessions(flashcards, 2, 2).await.unwrap();
        assert_eq!(second_page.len(), 2);
        assert_eq!(second_page[0].start_time.to_rfc3339(), "2024-05-03T09:00:00+00:00");
        assert_eq!(second_page[1].start_time.to_rfc3339(), "2024-05-02T09:00:00+00:00");
        assert!(second_page.iter().all(|s| s.activity_name == "flashcards"));
    }

    #[tokio::test]
    async fn test_count_sessions_unknown_activity() {
        let (_pool, repo) = setup_test_repo().await;

        assert_eq!(repo.count_sessions(999).await.unwrap(), 0);
        assert!(repo.list_sessions(999, 100, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_session_returns_generated_columns() {
        let (pool, repo) = setup_test_repo().await;
        let activity_id = insert_activity(&pool, "flashcards").await;
        let group_id = insert_group(&pool, "Core Verbs").await;

        let session = repo
            .create_session(group_id, activity_id)
            .await
            .expect("Failed to create session")
            .expect("Session should be created");

        assert!(session.id > 0);
        assert_eq!(session.group_id, group_id);
        assert_eq!(session.study_activity_id, activity_id);
        assert!((chrono::Utc::now() - session.created_at).num_minutes().abs() < 5);
    }

    #[tokio::test]
    async fn test_create_session_dangling_reference() {
        let (pool, repo) = setup_test_repo().await;
        let activity_id = insert_activity(&pool, "flashcards").await;

        let created = repo
            .create_session(12345, activity_id)
            .await
            .expect("Constraint violation should not be a storage error");

        assert!(created.is_none());
        assert_eq!(repo.count_sessions(activity_id).await.unwrap(), 0);
    }
}
