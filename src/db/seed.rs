//! Developer seed and reset helpers
//!
//! Used by the `lang-portal-db` tool. Nothing here runs as part of the server.

use anyhow::{Context, Result};
use std::path::Path;

use super::DynDatabasePool;

/// Sample vocabulary inserted by `seed`: (japanese, romaji, english).
pub const SAMPLE_WORDS: &[(&str, &str, &str)] = &[
    ("こんにちは", "konnichiwa", "hello"),
    ("さようなら", "sayounara", "goodbye"),
    ("ありがとう", "arigatou", "thank you"),
];

/// Insert the sample words. Returns the number of inserted rows.
///
/// Seeding is not idempotent: running it twice inserts the words twice.
pub async fn seed_sample_words(pool: &DynDatabasePool) -> Result<u64> {
    let mut tx = pool
        .sqlite()
        .begin()
        .await
        .context("Failed to begin seed transaction")?;

    let mut inserted = 0;
    for &(japanese, romaji, english) in SAMPLE_WORDS {
        let result = sqlx::query("INSERT INTO words (japanese, romaji, english) VALUES (?, ?, ?)")
            .bind(japanese)
            .bind(romaji)
            .bind(english)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to seed word: {}", english))?;
        inserted += result.rows_affected();
    }

    tx.commit().await.context("Failed to commit seed transaction")?;
    tracing::info!("Seeded {} words", inserted);

    Ok(inserted)
}

/// Delete the database file outright.
///
/// Returns `true` if a file was removed and `false` if there was nothing to
/// remove. No confirmation is asked for.
pub fn reset_database_file(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::info!("Removed database file {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("Database file {} already absent", path.display());
            Ok(false)
        }
        Err(e) => {
            Err(e).with_context(|| format!("Failed to remove database: {}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::{create_pool, create_test_pool, migrations};

    #[tokio::test]
    async fn test_seed_inserts_sample_words() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::bootstrap_schema(&pool).await.unwrap();

        let inserted = seed_sample_words(&pool).await.expect("Seed should succeed");
        assert_eq!(inserted, 3);

        let english: Vec<String> = sqlx::query_scalar("SELECT english FROM words ORDER BY id")
            .fetch_all(pool.sqlite())
            .await
            .unwrap();
        assert_eq!(english, vec!["hello", "goodbye", "thank you"]);
    }

    #[tokio::test]
    async fn test_seed_without_schema_fails() {
        let pool = create_test_pool().await.expect("Failed to create test pool");

        assert!(seed_sample_words(&pool).await.is_err());
    }

    #[tokio::test]
    async fn test_reset_removes_database_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("words.db");

        let pool = create_pool(&DatabaseConfig {
            url: db_path.to_string_lossy().to_string(),
            max_connections: 1,
        })
        .await
        .unwrap();
        migrations::bootstrap_schema(&pool).await.unwrap();
        pool.close().await;
        assert!(db_path.exists());

        assert!(reset_database_file(&db_path).unwrap());
        assert!(!db_path.exists());
    }

    #[test]
    fn test_reset_missing_file_is_ok() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("absent.db");

        assert!(!reset_database_file(&db_path).unwrap());
        assert!(!reset_database_file(&db_path).unwrap());
    }
}
