//! Schema bootstrap
//!
//! The six lang-portal tables are created with `CREATE TABLE IF NOT EXISTS`
//! inside a single transaction, so running the bootstrap against an existing
//! database is a no-op. There is no version tracking: the schema is either
//! fully present or created in one go.

use anyhow::{Context, Result};

use super::DynDatabasePool;

/// One table of the schema, in dependency order.
#[derive(Debug, Clone)]
pub struct SchemaTable {
    /// Table name
    pub name: &'static str,
    /// `CREATE TABLE IF NOT EXISTS` statement
    pub create_sql: &'static str,
}

/// Every table, parents before the tables that reference them.
pub const SCHEMA: &[SchemaTable] = &[
    SchemaTable {
        name: "words",
        create_sql: r#"
            CREATE TABLE IF NOT EXISTS words (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                japanese TEXT NOT NULL,
                romaji TEXT NOT NULL,
                english TEXT NOT NULL
            )
        "#,
    },
    SchemaTable {
        name: "groups",
        create_sql: r#"
            CREATE TABLE IF NOT EXISTS groups (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            )
        "#,
    },
    SchemaTable {
        name: "words_groups",
        create_sql: r#"
            CREATE TABLE IF NOT EXISTS words_groups (
                word_id INTEGER NOT NULL,
                group_id INTEGER NOT NULL,
                PRIMARY KEY (word_id, group_id),
                FOREIGN KEY (word_id) REFERENCES words(id),
                FOREIGN KEY (group_id) REFERENCES groups(id)
            )
        "#,
    },
    SchemaTable {
        name: "study_activities",
        create_sql: r#"
            CREATE TABLE IF NOT EXISTS study_activities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                thumbnail_url TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT ''
            )
        "#,
    },
    SchemaTable {
        name: "study_sessions",
        create_sql: r#"
            CREATE TABLE IF NOT EXISTS study_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                group_id INTEGER NOT NULL,
                study_activity_id INTEGER NOT NULL,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (group_id) REFERENCES groups(id),
                FOREIGN KEY (study_activity_id) REFERENCES study_activities(id)
            )
        "#,
    },
    SchemaTable {
        name: "word_review_items",
        create_sql: r#"
            CREATE TABLE IF NOT EXISTS word_review_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                word_id INTEGER NOT NULL,
                study_session_id INTEGER NOT NULL,
                correct BOOLEAN NOT NULL,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (word_id) REFERENCES words(id),
                FOREIGN KEY (study_session_id) REFERENCES study_sessions(id)
            )
        "#,
    },
];

/// Create every table that does not exist yet.
///
/// All statements run in one transaction; a failure leaves the database
/// untouched.
pub async fn bootstrap_schema(pool: &DynDatabasePool) -> Result<()> {
    let mut tx = pool
        .sqlite()
        .begin()
        .await
        .context("Failed to begin schema transaction")?;

    for table in SCHEMA {
        tracing::debug!("Ensuring table {}", table.name);
        sqlx::query(table.create_sql)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to create table: {}", table.name))?;
    }

    tx.commit().await.context("Failed to commit schema transaction")?;
    tracing::info!("Schema ready ({} tables)", SCHEMA.len());

    Ok(())
}

/// Names of the tables currently present, in alphabetical order.
pub async fn existing_tables(pool: &DynDatabasePool) -> Result<Vec<String>> {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(pool.sqlite())
    .await
    .context("Failed to list tables")?;

    Ok(names)
}
