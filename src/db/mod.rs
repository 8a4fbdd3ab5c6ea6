//! Database layer
//!
//! SQLite persistence for the lang-portal backend.
//!
//! # Usage
//!
//! ```ignore
//! use lang_portal::config::DatabaseConfig;
//! use lang_portal::db::{create_pool, migrations};
//!
//! let pool = create_pool(&DatabaseConfig::default()).await?;
//! migrations::bootstrap_schema(&pool).await?;
//! pool.ping().await?;
//! ```

pub mod migrations;
pub mod pool;
pub mod repositories;
pub mod seed;

pub use pool::{
    create_pool, create_test_pool, database_file_path, DatabasePool, DynDatabasePool,
    SqliteDatabase,
};
