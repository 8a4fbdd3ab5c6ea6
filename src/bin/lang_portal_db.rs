//! Developer tool for the lang-portal database.
//!
//! Usage: `cargo run --bin lang-portal-db -- <command>`
//!
//! Commands:
//! - `init-db` - create the schema
//! - `seed` - insert the sample words
//! - `reset` - delete the database file
//! - `reset-and-seed` - reset, init-db, then seed
//!
//! The database location comes from `config.yml` and `LANG_PORTAL_DATABASE_URL`,
//! the same way the server resolves it.

use anyhow::{bail, Result};
use std::path::Path;
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lang_portal::{
    config::{Config, DatabaseConfig},
    db::{self, migrations, seed},
};

const USAGE: &str = "Usage: lang-portal-db <init-db|seed|reset|reset-and-seed>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    InitDb,
    Seed,
    Reset,
    ResetAndSeed,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "init-db" => Ok(Self::InitDb),
            "seed" => Ok(Self::Seed),
            "reset" => Ok(Self::Reset),
            "reset-and-seed" => Ok(Self::ResetAndSeed),
            other => bail!("Unknown command: {}\n{}", other, USAGE),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lang_portal=info,lang_portal_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Some(arg) = std::env::args().nth(1) else {
        println!("{}", USAGE);
        return Ok(());
    };
    let command: Command = arg.parse()?;

    let config = Config::load_with_env(Path::new("config.yml"))?;
    run(command, &config.database).await
}

async fn run(command: Command, database: &DatabaseConfig) -> Result<()> {
    match command {
        Command::InitDb => init_db(database).await,
        Command::Seed => seed_db(database).await,
        Command::Reset => reset(database),
        Command::ResetAndSeed => {
            reset(database)?;
            init_db(database).await?;
            seed_db(database).await
        }
    }
}

async fn init_db(database: &DatabaseConfig) -> Result<()> {
    let pool = db::create_pool(database).await?;
    migrations::bootstrap_schema(&pool).await?;
    pool.close().await;
    tracing::info!("Database schema created at {}", database.url);
    Ok(())
}

async fn seed_db(database: &DatabaseConfig) -> Result<()> {
    let pool = db::create_pool(database).await?;
    let inserted = seed::seed_sample_words(&pool).await?;
    pool.close().await;
    tracing::info!("Inserted {} sample words", inserted);
    Ok(())
}

fn reset(database: &DatabaseConfig) -> Result<()> {
    match db::database_file_path(&database.url) {
        Some(path) => {
            if !seed::reset_database_file(&path)? {
                tracing::info!("No database file at {}", path.display());
            }
        }
        None => tracing::info!("In-memory database, nothing to reset"),
    }
    Ok(())
}
