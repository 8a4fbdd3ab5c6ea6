//! lang-portal - Backend for a vocabulary-learning portal

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lang_portal::{
    api::{self, AppState},
    config::Config,
    db::{self, repositories::SqlxStudyActivityRepository},
    services::StudyActivityService,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lang_portal=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting lang-portal backend...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {}", config.database.url);

    db::migrations::bootstrap_schema(&pool).await?;
    tracing::info!("Database schema ready");

    // Create repositories and services
    let study_activity_repo = SqlxStudyActivityRepository::boxed(pool.clone());
    let study_activity_service = Arc::new(StudyActivityService::new(study_activity_repo));

    let state = AppState {
        pool: pool.clone(),
        study_activity_service,
    };

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    pool.close().await;

    Ok(())
}
