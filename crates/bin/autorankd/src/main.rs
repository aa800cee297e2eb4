//! # autorankd — autorank daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use autorank_adapter_http_axum::state::AppState;
use autorank_adapter_storage_sqlite_sqlx::{
    Config as DbConfig, SqliteAutomationRepository, SqliteEnvironmentRepository,
};
use autorank_app::services::automation_service::AutomationService;
use autorank_app::services::environment_service::EnvironmentService;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(config.logging.filter.clone())
        .init();

    // Database
    let db = DbConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Repositories
    let automation_repo = SqliteAutomationRepository::new(pool.clone());
    let environment_repo = SqliteEnvironmentRepository::new(pool.clone());

    // Services
    let automation_service =
        AutomationService::new(automation_repo, SqliteEnvironmentRepository::new(pool));
    let environment_service = EnvironmentService::new(environment_repo);

    // HTTP
    let state = AppState::new(automation_service, environment_service);
    let app = autorank_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "autorankd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
