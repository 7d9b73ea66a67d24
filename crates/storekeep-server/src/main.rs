//! Storekeep Server — application entry point.

use storekeep_db::{DbConfig, DbManager};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("storekeep=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting Storekeep server...");

    let config = DbConfig::from_env();
    let manager = match DbManager::connect(&config).await {
        Ok(manager) => manager,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to SurrealDB");
            std::process::exit(1);
        }
    };

    if let Err(e) = storekeep_db::run_migrations(manager.client()).await {
        tracing::error!(error = %e, "Failed to run migrations");
        std::process::exit(1);
    }

    // TODO: serve the admin REST API once the presentation layer lands.

    tracing::info!("Storekeep server ready.");
}
