//! getdub API server
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `RUST_LOG`: Logging level (e.g., `debug`, `info`, `getdub_api=debug`)
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `4000`)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use getdub_api::api::{AppState, create_router};
use getdub_api::infrastructure::{RepositoryConfig, RepositoryFactory};
use getdub_api::server::{self, ServerConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "getdub_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting getdub API");

    let config = match RepositoryConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    tracing::info!(storage_mode = ?config.storage_mode, "Repository configuration loaded");

    let factory = RepositoryFactory::new(config);
    let repositories = match factory.create().await {
        Ok(repositories) => {
            tracing::info!("Repositories initialized successfully");
            repositories
        }
        Err(error) => {
            tracing::error!("Failed to initialize repositories: {}", error);
            std::process::exit(1);
        }
    };

    let application = create_router(AppState::from_repositories(repositories));

    let server_config = match ServerConfig::from_env() {
        Ok(server_config) => server_config,
        Err(error) => {
            tracing::error!("Server configuration error: {}", error);
            std::process::exit(1);
        }
    };

    if let Err(error) = server::serve(&server_config, application).await {
        tracing::error!("Server error: {}", error);
        std::process::exit(1);
    }
}
