//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{Backend, Config};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, DatabaseStore, MemoryStore, Store};

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    let config = apply_overrides(config, args);
    tracing::info!(backend = %config.backend, "Starting server...");

    // The store is built once here and shared by every request
    let store = build_store(&config).await?;
    let app_state = AppState::from_store(store);

    // Build router
    let app = create_router(app_state, &config.cors_origins);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

/// Command-line flags win over environment values.
fn apply_overrides(mut config: Config, args: ServeArgs) -> Config {
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    config
}

/// Build the configured store.
///
/// The database backend needs a connection string; without one startup fails.
pub async fn build_store(config: &Config) -> AppResult<Arc<dyn Store>> {
    match config.backend {
        Backend::Memory => {
            tracing::info!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        Backend::Database => {
            let url = config.require_database_url()?;
            let db = Database::connect(url).await?;
            tracing::info!("Database connected");
            Ok(Arc::new(DatabaseStore::from_database(&db)))
        }
    }
}
