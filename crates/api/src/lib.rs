//! User API Library
//!
//! HTTP REST adapter over the user use cases, with OpenAPI docs and a
//! storage-aware health check.

pub mod cli;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod token;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use common::AppResult;
use user_service_lib::infra::Database;
use user_service_lib::repository::{InMemoryUserStore, UserStore};
use user_service_lib::UserManager;

use crate::config::{ApiConfig, StorageBackend};
use crate::routes::create_router;
use crate::state::AppState;
use crate::token::TokenKeys;

/// Wire the use cases to the configured storage backend.
pub async fn build_state(config: &ApiConfig) -> AppResult<AppState> {
    let tokens = TokenKeys::from_config(&config.auth);

    match config.storage {
        StorageBackend::Postgres => {
            let db = Database::connect(&config.database).await?;
            let repo = Arc::new(UserStore::new(db.get_connection()));
            Ok(AppState::new(Arc::new(UserManager::new(repo)), Some(db), tokens))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on shutdown");
            let repo = Arc::new(InMemoryUserStore::new());
            Ok(AppState::new(Arc::new(UserManager::new(repo)), None, tokens))
        }
    }
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
pub async fn run_server(config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.auth.using_dev_secret {
        warn!("JWT_SECRET not set, using insecure default for development");
    }

    let state = build_state(&config).await?;

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.service.addr().parse()?;
    info!(
        service = %config.service.service_name,
        storage = %config.storage,
        "Listening on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
