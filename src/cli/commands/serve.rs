use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::config;
use crate::database::{DatabaseManager, GratitudeStore, MemoryGratitudeStore, PgGratitudeStore};
use crate::state::AppState;

pub async fn handle(port: Option<u16>, memory: bool) -> anyhow::Result<()> {
    let mut config = config::config().clone();
    if let Some(port) = port {
        config.server.port = port;
    }
    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set in {:?} mode", config.environment);
    }

    info!("Starting Gratitudes API in {:?} mode", config.environment);

    let pool = if memory {
        warn!("Using in-memory store; gratitudes are lost on shutdown");
        None
    } else {
        Some(
            DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?,
        )
    };

    let store: Arc<dyn GratitudeStore> = match &pool {
        Some(pool) => Arc::new(PgGratitudeStore::new(pool.clone())),
        None => Arc::new(MemoryGratitudeStore::new()),
    };

    let state = AppState::new(store, &config);
    let app = crate::app(state, &config);

    let bind_addr = config.bind_address();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Gratitudes API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        DatabaseManager::close(&pool).await;
    }
    info!("Server stopped");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
