//! # Tiendita API Server
//!
//! HTTP/JSON backend for the consumer, store and courier front-ends.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tiendita API Server                              │
//! │                                                                         │
//! │  Front-ends ───► HTTP (5050) ───► routes ───► tiendita-core            │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │                               SnapshotStore                             │
//! │                                 (db.json)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tiendita_api::config::ApiConfig;
use tiendita_api::{build_router, AppState};
use tiendita_db::{SnapshotStore, StoreConfig};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Tiendita API server...");

    // Load configuration
    let config = ApiConfig::load().context("failed to load configuration")?;
    info!(
        bind = %config.bind_address(),
        db_path = %config.db_path.display(),
        "Configuration loaded"
    );

    // Open the snapshot store (writes the seed on first run)
    let store = SnapshotStore::open(StoreConfig::new(&config.db_path))
        .await
        .context("failed to open snapshot store")?;

    let app = build_router(AppState::new(store));

    let bind_addr = config.bind_address();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind to {bind_addr}"))?;
    info!(addr = %bind_addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - Default: `info,tower_http=debug`
/// - `RUST_LOG=tiendita_core=debug` - Show guard and catalog decisions
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
