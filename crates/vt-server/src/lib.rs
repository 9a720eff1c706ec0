//! vt-server: HTTP catalog API.
//!
//! Ties the store adapter and the catalog service into a running axum
//! server:
//!
//! - `/` liveness and `/test` status report
//! - `/seed` demo catalog loading
//! - `/home`, `/item/{item_id}` and `/channels` catalog reads
//! - Swagger UI under `/api-docs`
//! - Graceful shutdown via signal handling

pub mod catalog;
pub mod context;
pub mod demo;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;

use std::net::SocketAddr;

use tokio_util::sync::CancellationToken;
use vt_core::config::Config;

use crate::context::AppContext;

/// Start the catalog server.
///
/// Connects to the store (degrading to an unavailable handle if that fails),
/// builds the [`AppContext`] and serves HTTP until a shutdown signal arrives
/// or `cancel` is triggered.
pub async fn start(config: Config, cancel: CancellationToken) -> vt_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| vt_core::Error::Internal(format!("Invalid server address: {e}")))?;

    let ctx = AppContext::connect(config);
    let app = router::build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| vt_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Starting server on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM) or cancellation.
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
        _ = cancel.cancelled() => {}
    }

    tracing::info!("Shutdown signal received");
}
