//! HTTP server for the resource collections.

use super::handlers::{collection_routes, CollectionState};
use crate::config::{ConfigError, ServerConfig};
use crate::framework::FrameworkError;
use crate::lifecycle::{ResourceSystem, ShutdownError};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::signal;
use tower_http::trace::TraceLayer;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to seed demo data: {0}")]
    Seed(#[source] FrameworkError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error(transparent)]
    Shutdown(#[from] ShutdownError),
}

/// Builds the full application router.
///
/// - `/books`, `/employees` - the collections
/// - `/version` - plain-text application version
/// - `/-/healthy` - liveness probe
pub fn app_router(system: &ResourceSystem, config: &ServerConfig) -> Router {
    let timeout = config.request_timeout();
    let version = config.version.clone();

    Router::new()
        .nest(
            "/books",
            collection_routes(CollectionState::new(system.books.clone(), timeout)),
        )
        .nest(
            "/employees",
            collection_routes(CollectionState::new(system.employees.clone(), timeout)),
        )
        .route(
            "/version",
            get(move || {
                let version = version.clone();
                async move { version }
            }),
        )
        .route("/-/healthy", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
}

/// HTTP server owning the collection actors for its whole run.
pub struct HttpServer {
    system: ResourceSystem,
    config: ServerConfig,
}

impl HttpServer {
    pub fn new(system: ResourceSystem, config: ServerConfig) -> Self {
        Self { system, config }
    }

    /// Serves until SIGINT/SIGTERM, then drains connections and stops the actors.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.socket_addr()?;
        let app = app_router(&self.system, &self.config);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        tracing::info!("Starting HTTP server on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("Server shut down gracefully");
        self.system.shutdown().await?;
        Ok(())
    }
}

/// Listen for SIGTERM and SIGINT (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
