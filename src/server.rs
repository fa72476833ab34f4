//! HTTP server bootstrap: bind address and graceful shutdown.

use std::env;
use std::net::SocketAddr;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;

// =============================================================================
// Configuration
// =============================================================================

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Reads `HOST` and `PORT`, falling back to `0.0.0.0:4000`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidPort`] if `PORT` is set but not a port number.
    pub fn from_env() -> Result<Self, ServerError> {
        let host = env::var("HOST")
            .ok()
            .filter(|host| !host.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match env::var("PORT") {
            Ok(value) if !value.trim().is_empty() => value
                .trim()
                .parse()
                .map_err(|_| ServerError::InvalidPort(value))?,
            _ => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }

    /// Resolves the configured host and port into a socket address.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidAddress`] if the host is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ServerError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid PORT value: '{0}'")]
    InvalidPort(String),

    #[error("Invalid server address: {0}")]
    InvalidAddress(String),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Server
// =============================================================================

/// Binds `config` and serves `router` until SIGINT or SIGTERM.
///
/// # Errors
///
/// Returns [`ServerError`] if the address is invalid or binding fails.
pub async fn serve(config: &ServerConfig, router: Router) -> Result<(), ServerError> {
    let address = config.socket_addr()?;
    let listener = TcpListener::bind(address).await?;

    tracing::info!(%address, "Server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
