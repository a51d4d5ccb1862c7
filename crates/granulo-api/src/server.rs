//! API server implementation

use tokio::net::TcpListener;

use crate::config::ApiConfig;
use crate::routes::router;
use crate::Result;

/// Granulo API server
#[derive(Debug, Clone)]
pub struct Server {
    config: ApiConfig,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    /// Configuration the server was built with.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Binds the configured address and serves until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let addr = self.config.socket_addr().await?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(address = %listener.local_addr()?, "Granulo API listening");

        Self::serve(listener).await
    }

    /// Serves the router on an already bound listener.
    pub async fn serve(listener: TcpListener) -> Result<()> {
        axum::serve(listener, router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("Granulo API stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
