//! Startup orchestration.
//!
//! Fail fast: any error before the listener is serving is fatal.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Error type for service startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid bind address: {0}")]
    Address(#[from] std::net::AddrParseError),
    #[error("failed to start Prometheus exporter: {0}")]
    Exporter(#[from] metrics_exporter_prometheus::BuildError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the service and run it until a termination signal arrives.
pub async fn launch(config: ServiceConfig) -> Result<(), StartupError> {
    if config.observability.exporter_enabled {
        let addr: SocketAddr = config.observability.exporter_address.parse()?;
        metrics::init_exporter(addr)?;
    }

    let bind_address = config.listener.bind_address()?;
    let listener = TcpListener::bind(bind_address).await?;
    let port = listener.local_addr()?.port();

    tracing::info!("Server running on port {}", port);
    tracing::info!("Health check: http://localhost:{}/health", port);
    tracing::info!("Metrics: http://localhost:{}/metrics", port);

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let mut serving = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        result = &mut serving => {
            return match result {
                Ok(outcome) => outcome.map_err(StartupError::from),
                Err(join) => Err(std::io::Error::other(join).into()),
            };
        }
        signal = signals::wait_for_signal() => {
            let name = signal?;
            tracing::info!(signal = name, "{} signal received: closing HTTP server", name);
        }
    }

    shutdown.trigger();
    match serving.await {
        Ok(outcome) => outcome?,
        Err(join) => return Err(std::io::Error::other(join).into()),
    }
    tracing::info!("HTTP server closed");
    Ok(())
}
