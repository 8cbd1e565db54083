//! Greeting HTTP service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request ID ─▶ trace span ─▶ timeout ─▶ telemetry ─▶ router
//!                                                                          │
//!                     ┌──────────────┬──────────────┬──────────────┬───────┴──────┐
//!                     ▼              ▼              ▼              ▼              ▼
//!                  GET /       GET /health    GET /ready    GET /metrics    POST /greet
//!                     │                                           ▲              │
//!                     │              ┌─────────────────┐          │              ▼
//!                     └─────────────▶│ ServiceMetrics  │──────────┘        ┌──────────┐
//!                       (count)      │ requests/errors │◀──────────────────│ Greeting │
//!                                    └─────────────────┘   (count/error)   └──────────┘
//! ```
//!
//! Configuration comes from defaults, an optional TOML file named by
//! `GREETER_CONFIG`, and the `PORT` / `VERSION` environment variables.

use greeter_service::config;
use greeter_service::lifecycle;
use greeter_service::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_from_env()?;

    logging::init(&config.observability)?;

    tracing::info!(
        version = %config.version,
        port = config.listener.port,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_bytes = config.limits.max_body_bytes,
        "greeter-service v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    lifecycle::launch(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
