//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::request::{
    normalize_path, propagate_request_id_layer, set_request_id_layer,
};
use crate::observability::telemetry::{make_request_span, track_requests};
use crate::observability::ServiceMetrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<ServiceMetrics>,
    pub version: Arc<str>,
}

/// HTTP server for the greeting service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    metrics: Arc<ServiceMetrics>,
}

impl HttpServer {
    /// Create a new HTTP server with fresh counters.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_metrics(config, Arc::new(ServiceMetrics::new()))
    }

    /// Create a server around existing counters.
    pub fn with_metrics(config: ServiceConfig, metrics: Arc<ServiceMetrics>) -> Self {
        let state = AppState {
            metrics: metrics.clone(),
            version: Arc::from(config.version.as_str()),
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            metrics,
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Each route falls back to the 404 handler for other methods, so a
    /// `GET /greet` is a counted 404 rather than a 405. Routes are wrapped
    /// in an outer router so the path is normalized before it is matched.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let routes = Router::new()
            .route("/", get(handlers::root).fallback(handlers::not_found))
            .route("/health", get(handlers::health).fallback(handlers::not_found))
            .route("/ready", get(handlers::ready).fallback(handlers::not_found))
            .route("/metrics", get(handlers::metrics).fallback(handlers::not_found))
            .route("/greet", post(handlers::greet).fallback(handlers::not_found))
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
            .layer(middleware::from_fn(track_requests));

        Router::new()
            .fallback_service(routes)
            .layer(middleware::from_fn(normalize_path))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(set_request_id_layer())
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Counters shared with the handlers.
    pub fn metrics(&self) -> Arc<ServiceMetrics> {
        self.metrics.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            version = %self.config.version,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
