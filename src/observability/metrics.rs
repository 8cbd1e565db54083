//! Metrics collection and exposition.
//!
//! # Metrics served on `GET /metrics`
//! - `http_requests_total` (counter): requests reaching `/`, `/greet` and the 404 fallback
//! - `http_errors_total` (counter): `/greet` failures and 404s
//! - `app_uptime_seconds` (gauge): whole seconds since start
//!
//! # Exporter metrics (optional, separate listener)
//! - `greeter_http_responses_total` (counter): by method, route, status
//! - `greeter_http_request_duration_seconds` (histogram): by method, route, status

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Process-lifetime request/error counters and start time.
///
/// Shared between handlers through `Arc`; increments are atomic so concurrent
/// requests never lose updates.
#[derive(Debug)]
pub struct ServiceMetrics {
    requests: AtomicU64,
    errors: AtomicU64,
    started_at: Instant,
}

impl ServiceMetrics {
    /// Create counters starting now.
    pub fn new() -> Self {
        Self::started_at(Instant::now())
    }

    /// Create counters with an explicit start instant.
    pub fn started_at(started_at: Instant) -> Self {
        Self {
            requests: AtomicU64::new(0),
            errors: AtomicU64::new(0),
            started_at,
        }
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn error_count(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    /// Whole seconds elapsed since start.
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Render the Prometheus exposition text served on `/metrics`.
    pub fn render_prometheus(&self) -> String {
        format!(
            "# HELP http_requests_total Total number of HTTP requests\n\
             # TYPE http_requests_total counter\n\
             http_requests_total {}\n\
             \n\
             # HELP http_errors_total Total number of HTTP errors\n\
             # TYPE http_errors_total counter\n\
             http_errors_total {}\n\
             \n\
             # HELP app_uptime_seconds Application uptime in seconds\n\
             # TYPE app_uptime_seconds gauge\n\
             app_uptime_seconds {}\n",
            self.request_count(),
            self.error_count(),
            self.uptime_secs(),
        )
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the global `metrics` recorder and serve it on `addr`.
pub fn init_exporter(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Prometheus exporter listening");
    Ok(())
}

/// Record one completed request through the `metrics` facade.
pub fn record_response(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("greeter_http_responses_total", &labels).increment(1);
    metrics::histogram!("greeter_http_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}
