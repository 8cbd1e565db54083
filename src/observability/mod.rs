//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every request:
//!     → telemetry.rs (span with request ID, latency + status via `metrics` facade)
//!     → handlers update metrics.rs (ServiceMetrics counters)
//!
//! Consumers:
//!     → stdout logs (logging.rs, pretty or JSON)
//!     → GET /metrics (ServiceMetrics, fixed exposition text)
//!     → optional Prometheus exporter (facade series only)
//! ```
//!
//! # Design Decisions
//! - The `/metrics` body is rendered by hand so its layout never drifts
//! - Counters are atomics owned by a state object, not process globals
//! - Request ID flows through every log line of a request

pub mod logging;
pub mod metrics;
pub mod telemetry;

pub use metrics::ServiceMetrics;
