//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign / echo request ID)
//!     → handlers.rs (route by method + path, greeting + counters)
//!     → response.rs (error mapping, timestamps)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdGenerator, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};
