//! Greeting HTTP service library.

pub mod config;
pub mod greeting;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use greeting::{say_hello, Greeting, GreetingError, Style};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::ServiceMetrics;
