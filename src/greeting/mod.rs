//! Greeting formatting.
//!
//! # Data Flow
//! ```text
//! raw name
//!     → Greeting::new (trim, reject empty)
//!     → Greeting (validated, immutable)
//!     → render(Style) → greeting text
//! ```
//!
//! `say_hello` is the lenient entry point: it never fails and substitutes
//! `World` for a missing or blank name.

pub mod formatter;
pub mod style;

pub use formatter::{say_hello, Greeting, GreetingError};
pub use style::Style;
