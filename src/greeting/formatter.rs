//! Validated greeting value and the lenient `say_hello` helper.

use crate::greeting::style::Style;

const DEFAULT_TARGET: &str = "World";

/// Whitespace and line terminators as stripped by ECMAScript `trim`.
///
/// Differs from `char::is_whitespace`: includes U+FEFF, excludes U+0085.
fn is_trimmable(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn trim_name(name: &str) -> &str {
    name.trim_matches(is_trimmable)
}

/// Error type for greeting construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GreetingError {
    #[error("Name cannot be empty")]
    EmptyName,
}

/// A greeting for a single, non-blank name.
///
/// The stored name is always trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    name: String,
}

impl Greeting {
    /// Trim `name` and reject it if nothing is left.
    pub fn new(name: &str) -> Result<Self, GreetingError> {
        let trimmed = trim_name(name);
        if trimmed.is_empty() {
            return Err(GreetingError::EmptyName);
        }
        Ok(Self {
            name: trimmed.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn greet(&self) -> String {
        format!("Hello, {}!", self.name)
    }

    pub fn greet_formal(&self) -> String {
        format!("Good day, {}. Welcome!", self.name)
    }

    pub fn greet_enthusiastic(&self) -> String {
        format!("Hello, {}!!! So great to see you!", self.name)
    }

    /// Render the greeting in the requested style.
    pub fn render(&self, style: Style) -> String {
        match style {
            Style::Standard => self.greet(),
            Style::Formal => self.greet_formal(),
            Style::Enthusiastic => self.greet_enthusiastic(),
        }
    }
}

/// Greet `name`, or `World` when it is missing or blank. Never fails.
pub fn say_hello(name: Option<&str>) -> String {
    let target = name
        .map(trim_name)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_TARGET);
    format!("Hello, {}!", target)
}
