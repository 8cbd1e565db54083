//! Greeting style selector.

/// Which greeting template to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// `Hello, {name}!`
    #[default]
    Standard,
    /// `Good day, {name}. Welcome!`
    Formal,
    /// `Hello, {name}!!! So great to see you!`
    Enthusiastic,
}

impl Style {
    /// Resolve an optional selector. Absence means `Standard`.
    pub fn from_optional(value: Option<&str>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Standard => "standard",
            Style::Formal => "formal",
            Style::Enthusiastic => "enthusiastic",
        }
    }
}

/// Unrecognized selectors fall back to `Standard`; matching is case-sensitive.
impl From<&str> for Style {
    fn from(value: &str) -> Self {
        match value {
            "formal" => Style::Formal,
            "enthusiastic" => Style::Enthusiastic,
            _ => Style::Standard,
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
