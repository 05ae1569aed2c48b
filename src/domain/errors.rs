//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided category name is not one of the known facets.
    UnknownCategory(String),

    /// The provided theme name is not one of the known themes.
    UnknownTheme(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory(name) => write!(f, "Unknown category: {}", name),
            Self::UnknownTheme(name) => write!(f, "Unknown theme: {}", name),
        }
    }
}

impl std::error::Error for ValidationError {}
