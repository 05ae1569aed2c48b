//! Anchor value object and navigation targets.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference used to navigate to an indexed element.
///
/// Either an in-page fragment identifier (`manimlib.Circle`) or a page-relative
/// path (`api/circle.html#manimlib.Circle`). An empty anchor is allowed: the
/// entry stays searchable but cannot be navigated to.
///
/// # Example
///
/// ```
/// use docsite_search::domain::Anchor;
///
/// let anchor = Anchor::synthesize("Creating a Circle!");
/// assert_eq!(anchor.as_str(), "creating-a-circle");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Anchor(String);

impl Anchor {
    /// Wrap an existing identifier or path. Surrounding whitespace is dropped.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.len() == value.len() {
            Self(value)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The non-navigable anchor.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Derive an anchor from visible text.
    ///
    /// Lowercases, replaces every run of non-alphanumeric characters with a
    /// single hyphen and trims hyphens from both ends.
    pub fn synthesize(text: &str) -> Self {
        static NON_ALNUM_RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid anchor regex"));

        let lowered = text.to_lowercase();
        let slug = NON_ALNUM_RE.replace_all(&lowered, "-");
        Self(slug.trim_matches('-').to_string())
    }

    /// Get the anchor as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this anchor points nowhere.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve where selecting this anchor should lead.
    pub fn navigation(&self) -> Navigation {
        if self.0.is_empty() {
            return Navigation::None;
        }

        let fragment_free = self.0.split('#').next().unwrap_or_default();
        if self.0.contains('/') || fragment_free.ends_with(".html") {
            Navigation::Page(self.0.clone())
        } else {
            Navigation::Fragment(self.0.trim_start_matches('#').to_string())
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What happens when a reader selects a search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Navigation {
    /// Smooth-scroll to an element on the current page
    Fragment(String),

    /// Load a different page
    Page(String),

    /// The entry has no resolvable anchor
    None,
}

impl Navigation {
    /// Whether selecting the entry moves the reader anywhere.
    pub fn is_navigable(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// The `href` a link to this target would carry.
    pub fn href(&self) -> Option<String> {
        match self {
            Self::Fragment(id) => Some(format!("#{}", id)),
            Self::Page(path) => Some(path.clone()),
            Self::None => None,
        }
    }
}
