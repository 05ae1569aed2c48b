//! Error types for docsite-search.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! The search index itself never fails; these errors belong to the layers around it
//! (page sources, configuration, preferences, clipboard, service parameters).

use thiserror::Error;

/// Errors that can occur when fetching a rendered page.
#[derive(Error, Debug)]
pub enum PageFetchError {
    /// Reading from the local build directory failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Server returned an error status code
    #[error("HTTP error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Page does not exist
    #[error("Page not found: {0}")]
    NotFound(String),

    /// Page path escapes the documentation root or is malformed
    #[error("Invalid page path: {0}")]
    InvalidPath(String),

    /// Generic fetch error with context
    #[error("Page fetch error: {0}")]
    Other(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors raised at the search service boundary.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Unknown category facet name
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// Invalid search parameters
    #[error("Invalid search parameters: {0}")]
    InvalidParameters(String),

    /// The page could not be loaded for indexing
    #[error(transparent)]
    Fetch(#[from] PageFetchError),
}

/// Errors that can occur while reading or writing the preference record.
#[derive(Error, Debug)]
pub enum PreferencesError {
    /// Store could not be read or written
    #[error("Preference store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored record is not valid JSON
    #[error("Preference record is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors reported by a clipboard backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The platform clipboard API is not present
    #[error("Clipboard unavailable")]
    Unavailable,

    /// The platform refused the write
    #[error("Clipboard write rejected: {0}")]
    Rejected(String),
}

/// Convenience type alias for Results with PageFetchError
pub type PageFetchResult<T> = Result<T, PageFetchError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with SearchError
pub type SearchResult<T> = Result<T, SearchError>;

/// Convenience type alias for Results with PreferencesError
pub type PreferencesResult<T> = Result<T, PreferencesError>;
