//! Configuration management for docsite-search.
//!
//! This module handles loading and validating configuration from environment variables.
//! It avoids polluting stdout (which MCP uses for communication) by loading the .env
//! file through `dotenvy`, which never prints.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Where rendered documentation pages are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocsSource {
    /// A local build output directory (e.g. `docs/_build/html`)
    Directory(PathBuf),

    /// A served site, addressed by its base URL
    Url(String),
}

impl DocsSource {
    /// Interpret a `DOCS_SOURCE` value.
    ///
    /// Values starting with `http://` or `https://` are URLs, anything else is a path.
    pub fn parse(value: &str) -> ConfigResult<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "DOCS_SOURCE".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(Self::Url(value.to_string()))
        } else {
            Ok(Self::Directory(PathBuf::from(value)))
        }
    }
}

impl std::fmt::Display for DocsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Directory(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Configuration for docsite-search.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where pages come from
    pub docs_source: DocsSource,

    /// Built page index TTL in minutes (default: 30)
    pub page_cache_ttl_minutes: u64,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Quiet window before a typed query is evaluated (default: 300ms)
    pub search_debounce_ms: u64,

    /// Pages with fewer headings get no table of contents (default: 3)
    pub toc_min_headings: usize,

    /// File backing the preference record
    pub preferences_path: PathBuf,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `DOCS_SOURCE`: build directory or base URL of the documentation site
    ///
    /// Optional environment variables:
    /// - `PAGE_CACHE_TTL_MINUTES`: Index cache TTL in minutes (default: 30)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `SEARCH_DEBOUNCE_MS`: Debounce window in milliseconds (default: 300)
    /// - `TOC_MIN_HEADINGS`: Minimum headings for a table of contents (default: 3)
    /// - `PREFERENCES_PATH`: Preference record file (default: ".docsite-preferences.json")
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let docs_source = env::var("DOCS_SOURCE")
            .map_err(|_| ConfigError::MissingVar("DOCS_SOURCE".to_string()))?;
        let docs_source = DocsSource::parse(&docs_source)?;

        let page_cache_ttl_minutes = Self::parse_env_u64("PAGE_CACHE_TTL_MINUTES", 30)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let search_debounce_ms = Self::parse_env_u64("SEARCH_DEBOUNCE_MS", 300)?;
        let toc_min_headings = Self::parse_env_usize("TOC_MIN_HEADINGS", 3)?;

        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be at least 1 second".to_string(),
            });
        }

        let preferences_path = env::var("PREFERENCES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".docsite-preferences.json"));

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            docs_source,
            page_cache_ttl_minutes,
            request_timeout,
            search_debounce_ms,
            toc_min_headings,
            preferences_path,
            log_level,
        })
    }

    /// Debounce window as a `Duration`.
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Index cache TTL in seconds.
    pub fn page_cache_ttl_secs(&self) -> u64 {
        self.page_cache_ttl_minutes.saturating_mul(60)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            docs_source: DocsSource::Directory(PathBuf::from("docs/_build/html")),
            page_cache_ttl_minutes: 30,
            request_timeout: 10,
            search_debounce_ms: 300,
            toc_min_headings: 3,
            preferences_path: PathBuf::from(".docsite-preferences.json"),
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.page_cache_ttl_minutes, 30);
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.toc_min_headings, 3);
        assert_eq!(config.debounce_window(), Duration::from_millis(300));
        assert_eq!(config.page_cache_ttl_secs(), 1800);
    }

    #[test]
    fn test_docs_source_parse() {
        assert_eq!(
            DocsSource::parse("https://docs.example.org/").unwrap(),
            DocsSource::Url("https://docs.example.org/".to_string())
        );
        assert_eq!(
            DocsSource::parse("  docs/_build/html ").unwrap(),
            DocsSource::Directory(PathBuf::from("docs/_build/html"))
        );
        assert!(DocsSource::parse("   ").is_err());
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("DOCS_SOURCE", "https://docs.example.org");
        guard.set("SEARCH_DEBOUNCE_MS", "150");
        guard.set("TOC_MIN_HEADINGS", "5");

        let config = Config::from_env().unwrap();
        assert_eq!(
            config.docs_source,
            DocsSource::Url("https://docs.example.org".to_string())
        );
        assert_eq!(config.search_debounce_ms, 150);
        assert_eq!(config.toc_min_headings, 5);
        assert_eq!(config.page_cache_ttl_minutes, 30);
    }

    #[test]
    #[serial]
    fn test_config_invalid_debounce() {
        let mut guard = EnvGuard::new();
        guard.set("DOCS_SOURCE", "docs/_build/html");
        guard.set("SEARCH_DEBOUNCE_MS", "soon");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "SEARCH_DEBOUNCE_MS");
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_zero_timeout_rejected() {
        let mut guard = EnvGuard::new();
        guard.set("DOCS_SOURCE", "docs/_build/html");
        guard.set("REQUEST_TIMEOUT", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "REQUEST_TIMEOUT"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_huge_cache_ttl_saturates() {
        let mut guard = EnvGuard::new();
        guard.set("DOCS_SOURCE", "docs/_build/html");
        guard.set("PAGE_CACHE_TTL_MINUTES", &u64::MAX.to_string());

        let config = Config::from_env().unwrap();
        assert_eq!(config.page_cache_ttl_minutes, u64::MAX);
        assert_eq!(config.page_cache_ttl_secs(), u64::MAX);
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_DOCSITE_U64", "42");

        assert_eq!(Config::parse_env_u64("TEST_DOCSITE_U64", 10).unwrap(), 42);
        assert_eq!(Config::parse_env_u64("DOCSITE_NONEXISTENT", 10).unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_usize_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_DOCSITE_USIZE", "-3");

        assert!(Config::parse_env_usize("TEST_DOCSITE_USIZE", 3).is_err());
    }
}
