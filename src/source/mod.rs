//! Page sources.
//!
//! Rendered pages are read either from a local build directory or from a
//! served site. Both sit behind the [`PageSource`] trait so the search tools
//! and tests never care which one they talk to.

mod fs;
mod http;
mod traits;

pub use fs::FsPageSource;
pub use http::{HttpPageSource, SiteClient};
pub use traits::{normalize_page_path, PageSource};

use crate::config::{Config, DocsSource};
use crate::observability::MetricsTracker;
use std::sync::Arc;
use std::time::Duration;

/// Build the page source the configuration points at.
pub fn from_config(config: &Config, metrics: MetricsTracker) -> Arc<dyn PageSource> {
    match &config.docs_source {
        DocsSource::Directory(root) => Arc::new(FsPageSource::new(root.clone(), metrics)),
        DocsSource::Url(base_url) => Arc::new(HttpPageSource::new(SiteClient::new(
            base_url.clone(),
            Duration::from_secs(config.request_timeout),
            metrics,
        ))),
    }
}
