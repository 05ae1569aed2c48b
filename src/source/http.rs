//! Pages from a served documentation site.
//!
//! [`SiteClient`] is a synchronous `ureq` client; [`HttpPageSource`] exposes it
//! to async callers through `tokio::task::spawn_blocking`, keeping blocking
//! HTTP off the async runtime.

use super::traits::{normalize_page_path, PageSource};
use crate::document::DocumentTree;
use crate::error::{PageFetchError, PageFetchResult};
use crate::observability::{MetricsTracker, Timer};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

/// Generated pages that are not worth indexing.
const SKIPPED_PAGES: &[&str] = &["genindex.html", "search.html", "py-modindex.html"];

/// HTTP client for a documentation site.
#[derive(Clone)]
pub struct SiteClient {
    /// Site base URL
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    metrics: MetricsTracker,
}

impl SiteClient {
    /// Create a client for the site at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration, metrics: MetricsTracker) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url: base_url.into(),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Build a full URL for a normalized page path.
    fn build_url(&self, relative: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let encoded: Vec<String> = relative
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}/{}", base, encoded.join("/"))
    }

    /// GET one page.
    pub fn get_page(&self, path: &str) -> PageFetchResult<String> {
        let relative = normalize_page_path(path).map_err(PageFetchError::InvalidPath)?;
        let url = self.build_url(&relative);
        let timer = Timer::start();

        tracing::debug!("GET {}", url);
        let result = self
            .agent
            .get(&url)
            .set("Accept", "text/html")
            .call()
            .map_err(|e| Self::map_error(e, &relative))
            .and_then(|response| {
                response
                    .into_string()
                    .map_err(|e| PageFetchError::HttpError(e.to_string()))
            });

        self.metrics
            .track_page_fetch(&relative, timer.elapsed(), result.is_ok());
        result
    }

    /// Pages linked from the site's root page.
    pub fn linked_pages(&self) -> PageFetchResult<Vec<String>> {
        let root = self.get_page("index.html")?;
        let document = DocumentTree::parse(&root);

        let mut pages = BTreeSet::new();
        pages.insert("index.html".to_string());
        for link in document.elements_by_tag("a") {
            let Some(href) = link.href() else { continue };
            if is_external(href) {
                continue;
            }
            let Ok(page) = normalize_page_path(href) else { continue };
            let name = page.rsplit('/').next().unwrap_or_default();
            if page.ends_with(".html") && !SKIPPED_PAGES.contains(&name) {
                pages.insert(page);
            }
        }

        Ok(pages.into_iter().collect())
    }

    /// Map a ureq error to a PageFetchError.
    fn map_error(error: ureq::Error, path: &str) -> PageFetchError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    404 => PageFetchError::NotFound(path.to_string()),
                    _ => PageFetchError::Status {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    PageFetchError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    PageFetchError::Timeout
                } else {
                    PageFetchError::HttpError(transport.to_string())
                }
            }
        }
    }
}

fn is_external(href: &str) -> bool {
    let href = href.trim();
    href.is_empty()
        || href.starts_with('#')
        || href.starts_with("//")
        || href.contains("://")
        || href.starts_with("mailto:")
        || href.starts_with("javascript:")
}

/// [`PageSource`] over a served site.
#[derive(Clone)]
pub struct HttpPageSource {
    client: Arc<SiteClient>,
}

impl HttpPageSource {
    pub fn new(client: SiteClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, path: &str) -> PageFetchResult<String> {
        let client = self.client.clone();
        let path = path.to_string();

        tokio::task::spawn_blocking(move || client.get_page(&path))
            .await
            .map_err(|e| PageFetchError::HttpError(format!("Task join error: {}", e)))?
    }

    async fn list_pages(&self) -> PageFetchResult<Vec<String>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.linked_pages())
            .await
            .map_err(|e| PageFetchError::HttpError(format!("Task join error: {}", e)))?
    }
}
