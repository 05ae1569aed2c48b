use async_trait::async_trait;
use docsite_search::error::{PageFetchError, PageFetchResult};
use docsite_search::source::PageSource;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// In-memory page source for testing.
///
/// Configured with page markup up front and tracks how often each page is
/// fetched, so tests can verify caching.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockPageSource {
    pages: Arc<Mutex<BTreeMap<String, String>>>,
    fetch_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page to the mock source.
    pub fn add_page(&self, path: &str, html: &str) {
        let mut pages = self.pages.lock().unwrap();
        pages.insert(path.to_string(), html.to_string());
    }

    /// How many times `path` was fetched.
    pub fn fetch_count(&self, path: &str) -> usize {
        let counts = self.fetch_counts.lock().unwrap();
        counts.get(path).copied().unwrap_or(0)
    }
}

#[async_trait]
impl PageSource for MockPageSource {
    async fn fetch_page(&self, path: &str) -> PageFetchResult<String> {
        {
            let mut counts = self.fetch_counts.lock().unwrap();
            *counts.entry(path.to_string()).or_insert(0) += 1;
        }

        let pages = self.pages.lock().unwrap();
        pages
            .get(path)
            .cloned()
            .ok_or_else(|| PageFetchError::NotFound(path.to_string()))
    }

    async fn list_pages(&self) -> PageFetchResult<Vec<String>> {
        let pages = self.pages.lock().unwrap();
        Ok(pages.keys().cloned().collect())
    }
}
