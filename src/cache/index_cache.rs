//! Per-page cache of search indices and outlines with TTL expiry.
//!
//! Entries are `Arc`-shared snapshots; a page's index is never mutated once
//! cached, only replaced after it expires.

use crate::observability::MetricsTracker;
use crate::search::PageSearchIndex;
use crate::toc::TocItem;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Everything derived from one page that the search tools answer from.
#[derive(Debug)]
pub struct CachedPage {
    pub path: String,
    pub title: Option<String>,
    pub index: PageSearchIndex,

    /// Every heading of the page; the outline threshold is applied per request
    pub headings: Vec<TocItem>,
}

#[derive(Debug)]
struct Slot {
    page: Arc<CachedPage>,
    built_at: Instant,
}

/// Thread-safe map from page path to its [`CachedPage`].
///
/// Clones share the same entries.
#[derive(Clone)]
pub struct IndexCache {
    slots: Arc<RwLock<HashMap<String, Slot>>>,
    ttl: Duration,
    metrics: MetricsTracker,
}

impl IndexCache {
    pub fn new(ttl_seconds: u64, metrics: MetricsTracker) -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::from_secs(ttl_seconds),
            metrics,
        }
    }

    /// Cached page for `path` unless missing or expired.
    pub fn get(&self, path: &str) -> Option<Arc<CachedPage>> {
        let found = self.slots.read().ok().and_then(|slots| {
            slots
                .get(path)
                .filter(|slot| slot.built_at.elapsed() < self.ttl)
                .map(|slot| slot.page.clone())
        });

        self.metrics.track_cache_access(path, found.is_some());
        found
    }

    /// Store a freshly built page, replacing any previous entry.
    pub fn insert(&self, page: CachedPage) -> Arc<CachedPage> {
        let page = Arc::new(page);
        if let Ok(mut slots) = self.slots.write() {
            slots.insert(
                page.path.clone(),
                Slot {
                    page: page.clone(),
                    built_at: Instant::now(),
                },
            );
        }
        page
    }

    pub fn invalidate(&self, path: &str) {
        if let Ok(mut slots) = self.slots.write() {
            slots.remove(path);
        }
    }

    /// Drop expired entries; returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        let Ok(mut slots) = self.slots.write() else {
            return 0;
        };
        let before = slots.len();
        slots.retain(|_, slot| slot.built_at.elapsed() < self.ttl);
        before - slots.len()
    }

    /// Paths currently cached, expired ones included, sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .slots
            .read()
            .map(|slots| slots.keys().cloned().collect())
            .unwrap_or_default();
        paths.sort();
        paths
    }

    pub fn len(&self) -> usize {
        self.slots.read().map(|slots| slots.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl std::fmt::Debug for IndexCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexCache")
            .field("ttl", &self.ttl)
            .field("pages", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Anchor, Category};
    use crate::search::IndexEntry;
    use std::thread;

    fn page(path: &str) -> CachedPage {
        CachedPage {
            path: path.to_string(),
            title: None,
            index: PageSearchIndex::from_entries(vec![IndexEntry::new(
                "Circle",
                Anchor::new("circle"),
                Category::Classes,
            )]),
            headings: Vec::new(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let metrics = MetricsTracker::new();
        let cache = IndexCache::new(60, metrics.clone());
        cache.insert(page("api/circle.html"));

        let cached = cache.get("api/circle.html").unwrap();
        assert_eq!(cached.index.len(), 1);
        assert!(cache.get("api/square.html").is_none());

        assert_eq!(metrics.cache_hits_total(), 1);
        assert_eq!(metrics.cache_misses_total(), 1);
    }

    #[test]
    fn test_ttl_expiration() {
        let cache = IndexCache::new(1, MetricsTracker::new());
        cache.insert(page("index.html"));
        assert!(cache.get("index.html").is_some());

        thread::sleep(Duration::from_millis(1100));

        assert!(cache.get("index.html").is_none());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.evict_expired(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = IndexCache::new(60, MetricsTracker::new());
        let clone = cache.clone();
        clone.insert(page("b.html"));
        clone.insert(page("a.html"));

        assert_eq!(cache.paths(), vec!["a.html".to_string(), "b.html".to_string()]);

        cache.invalidate("a.html");
        assert!(clone.get("a.html").is_none());
    }
}
