//! Search and page-loading metrics.
//!
//! Counters are atomics behind `Arc`, so clones share the same totals and
//! can be handed to page sources, the index cache and page views alike.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared counters for the search service.
#[derive(Debug, Clone, Default)]
pub struct MetricsTracker {
    pages_fetched_total: Arc<AtomicU64>,
    fetch_errors_total: Arc<AtomicU64>,
    fetch_duration_total_ms: Arc<AtomicU64>,
    index_builds_total: Arc<AtomicU64>,
    entries_indexed_total: Arc<AtomicU64>,
    search_queries_total: Arc<AtomicU64>,
    cache_hits_total: Arc<AtomicU64>,
    cache_misses_total: Arc<AtomicU64>,
    superseded_inputs_total: Arc<AtomicU64>,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a page fetch.
    pub fn track_page_fetch(&self, path: &str, duration: Duration, success: bool) {
        self.pages_fetched_total.fetch_add(1, Ordering::Relaxed);
        self.fetch_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
        if !success {
            self.fetch_errors_total.fetch_add(1, Ordering::Relaxed);
        }

        tracing::debug!(
            path = %path,
            duration_ms = duration.as_millis() as u64,
            success = success,
            "Page fetch completed"
        );
    }

    /// Track a page index build.
    pub fn track_index_build(&self, path: &str, entries: usize, duration: Duration) {
        self.index_builds_total.fetch_add(1, Ordering::Relaxed);
        self.entries_indexed_total
            .fetch_add(entries as u64, Ordering::Relaxed);

        tracing::info!(
            path = %path,
            entries = entries,
            duration_ms = duration.as_millis() as u64,
            "Page index built"
        );
    }

    /// Track an evaluated search query.
    pub fn track_search_query(&self, duration: Duration, result_count: usize) {
        self.search_queries_total.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(
            duration_us = duration.as_micros() as u64,
            result_count = result_count,
            "Search query completed"
        );
    }

    /// Track an index cache lookup.
    pub fn track_cache_access(&self, path: &str, hit: bool) {
        if hit {
            self.cache_hits_total.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(path = %path, "Index cache hit");
        } else {
            self.cache_misses_total.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(path = %path, "Index cache miss");
        }
    }

    /// Track keystrokes superseded by a later one inside the debounce window.
    pub fn track_superseded_inputs(&self, count: u64) {
        self.superseded_inputs_total
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn pages_fetched_total(&self) -> u64 {
        self.pages_fetched_total.load(Ordering::Relaxed)
    }

    pub fn fetch_errors_total(&self) -> u64 {
        self.fetch_errors_total.load(Ordering::Relaxed)
    }

    pub fn index_builds_total(&self) -> u64 {
        self.index_builds_total.load(Ordering::Relaxed)
    }

    pub fn entries_indexed_total(&self) -> u64 {
        self.entries_indexed_total.load(Ordering::Relaxed)
    }

    pub fn search_queries_total(&self) -> u64 {
        self.search_queries_total.load(Ordering::Relaxed)
    }

    pub fn cache_hits_total(&self) -> u64 {
        self.cache_hits_total.load(Ordering::Relaxed)
    }

    pub fn cache_misses_total(&self) -> u64 {
        self.cache_misses_total.load(Ordering::Relaxed)
    }

    pub fn superseded_inputs_total(&self) -> u64 {
        self.superseded_inputs_total.load(Ordering::Relaxed)
    }

    /// Average page fetch duration in milliseconds.
    pub fn avg_fetch_duration_ms(&self) -> f64 {
        let total = self.pages_fetched_total();
        if total == 0 {
            0.0
        } else {
            self.fetch_duration_total_ms.load(Ordering::Relaxed) as f64 / total as f64
        }
    }

    /// Index cache hit rate (0.0 to 1.0).
    pub fn cache_hit_rate(&self) -> f64 {
        let hits = self.cache_hits_total() as f64;
        let total = (self.cache_hits_total() + self.cache_misses_total()) as f64;

        if total == 0.0 {
            0.0
        } else {
            hits / total
        }
    }

    /// One-line summary of all counters.
    pub fn summary(&self) -> String {
        format!(
            "pages_fetched={} fetch_errors={} avg_fetch_ms={:.1} index_builds={} entries_indexed={} \
             queries={} cache_hit_rate={:.2} superseded_inputs={}",
            self.pages_fetched_total(),
            self.fetch_errors_total(),
            self.avg_fetch_duration_ms(),
            self.index_builds_total(),
            self.entries_indexed_total(),
            self.search_queries_total(),
            self.cache_hit_rate(),
            self.superseded_inputs_total(),
        )
    }
}

/// Times an operation from construction to [`Timer::elapsed`].
#[derive(Debug)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
