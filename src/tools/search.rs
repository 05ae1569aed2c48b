//! Page search tools with index caching.
//!
//! Answers queries against any page of the site. Each page's index is built
//! on first use from the configured [`PageSource`] and cached for the
//! configured TTL.

use crate::cache::{CachedPage, IndexCache};
use crate::document::DocumentTree;
use crate::domain::Category;
use crate::error::{PageFetchError, SearchError, SearchResult};
use crate::observability::{MetricsTracker, Timer};
use crate::search::{IndexEntry, PageSearchIndex, SearchHit};
use crate::source::{normalize_page_path, PageSource};
use crate::toc::TableOfContents;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Longest query that is matched against an index
pub const MAX_QUERY_CHARS: usize = 500;

/// Pages fetched at once while warming the cache
const WARM_CONCURRENCY: usize = 8;

/// Parameters for a page search.
#[derive(Debug, Clone, Default)]
pub struct PageSearchParams {
    /// Site-relative page path
    pub path: String,

    pub query: String,

    /// Facet name; `None` means `all`
    pub category: Option<String>,
}

/// Response from a page search with cache metadata.
#[derive(Debug, Clone)]
pub struct PageSearchResponse {
    /// Normalized page path
    pub path: String,
    pub title: Option<String>,
    pub category: Category,
    pub hits: Vec<SearchHit>,

    /// Whether the index came from cache
    pub from_cache: bool,

    /// Number of entries in the page's index
    pub index_size: usize,
}

/// Search tools over every page of a documentation site.
#[derive(Clone)]
pub struct SearchTools {
    source: Arc<dyn PageSource>,
    cache: IndexCache,
    toc_min_headings: usize,
    metrics: MetricsTracker,
}

impl SearchTools {
    /// Create new search tools.
    ///
    /// # Arguments
    /// * `source` - Where pages are read from
    /// * `cache_ttl_secs` - How long a built index stays valid
    /// * `toc_min_headings` - Default outline threshold
    /// * `metrics` - Shared counters
    pub fn new(
        source: Arc<dyn PageSource>,
        cache_ttl_secs: u64,
        toc_min_headings: usize,
        metrics: MetricsTracker,
    ) -> Self {
        Self {
            source,
            cache: IndexCache::new(cache_ttl_secs, metrics.clone()),
            toc_min_headings,
            metrics,
        }
    }

    /// Search one page.
    pub async fn search_page(&self, params: PageSearchParams) -> SearchResult<PageSearchResponse> {
        let category = parse_category(params.category.as_deref())?;

        let (page, from_cache) = self.get_or_build(&params.path).await?;

        let query_chars = params.query.chars().count();
        let hits = if query_chars > MAX_QUERY_CHARS {
            tracing::debug!(
                chars = query_chars,
                "Query longer than {} characters; no hits",
                MAX_QUERY_CHARS
            );
            Vec::new()
        } else {
            let timer = Timer::start();
            let hits = page.index.search(&params.query, category);
            self.metrics.track_search_query(timer.elapsed(), hits.len());
            hits
        };

        Ok(PageSearchResponse {
            path: page.path.clone(),
            title: page.title.clone(),
            category,
            hits,
            from_cache,
            index_size: page.index.len(),
        })
    }

    /// Every index entry of a page that passes `category`, in document order.
    pub async fn list_entries(
        &self,
        path: &str,
        category: Option<&str>,
    ) -> SearchResult<Vec<IndexEntry>> {
        let category = parse_category(category)?;
        let (page, _) = self.get_or_build(path).await?;
        Ok(page.index.entries_in(category).cloned().collect())
    }

    /// The page's outline; `None` below the heading threshold.
    ///
    /// `min_headings` overrides the configured threshold.
    pub async fn table_of_contents(
        &self,
        path: &str,
        min_headings: Option<usize>,
    ) -> SearchResult<Option<TableOfContents>> {
        let (page, _) = self.get_or_build(path).await?;
        Ok(TableOfContents::from_items(
            page.headings.clone(),
            min_headings.unwrap_or(self.toc_min_headings),
        ))
    }

    /// Entries of the page related to `label`.
    pub async fn related_items(&self, path: &str, label: &str) -> SearchResult<Vec<IndexEntry>> {
        if label.trim().is_empty() {
            return Err(SearchError::InvalidParameters(
                "label must not be empty".to_string(),
            ));
        }
        let (page, _) = self.get_or_build(path).await?;
        Ok(page.index.related(label).into_iter().cloned().collect())
    }

    /// Every page the source serves.
    pub async fn list_pages(&self) -> SearchResult<Vec<String>> {
        Ok(self.source.list_pages().await?)
    }

    /// Build and cache the index of every page; returns how many were built.
    ///
    /// Pages that fail to load are logged and skipped.
    pub async fn warm_all(&self) -> SearchResult<usize> {
        let pages = self.source.list_pages().await?;
        tracing::info!("Warming page indices for {} pages", pages.len());

        let built = stream::iter(pages)
            .map(|path| async move {
                match self.get_or_build(&path).await {
                    Ok(_) => true,
                    Err(e) => {
                        tracing::warn!("Failed to index page {}: {}", path, e);
                        false
                    }
                }
            })
            .buffer_unordered(WARM_CONCURRENCY)
            .filter(|ok| futures::future::ready(*ok))
            .count()
            .await;

        Ok(built)
    }

    /// Drop a page's cached index so the next request rebuilds it.
    pub fn invalidate(&self, path: &str) {
        if let Ok(path) = normalize_page_path(path) {
            self.cache.invalidate(&path);
            tracing::debug!("Page index invalidated: {}", path);
        }
    }

    pub fn cache(&self) -> &IndexCache {
        &self.cache
    }

    /// Get the cached page or fetch and index it.
    async fn get_or_build(&self, path: &str) -> SearchResult<(Arc<CachedPage>, bool)> {
        let path = normalize_page_path(path).map_err(PageFetchError::InvalidPath)?;

        if let Some(page) = self.cache.get(&path) {
            tracing::debug!("Using cached index for {}", path);
            return Ok((page, true));
        }

        let evicted = self.cache.evict_expired();
        if evicted > 0 {
            tracing::debug!("Evicted {} expired page indices", evicted);
        }

        let html = self.source.fetch_page(&path).await?;

        let timer = Timer::start();
        let document = DocumentTree::parse(&html);
        let index = PageSearchIndex::build(&document);
        self.metrics
            .track_index_build(&path, index.len(), timer.elapsed());

        let page = self.cache.insert(CachedPage {
            title: document.title(),
            headings: TableOfContents::headings(&document),
            index,
            path,
        });
        Ok((page, false))
    }
}

/// Parse an optional facet name; `None` and blank mean `all`.
pub fn parse_category(name: Option<&str>) -> SearchResult<Category> {
    match name {
        None => Ok(Category::All),
        Some(name) => name
            .parse()
            .map_err(|_| SearchError::InvalidCategory(name.to_string())),
    }
}
