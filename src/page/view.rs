//! One loaded page and its interactive state.

use crate::clipboard::{ClipboardBackend, CopyButton, CopyOutcome};
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::document::DocumentTree;
use crate::domain::{Category, Theme};
use crate::error::PreferencesResult;
use crate::observability::{MetricsTracker, Timer};
use crate::preferences::{PreferenceStore, Preferences};
use crate::search::{fold_query, PageSearchIndex, SearchHit};
use crate::toc::TableOfContents;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

/// A keystroke's worth of search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInput {
    pub query: String,
    pub category: Category,
}

/// Contents of the transient suggestions panel.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuggestionPanel {
    /// Query the panel was computed for
    pub query: String,
    pub category: Category,
    pub hits: Vec<SearchHit>,

    /// False for queries below the length threshold; the panel is not shown
    pub visible: bool,
}

/// A page from load to unload.
///
/// Owns the page's search index, table of contents and preference record
/// for as long as the reader stays on the page. Construct it with
/// [`PageView::load`] inside a tokio runtime; hand it back with
/// [`PageView::unload`] to persist preferences.
pub struct PageView {
    path: String,
    title: Option<String>,
    index: Arc<PageSearchIndex>,
    toc: Option<TableOfContents>,
    code_blocks: Vec<String>,
    preferences: Preferences,
    store: Arc<dyn PreferenceStore>,
    input: Debouncer<SearchInput>,
    suggestions: watch::Receiver<SuggestionPanel>,
    metrics: MetricsTracker,
}

impl PageView {
    /// Parse the page, build its index and outline, restore preferences.
    pub fn load(
        path: impl Into<String>,
        html: &str,
        store: Arc<dyn PreferenceStore>,
        config: &Config,
        metrics: MetricsTracker,
    ) -> Self {
        let path = path.into();
        let timer = Timer::start();

        let document = DocumentTree::parse(html);
        let index = Arc::new(PageSearchIndex::build(&document));
        let toc = TableOfContents::build(&document, config.toc_min_headings);
        let preferences = Preferences::load(store.as_ref());
        metrics.track_index_build(&path, index.len(), timer.elapsed());

        let (panel_tx, suggestions) = watch::channel(SuggestionPanel::default());
        let input = {
            let index = index.clone();
            let metrics = metrics.clone();
            Debouncer::spawn(config.debounce_window(), move |input: SearchInput| {
                let timer = Timer::start();
                let visible = fold_query(&input.query).is_some();
                let hits = index.search(&input.query, input.category);
                metrics.track_search_query(timer.elapsed(), hits.len());
                tracing::debug!(query = %input.query, hits = hits.len(), "Settled search input");

                panel_tx.send_replace(SuggestionPanel {
                    query: input.query,
                    category: input.category,
                    hits,
                    visible,
                });
            })
        };

        Self {
            path,
            title: document.title(),
            index,
            toc,
            code_blocks: document.code_blocks(),
            preferences,
            store,
            input,
            suggestions,
            metrics,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn index(&self) -> &PageSearchIndex {
        &self.index
    }

    /// Outline, when the page has enough headings to warrant one.
    pub fn toc(&self) -> Option<&TableOfContents> {
        self.toc.as_ref()
    }

    /// Outline HTML when it exists and the reader has it switched on.
    pub fn visible_toc_html(&self) -> Option<String> {
        self.toc
            .as_ref()
            .filter(|_| self.preferences.toc_visible)
            .map(TableOfContents::to_html)
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    /// Feed a keystroke; only the last one in each quiet window is evaluated.
    pub fn on_input(&self, query: impl Into<String>, category: Category) {
        self.input.push(SearchInput {
            query: query.into(),
            category,
        });
    }

    /// Watch the suggestions panel.
    pub fn suggestions(&self) -> watch::Receiver<SuggestionPanel> {
        self.suggestions.clone()
    }

    /// Current suggestions panel contents.
    pub fn current_suggestions(&self) -> SuggestionPanel {
        self.suggestions.borrow().clone()
    }

    /// Switch between light and dark; returns the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.preferences.theme = self.preferences.theme.toggled();
        self.preferences.theme
    }

    pub fn set_toc_visible(&mut self, visible: bool) {
        self.preferences.toc_visible = visible;
    }

    /// Text of the page's `pre` blocks, in document order.
    pub fn code_blocks(&self) -> &[String] {
        &self.code_blocks
    }

    /// Copy the `n`th code block; `None` if the page has no such block.
    pub async fn copy_code_block(
        &self,
        n: usize,
        button: &CopyButton,
        clipboard: &dyn ClipboardBackend,
    ) -> Option<CopyOutcome> {
        let block = self.code_blocks.get(n)?;
        Some(button.copy(clipboard, block).await)
    }

    /// Leave the page: persist preferences and drop the index.
    pub fn unload(self) -> PreferencesResult<()> {
        self.metrics
            .track_superseded_inputs(self.input.superseded());
        self.preferences.save(self.store.as_ref())?;
        tracing::debug!(path = %self.path, "Page unloaded");
        Ok(())
    }
}
