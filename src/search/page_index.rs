//! In-page search index.
//!
//! The index is a snapshot of a page's headings and definition terms taken
//! once the page has loaded. Queries are substring matches over the captured
//! labels, narrowed by a category facet and returned in document order.

use super::highlight::Highlight;
use super::related::related_entries;
use crate::document::{DocumentTree, ElementRef};
use crate::domain::{Anchor, Category, Navigation};
use serde::Serialize;

/// Maximum number of results a query returns
pub const MAX_RESULTS: usize = 10;

/// Queries shorter than this (in characters, after trimming) return nothing
pub const MIN_QUERY_CHARS: usize = 2;

/// Class markers that make a non-heading element a candidate.
const DEFINITION_MARKERS: &[&str] = &["class", "function", "method"];

/// Class markers that put an element (or anything inside it) in `examples`.
const EXAMPLE_MARKERS: &[&str] = &["example", "examples"];

/// One searchable element of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// Visible label, whitespace-collapsed and trimmed
    pub text: String,

    /// Where selecting the entry leads; may be empty
    pub anchor: Anchor,

    /// Structural role
    pub category: Category,
}

impl IndexEntry {
    pub fn new(text: impl Into<String>, anchor: Anchor, category: Category) -> Self {
        Self {
            text: text.into(),
            anchor,
            category,
        }
    }

    /// Navigation target; `Navigation::None` for entries with an empty anchor.
    pub fn navigation(&self) -> Navigation {
        self.anchor.navigation()
    }
}

/// A query match ready for the suggestions panel.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub text: String,
    pub anchor: Anchor,
    pub category: Category,

    /// Label as HTML with the matched runs wrapped in `<mark>`
    pub highlighted: String,

    pub navigation: Navigation,
}

impl SearchHit {
    fn new(entry: &IndexEntry, query: &str) -> Self {
        Self {
            text: entry.text.clone(),
            anchor: entry.anchor.clone(),
            category: entry.category,
            highlighted: Highlight::new(&entry.text, query).to_html(),
            navigation: entry.navigation(),
        }
    }
}

/// Lifecycle of a page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexState {
    /// The page has not finished loading
    Unbuilt,
    /// Built; accepts queries until the page is discarded
    Ready,
}

/// Search index over one page.
#[derive(Debug, Clone)]
pub struct PageSearchIndex {
    entries: Vec<IndexEntry>,
    /// Case-folded `entries[i].text`
    folded: Vec<String>,
    state: IndexState,
}

impl PageSearchIndex {
    /// Create an index that has not seen its page yet.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            folded: Vec::new(),
            state: IndexState::Unbuilt,
        }
    }

    /// Build a ready index from a parsed page.
    pub fn build(document: &DocumentTree) -> Self {
        let mut index = Self::new();
        index.load(document);
        index
    }

    /// Build a ready index from already extracted entries, kept in the given order.
    pub fn from_entries(entries: Vec<IndexEntry>) -> Self {
        let folded = entries.iter().map(|e| e.text.to_lowercase()).collect();
        Self {
            entries,
            folded,
            state: IndexState::Ready,
        }
    }

    /// Capture the page's searchable elements.
    ///
    /// Only the first call has an effect: a ready index is never rebuilt.
    /// Returns whether this call built the index.
    pub fn load(&mut self, document: &DocumentTree) -> bool {
        if self.state == IndexState::Ready {
            tracing::debug!("Page index already built; ignoring reload");
            return false;
        }

        let mut unanchored = 0usize;
        for element in document.elements().filter(is_candidate) {
            let text = visible_label(&element);
            if text.is_empty() {
                continue;
            }

            let anchor = resolve_anchor(&element);
            if anchor.is_empty() {
                unanchored += 1;
            }

            self.folded.push(text.to_lowercase());
            self.entries
                .push(IndexEntry::new(text, anchor, categorize(&element)));
        }

        self.state = IndexState::Ready;
        tracing::debug!(
            entries = self.entries.len(),
            unanchored = unanchored,
            "Page index built"
        );
        true
    }

    pub fn state(&self) -> IndexState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == IndexState::Ready
    }

    /// All entries in document order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Entries admitted by a category facet, in document order.
    pub fn entries_in(&self, category: Category) -> impl Iterator<Item = &IndexEntry> + '_ {
        self.entries
            .iter()
            .filter(move |e| category.admits(e.category))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose label contains `query`, case-insensitively.
    ///
    /// At most [`MAX_RESULTS`] entries, in document order. Queries shorter than
    /// [`MIN_QUERY_CHARS`] after trimming match nothing, as does an unbuilt index.
    pub fn query(&self, query: &str, category: Category) -> Vec<&IndexEntry> {
        let Some(needle) = fold_query(query) else {
            return Vec::new();
        };

        self.entries
            .iter()
            .zip(&self.folded)
            .filter(|(entry, folded)| category.admits(entry.category) && folded.contains(&needle))
            .map(|(entry, _)| entry)
            .take(MAX_RESULTS)
            .collect()
    }

    /// Like [`query`](Self::query), with highlighting and navigation attached.
    pub fn search(&self, query: &str, category: Category) -> Vec<SearchHit> {
        let trimmed = query.trim();
        self.query(trimmed, category)
            .into_iter()
            .map(|entry| SearchHit::new(entry, trimmed))
            .collect()
    }

    /// Up to five entries sharing a name fragment with `label`.
    pub fn related(&self, label: &str) -> Vec<&IndexEntry> {
        related_entries(&self.entries, label)
    }
}

impl Default for PageSearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim and case-fold a query; `None` when it is below the length threshold.
pub fn fold_query(query: &str) -> Option<String> {
    let folded = query.trim().to_lowercase();
    if folded.chars().count() < MIN_QUERY_CHARS {
        None
    } else {
        Some(folded)
    }
}

/// Headings `h1`..`h4`, definition terms, and non-container elements carrying
/// a class/function/method marker.
fn is_candidate(element: &ElementRef<'_>) -> bool {
    if matches!(element.heading_level(), Some(1..=4)) || element.tag() == "dt" {
        return true;
    }
    element.tag() != "dl" && DEFINITION_MARKERS.iter().any(|m| element.has_class(m))
}

/// Element text without Sphinx permalink markers.
fn visible_label(element: &ElementRef<'_>) -> String {
    element.text_content_filtered(|child| !child.has_class("headerlink"))
}

/// The element's own id, else the nearest ancestor id, else empty.
fn resolve_anchor(element: &ElementRef<'_>) -> Anchor {
    element
        .id()
        .or_else(|| element.ancestors().find_map(|a| a.id()))
        .map(Anchor::new)
        .unwrap_or_default()
}

fn categorize(element: &ElementRef<'_>) -> Category {
    let in_example = std::iter::once(*element)
        .chain(element.ancestors())
        .any(|el| {
            EXAMPLE_MARKERS.iter().any(|m| el.has_class(m))
                || el.id().is_some_and(|id| id.starts_with("example"))
        });
    if in_example {
        return Category::Examples;
    }

    if element.heading_level().is_some() {
        return Category::Modules;
    }

    // A definition term takes its role from the enclosing `dl`.
    let marked = |el: &ElementRef<'_>, marker: &str| {
        el.has_class(marker)
            || (el.tag() == "dt"
                && el
                    .parent()
                    .is_some_and(|p| p.tag() == "dl" && p.has_class(marker)))
    };

    if marked(element, "class") {
        Category::Classes
    } else if marked(element, "function") || marked(element, "method") {
        Category::Functions
    } else {
        Category::All
    }
}
