//! In-page search.
//!
//! This module provides the page search index built from a rendered page,
//! substring queries narrowed by category, match highlighting and the
//! advisory "related items" suggestions.

pub mod highlight;
pub mod page_index;
pub mod related;

pub use highlight::{escape_html, Highlight, Segment};
pub use page_index::{
    fold_query, IndexEntry, IndexState, PageSearchIndex, SearchHit, MAX_RESULTS, MIN_QUERY_CHARS,
};
pub use related::{related_entries, MAX_RELATED};
