//! Caching of built page indices.
//!
//! Building an index means fetching and parsing a page, so the search tools
//! keep each page's index for a while instead of rebuilding it per query.

pub mod index_cache;

pub use index_cache::{CachedPage, IndexCache};
