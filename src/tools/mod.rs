//! Tools exposed by the documentation search server.
//!
//! - **Search**: per-page search, entry listing, outlines and related items
//!   over cached page indices
//! - **Preferences**: the reader's stored display choices

pub mod preferences;
pub mod search;

pub use preferences::{PreferenceTools, UpdatePreferencesParams};
pub use search::{
    parse_category, PageSearchParams, PageSearchResponse, SearchTools, MAX_QUERY_CHARS,
};
