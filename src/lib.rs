//! docsite-search - in-page search for rendered documentation sites.
//!
//! This library indexes the headings and API definitions of a rendered
//! documentation page and answers case-insensitive substring queries over
//! them, narrowed by category. Around the index it carries the page-level
//! pieces that go with it: a debounced search input, the table of contents,
//! the reader's preference record and a copy-to-clipboard control. An MCP
//! server exposes the search over stdio.
//!
//! # Architecture
//!
//! - **document**: Read-only tree of a parsed HTML page
//! - **domain**: Anchors, category facets and themes
//! - **search**: Page search index, highlighting and related items
//! - **toc**: Table of contents with a heading threshold
//! - **debounce**: Quiet-window rate limiting for search input
//! - **preferences**: Persisted reader preferences
//! - **clipboard**: Copy control with a legacy fallback path
//! - **page**: One loaded page and its interactive state
//! - **source**: Where pages come from (build directory or served site)
//! - **cache**: TTL cache of built page indices
//! - **tools**: Search and preference operations behind the server
//! - **server**: MCP protocol server
//! - **config**, **error**, **observability**: Ambient configuration, errors and metrics

pub mod cache;
pub mod clipboard;
pub mod config;
pub mod debounce;
pub mod document;
pub mod domain;
pub mod error;
pub mod observability;
pub mod page;
pub mod preferences;
pub mod search;
pub mod server;
pub mod source;
pub mod toc;
pub mod tools;

pub use cache::{CachedPage, IndexCache};
pub use clipboard::{ClipboardBackend, CopyButton, CopyOutcome, CopyPath};
pub use config::{Config, DocsSource};
pub use debounce::Debouncer;
pub use document::{DocumentTree, ElementRef};
pub use domain::{Anchor, Category, Navigation, Theme};
pub use error::{
    ClipboardError, ConfigError, PageFetchError, PreferencesError, SearchError,
};
pub use observability::{MetricsTracker, Timer};
pub use page::{PageView, SearchInput, SuggestionPanel};
pub use preferences::{JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Preferences};
pub use search::{IndexEntry, IndexState, PageSearchIndex, SearchHit};
pub use server::DocSearchMcpServer;
pub use source::{FsPageSource, HttpPageSource, PageSource, SiteClient};
pub use toc::{TableOfContents, TocItem};
pub use tools::{PageSearchParams, PageSearchResponse, PreferenceTools, SearchTools};
