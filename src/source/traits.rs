use crate::error::PageFetchResult;
use async_trait::async_trait;

/// Where rendered pages come from.
///
/// Provides abstraction over page retrieval, enabling different
/// implementations (build directory, served site, in-memory fixtures).
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the HTML of one page by its site-relative path (`api/circle.html`).
    async fn fetch_page(&self, path: &str) -> PageFetchResult<String>;

    /// Site-relative paths of every page this source can serve.
    async fn list_pages(&self) -> PageFetchResult<Vec<String>>;
}

/// Normalize a site-relative page path.
///
/// Strips fragments, queries and leading slashes, maps directory paths to
/// their `index.html`, and rejects paths that climb out of the site root.
pub fn normalize_page_path(path: &str) -> Result<String, String> {
    let path = path.split(['#', '?']).next().unwrap_or_default().trim();
    let path = path.trim_start_matches('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(format!("path escapes the site root: {}", path)),
            s if s.contains('\\') => return Err(format!("backslash in path: {}", path)),
            s => segments.push(s),
        }
    }

    if segments.is_empty() || path.ends_with('/') {
        segments.push("index.html");
    }
    Ok(segments.join("/"))
}
