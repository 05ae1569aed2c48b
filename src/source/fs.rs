//! Pages from a local build output directory.

use super::traits::{normalize_page_path, PageSource};
use crate::error::{PageFetchError, PageFetchResult};
use crate::observability::{MetricsTracker, Timer};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads pages from a directory such as `docs/_build/html`.
///
/// File reads run on tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct FsPageSource {
    root: PathBuf,
    metrics: MetricsTracker,
}

impl FsPageSource {
    pub fn new(root: impl Into<PathBuf>, metrics: MetricsTracker) -> Self {
        Self {
            root: root.into(),
            metrics,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_page(root: &Path, path: &str) -> PageFetchResult<String> {
        let relative = normalize_page_path(path).map_err(PageFetchError::InvalidPath)?;
        let file = root.join(&relative);

        match std::fs::read_to_string(&file) {
            Ok(html) => Ok(html),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PageFetchError::NotFound(relative))
            }
            Err(e) => Err(PageFetchError::Io(e)),
        }
    }

    /// Every `.html` file under `root`, skipping `_`- and `.`-prefixed
    /// directories (`_static`, `_sources`, `.doctrees`).
    fn walk(root: &Path) -> PageFetchResult<Vec<String>> {
        let mut pages = Vec::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in std::fs::read_dir(&dir)? {
                let entry = entry?;
                let path = entry.path();
                let name = entry.file_name();
                let name = name.to_string_lossy();

                if entry.file_type()?.is_dir() {
                    if !name.starts_with('_') && !name.starts_with('.') {
                        pending.push(path);
                    }
                } else if name.ends_with(".html") {
                    if let Ok(relative) = path.strip_prefix(root) {
                        let segments: Vec<String> = relative
                            .components()
                            .map(|c| c.as_os_str().to_string_lossy().into_owned())
                            .collect();
                        pages.push(segments.join("/"));
                    }
                }
            }
        }

        pages.sort();
        Ok(pages)
    }
}

#[async_trait]
impl PageSource for FsPageSource {
    async fn fetch_page(&self, path: &str) -> PageFetchResult<String> {
        let root = self.root.clone();
        let page = path.to_string();
        let timer = Timer::start();

        let result = tokio::task::spawn_blocking(move || Self::read_page(&root, &page))
            .await
            .map_err(|e| PageFetchError::Other(format!("Task join error: {}", e)))?;

        self.metrics
            .track_page_fetch(path, timer.elapsed(), result.is_ok());
        result
    }

    async fn list_pages(&self) -> PageFetchResult<Vec<String>> {
        let root = self.root.clone();

        tokio::task::spawn_blocking(move || Self::walk(&root))
            .await
            .map_err(|e| PageFetchError::Other(format!("Task join error: {}", e)))?
    }
}
