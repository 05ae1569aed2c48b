//! Copy-to-clipboard with a legacy fallback.
//!
//! A copy first tries the asynchronous platform clipboard. When that is
//! unavailable or rejects the write, the synchronous legacy copy is tried.
//! Either success shows the same "Copied!" acknowledgment, which reverts to
//! the idle label after two seconds.

use crate::error::ClipboardError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Label of an idle copy button
pub const IDLE_LABEL: &str = "Copy";

/// Label shown after a successful copy
pub const COPIED_LABEL: &str = "Copied!";

/// How long the acknowledgment stays up
pub const RESET_AFTER: Duration = Duration::from_secs(2);

/// Platform clipboard access.
#[async_trait]
pub trait ClipboardBackend: Send + Sync {
    /// Asynchronous clipboard write.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Synchronous select-and-copy fallback.
    fn legacy_copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Which mechanism put the text on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    Async,
    Legacy,
}

/// Result of a copy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied(CopyPath),
    /// Both mechanisms failed; the label is left unchanged
    Failed(ClipboardError),
}

/// A copy button's visible state.
pub struct CopyButton {
    label: Arc<watch::Sender<&'static str>>,
    reset: Mutex<Option<JoinHandle<()>>>,
}

impl CopyButton {
    pub fn new() -> Self {
        let (label, _) = watch::channel(IDLE_LABEL);
        Self {
            label: Arc::new(label),
            reset: Mutex::new(None),
        }
    }

    /// Current label.
    pub fn label(&self) -> &'static str {
        *self.label.borrow()
    }

    /// Watch label changes.
    pub fn subscribe(&self) -> watch::Receiver<&'static str> {
        self.label.subscribe()
    }

    /// Copy `text`, falling back to the legacy path if the async write fails.
    pub async fn copy(&self, backend: &dyn ClipboardBackend, text: &str) -> CopyOutcome {
        let copied = match backend.write_text(text).await {
            Ok(()) => Ok(CopyPath::Async),
            Err(e) => {
                tracing::warn!("Async clipboard write failed ({}), using legacy copy", e);
                backend.legacy_copy(text).map(|()| CopyPath::Legacy)
            }
        };

        match copied {
            Ok(path) => {
                self.acknowledge();
                CopyOutcome::Copied(path)
            }
            Err(e) => {
                tracing::warn!("Copy failed on both clipboard paths: {}", e);
                CopyOutcome::Failed(e)
            }
        }
    }

    fn acknowledge(&self) {
        self.label.send_replace(COPIED_LABEL);

        let label = self.label.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(RESET_AFTER).await;
            label.send_replace(IDLE_LABEL);
        });

        if let Ok(mut reset) = self.reset.lock() {
            if let Some(previous) = reset.replace(timer) {
                previous.abort();
            }
        }
    }
}

impl Default for CopyButton {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CopyButton {
    fn drop(&mut self) {
        if let Ok(mut reset) = self.reset.lock() {
            if let Some(timer) = reset.take() {
                timer.abort();
            }
        }
    }
}
