//! Input debouncing.
//!
//! A [`Debouncer`] hands values to a callback only once input has gone quiet
//! for a fixed window. Every new value resets the timer and supersedes the
//! pending one; superseded values are never evaluated.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default quiet window before a typed query is evaluated
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(300);

/// Rate limiter that evaluates only the last value of each burst.
///
/// Dropping the debouncer discards any pending value.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    superseded: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
    T: Send + 'static,
{
    /// Spawn the debounce task on the current tokio runtime.
    pub fn spawn<F>(window: Duration, mut on_settled: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();
        let superseded = Arc::new(AtomicU64::new(0));
        let counter = superseded.clone();

        let task = tokio::spawn(async move {
            while let Some(mut pending) = rx.recv().await {
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(value) => {
                                pending = value;
                                counter.fetch_add(1, Ordering::Relaxed);
                            }
                            None => return,
                        },
                        _ = tokio::time::sleep(window) => {
                            on_settled(pending);
                            break;
                        }
                    }
                }
            }
        });

        Self {
            tx,
            superseded,
            task,
        }
    }

    /// Submit a value, resetting the quiet window.
    pub fn push(&self, value: T) {
        if self.tx.send(value).is_err() {
            tracing::warn!("Debounce task has stopped; input dropped");
        }
    }

    /// Values replaced by a later one before their window elapsed.
    pub fn superseded(&self) -> u64 {
        self.superseded.load(Ordering::Relaxed)
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
