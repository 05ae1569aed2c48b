//! Observability module for monitoring and metrics.
//!
//! Counters for page fetches, index builds, queries and cache behavior,
//! reported through `tracing` as they are recorded.

pub mod metrics;

pub use metrics::{MetricsTracker, Timer};
