//! Operation counters for [`LruCache`](crate::policy::lru::LruCache).
//!
//! Enabled with the `metrics` feature. Recording is split from reading:
//! the cache writes through the recorder traits in [`traits`], and callers read
//! a point-in-time [`LruMetricsSnapshot`] through
//! [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider).

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::LruMetrics;
pub use snapshot::LruMetricsSnapshot;
pub use traits::{MetricsReset, MetricsSnapshotProvider};
