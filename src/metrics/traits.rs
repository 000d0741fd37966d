//! Recorder and reader traits.
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │   fetch hit/miss, insert, evict, clear
//!   └──────────────┬──────────────┘
//!                  ▼
//!   ┌─────────────────────────────┐   ┌─────────────────────────────┐
//!   │     LruMetricsRecorder      │   │   LruMetricsReadRecorder    │
//!   │  pop_lru / touch (&mut)     │   │  peek / peek_lru (&self)    │
//!   └─────────────────────────────┘   └─────────────────────────────┘
//!
//!   Consumption: MetricsSnapshotProvider<S>, MetricsReset
//! ```

/// Counters shared by every cache operation set.
pub trait CoreMetricsRecorder {
    fn record_fetch_hit(&mut self);
    fn record_fetch_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Recency-specific counters recorded from `&mut self` methods.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Counters recorded from `&self` methods through interior mutability.
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
}

/// Point-in-time view for tests, benches and host monitoring.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Zeroes every counter.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}
