/// Counters and gauges captured from an [`LruCache`](crate::policy::lru::LruCache).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruMetricsSnapshot {
    pub fetch_calls: u64,
    pub fetch_hits: u64,
    pub fetch_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub clear_calls: u64,

    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub peek_calls: u64,
    pub peek_found: u64,
    pub peek_lru_calls: u64,
    pub peek_lru_found: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl LruMetricsSnapshot {
    /// Fraction of `fetch` calls that hit, or `0.0` before the first fetch.
    pub fn hit_rate(&self) -> f64 {
        if self.fetch_calls == 0 {
            0.0
        } else {
            self.fetch_hits as f64 / self.fetch_calls as f64
        }
    }
}
