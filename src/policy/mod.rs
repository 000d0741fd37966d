//! Eviction policies.

pub mod lru;

pub use lru::{LruCache, DEFAULT_CAPACITY};
