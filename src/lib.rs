//! lrukit: a fixed-capacity LRU cache with O(1) insert, fetch and eviction.
//!
//! The cache couples a hash index with an arena-backed recency list; see
//! [`policy::lru`] for the layout and [`ds`] for the list itself.
//!
//! ```
//! use lrukit::prelude::*;
//!
//! let mut cache = LruCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.fetch(&"a");
//! cache.insert("c", 3);
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;
