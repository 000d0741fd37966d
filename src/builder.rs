//! Validated construction of [`LruCache`].
//!
//! The builder is the configuration surface of the crate: capacity plus
//! whether to reserve storage for that capacity up front.
//!
//! ## Example
//!
//! ```rust
//! use lrukit::builder::CacheBuilder;
//! use lrukit::traits::CoreCache;
//!
//! let mut cache = CacheBuilder::new(100)
//!     .preallocate(false)
//!     .try_build::<u64, String>()
//!     .expect("capacity is non-zero");
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.fetch(&1), Some(&"hello".to_string()));
//!
//! assert!(CacheBuilder::new(0).try_build::<u64, String>().is_err());
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::lru::{LruCache, DEFAULT_CAPACITY};

/// Builder for [`LruCache`] instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBuilder {
    capacity: usize,
    preallocate: bool,
}

impl CacheBuilder {
    /// Starts a builder for a cache holding at most `capacity` entries.
    ///
    /// Validation is deferred to [`try_build`](Self::try_build).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            preallocate: true,
        }
    }

    /// Reserve index and list storage for `capacity` entries at build time.
    ///
    /// Defaults to `true`. Turn it off for large capacities that are rarely
    /// filled.
    pub fn preallocate(mut self, preallocate: bool) -> Self {
        self.preallocate = preallocate;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Builds the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the capacity is zero.
    pub fn try_build<K, V>(self) -> Result<LruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        LruCache::try_with_allocation(self.capacity, self.preallocate)
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics on invalid configuration. See [`try_build`](Self::try_build).
    pub fn build<K, V>(self) -> LruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
