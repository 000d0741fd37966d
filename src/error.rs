//! Error types for lrukit.
//!
//! - [`ConfigError`]: a cache was configured with invalid parameters
//!   (currently only a zero capacity).
//! - [`InvariantError`]: [`LruCache::check_invariants`] found the index and the
//!   recency list out of sync. This always indicates a bug.
//!
//! A missing key is not an error anywhere in this crate; lookups return
//! `Option`.
//!
//! ```
//! use lrukit::error::ConfigError;
//! use lrukit::policy::lru::LruCache;
//!
//! let cache: Result<LruCache<u32, &str>, ConfigError> = LruCache::try_new(8);
//! assert!(cache.is_ok());
//!
//! let err = LruCache::<u32, &str>::try_new(0).unwrap_err();
//! assert!(err.message().contains("capacity"));
//! ```
//!
//! [`LruCache::check_invariants`]: crate::policy::lru::LruCache::check_invariants

use std::fmt;

/// Error returned when cache configuration parameters are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// The error for a capacity that can never hold an entry.
    pub(crate) fn zero_capacity() -> Self {
        Self::new("cache capacity must be greater than zero")
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Error returned when the index and recency list disagree.
///
/// Carries a description of the first violated invariant found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cache invariant violated: {}", self.0)
    }
}

impl std::error::Error for InvariantError {}
