//! Commonly used items.
//!
//! ```
//! use lrukit::prelude::*;
//!
//! let mut cache: LruCache<&str, u32> = CacheBuilder::new(2).build();
//! cache.insert("a", 1);
//! assert_eq!(cache.fetch(&"a"), Some(&1));
//! ```

pub use crate::builder::CacheBuilder;
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::lru::{LruCache, DEFAULT_CAPACITY};
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};
