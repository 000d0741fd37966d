//! # Cache Trait Hierarchy
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  fetch(&mut, &K) → Option<&V>           │
//!   │  contains(&, &K) → bool                 │
//!   │  len / is_empty / capacity / clear      │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │           MutableCache<K, V>            │
//!   │                                         │
//!   │  remove(&K) → Option<V>                 │
//!   │  remove_batch(&[K]) → Vec<Option<V>>    │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │                                         │
//!   │  pop_lru() → Option<(K, V)>             │
//!   │  peek_lru() → Option<(&K, &V)>          │
//!   │  touch(&K) → bool                       │
//!   │  recency_rank(&K) → Option<usize>       │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! `fetch` counts as a use: implementations move the entry to the most
//! recently used position. Use [`LruCacheTrait::peek_lru`] or an inherent
//! `peek` for reads that must not reorder.
//!
//! None of these traits imply thread safety. Every mutator takes `&mut self`;
//! callers that share a cache wrap it in their own lock.

/// Operations every cache supports regardless of eviction policy.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::CoreCache;
///
/// fn warm<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, &str)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.to_string());
///     }
/// }
///
/// let mut cache = LruCache::new(10);
/// warm(&mut cache, &[(1, "one"), (2, "two")]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key was
    /// already present.
    ///
    /// Inserting a new key into a full cache evicts first.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value for `key` and marks it as most recently used.
    ///
    /// `None` means the key is not cached; it is not an error.
    fn fetch(&mut self, key: &K) -> Option<&V>;

    /// Returns `true` if `key` is cached. Does not affect eviction order.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries held at once.
    fn capacity(&self) -> usize;

    /// Removes every entry. Capacity is unchanged.
    fn clear(&mut self);
}

/// Caches that allow removing an arbitrary key.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key`, returning its value if it was present.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes each key in order. The result lines up with `keys`.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }
}

/// Recency-ordered operations.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::{CoreCache, LruCacheTrait};
///
/// let mut cache = LruCache::new(10);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
///
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(1));
/// assert!(cache.touch(&1));
/// assert_eq!(cache.pop_lru(), Some((2, "second")));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// The least recently used entry, without reordering.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used without reading it.
    ///
    /// Returns `false` if the key is not cached.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order, `0` being the most recent.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}
