//! # Least Recently Used (LRU) Cache
//!
//! A fixed-capacity cache that evicts the entry which has gone longest without
//! being read or written.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                           LruCache<K, V>                             │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId>  (index)                               │   │
//!   │   │                                                              │   │
//!   │   │  ┌─────────┬──────────────────────────────────────────┐      │   │
//!   │   │  │   Key   │  SlotId                                  │      │   │
//!   │   │  ├─────────┼──────────────────────────────────────────┤      │   │
//!   │   │  │  "q1"   │  ──────────────────────────────────────┐ │      │   │
//!   │   │  │  "q2"   │  ────────────────────────────────┐     │ │      │   │
//!   │   │  │  "q3"   │  ──────────────────────────┐     │     │ │      │   │
//!   │   │  └─────────┴────────────────────────────┼─────┼─────┼─┘      │   │
//!   │   └─────────────────────────────────────────┼─────┼─────┼────────┘   │
//!   │                                             │     │     │            │
//!   │   ┌─────────────────────────────────────────┼─────┼─────┼────────┐   │
//!   │   │  RecencyList<Entry<K, V>>  (order)      ▼     ▼     ▼        │   │
//!   │   │                                                              │   │
//!   │   │  head ──► ┌──────┐ ◄──► ┌──────┐ ◄──► ┌──────┐ ◄── tail      │   │
//!   │   │   (MRU)   │ q3,v │      │ q2,v │      │ q1,v │    (LRU)      │   │
//!   │   │           └──────┘      └──────┘      └──────┘               │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index answers "where is this key", the list answers "what is oldest".
//! Every mutation updates both inside a single `&mut self` call, so no caller
//! can observe one without the other.
//!
//! ## Operations Flow
//!
//! ```text
//!   INSERT new key (cache full, capacity = 3)
//!
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!
//!     insert(D):
//!       1. index miss
//!       2. len == capacity → evict [C]: drop index[C], pop_back
//!       3. push_front(D), index[D] = slot
//!
//!     head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   FETCH existing key
//!
//!     fetch(B):
//!       1. index hit → slot
//!       2. move_to_front(slot)
//!
//!     head ──► [B] ◄──► [D] ◄──► [A] ◄── tail
//! ```
//!
//! ## Methods
//!
//! | Method              | Complexity | Description                           |
//! |---------------------|------------|---------------------------------------|
//! | `try_new(capacity)` | O(1)       | Validated constructor                 |
//! | `insert(k, v)`      | O(1) avg   | Insert or overwrite, may evict LRU    |
//! | `fetch(&k)`         | O(1) avg   | Value lookup, moves entry to MRU      |
//! | `peek(&k)`          | O(1) avg   | Value lookup without reordering       |
//! | `touch(&k)`         | O(1) avg   | Move to MRU without reading           |
//! | `remove(&k)`        | O(1) avg   | Remove from index and list            |
//! | `pop_lru()`         | O(1)       | Evict and return the LRU entry        |
//! | `peek_lru()`        | O(1)       | LRU entry without removing            |
//! | `recency_rank(&k)`  | O(n)       | Position in recency order (0 = MRU)   |
//! | `clear()`           | O(n)       | Remove all entries                    |
//!
//! ## Thread Safety
//!
//! `LruCache` is single-owner. All mutators (including `fetch`, which
//! reorders) take `&mut self`; wrap the cache in a lock to share it.

use std::fmt;
use std::hash::Hash;
use std::mem;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::ds::{RecencyList, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Capacity used by [`LruCache::default`] and [`CacheBuilder::default`](crate::builder::CacheBuilder).
pub const DEFAULT_CAPACITY: usize = 100;

/// Payload of one node in the recency list.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Fixed-capacity LRU cache.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::CoreCache;
///
/// let mut cache = LruCache::new(3);
/// cache.insert(1, "a");
/// cache.insert(2, "b");
/// cache.insert(3, "c");
///
/// // Reading 1 makes 2 the least recently used entry.
/// assert_eq!(cache.fetch(&1), Some(&"a"));
/// cache.insert(4, "d");
///
/// assert_eq!(cache.fetch(&2), None);
/// assert_eq!(cache.fetch(&3), Some(&"c"));
/// ```
pub struct LruCache<K, V> {
    index: FxHashMap<K, SlotId>,
    order: RecencyList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_allocation(capacity, true)
    }

    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    pub(crate) fn try_with_allocation(
        capacity: usize,
        preallocate: bool,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            let err = ConfigError::zero_capacity();
            debug!(error = %err, "rejected lru cache configuration");
            return Err(err);
        }

        let (index, order) = if preallocate {
            (
                FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
                RecencyList::with_capacity(capacity),
            )
        } else {
            (FxHashMap::default(), RecencyList::new())
        };
        debug!(capacity, preallocate, "created lru cache");

        Ok(Self {
            index,
            order,
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    /// Returns the value for `key` without changing its recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let &id = self.index.get(key)?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_found();

        self.order.get(id).map(|entry| &entry.value)
    }

    /// Like [`fetch`](CoreCache::fetch), but returns a mutable reference.
    ///
    /// Counts as a use of the entry.
    pub fn fetch_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_fetch_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_fetch_hit();

        self.touch_slot(id);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        self.order.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Iterates `(key, value)` pairs from most to least recently used.
    ///
    /// Does not affect recency.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.order.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Verifies that the index and the recency list describe the same entries.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] naming the first inconsistency found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index has {} keys but recency list has {} entries",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.order.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.order.len(),
                self.capacity
            )));
        }

        let mut visited = 0usize;
        for (id, entry) in self.order.iter_entries() {
            visited += 1;
            match self.index.get(&entry.key) {
                Some(&mapped) if mapped == id => {},
                Some(&mapped) => {
                    return Err(InvariantError::new(format!(
                        "entry in slot {} is indexed to slot {}",
                        id.index(),
                        mapped.index()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "entry in slot {} is missing from the index",
                        id.index()
                    )));
                },
            }
        }

        if visited != self.order.len() {
            return Err(InvariantError::new(format!(
                "walked {} of {} recency list entries",
                visited,
                self.order.len()
            )));
        }
        Ok(())
    }

    /// Moves the node behind `id` to the front.
    #[inline]
    fn touch_slot(&mut self, id: SlotId) {
        let moved = self.order.move_to_front(id);
        debug_assert!(moved, "index holds stale slot {}", id.index());
    }

    /// Drops the least recently used entry from both the list and the index.
    fn evict(&mut self) -> Option<(K, V)> {
        let id = self.order.back_id()?;
        let entry = self.order.pop_back()?;
        let unmapped = self.index.remove(&entry.key);
        debug_assert_eq!(unmapped, Some(id));
        trace!(slot = id.index(), "evicted least recently used entry");
        Some((entry.key, entry.value))
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        self.order.debug_validate_invariants();
        if let Err(err) = self.check_invariants() {
            panic!("{}", err);
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = self
                .order
                .get_mut(id)
                .map(|entry| mem::replace(&mut entry.value, value));
            self.touch_slot(id);

            #[cfg(debug_assertions)]
            self.validate_invariants();

            return previous;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.index.len() >= self.capacity {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();

            let evicted = self.evict();
            debug_assert!(evicted.is_some(), "full cache had nothing to evict");

            #[cfg(feature = "metrics")]
            {
                if evicted.is_some() {
                    self.metrics.record_evicted_entry();
                }
            }
        }

        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        None
    }

    fn fetch(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_fetch_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_fetch_hit();

        self.touch_slot(id);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        self.order.get(id).map(|entry| &entry.value)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        let entries = self.index.len();
        self.index.clear();
        self.order.clear();
        trace!(entries, "cleared lru cache");
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        let entry = self.order.remove(id);
        debug_assert!(entry.is_some(), "index held stale slot {}", id.index());

        #[cfg(debug_assertions)]
        self.validate_invariants();

        entry.map(|entry| entry.value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let popped = self.evict()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        #[cfg(debug_assertions)]
        self.validate_invariants();

        Some(popped)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_call();

        let entry = self.order.back()?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_found();

        Some((&entry.key, &entry.value))
    }

    fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.index.get(key) else {
            return false;
        };
        self.touch_slot(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        #[cfg(debug_assertions)]
        self.validate_invariants();

        true
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        let &target = self.index.get(key)?;
        self.order.iter_entries().position(|(id, _)| id == target)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.metrics.snapshot(self.index.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for LruCache<K, V> {
    fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.index.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with [`DEFAULT_CAPACITY`].
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<K: Clone, V>(cache: &LruCache<K, V>) -> Vec<K>
    where
        K: Eq + Hash,
    {
        cache.iter().map(|(k, _)| k.clone()).collect()
    }

    mod correctness {
        use super::*;

        mod basic_behavior {
            use super::*;

            #[test]
            fn test_new_cache_creation() {
                let cache: LruCache<i32, i32> = LruCache::new(10);
                assert_eq!(cache.capacity(), 10);
                assert_eq!(cache.len(), 0);
                assert!(cache.is_empty());
            }

            #[test]
            fn test_zero_capacity_rejected() {
                let err = LruCache::<i32, i32>::try_new(0).unwrap_err();
                assert_eq!(err, ConfigError::zero_capacity());
            }

            #[test]
            #[should_panic(expected = "capacity must be greater than zero")]
            fn test_zero_capacity_new_panics() {
                let _ = LruCache::<i32, i32>::new(0);
            }

            #[test]
            fn test_default_capacity() {
                let cache: LruCache<u64, u64> = LruCache::default();
                assert_eq!(cache.capacity(), DEFAULT_CAPACITY);
                assert_eq!(cache.capacity(), 100);
            }

            #[test]
            fn test_insert_and_fetch() {
                let mut cache = LruCache::new(5);
                assert_eq!(cache.insert(1, 100), None);
                assert_eq!(cache.fetch(&1), Some(&100));
                assert!(cache.contains(&1));
                assert_eq!(cache.len(), 1);
            }

            #[test]
            fn test_fetch_nonexistent_item() {
                let mut cache = LruCache::new(5);
                cache.insert(1, 100);
                assert_eq!(cache.fetch(&2), None);
                assert_eq!(cache.fetch(&2), None);
                assert_eq!(cache.len(), 1);
            }

            #[test]
            fn test_fetch_on_empty_cache() {
                let mut cache: LruCache<&str, i32> = LruCache::new(1);
                assert_eq!(cache.fetch(&"missing"), None);
                assert!(cache.peek_lru().is_none());
            }

            #[test]
            fn test_overwrite_keeps_count_and_returns_previous() {
                let mut cache = LruCache::new(3);
                cache.insert("k", 1);
                assert_eq!(cache.insert("k", 2), Some(1));
                assert_eq!(cache.len(), 1);
                assert_eq!(cache.fetch(&"k"), Some(&2));
            }

            #[test]
            fn test_fetch_mut_updates_in_place() {
                let mut cache = LruCache::new(2);
                cache.insert(1, String::from("a"));
                cache.insert(2, String::from("b"));

                if let Some(v) = cache.fetch_mut(&1) {
                    v.push('!');
                }
                assert_eq!(cache.peek(&1).map(String::as_str), Some("a!"));
                // fetch_mut promoted key 1
                assert_eq!(keys(&cache), vec![1, 2]);
                assert!(cache.fetch_mut(&9).is_none());
            }

            #[test]
            fn test_remove() {
                let mut cache = LruCache::new(3);
                cache.insert(1, "a");
                cache.insert(2, "b");
                assert_eq!(cache.remove(&1), Some("a"));
                assert_eq!(cache.remove(&1), None);
                assert!(!cache.contains(&1));
                assert_eq!(cache.len(), 1);
                cache.check_invariants().unwrap();
            }

            #[test]
            fn test_clear_then_reuse() {
                let mut cache = LruCache::new(2);
                cache.insert(1, 1);
                cache.insert(2, 2);
                cache.clear();
                assert!(cache.is_empty());
                assert_eq!(cache.fetch(&1), None);

                cache.insert(3, 3);
                cache.insert(4, 4);
                cache.insert(5, 5);
                assert_eq!(keys(&cache), vec![5, 4]);
                cache.check_invariants().unwrap();
            }

            #[test]
            fn test_extend_inserts_in_order() {
                let mut cache = LruCache::new(2);
                cache.extend([(1, 'a'), (2, 'b'), (3, 'c')]);
                assert_eq!(keys(&cache), vec![3, 2]);
            }

            #[test]
            fn test_debug_output() {
                let mut cache = LruCache::new(4);
                cache.insert(1, 1);
                let dbg = format!("{:?}", cache);
                assert!(dbg.contains("LruCache"));
                assert!(dbg.contains("len: 1"));
                assert!(dbg.contains("capacity: 4"));
            }
        }

        mod eviction {
            use super::*;

            #[test]
            fn test_capacity_plus_one_evicts_first_key() {
                let mut cache = LruCache::new(3);
                for k in 1..=4 {
                    cache.insert(k, k * 10);
                }
                assert_eq!(cache.fetch(&1), None);
                for k in 2..=4 {
                    assert_eq!(cache.fetch(&k), Some(&(k * 10)));
                }
                assert_eq!(cache.len(), 3);
            }

            #[test]
            fn test_fetch_protects_from_eviction() {
                let mut cache = LruCache::new(2);
                cache.insert("A", 1);
                cache.insert("B", 2);
                assert_eq!(cache.fetch(&"A"), Some(&1));
                cache.insert("C", 3);

                assert!(cache.contains(&"A"));
                assert!(!cache.contains(&"B"));
                assert!(cache.contains(&"C"));
            }

            #[test]
            fn test_overwrite_protects_from_eviction() {
                let mut cache = LruCache::new(2);
                cache.insert(1, "a");
                cache.insert(2, "b");
                cache.insert(1, "a2");
                cache.insert(3, "c");

                assert_eq!(cache.fetch(&1), Some(&"a2"));
                assert_eq!(cache.fetch(&2), None);
            }

            #[test]
            fn test_concrete_scenario() {
                let mut cache = LruCache::new(3);
                cache.insert(1, "a");
                cache.insert(2, "b");
                cache.insert(3, "c");
                assert_eq!(cache.fetch(&1), Some(&"a"));
                cache.insert(4, "d");

                assert_eq!(cache.fetch(&2), None);
                assert_eq!(cache.fetch(&1), Some(&"a"));
                assert_eq!(cache.fetch(&3), Some(&"c"));
                assert_eq!(cache.fetch(&4), Some(&"d"));
            }

            #[test]
            fn test_single_capacity_cache() {
                let mut cache = LruCache::new(1);
                cache.insert(1, 1);
                cache.insert(2, 2);
                assert_eq!(cache.len(), 1);
                assert_eq!(cache.fetch(&1), None);
                assert_eq!(cache.fetch(&2), Some(&2));

                // overwriting the only key never evicts it
                cache.insert(2, 3);
                assert_eq!(cache.fetch(&2), Some(&3));
            }

            #[test]
            fn test_evicted_key_stays_absent() {
                let mut cache = LruCache::new(1);
                cache.insert("old", 1);
                cache.insert("new", 2);
                for _ in 0..3 {
                    assert_eq!(cache.fetch(&"old"), None);
                }
            }

            #[test]
            fn test_eviction_reuses_slots() {
                let mut cache = LruCache::new(4);
                for k in 0..1_000u32 {
                    cache.insert(k, k);
                    assert!(cache.len() <= 4);
                }
                assert_eq!(keys(&cache), vec![999, 998, 997, 996]);
                cache.check_invariants().unwrap();
            }
        }

        mod recency {
            use super::*;

            #[test]
            fn test_peek_does_not_update_order() {
                let mut cache = LruCache::new(2);
                cache.insert(1, "a");
                cache.insert(2, "b");
                assert_eq!(cache.peek(&1), Some(&"a"));
                cache.insert(3, "c");
                assert!(!cache.contains(&1));
                assert_eq!(cache.peek(&9), None);
            }

            #[test]
            fn test_touch_updates_order() {
                let mut cache = LruCache::new(3);
                cache.insert(1, ());
                cache.insert(2, ());
                cache.insert(3, ());
                assert!(cache.touch(&1));
                assert!(!cache.touch(&42));
                assert_eq!(keys(&cache), vec![1, 3, 2]);
            }

            #[test]
            fn test_pop_and_peek_lru() {
                let mut cache = LruCache::new(3);
                cache.insert(1, "a");
                cache.insert(2, "b");
                cache.insert(3, "c");
                cache.fetch(&1);

                assert_eq!(cache.peek_lru(), Some((&2, &"b")));
                assert_eq!(cache.pop_lru(), Some((2, "b")));
                assert_eq!(cache.pop_lru(), Some((3, "c")));
                assert_eq!(cache.pop_lru(), Some((1, "a")));
                assert_eq!(cache.pop_lru(), None);
                assert!(cache.is_empty());
            }

            #[test]
            fn test_recency_rank() {
                let mut cache = LruCache::new(3);
                cache.insert(1, ());
                cache.insert(2, ());
                cache.insert(3, ());
                assert_eq!(cache.recency_rank(&3), Some(0));
                assert_eq!(cache.recency_rank(&1), Some(2));

                cache.fetch(&1);
                assert_eq!(cache.recency_rank(&1), Some(0));
                assert_eq!(cache.recency_rank(&2), Some(2));
                assert_eq!(cache.recency_rank(&99), None);
            }

            #[test]
            fn test_iter_is_mru_to_lru() {
                let mut cache = LruCache::new(4);
                cache.extend([(1, 'a'), (2, 'b'), (3, 'c')]);
                cache.fetch(&2);
                let pairs: Vec<_> = cache.iter().map(|(k, v)| (*k, *v)).collect();
                assert_eq!(pairs, vec![(2, 'b'), (3, 'c'), (1, 'a')]);
            }
        }

        mod invariants {
            use super::*;

            #[test]
            fn test_check_invariants_on_healthy_cache() {
                let mut cache = LruCache::new(3);
                cache.check_invariants().unwrap();
                cache.extend((0..10).map(|k| (k, k)));
                cache.fetch(&8);
                cache.remove(&9);
                cache.check_invariants().unwrap();
            }

            #[test]
            fn test_check_invariants_detects_missing_index_entry() {
                let mut cache = LruCache::new(3);
                cache.insert(1, 1);
                cache.insert(2, 2);
                cache.index.remove(&1);

                let err = cache.check_invariants().unwrap_err();
                assert!(err.message().contains("index has 1 keys"));
            }

            #[test]
            fn test_check_invariants_detects_crossed_handles() {
                let mut cache = LruCache::new(3);
                cache.insert(1, 1);
                cache.insert(2, 2);
                let a = cache.index[&1];
                let b = cache.index[&2];
                cache.index.insert(1, b);
                cache.index.insert(2, a);

                let err = cache.check_invariants().unwrap_err();
                assert!(err.message().contains("is indexed to slot"));
            }

            #[test]
            fn test_check_invariants_detects_orphan_entry() {
                let mut cache = LruCache::new(3);
                cache.insert(1, 1);
                let id = cache.index.remove(&1).unwrap();
                cache.index.insert(7, id);

                let err = cache.check_invariants().unwrap_err();
                assert!(err.message().contains("missing from the index"));
            }
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn test_metrics_track_operations() {
            let mut cache = LruCache::new(2);
            cache.insert(1, 1);
            cache.insert(2, 2);
            cache.insert(1, 10);
            cache.insert(3, 3);
            cache.fetch(&1);
            cache.fetch(&2);
            cache.peek(&3);
            cache.peek_lru();
            cache.touch(&3);
            cache.pop_lru();

            let snap = cache.metrics_snapshot();
            assert_eq!(snap.insert_calls, 4);
            assert_eq!(snap.insert_updates, 1);
            assert_eq!(snap.insert_new, 3);
            assert_eq!(snap.evict_calls, 1);
            assert_eq!(snap.evicted_entries, 1);
            assert_eq!(snap.fetch_hits, 1);
            assert_eq!(snap.fetch_misses, 1);
            assert_eq!(snap.peek_found, 1);
            assert_eq!(snap.peek_lru_found, 1);
            assert_eq!(snap.touch_found, 1);
            assert_eq!(snap.pop_lru_found, 1);
            assert_eq!(snap.cache_len, 1);
            assert_eq!(snap.capacity, 2);
            assert_eq!(snap, cache.snapshot());
        }

        #[test]
        fn test_metrics_reset() {
            let mut cache = LruCache::new(2);
            cache.insert(1, 1);
            cache.fetch(&1);
            cache.reset_metrics();

            let snap = cache.metrics_snapshot();
            assert_eq!(snap.insert_calls, 0);
            assert_eq!(snap.fetch_calls, 0);
            assert_eq!(snap.cache_len, 1);
        }
    }
}
