#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::policy::lru::LruCache;
use lrukit::traits::{CoreCache, LruCacheTrait, MutableCache};

// Fuzz arbitrary operation sequences on LruCache
//
// The first byte picks the capacity; the rest are (op, key) pairs driving
// insert, fetch, peek, touch, remove, pop_lru and clear. The index and the
// recency list are cross-checked after every step.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap_byte % 32) + 1;
    let mut cache: LruCache<u8, u32> = LruCache::new(capacity);
    let mut written = 0u32;

    for pair in ops.chunks_exact(2) {
        let (op, key) = (pair[0] % 8, pair[1] % 64);

        match op {
            0 | 1 => {
                // insert
                written += 1;
                let was_present = cache.contains(&key);
                let old_len = cache.len();
                let previous = cache.insert(key, written);

                assert_eq!(previous.is_some(), was_present);
                if was_present {
                    assert_eq!(cache.len(), old_len);
                }
                assert_eq!(cache.recency_rank(&key), Some(0));
                assert_eq!(cache.peek(&key), Some(&written));
            }
            2 => {
                // fetch
                let present = cache.contains(&key);
                assert_eq!(cache.fetch(&key).is_some(), present);
                if present {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            }
            3 => {
                // peek must not reorder
                let before = cache.recency_rank(&key);
                let _ = cache.peek(&key);
                assert_eq!(cache.recency_rank(&key), before);
            }
            4 => {
                // touch
                let present = cache.contains(&key);
                assert_eq!(cache.touch(&key), present);
            }
            5 => {
                // remove
                let present = cache.contains(&key);
                assert_eq!(cache.remove(&key).is_some(), present);
                assert!(!cache.contains(&key));
            }
            6 => {
                // pop_lru
                let expected = cache.peek_lru().map(|(k, _)| *k);
                let popped = cache.pop_lru().map(|(k, _)| k);
                assert_eq!(popped, expected);
            }
            7 => {
                // clear, rarely
                if key == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                }
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        if let Err(err) = cache.check_invariants() {
            panic!("{}", err);
        }
    }
});
