use lrukit::policy::lru::LruCache;
use lrukit::traits::CoreCache;

fn main() {
    let mut cache: LruCache<u32, String> = LruCache::new(3);

    cache.insert(1, "a".to_string());
    cache.insert(2, "b".to_string());
    cache.insert(3, "c".to_string());

    if let Some(value) = cache.fetch(&1) {
        println!("hit 1: {}", value);
    }

    cache.insert(4, "d".to_string());

    println!("contains 2? {}", cache.contains(&2));
    for (key, value) in cache.iter() {
        println!("{} => {}", key, value);
    }
}

// Expected output:
// hit 1: a
// contains 2? false
// 4 => d
// 1 => a
// 3 => c
//
// Explanation: capacity=3; fetch(&1) makes key 2 the least recently used
// entry, so inserting key 4 evicts it.
