//! Bounded Cache Module
//!
//! Thread-safe result cache combining the LRU list with hit/miss statistics.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::cache::{CacheStats, CachedValue, LruList};

#[derive(Debug)]
struct Inner {
    entries: LruList<CachedValue>,
    stats: CacheStats,
}

// == Bounded Cache ==
/// Fixed-capacity LRU cache shared by every request.
///
/// All operations take a single internal mutex, so the recency list and
/// the key index stay consistent no matter which outer locks callers hold.
/// Operations never fail: a missing key is a miss, not an error.
#[derive(Debug)]
pub struct BoundedCache {
    inner: Mutex<Inner>,
}

impl BoundedCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: LruList::new(capacity),
                stats: CacheStats::new(),
            }),
        }
    }

    // == Get ==
    /// Returns a copy of the value for `key` and marks it most recently used.
    pub fn get(&self, key: &str) -> Option<CachedValue> {
        let mut inner = self.lock();
        let value = inner.entries.get(key).cloned();
        inner.stats.record_lookup(value.is_some());
        value
    }

    // == Set ==
    /// Inserts or overwrites `key`, evicting the least recently used entry
    /// when the cache is full and the key is new.
    pub fn set(&self, key: impl Into<String>, value: CachedValue) {
        let mut inner = self.lock();
        if let Some(evicted) = inner.entries.insert(key.into(), value) {
            trace!(key = %evicted, "evicted least recently used entry");
            inner.stats.record_eviction();
        }
    }

    // == Delete ==
    /// Removes `key` if present. Returns whether an entry was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.lock().entries.remove(key).is_some()
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            total_entries: inner.entries.len(),
            ..inner.stats
        }
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().entries.capacity()
    }

    /// Returns cached keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        self.lock().entries.keys().map(str::to_owned).collect()
    }

    // Mutations never unwind part-way, so a poisoned guard is still consistent.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn cache(capacity: usize) -> BoundedCache {
        BoundedCache::new(NonZeroUsize::new(capacity).unwrap())
    }

    #[test]
    fn test_cache_new() {
        let cache = cache(100);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 100);
    }

    #[test]
    fn test_cache_set_and_get() {
        let cache = cache(100);
        cache.set("key1", CachedValue::Validation(true));

        assert_eq!(cache.get("key1"), Some(CachedValue::Validation(true)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_get_nonexistent() {
        let cache = cache(100);
        assert_eq!(cache.get("nonexistent"), None);
    }

    #[test]
    fn test_cache_holds_mixed_kinds() {
        let cache = cache(100);
        cache.set("v", CachedValue::Validation(false));
        cache.set("a", CachedValue::applicable(Vec::new()));

        assert_eq!(cache.get("v").and_then(|v| v.as_validation()), Some(false));
        assert!(cache.get("a").unwrap().as_applicable().unwrap().is_empty());
    }

    #[test]
    fn test_cache_delete() {
        let cache = cache(100);
        cache.set("key1", CachedValue::Validation(true));

        assert!(cache.delete("key1"));
        assert!(cache.is_empty());
        assert_eq!(cache.get("key1"), None);
    }

    #[test]
    fn test_cache_delete_nonexistent_is_noop() {
        let cache = cache(100);
        cache.set("key1", CachedValue::Validation(true));

        assert!(!cache.delete("nonexistent"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_overwrite() {
        let cache = cache(100);
        cache.set("key1", CachedValue::Validation(true));
        cache.set("key1", CachedValue::Validation(false));

        assert_eq!(cache.get("key1"), Some(CachedValue::Validation(false)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_lru_eviction() {
        let cache = cache(3);
        cache.set("key1", CachedValue::Validation(true));
        cache.set("key2", CachedValue::Validation(true));
        cache.set("key3", CachedValue::Validation(true));

        // Cache is full, adding key4 should evict key1 (oldest)
        cache.set("key4", CachedValue::Validation(true));

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("key1"), None);
        assert!(cache.get("key2").is_some());
        assert!(cache.get("key3").is_some());
        assert!(cache.get("key4").is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_cache_lru_touch_on_get() {
        let cache = cache(3);
        cache.set("key1", CachedValue::Validation(true));
        cache.set("key2", CachedValue::Validation(true));
        cache.set("key3", CachedValue::Validation(true));

        // Access key1 to make it most recently used
        cache.get("key1");

        // Adding key4 should evict key2 (now oldest)
        cache.set("key4", CachedValue::Validation(true));

        assert!(cache.get("key1").is_some());
        assert_eq!(cache.get("key2"), None);
    }

    #[test]
    fn test_cache_stats() {
        let cache = cache(100);
        cache.set("key1", CachedValue::Validation(true));
        cache.get("key1");
        cache.get("nonexistent");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_cache_keys_mru_first() {
        let cache = cache(3);
        cache.set("a", CachedValue::Validation(true));
        cache.set("b", CachedValue::Validation(true));
        cache.get("a");

        assert_eq!(cache.keys(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_cache_concurrent_threads() {
        const THREADS: usize = 16;
        const OPS: usize = 500;
        let cache = Arc::new(cache(64));

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..OPS {
                        let key = format!("t{}-k{}", t, i % 32);
                        match i % 3 {
                            0 => cache.set(key, CachedValue::Validation(i % 2 == 0)),
                            1 => {
                                cache.get(&key);
                            }
                            _ => {
                                cache.delete(&key);
                            }
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("worker thread should not panic");
        }

        let keys = cache.keys();
        let stats = cache.stats();
        assert!(keys.len() <= 64);
        assert_eq!(keys.len(), cache.len());
        assert_eq!(stats.total_entries, keys.len());
        // get is every third op
        assert_eq!(stats.lookups(), (THREADS * (OPS / 3 + 1)) as u64);
    }

    #[test]
    fn test_cache_concurrent_distinct_writers_keep_last_value() {
        let cache = Arc::new(cache(128));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..100 {
                        cache.set(format!("writer-{}", t), CachedValue::Validation(i == 99));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        // No lost updates: each writer's final write is visible
        for t in 0..8 {
            assert_eq!(
                cache.get(&format!("writer-{}", t)),
                Some(CachedValue::Validation(true))
            );
        }
        assert_eq!(cache.len(), 8);
    }
}
