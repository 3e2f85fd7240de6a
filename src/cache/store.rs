//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking.
//! Expiry is left to the caller: lookups hand back expired entries as-is.

use std::collections::HashMap;
use std::time::Duration;

use tracing::trace;

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::error::{CacheError, Result};

#[derive(Debug)]
struct Slot {
    entry: CacheEntry,
    node: usize,
}

// == Cache Store ==
/// Bounded key-value storage with LRU eviction.
///
/// Not synchronized; see [`crate::cache::SharedCache`] for the concurrent handle.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage, each slot pointing at its LRU node
    entries: HashMap<String, Slot>,
    /// LRU access tracker
    lru: LruTracker,
    /// Number of entries evicted so far
    evictions: u64,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `capacity` entries.
    ///
    /// A zero capacity cannot hold anything and is rejected as a
    /// configuration error.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::NotInitialized {
                component: "cache".to_string(),
                reason: "capacity must be at least 1".to_string(),
            });
        }

        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            lru: LruTracker::with_capacity(capacity),
            evictions: 0,
            capacity,
        })
    }

    // == Set ==
    /// Stores a key-value pair with the given TTL.
    ///
    /// If the key already exists, the value is overwritten and the TTL window
    /// restarts. If the cache is at capacity and the key is new, the least
    /// recently used entry is evicted first and its key returned.
    pub fn set(&mut self, key: String, value: String, ttl: Duration) -> Option<String> {
        let entry = CacheEntry::new(value, ttl);

        if let Some(slot) = self.entries.get_mut(&key) {
            slot.entry = entry;
            self.lru.touch(slot.node);
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.evict_oldest()
        } else {
            None
        };

        let node = self.lru.push_front(key.clone());
        self.entries.insert(key, Slot { entry, node });
        evicted
    }

    // == Get ==
    /// Looks up an entry, marking it as most recently used.
    ///
    /// The entry is returned whether or not it has expired.
    pub fn get(&mut self, key: &str) -> Option<&CacheEntry> {
        let slot = self.entries.get(key)?;
        self.lru.touch(slot.node);
        Some(&slot.entry)
    }

    // == Peek ==
    /// Looks up an entry without changing its recency.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key).map(|slot| &slot.entry)
    }

    // == Stats ==
    /// Returns the store-side statistics (evictions and entry count).
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            evictions: self.evictions,
            total_entries: self.entries.len(),
            ..CacheStats::default()
        }
    }

    /// Keys ordered from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.lru.iter().map(str::to_string).collect()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    fn evict_oldest(&mut self) -> Option<String> {
        let key = self.lru.evict_oldest()?;
        self.entries.remove(&key);
        self.evictions += 1;
        trace!(key = %key, "evicted least recently used entry");
        Some(key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    fn store(capacity: usize) -> CacheStore {
        CacheStore::new(capacity).unwrap()
    }

    #[test]
    fn test_store_new() {
        let store = store(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
    }

    #[test]
    fn test_store_zero_capacity_is_rejected() {
        let result = CacheStore::new(0);
        assert!(matches!(result, Err(CacheError::NotInitialized { .. })));
        assert_eq!(
            result.unwrap_err().to_string(),
            "cache not initialized: capacity must be at least 1"
        );
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = store(100);

        store.set("key1".to_string(), "value1".to_string(), TTL);
        let entry = store.get("key1").unwrap();

        assert_eq!(entry.value, "value1");
        assert_eq!(entry.ttl, TTL);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = store(100);
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_store_overwrite_restarts_ttl_window() {
        let mut store = store(100);

        store.set("key1".to_string(), "value1".to_string(), Duration::ZERO);
        let first = store.peek("key1").unwrap().inserted_at;
        store.set("key1".to_string(), "value2".to_string(), TTL);

        let entry = store.get("key1").unwrap();
        assert_eq!(entry.value, "value2");
        assert_eq!(entry.ttl, TTL);
        assert!(entry.inserted_at >= first);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_returns_expired_entries() {
        let mut store = store(100);

        store.set("key1".to_string(), "value1".to_string(), Duration::ZERO);

        let entry = store.get("key1").unwrap();
        assert!(entry.is_expired());
        assert_eq!(entry.value, "value1");
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = store(3);

        store.set("key1".to_string(), "value1".to_string(), TTL);
        store.set("key2".to_string(), "value2".to_string(), TTL);
        store.set("key3".to_string(), "value3".to_string(), TTL);

        // Cache is full, adding key4 should evict key1 (oldest)
        let evicted = store.set("key4".to_string(), "value4".to_string(), TTL);

        assert_eq!(evicted.as_deref(), Some("key1"));
        assert_eq!(store.len(), 3);
        assert!(store.get("key1").is_none());
        assert!(store.get("key2").is_some());
        assert!(store.get("key3").is_some());
        assert!(store.get("key4").is_some());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = store(3);

        store.set("key1".to_string(), "value1".to_string(), TTL);
        store.set("key2".to_string(), "value2".to_string(), TTL);
        store.set("key3".to_string(), "value3".to_string(), TTL);

        // Access key1 to make it most recently used
        store.get("key1");

        // Adding key4 should evict key2 (now oldest)
        store.set("key4".to_string(), "value4".to_string(), TTL);

        assert!(store.get("key1").is_some());
        assert!(store.get("key2").is_none());
    }

    #[test]
    fn test_store_peek_does_not_touch() {
        let mut store = store(2);

        store.set("a".to_string(), "1".to_string(), TTL);
        store.set("b".to_string(), "2".to_string(), TTL);
        assert!(store.peek("a").is_some());

        store.set("c".to_string(), "3".to_string(), TTL);
        assert!(store.peek("a").is_none());
        assert_eq!(store.keys_by_recency(), vec!["c", "b"]);
    }

    #[test]
    fn test_store_overwrite_at_capacity_does_not_evict() {
        let mut store = store(2);

        store.set("a".to_string(), "1".to_string(), TTL);
        store.set("b".to_string(), "2".to_string(), TTL);
        let evicted = store.set("a".to_string(), "updated".to_string(), TTL);

        assert!(evicted.is_none());
        assert_eq!(store.len(), 2);
        assert_eq!(store.keys_by_recency(), vec!["a", "b"]);
    }

    #[test]
    fn test_store_eviction_follows_insertion_order() {
        let mut store = store(3);

        for key in ["first", "second", "third"] {
            store.set(key.to_string(), key.to_uppercase(), TTL);
        }

        let evicted: Vec<_> = ["x", "y", "z"]
            .iter()
            .filter_map(|key| store.set(key.to_string(), String::new(), TTL))
            .collect();
        assert_eq!(evicted, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_store_capacity_one() {
        let mut store = store(1);

        store.set("a".to_string(), "1".to_string(), TTL);
        store.set("b".to_string(), "2".to_string(), TTL);

        assert_eq!(store.len(), 1);
        assert!(store.peek("a").is_none());
        assert_eq!(store.peek("b").unwrap().value, "2");
    }

    #[test]
    fn test_store_stats() {
        let mut store = store(1);

        store.set("key1".to_string(), "value1".to_string(), TTL);
        store.set("key2".to_string(), "value2".to_string(), TTL);

        let stats = store.stats();
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.hits, 0);
    }
}
