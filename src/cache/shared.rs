//! Shared Cache Module
//!
//! Thread-safe handle around [`CacheStore`], cloned into every request task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::{CacheEntry, CacheStats, CacheStore};
use crate::error::Result;

/// Cheaply cloneable, concurrently usable cache.
///
/// Each call holds the lock only for the in-memory update; nothing awaits
/// while the guard is alive.
#[derive(Debug, Clone)]
pub struct SharedCache {
    inner: Arc<RwLock<CacheStore>>,
}

impl SharedCache {
    /// Creates a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(RwLock::new(CacheStore::new(capacity)?)),
        })
    }

    /// Looks up `key`, marking it most recently used.
    ///
    /// Returns a copy of the entry whether or not it has expired.
    pub async fn get(&self, key: &str) -> Option<CacheEntry> {
        // Write lock: a lookup reorders the recency list.
        let mut store = self.inner.write().await;
        store.get(key).cloned()
    }

    /// Inserts or replaces `key`, returning the key evicted to make room.
    pub async fn set(&self, key: String, value: String, ttl: Duration) -> Option<String> {
        let mut store = self.inner.write().await;
        store.set(key, value, ttl)
    }

    /// Looks up `key` without touching its recency.
    pub async fn peek(&self, key: &str) -> Option<CacheEntry> {
        let store = self.inner.read().await;
        store.peek(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Store-side statistics (evictions and entry count).
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }
}
