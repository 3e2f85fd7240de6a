//! Read-through coordinator.
//!
//! The only component that talks to both the cache and the backing store.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::backend::{BackingStore, RedisStore};
use crate::cache::{CacheStats, RequestCounters, SharedCache};
use crate::config::Config;
use crate::error::{CacheError, Result};

/// Serves keys from the cache, falling back to the backing store on a miss.
pub struct Proxy {
    cache: SharedCache,
    store: Arc<dyn BackingStore>,
    ttl: Duration,
    counters: RequestCounters,
}

impl Proxy {
    pub fn new(cache: SharedCache, store: Arc<dyn BackingStore>, ttl: Duration) -> Self {
        Self {
            cache,
            store,
            ttl,
            counters: RequestCounters::new(),
        }
    }

    /// Builds the cache and the Redis client described by `config`.
    ///
    /// Fails with [`CacheError::NotInitialized`] when either cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = SharedCache::new(config.cache_size)?;
        let store = RedisStore::open(&config.redis_addr, config.backend_timeout())?;
        Ok(Self::new(cache, Arc::new(store), config.ttl()))
    }

    /// Returns the value for `key`, reading through to the backing store when
    /// the cache has no live entry.
    ///
    /// Backing store failures are returned as-is and never cached.
    pub async fn resolve(&self, key: &str) -> Result<String> {
        if key.is_empty() {
            return Err(CacheError::BadRequest);
        }

        if let Some(entry) = self.cache.get(key).await {
            if !entry.is_expired() {
                self.counters.record_hit();
                debug!(
                    key = %key,
                    ttl_remaining_ms = entry.ttl_remaining().as_millis() as u64,
                    "[cache] hit"
                );
                return Ok(entry.value);
            }
        }
        self.counters.record_miss();

        // No cache lock is held across this await.
        let payload = self.store.get(key).await.map_err(|err| {
            self.counters.record_backend_error();
            warn!(key = %key, error = %err, "backing store fetch failed");
            err
        })?;

        let value = String::from_utf8(payload).map_err(|err| CacheError::Decode {
            key: key.to_string(),
            reason: err.utf8_error().to_string(),
        })?;

        if let Some(evicted) = self.cache.set(key.to_string(), value.clone(), self.ttl).await {
            debug!(key = %key, evicted = %evicted, "[cache] evicted to make room");
        }
        Ok(value)
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Snapshot of request counters merged with cache-side statistics.
    pub async fn stats(&self) -> CacheStats {
        let mut stats = self.cache.stats().await;
        self.counters.fill(&mut stats);
        stats
    }
}
