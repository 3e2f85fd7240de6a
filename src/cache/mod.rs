//! Cache Module
//!
//! Provides bounded in-memory caching with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::{is_expired, CacheEntry};
pub use lru::LruTracker;
pub use shared::SharedCache;
pub use stats::{CacheStats, RequestCounters};
pub use store::CacheStore;
