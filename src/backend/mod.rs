//! Backing Store Module
//!
//! The authoritative key-value service the proxy fronts. The proxy only ever
//! reads from it, one key at a time.

mod memory;
mod redis;

use async_trait::async_trait;

use crate::error::BackendError;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

/// Read-only port onto the backing store.
///
/// Implementations return the raw payload; turning it into a string is the
/// caller's concern. Any retry or timeout policy lives here, not in the caller.
#[async_trait]
pub trait BackingStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Vec<u8>, BackendError>;
}
