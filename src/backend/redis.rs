//! Redis-backed store.
//!
//! The client is built at startup so a malformed address fails fast, but the
//! connection itself is opened on first use: a Redis that is down only turns
//! individual requests into errors.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::BackingStore;
use crate::error::{BackendError, CacheError};

pub struct RedisStore {
    addr: String,
    client: Client,
    connection: OnceCell<ConnectionManager>,
    timeout: Duration,
}

impl RedisStore {
    /// Prepares a client for `addr` (`host:port` or a full `redis://` URL).
    ///
    /// Every fetch, connection setup included, is bounded by `timeout`.
    pub fn open(addr: &str, timeout: Duration) -> Result<Self, CacheError> {
        let url = if addr.contains("://") {
            addr.to_string()
        } else {
            format!("redis://{addr}/")
        };

        let client = Client::open(url.as_str()).map_err(|err| CacheError::NotInitialized {
            component: format!("redis client for '{addr}'"),
            reason: err.to_string(),
        })?;

        Ok(Self {
            addr: addr.to_string(),
            client,
            connection: OnceCell::new(),
            timeout,
        })
    }

    async fn connection(&self) -> Result<ConnectionManager, BackendError> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                let manager = ConnectionManager::new(self.client.clone())
                    .await
                    .map_err(|err| BackendError::Connection(err.to_string()))?;
                info!(addr = %self.addr, "connected to redis");
                Ok::<_, BackendError>(manager)
            })
            .await?;

        Ok(manager.clone())
    }

    async fn fetch(&self, key: &str) -> Result<Vec<u8>, BackendError> {
        let mut conn = self.connection().await?;
        let value = conn
            .get::<_, Option<Vec<u8>>>(key)
            .await
            .map_err(classify)?;

        value.ok_or(BackendError::NotFound)
    }
}

/// Separates transport failures from errors Redis itself replied with.
fn classify(err: RedisError) -> BackendError {
    if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
        BackendError::Connection(err.to_string())
    } else {
        BackendError::Command(err.to_string())
    }
}

#[async_trait]
impl BackingStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, BackendError> {
        let value = tokio::time::timeout(self.timeout, self.fetch(key))
            .await
            .map_err(|_| BackendError::Timeout(self.timeout.as_millis() as u64))??;

        debug!(key = %key, bytes = value.len(), "[redis] fetched");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_malformed_address() {
        let result = RedisStore::open("http://localhost:6379", Duration::from_secs(1));
        assert!(matches!(result, Err(CacheError::NotInitialized { .. })));
    }

    #[test]
    fn test_open_accepts_host_port() {
        assert!(RedisStore::open("localhost:6379", Duration::from_secs(1)).is_ok());
        assert!(RedisStore::open("redis://localhost:6379/0", Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn test_classify_reply_errors_as_command() {
        let err = RedisError::from((redis::ErrorKind::TypeError, "WRONGTYPE"));
        assert!(matches!(classify(err), BackendError::Command(_)));
    }

    #[test]
    fn test_classify_io_errors_as_connection() {
        let err = RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        assert!(matches!(classify(err), BackendError::Connection(_)));
    }

    #[tokio::test]
    async fn test_unreachable_redis_is_a_request_error() {
        // Nothing listens on port 1; the failure must surface per request.
        let store = RedisStore::open("127.0.0.1:1", Duration::from_secs(2)).unwrap();

        let result = store.get("key").await;
        assert!(matches!(
            result,
            Err(BackendError::Connection(_)) | Err(BackendError::Timeout(_))
        ));
    }
}
