//! API Handlers
//!
//! Every request path is a key; the handler answers with the raw value.

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::Uri;

use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::proxy::Proxy;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<Proxy>,
}

impl AppState {
    pub fn new(proxy: Proxy) -> Self {
        Self {
            proxy: Arc::new(proxy),
        }
    }

    /// Builds the cache and backing store client from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Proxy::from_config(config)?))
    }
}

/// Handler for `GET /`, which carries an empty key.
pub async fn root_handler(State(state): State<AppState>) -> Result<String> {
    state.proxy.resolve("").await
}

/// Handler for `GET /<key>`
///
/// The key is the decoded path with every leading slash removed, so `//`
/// carries an empty key and is rejected with 400. A path that does not decode
/// to UTF-8 is a decode error for that key, never an empty key.
pub async fn get_handler(
    State(state): State<AppState>,
    uri: Uri,
    key: std::result::Result<Path<String>, PathRejection>,
) -> Result<String> {
    let Path(key) = key.map_err(|rejection| CacheError::Decode {
        key: uri.path().trim_start_matches('/').to_string(),
        reason: rejection.body_text(),
    })?;
    state.proxy.resolve(key.trim_start_matches('/')).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStore;
    use crate::cache::SharedCache;
    use std::time::Duration;

    fn state() -> AppState {
        let store = Arc::new(MemoryStore::from_records([("greeting", "hello")]));
        AppState::new(Proxy::new(
            SharedCache::new(10).unwrap(),
            store,
            Duration::from_secs(60),
        ))
    }

    fn uri(path: &str) -> Uri {
        path.parse().unwrap()
    }

    #[tokio::test]
    async fn test_get_handler_returns_value() {
        let result = get_handler(
            State(state()),
            uri("/greeting"),
            Ok(Path("greeting".to_string())),
        )
        .await;
        assert_eq!(result.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_get_handler_strips_leading_slashes() {
        let result = get_handler(
            State(state()),
            uri("///greeting"),
            Ok(Path("//greeting".to_string())),
        )
        .await;
        assert_eq!(result.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_get_handler_without_key() {
        let result = root_handler(State(state())).await;
        assert_eq!(result, Err(CacheError::BadRequest));

        let result = get_handler(State(state()), uri("//"), Ok(Path("/".to_string()))).await;
        assert_eq!(result, Err(CacheError::BadRequest));
    }

    #[test]
    fn test_from_config_rejects_zero_capacity() {
        let config = Config {
            cache_size: 0,
            ..Config::default()
        };
        assert!(matches!(
            AppState::from_config(&config),
            Err(CacheError::NotInitialized { .. })
        ));
    }

    #[test]
    fn test_from_config_defaults() {
        let state = AppState::from_config(&Config::default()).unwrap();
        assert_eq!(state.proxy.ttl(), Duration::from_secs(120));
    }
}
