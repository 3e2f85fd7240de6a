//! In-process backing store, used by tests and local runs without Redis.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use super::BackingStore;
use crate::error::BackendError;

/// Map-backed store that counts every fetch it serves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Vec<u8>>>,
    fetches: AtomicU64,
    failure: RwLock<Option<BackendError>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store preloaded with string records.
    pub fn from_records<I, K, V>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        for (key, value) in records {
            store.insert(key, value.into().into_bytes());
        }
        store
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.write_values().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) {
        self.write_values().remove(key);
    }

    /// Makes every subsequent fetch fail with `error` until cleared.
    pub fn fail_with(&self, error: Option<BackendError>) {
        *self
            .failure
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = error;
    }

    /// Number of fetches served so far, failed ones included.
    pub fn fetches(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }

    fn write_values(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<u8>>> {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl BackingStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, BackendError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self
            .failure
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
        {
            return Err(error);
        }

        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
            .ok_or(BackendError::NotFound)
    }
}
