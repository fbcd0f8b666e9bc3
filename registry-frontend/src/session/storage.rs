//! Key/value storage scoped to one browser session.

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("session storage failure: {0}")]
pub struct StorageError(pub String);

/// Per-browser key/value store, the console's equivalent of `sessionStorage`.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

#[async_trait]
impl SessionStorage for tower_sessions::Session {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.get::<String>(key)
            .await
            .map_err(|e| StorageError(e.to_string()))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.insert(key, value)
            .await
            .map_err(|e| StorageError(e.to_string()))
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.remove::<String>(key)
            .await
            .map(|_| ())
            .map_err(|e| StorageError(e.to_string()))
    }
}

/// In-process storage, used for a single logical browser session.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: DashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).map(|v| v.value().clone()))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}
