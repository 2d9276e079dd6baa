//! The persistence contract and an in-memory implementation.

use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Error from a storage backend.
///
/// Never surfaces past the telemetry store: persistence failures are logged
/// and swallowed so they cannot re-enter the capture path.
#[derive(Debug, Error)]
#[error("storage backend failed: {0}")]
pub struct StorageError(pub String);

/// Key-value persistence contract, supplied by the embedding application.
///
/// Both operations are asynchronous and may fail; the store treats every
/// failure as log-and-continue.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> BoxFuture<'static, Result<Option<String>, StorageError>>;
    fn set(&self, key: &str, value: String) -> BoxFuture<'static, Result<(), StorageError>>;
    fn remove(&self, key: &str) -> BoxFuture<'static, Result<(), StorageError>>;
}

/// In-memory backend for tests and embedders without durable storage.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> BoxFuture<'static, Result<Option<String>, StorageError>> {
        let entries = Arc::clone(&self.entries);
        let key = key.to_string();
        Box::pin(async move {
            let entries = entries.lock().unwrap_or_else(|e| e.into_inner());
            Ok(entries.get(&key).cloned())
        })
    }

    fn set(&self, key: &str, value: String) -> BoxFuture<'static, Result<(), StorageError>> {
        let entries = Arc::clone(&self.entries);
        let key = key.to_string();
        Box::pin(async move {
            let mut entries = entries.lock().unwrap_or_else(|e| e.into_inner());
            entries.insert(key, value);
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> BoxFuture<'static, Result<(), StorageError>> {
        let entries = Arc::clone(&self.entries);
        let key = key.to_string();
        Box::pin(async move {
            let mut entries = entries.lock().unwrap_or_else(|e| e.into_inner());
            entries.remove(&key);
            Ok(())
        })
    }
}
