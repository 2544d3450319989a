//! In-Memory Backend Module
//!
//! Reference [`Backend`] implementation backed by a HashMap. Each instance
//! owns its own map, so tests and runs never share state unless they share
//! the instance itself.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::backend::Backend;
use crate::error::Result;

// == Memory Backend ==
/// In-memory reference backend.
///
/// Intended for tests and as a template for real storage collaborators.
/// Never fails.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    store: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys currently stored, across all namespaces.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    /// Returns true if the backend holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.store.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.store.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.store.lock().await.remove(key);
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        Ok(self.store.lock().await.keys().cloned().collect())
    }

    async fn batch_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>> {
        let store = self.store.lock().await;
        Ok(keys
            .iter()
            .map(|key| (key.clone(), store.get(key).cloned()))
            .collect())
    }

    async fn batch_set(&self, pairs: Vec<(String, String)>) -> Result<()> {
        let mut store = self.store.lock().await;
        for (key, value) in pairs {
            store.insert(key, value);
        }
        Ok(())
    }

    async fn batch_remove(&self, keys: &[String]) -> Result<()> {
        let mut store = self.store.lock().await;
        for key in keys {
            store.remove(key);
        }
        Ok(())
    }
}
