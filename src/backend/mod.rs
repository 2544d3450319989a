//! Backend Module
//!
//! Defines the flat asynchronous key-value store contract the cache engine
//! persists through, plus the in-memory reference implementation.

mod memory;

pub use memory::MemoryBackend;

use async_trait::async_trait;

use crate::error::Result;

// == Backend Trait ==
/// Flat asynchronous key-value store collaborator.
///
/// Backends have no namespace or eviction awareness: they see only composite
/// keys and opaque serialized text. Implementations must be thread-safe so a
/// single backend can be shared by several caches via `Arc<dyn Backend>`.
///
/// Any I/O failure is reported as [`CacheError::Backend`] and propagates
/// unchanged to the caller of the cache operation that triggered it.
///
/// [`CacheError::Backend`]: crate::error::CacheError::Backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the serialized value stored under `key`, or None if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Lists every key the backend currently holds, across all namespaces.
    async fn list_keys(&self) -> Result<Vec<String>>;

    /// Fetches several keys at once, pairing each requested key with its
    /// value or None.
    async fn batch_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>>;

    /// Stores several key-value pairs at once.
    async fn batch_set(&self, pairs: Vec<(String, String)>) -> Result<()>;

    /// Removes several keys at once. Absent keys are skipped.
    async fn batch_remove(&self, keys: &[String]) -> Result<()>;
}
