//! nscache - A namespaced, size-bounded key-value cache
//!
//! Provides map-like semantics with LRU eviction on top of any flat
//! asynchronous key-value store implementing the [`Backend`] contract.

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;

pub use backend::{Backend, MemoryBackend};
pub use cache::{Cache, CacheEntry, CacheStats};
pub use config::{CacheConfig, EvictionPolicy};
pub use error::{CacheError, Result};
