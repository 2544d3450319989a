//! Cache Module
//!
//! Namespaced key-value caching with LRU eviction over a pluggable backend.

mod engine;
mod entry;
mod ledger;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use engine::Cache;
pub use entry::CacheEntry;
pub use ledger::LruLedger;
pub use stats::CacheStats;

// == Public Constants ==
/// Separator between a namespace and a logical key in composite keys.
pub const SEPARATOR: char = ':';

/// Reserved logical key under which the LRU ledger is persisted.
///
/// Rejected as a caller key by `set` and `remove`.
pub const LEDGER_KEY: &str = "_lru";
