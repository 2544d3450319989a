//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations.
///
/// Absence of a key is never an error: `get` and `peek` report it as
/// `Ok(None)`, and removing an absent key succeeds.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The storage backend reported an I/O failure
    #[error("Backend operation failed: {0}")]
    Backend(String),

    /// Caller-supplied key is reserved or contains the namespace separator
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// A value could not be serialized, or persisted data is corrupt
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
