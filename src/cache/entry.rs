//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// == Cache Entry ==
/// Represents a single cache entry: an opaque payload plus write metadata.
///
/// The persisted form is JSON text of this struct. The `created` timestamp is
/// informational only; it plays no role in eviction decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// When the entry was written. Refreshed on every overwrite.
    pub created: DateTime<Utc>,
    /// The stored payload, opaque to the cache
    pub value: serde_json::Value,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry around `value`, stamping it with the current time.
    pub fn new(value: serde_json::Value) -> Self {
        Self {
            created: Utc::now(),
            value,
        }
    }

    /// Encodes a caller payload into a new entry.
    pub fn encode<V: Serialize>(value: &V) -> Result<Self> {
        Ok(Self::new(serde_json::to_value(value)?))
    }

    /// Decodes the payload into a caller type.
    pub fn decode<V: DeserializeOwned>(&self) -> Result<V> {
        Ok(serde_json::from_value(self.value.clone())?)
    }
}
