//! LRU Ledger Module
//!
//! Ordered sequence of logical keys recording recency of access. Persisted
//! alongside the entries as a JSON array under a reserved composite key.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

// == LRU Ledger ==
/// Tracks access order for LRU eviction.
///
/// Keys are stored in a VecDeque where:
/// - Front = Least recently used
/// - Back = Most recently used
///
/// Each key appears at most once.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LruLedger {
    order: VecDeque<String>,
}

impl LruLedger {
    // == Constructor ==
    /// Creates a new empty ledger.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as most recently used (moves to the back).
    ///
    /// If the key is already tracked it is removed first, preserving the
    /// at-most-once invariant.
    pub fn touch(&mut self, key: &str) {
        self.remove(key);
        self.order.push_back(key.to_string());
    }

    // == Remove ==
    /// Removes a key from the ledger. Removing an untracked key is a no-op.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Evict Excess ==
    /// Truncates the oldest keys until at most `max_entries` remain,
    /// returning the victims in eviction order (oldest first).
    ///
    /// `max_entries` of 0 disables eviction and returns no victims.
    pub fn evict_excess(&mut self, max_entries: usize) -> Vec<String> {
        if max_entries == 0 {
            return Vec::new();
        }
        let victim_count = self.order.len().saturating_sub(max_entries);
        self.order.drain(..victim_count).collect()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }

    // == Accessors ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the least recently used key without removing it.
    pub fn oldest(&self) -> Option<&String> {
        self.order.front()
    }

    /// Iterates the tracked keys from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }
}
