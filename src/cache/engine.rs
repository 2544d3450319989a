//! Cache Engine Module
//!
//! Public-facing cache combining the LRU ledger with an in-memory mirror of
//! the backend's namespace. Every mutation updates the ledger and mirror
//! first, then persists through the backend, so reads observe writes
//! immediately while the backend briefly lags.
//!
//! The engine is single-flight: each operation's future must be awaited
//! before the next is issued. If a backend call fails mid-operation the
//! in-memory state is ahead of the backend and is not rolled back; call
//! [`Cache::initialize`] to regain consistency.

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::backend::{Backend, MemoryBackend};
use crate::cache::{CacheEntry, CacheStats, LruLedger, LEDGER_KEY, SEPARATOR};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Cache Engine ==
/// Namespaced, size-bounded key-value cache over a pluggable async backend.
///
/// [`Cache::initialize`] must complete before any other operation is called.
pub struct Cache {
    /// Key prefix partitioning this cache from others on the same backend
    namespace: String,
    /// Eviction threshold; 0 = unbounded
    max_entries: usize,
    /// Storage collaborator
    backend: Arc<dyn Backend>,
    /// Recency order of logical keys, oldest first
    ledger: LruLedger,
    /// Composite key -> serialized entry, mirroring the backend's namespace
    mirror: HashMap<String, String>,
    /// Performance counters
    stats: CacheStats,
}

impl Cache {
    // == Constructors ==
    /// Creates a cache over a fresh in-memory backend.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_backend(config, Arc::new(MemoryBackend::new()))
    }

    /// Creates a cache over the given backend.
    ///
    /// Several caches may share one backend as long as no namespace is a
    /// prefix of another.
    pub fn with_backend(config: CacheConfig, backend: Arc<dyn Backend>) -> Self {
        Self {
            namespace: config.effective_namespace().to_string(),
            max_entries: config.policy.max_entries,
            backend,
            ledger: LruLedger::new(),
            mirror: HashMap::new(),
            stats: CacheStats::new(),
        }
    }

    // == Initialize ==
    /// Loads the ledger from the backend (absent means empty) and rebuilds
    /// the mirror from the namespace's persisted entries.
    ///
    /// Malformed persisted data fails fast rather than being coerced to an
    /// empty cache.
    pub async fn initialize(&mut self) -> Result<()> {
        let ledger_key = self.ledger_key();
        self.ledger = match self.backend.get(&ledger_key).await? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => LruLedger::new(),
        };

        self.mirror.clear();
        let keys: Vec<String> = self
            .namespace_keys()
            .await?
            .into_iter()
            .filter(|key| *key != ledger_key)
            .collect();
        if !keys.is_empty() {
            for (key, value) in self.backend.batch_get(&keys).await? {
                if let Some(value) = value {
                    self.mirror.insert(key, value);
                }
            }
        }
        self.stats.set_total_entries(self.ledger.len());

        info!(
            "Cache '{}' initialized with {} entries",
            self.namespace,
            self.ledger.len()
        );
        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key, refreshing its recency.
    ///
    /// Presence is decided by the ledger; on a hit the key moves to most
    /// recently used and the ledger is persisted before the value is
    /// returned. Absence is a normal result, never an error, and touches no
    /// backend state.
    pub async fn get<V: DeserializeOwned>(&mut self, key: &str) -> Result<Option<V>> {
        if !self.ledger.contains(key) {
            self.stats.record_miss();
            return Ok(None);
        }

        self.ledger.touch(key);
        self.save_ledger().await?;
        self.stats.record_hit();
        self.peek(key)
    }

    // == Peek ==
    /// Retrieves a value from the mirror without refreshing its recency and
    /// without any backend access.
    pub fn peek<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>> {
        match self.mirror.get(&self.composite_key(key)) {
            Some(raw) => {
                let entry: CacheEntry = serde_json::from_str(raw)?;
                Ok(Some(entry.decode()?))
            }
            None => Ok(None),
        }
    }

    // == Set ==
    /// Upserts an entry and enforces the eviction policy.
    ///
    /// The ledger and mirror are updated before any backend I/O, then three
    /// persistence steps run in order: ledger save, batch-write of the full
    /// mirror, batch-remove of evicted keys.
    pub async fn set<V: Serialize>(&mut self, key: &str, value: &V) -> Result<()> {
        self.validate_key(key)?;

        let entry = CacheEntry::encode(value)?;
        let serialized = serde_json::to_string(&entry)?;

        self.ledger.touch(key);
        let victims: Vec<String> = self
            .ledger
            .evict_excess(self.max_entries)
            .into_iter()
            .map(|victim| self.composite_key(&victim))
            .collect();
        for victim in &victims {
            self.mirror.remove(victim);
            self.stats.record_eviction();
        }
        self.mirror.insert(self.composite_key(key), serialized);
        self.stats.set_total_entries(self.ledger.len());

        self.save_ledger().await?;
        if !self.mirror.is_empty() {
            let pairs: Vec<(String, String)> = self
                .mirror
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            self.backend.batch_set(pairs).await?;
        }
        if !victims.is_empty() {
            debug!(
                "Cache '{}': evicted {} least recently used entries",
                self.namespace,
                victims.len()
            );
            self.backend.batch_remove(&victims).await?;
        }
        Ok(())
    }

    // == Remove ==
    /// Removes a key from the ledger, mirror, and backend.
    ///
    /// Removing an absent key is a successful no-op.
    pub async fn remove(&mut self, key: &str) -> Result<()> {
        self.validate_key(key)?;

        self.ledger.remove(key);
        let composite = self.composite_key(key);
        self.mirror.remove(&composite);
        self.stats.set_total_entries(self.ledger.len());

        self.save_ledger().await?;
        self.backend.remove(&composite).await
    }

    // == Clear Namespace ==
    /// Removes every backend key under this namespace, including the
    /// persisted ledger.
    ///
    /// In-memory state is left untouched: the instance must be
    /// re-initialized before further use. [`Cache::clear_all`] is the full
    /// reset.
    pub async fn clear_namespace(&self) -> Result<()> {
        let keys = self.namespace_keys().await?;
        self.backend.batch_remove(&keys).await?;
        info!("Cache '{}': namespace cleared from backend", self.namespace);
        Ok(())
    }

    // == Clear All ==
    /// Resets the ledger and mirror, then concurrently removes every backend
    /// key under the namespace and persists the now-empty ledger.
    pub async fn clear_all(&mut self) -> Result<()> {
        self.ledger = LruLedger::new();
        self.mirror.clear();
        self.stats.set_total_entries(0);

        let keys = self.namespace_keys().await?;
        let (removed, saved) = tokio::join!(self.backend.batch_remove(&keys), self.save_ledger());
        removed?;
        saved?;
        info!("Cache '{}' cleared", self.namespace);
        Ok(())
    }

    // == Get All ==
    /// Returns every entry currently persisted under the namespace, keyed by
    /// logical key, fetched directly from the backend.
    ///
    /// The reserved ledger entry and any composite key that does not split
    /// cleanly into namespace and key are discarded.
    pub async fn get_all(&self) -> Result<HashMap<String, CacheEntry>> {
        let keys = self.namespace_keys().await?;
        let mut entries = HashMap::new();
        if keys.is_empty() {
            return Ok(entries);
        }

        for (composite, value) in self.backend.batch_get(&keys).await? {
            let components: Vec<&str> = composite.split(SEPARATOR).collect();
            if components.len() != 2 {
                continue;
            }
            let key = components[1];
            if key == LEDGER_KEY {
                continue;
            }
            let Some(raw) = value else { continue };
            entries.insert(key.to_string(), serde_json::from_str(&raw)?);
        }
        Ok(entries)
    }

    // == Accessors ==
    /// Returns the number of entries currently tracked.
    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Checks presence without refreshing recency.
    pub fn contains(&self, key: &str) -> bool {
        self.ledger.contains(key)
    }

    /// Returns current performance counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    /// The namespace this cache operates under.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    // == Internals ==
    fn composite_key(&self, key: &str) -> String {
        format!("{}{}{}", self.namespace, SEPARATOR, key)
    }

    fn ledger_key(&self) -> String {
        self.composite_key(LEDGER_KEY)
    }

    fn prefix(&self) -> String {
        format!("{}{}", self.namespace, SEPARATOR)
    }

    /// Rejects the reserved ledger key and keys containing the separator.
    /// Applied on mutation only; such keys can never be present, so reads
    /// simply report them absent.
    fn validate_key(&self, key: &str) -> Result<()> {
        if key == LEDGER_KEY {
            return Err(CacheError::InvalidKey(format!(
                "'{}' is reserved for the LRU ledger",
                LEDGER_KEY
            )));
        }
        if key.contains(SEPARATOR) {
            return Err(CacheError::InvalidKey(format!(
                "key '{}' contains the namespace separator '{}'",
                key, SEPARATOR
            )));
        }
        Ok(())
    }

    async fn save_ledger(&self) -> Result<()> {
        let serialized = serde_json::to_string(&self.ledger)?;
        self.backend.set(&self.ledger_key(), serialized).await
    }

    async fn namespace_keys(&self) -> Result<Vec<String>> {
        let prefix = self.prefix();
        Ok(self
            .backend
            .list_keys()
            .await?
            .into_iter()
            .filter(|key| key.starts_with(&prefix))
            .collect())
    }
}
