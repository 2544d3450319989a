//! Configuration Module
//!
//! Construction-time configuration for a cache instance.

// == Eviction Policy ==
/// Size-bound policy enforced on every write.
#[derive(Debug, Clone)]
pub struct EvictionPolicy {
    /// Maximum number of entries the cache may hold.
    ///
    /// A value of 0 disables eviction entirely (unbounded cache).
    pub max_entries: usize,
}

impl Default for EvictionPolicy {
    fn default() -> Self {
        Self {
            max_entries: 50_000,
        }
    }
}

// == Cache Config ==
/// Configuration for a cache instance.
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Key prefix partitioning this cache's entries from others sharing the
    /// same backend. Must not be a prefix of another namespace on the same
    /// backend and must not contain the `:` separator.
    pub namespace: String,
    /// Eviction threshold
    pub policy: EvictionPolicy,
}

impl CacheConfig {
    /// Creates a config with the given namespace and the default policy.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            policy: EvictionPolicy::default(),
        }
    }

    /// Sets the eviction threshold (0 = unbounded).
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.policy = EvictionPolicy { max_entries };
        self
    }

    /// Effective namespace, falling back to `"cache"` when empty.
    pub fn effective_namespace(&self) -> &str {
        if self.namespace.is_empty() {
            "cache"
        } else {
            &self.namespace
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_default() {
        let policy = EvictionPolicy::default();
        assert_eq!(policy.max_entries, 50_000);
    }

    #[test]
    fn test_config_default_namespace() {
        let config = CacheConfig::default();
        assert_eq!(config.effective_namespace(), "cache");
        assert_eq!(config.policy.max_entries, 50_000);
    }

    #[test]
    fn test_config_builder() {
        let config = CacheConfig::new("sessions").with_max_entries(10);
        assert_eq!(config.effective_namespace(), "sessions");
        assert_eq!(config.policy.max_entries, 10);
    }
}
