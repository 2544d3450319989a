//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify engine behavior against a reference model and to
//! check the size bound and statistics under arbitrary operation sequences.

use std::collections::HashMap;

use proptest::prelude::*;

use crate::cache::Cache;
use crate::config::CacheConfig;

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 8;

fn run<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

// == Strategies ==
/// Small key space to force collisions, overwrites, and evictions.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,32}".prop_map(|s| s)
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Remove { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Remove { key }),
    ]
}

// == Reference Model ==
/// Sequential in-memory model of the cache: a recency
/// list (oldest first) plus a value map, kept in lock-step.
struct ModelCache {
    order: Vec<String>,
    values: HashMap<String, String>,
    max_entries: usize,
}

impl ModelCache {
    fn new(max_entries: usize) -> Self {
        Self {
            order: Vec::new(),
            values: HashMap::new(),
            max_entries,
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        self.order.retain(|k| k != key);
        self.order.push(key.to_string());
        if self.max_entries > 0 {
            while self.order.len() > self.max_entries {
                let victim = self.order.remove(0);
                self.values.remove(&victim);
            }
        }
        self.values.insert(key.to_string(), value.to_string());
    }

    fn get(&mut self, key: &str) -> Option<String> {
        if !self.order.iter().any(|k| k == key) {
            return None;
        }
        self.order.retain(|k| k != key);
        self.order.push(key.to_string());
        self.values.get(key).cloned()
    }

    fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
        self.values.remove(key);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of operations, the engine agrees with the reference
    // model on every get result and on the final persisted key set.
    #[test]
    fn prop_model_equivalence(ops in prop::collection::vec(cache_op_strategy(), 1..40)) {
        run(async {
            let mut cache = Cache::new(
                CacheConfig::new("prop").with_max_entries(TEST_MAX_ENTRIES),
            );
            cache.initialize().await.unwrap();
            let mut model = ModelCache::new(TEST_MAX_ENTRIES);

            for op in ops {
                match op {
                    CacheOp::Set { key, value } => {
                        cache.set(&key, &value).await.unwrap();
                        model.set(&key, &value);
                    }
                    CacheOp::Get { key } => {
                        let actual: Option<String> = cache.get(&key).await.unwrap();
                        let expected = model.get(&key);
                        prop_assert_eq!(actual, expected, "get result diverged from model");
                    }
                    CacheOp::Remove { key } => {
                        cache.remove(&key).await.unwrap();
                        model.remove(&key);
                    }
                }
                prop_assert_eq!(cache.len(), model.order.len(), "entry count diverged");
            }

            let persisted = cache.get_all().await.unwrap();
            let mut actual_keys: Vec<String> = persisted.keys().cloned().collect();
            let mut expected_keys: Vec<String> = model.values.keys().cloned().collect();
            actual_keys.sort();
            expected_keys.sort();
            prop_assert_eq!(actual_keys, expected_keys, "persisted key set diverged");
            Ok(())
        })?;
    }

    // For any sequence of operations, the entry count never exceeds the
    // configured bound, both in memory and in the backend.
    #[test]
    fn prop_size_bound(ops in prop::collection::vec(cache_op_strategy(), 1..40)) {
        run(async {
            let mut cache = Cache::new(
                CacheConfig::new("bound").with_max_entries(3),
            );
            cache.initialize().await.unwrap();

            for op in ops {
                match op {
                    CacheOp::Set { key, value } => cache.set(&key, &value).await.unwrap(),
                    CacheOp::Get { key } => {
                        let _: Option<String> = cache.get(&key).await.unwrap();
                    }
                    CacheOp::Remove { key } => cache.remove(&key).await.unwrap(),
                }
                prop_assert!(cache.len() <= 3, "in-memory count exceeded bound");
            }

            prop_assert!(cache.get_all().await.unwrap().len() <= 3, "backend count exceeded bound");
            Ok(())
        })?;
    }

    // For any sequence of operations, hit and miss counters reflect exactly
    // the get outcomes observed.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..40)) {
        run(async {
            let mut cache = Cache::new(
                CacheConfig::new("stats").with_max_entries(TEST_MAX_ENTRIES),
            );
            cache.initialize().await.unwrap();
            let mut expected_hits: u64 = 0;
            let mut expected_misses: u64 = 0;

            for op in ops {
                match op {
                    CacheOp::Set { key, value } => cache.set(&key, &value).await.unwrap(),
                    CacheOp::Get { key } => {
                        let result: Option<String> = cache.get(&key).await.unwrap();
                        match result {
                            Some(_) => expected_hits += 1,
                            None => expected_misses += 1,
                        }
                    }
                    CacheOp::Remove { key } => cache.remove(&key).await.unwrap(),
                }
            }

            let stats = cache.stats();
            prop_assert_eq!(stats.hits, expected_hits, "hits mismatch");
            prop_assert_eq!(stats.misses, expected_misses, "misses mismatch");
            prop_assert_eq!(stats.total_entries, cache.len(), "total entries mismatch");
            Ok(())
        })?;
    }
}
