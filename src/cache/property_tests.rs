//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the cache's structural invariants under random
//! operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::cache::LruCache;
use crate::config::CacheConfig;

// == Test Configuration ==
const TEST_CAPACITY: usize = 16;

// == Strategies ==
/// Generates cache keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,32}"
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Has { key: String },
    Remove { key: String },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        2 => key_strategy().prop_map(|key| CacheOp::Has { key }),
        2 => key_strategy().prop_map(|key| CacheOp::Remove { key }),
        1 => Just(CacheOp::Clear),
    ]
}

fn new_cache(capacity: usize) -> LruCache<String, String> {
    LruCache::new(CacheConfig::with_capacity(capacity).unwrap()).unwrap()
}

fn apply(cache: &mut LruCache<String, String>, op: CacheOp) {
    match op {
        CacheOp::Set { key, value } => cache.set(key, value),
        CacheOp::Get { key } => {
            let _ = cache.get(&key);
        }
        CacheOp::Has { key } => {
            let _ = cache.has(&key);
        }
        CacheOp::Remove { key } => {
            let _ = cache.remove(&key);
        }
        CacheOp::Clear => cache.clear(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // The index and the recency list stay a bijection through any
    // operation sequence, and the size never exceeds capacity.
    #[test]
    fn prop_bijection_and_capacity(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let mut cache = new_cache(TEST_CAPACITY);

        for op in ops {
            apply(&mut cache, op);
            cache.check_invariants();
            prop_assert!(
                cache.len() <= TEST_CAPACITY,
                "cache size {} exceeds capacity {}",
                cache.len(),
                TEST_CAPACITY
            );
        }
    }

    // Round-trip: set then get returns the stored value.
    #[test]
    fn prop_roundtrip(key in key_strategy(), value in value_strategy()) {
        let mut cache = new_cache(TEST_CAPACITY);

        cache.set(key.clone(), value.clone());
        prop_assert_eq!(cache.get(&key), Some(&value));
    }

    // Overwrite: the second value wins and no duplicate entry appears.
    #[test]
    fn prop_overwrite(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut cache = new_cache(TEST_CAPACITY);

        cache.set(key.clone(), value1);
        cache.set(key.clone(), value2.clone());

        prop_assert_eq!(cache.get(&key), Some(&value2));
        prop_assert_eq!(cache.len(), 1);
    }

    // Removal of an absent key changes nothing.
    #[test]
    fn prop_remove_absent_is_noop(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..10)
    ) {
        let mut cache = new_cache(TEST_CAPACITY);
        for (key, value) in entries {
            cache.set(key, value);
        }

        let keys_before = cache.keys();
        let len_before = cache.len();

        cache.remove(&"no-such-key".to_string());

        prop_assert_eq!(cache.keys(), keys_before);
        prop_assert_eq!(cache.len(), len_before);
    }

    // Recency: the most recently touched key survives eviction until every
    // untouched key has been evicted first.
    #[test]
    fn prop_touched_key_evicted_last(
        refresh_idx in 0usize..4,
        fresh in prop::collection::vec(value_strategy(), 8)
    ) {
        let capacity = 4;
        let mut cache = new_cache(capacity);

        for i in 0..capacity {
            cache.set(format!("old{}", i), format!("v{}", i));
        }

        // Touch one resident key, then flood with new keys
        let touched = format!("old{}", refresh_idx);
        prop_assert!(cache.has(&touched));

        let mut survived = true;
        for (i, value) in fresh.into_iter().enumerate() {
            cache.set(format!("new{}", i), value);
            let untouched_left = (0..capacity)
                .map(|j| format!("old{}", j))
                .filter(|k| *k != touched)
                .any(|k| cache.keys().contains(&k));

            // The touched key may only disappear once no untouched
            // resident remains
            if !cache.keys().contains(&touched) {
                prop_assert!(!untouched_left, "touched key evicted before untouched ones");
                survived = false;
                break;
            }
        }

        // With 8 insertions into capacity 4, the touched key is gone by now
        if survived {
            prop_assert!(!cache.keys().contains(&touched));
        }
        cache.check_invariants();
    }

    // Stats accounting matches the observed hits and misses.
    #[test]
    fn prop_stats_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut cache = new_cache(TEST_CAPACITY);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => cache.set(key, value),
                CacheOp::Get { key } => match cache.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Has { key } => {
                    if cache.has(&key) {
                        expected_hits += 1;
                    } else {
                        expected_misses += 1;
                    }
                }
                CacheOp::Remove { key } => {
                    let _ = cache.remove(&key);
                }
                CacheOp::Clear => cache.clear(),
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits, "hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "misses mismatch");
        prop_assert_eq!(stats.total_entries, cache.len(), "total entries mismatch");
    }

    // keys() never reports duplicates and always matches len().
    #[test]
    fn prop_keys_unique(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut cache = new_cache(TEST_CAPACITY);

        for op in ops {
            apply(&mut cache, op);
        }

        let keys = cache.keys();
        let unique: HashSet<&String> = keys.iter().collect();
        prop_assert_eq!(unique.len(), keys.len(), "duplicate keys in snapshot");
        prop_assert_eq!(keys.len(), cache.len());
    }
}
