//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a plain HashMap model.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::cache::ExpiringCache;

// == Test Configuration ==
const TEST_TIMEOUT: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys drawn from a small alphabet so operations collide
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-d]{1,2}"
}

/// Generates whitespace-free cache values, as the wire format requires
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,32}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Without a sweep, the cache behaves exactly like a map: the latest SET wins,
    // DELETE always succeeds, and hit/miss counters track GET outcomes.
    #[test]
    fn prop_matches_map_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = ExpiringCache::new(TEST_TIMEOUT);
        let mut model: HashMap<String, String> = HashMap::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), value.clone());
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    let expected = model.get(&key).cloned();
                    if expected.is_some() {
                        expected_hits += 1;
                    } else {
                        expected_misses += 1;
                    }
                    prop_assert_eq!(store.get(&key), expected);
                }
                CacheOp::Delete { key } => {
                    prop_assert_eq!(store.delete(&key), model.remove(&key).is_some());
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_entries, model.len());
    }

    // SET(k, v1) then SET(k, v2) always reads back v2.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut store = ExpiringCache::new(TEST_TIMEOUT);

        store.set(key.clone(), value1);
        store.set(key.clone(), value2.clone());

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // Deleting twice never fails and the second call is a no-op.
    #[test]
    fn prop_delete_idempotent(key in key_strategy(), value in value_strategy()) {
        let mut store = ExpiringCache::new(TEST_TIMEOUT);

        store.set(key.clone(), value);
        prop_assert!(store.delete(&key));
        prop_assert!(!store.delete(&key));
        prop_assert!(store.is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // A sweep removes exactly the entries idle for longer than the timeout,
    // whatever mix of ages the cache holds.
    #[test]
    fn prop_sweep_removes_only_idle_entries(
        ages in prop::collection::vec(0u64..600, 1..20)
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();

        rt.block_on(async {
            let mut store = ExpiringCache::new(TEST_TIMEOUT);
            let oldest = *ages.iter().max().unwrap();

            // Insert oldest first so that entry i ends up idle for ages[i] seconds
            let mut order: Vec<(usize, u64)> = ages.iter().copied().enumerate().collect();
            order.sort_by(|a, b| b.1.cmp(&a.1));
            let mut elapsed = 0;
            for (i, age) in order {
                tokio::time::advance(Duration::from_secs(oldest - age - elapsed)).await;
                elapsed = oldest - age;
                store.set(format!("k{i}"), "v".to_string());
            }
            tokio::time::advance(Duration::from_secs(oldest - elapsed)).await;

            let expected_removed = ages.iter().filter(|age| **age > TEST_TIMEOUT.as_secs()).count();
            prop_assert_eq!(store.cleanup_expired(), expected_removed);

            for (i, age) in ages.iter().enumerate() {
                let present = store.get(&format!("k{i}")).is_some();
                prop_assert_eq!(present, *age <= TEST_TIMEOUT.as_secs());
            }
            Ok(())
        })?;
    }
}
