//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a plain HashMap model.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::time::Duration;

use tokio::runtime::{Builder, Runtime};
use tokio::time::advance;

use crate::cache::{Ttl, TtlCache};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

/// Single-threaded runtime with a paused clock.
fn paused_runtime() -> Runtime {
    Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

async fn load_from_source(key: String) -> Result<String, Infallible> {
    Ok(format!("source:{}", key))
}

// == Strategies ==
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,16}"
}

fn valid_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (valid_key_strategy(), valid_value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        valid_key_strategy().prop_map(|key| CacheOp::Get { key }),
        Just(CacheOp::Clear),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Before any TTL elapses, the cache behaves like a map that is filled
    // from the source on first access.
    #[test]
    fn prop_matches_map_model(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let rt = paused_runtime();
        let _clock = rt.enter();
        let cache = TtlCache::new(Ttl::After(TEST_TTL)).unwrap();
        let mut model: HashMap<String, String> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(key.clone(), value.clone());
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    let (value, cached) = rt
                        .block_on(cache.get(&key, load_from_source))
                        .unwrap();
                    match model.get(&key) {
                        Some(expected) => {
                            prop_assert!(cached, "Key '{}' should be served from cache", key);
                            prop_assert_eq!(&value, expected);
                        }
                        None => {
                            prop_assert!(!cached, "Key '{}' should have been loaded", key);
                            prop_assert_eq!(value.clone(), format!("source:{}", key));
                            model.insert(key, value);
                        }
                    }
                }
                CacheOp::Clear => {
                    cache.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(cache.len(), model.len());
        }
    }

    // Every key written is either served until its TTL elapses, or reloaded
    // once it has.
    #[test]
    fn prop_ttl_expiration_behavior(
        key in valid_key_strategy(),
        value in valid_value_strategy(),
        ttl_ms in 1u64..10_000,
        elapsed_ms in 0u64..20_000
    ) {
        let rt = paused_runtime();
        let cache = TtlCache::new(Ttl::After(Duration::from_millis(ttl_ms))).unwrap();

        let (value_seen, cached) = rt.block_on(async {
            cache.set(key.clone(), value.clone());
            advance(Duration::from_millis(elapsed_ms)).await;
            cache.get(&key, load_from_source).await.unwrap()
        });

        if elapsed_ms < ttl_ms {
            prop_assert!(cached);
            prop_assert_eq!(value_seen, value);
        } else {
            prop_assert!(!cached);
            prop_assert_eq!(value_seen, format!("source:{}", key));
        }
    }

    // A sweep removes exactly the entries whose TTL has elapsed.
    #[test]
    fn prop_delete_expired_keeps_live_entries(
        old_keys in prop::collection::hash_set(valid_key_strategy(), 0..20),
        new_keys in prop::collection::hash_set(valid_key_strategy(), 0..20)
    ) {
        let rt = paused_runtime();
        let cache = TtlCache::new(Ttl::After(Duration::from_secs(1))).unwrap();
        let new_keys: HashSet<String> = new_keys.difference(&old_keys).cloned().collect();

        let removed = rt.block_on(async {
            for key in &old_keys {
                cache.set(key.clone(), "old".to_string());
            }
            advance(Duration::from_millis(600)).await;
            for key in &new_keys {
                cache.set(key.clone(), "new".to_string());
            }
            advance(Duration::from_millis(600)).await;
            cache.delete_expired()
        });

        prop_assert_eq!(removed, old_keys.len());
        prop_assert_eq!(cache.len(), new_keys.len());

        for key in &new_keys {
            let (value, cached) = rt.block_on(cache.get(key, load_from_source)).unwrap();
            prop_assert!(cached);
            prop_assert_eq!(value, "new");
        }
    }
}
