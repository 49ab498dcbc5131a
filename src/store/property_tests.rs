//! Property-Based Tests for the Store
//!
//! Uses proptest to verify the visibility and retention contracts across
//! arbitrary keys, values, policies and operation sequences.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::CleanupPolicy;
use crate::logger::NoopLogger;
use crate::store::MemoryStore;

// == Strategies ==
/// Generates cache keys (non-empty, printable)
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,64}"
}

/// Generates opaque byte values, the empty value included
fn value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

/// Picks one of the three cleanup policies
fn policy_strategy() -> impl Strategy<Value = CleanupPolicy> {
    prop_oneof![
        Just(CleanupPolicy::Active),
        Just(CleanupPolicy::Lazy),
        Just(CleanupPolicy::None),
    ]
}

/// One cache operation, for sequence testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: Vec<u8> },
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

fn test_store(policy: CleanupPolicy) -> MemoryStore {
    MemoryStore::new(policy, Arc::new(NoopLogger))
}

fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(600)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a pair and reading it back before expiry returns the exact
    // bytes that were stored, under every policy.
    #[test]
    fn prop_roundtrip_storage(
        policy in policy_strategy(),
        key in key_strategy(),
        value in value_strategy()
    ) {
        let mut store = test_store(policy);

        store.set(key.clone(), value.clone(), far_future());

        prop_assert_eq!(store.get(&key), Some(value.clone()));
        prop_assert_eq!(store.peek(&key), Some(value));
    }

    // A second set on the same key fully replaces the first value.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut store = test_store(CleanupPolicy::Active);

        store.set(key.clone(), value1, far_future());
        store.set(key.clone(), value2.clone(), far_future());

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // Deleting a key removes it, and deleting again changes nothing.
    #[test]
    fn prop_delete_idempotence(key in key_strategy(), value in value_strategy()) {
        let mut store = test_store(CleanupPolicy::Active);

        store.set(key.clone(), value, far_future());
        store.delete(&key);
        prop_assert_eq!(store.get(&key), None);
        prop_assert_eq!(store.len(), 0);

        store.delete(&key);
        prop_assert_eq!(store.get(&key), None);
        prop_assert_eq!(store.len(), 0);
    }

    // An entry whose expiration has been reached is invisible to reads
    // under every policy; only the physical retention differs.
    #[test]
    fn prop_expired_entries_invisible_retention_by_policy(
        policy in policy_strategy(),
        key in key_strategy(),
        value in value_strategy()
    ) {
        let mut store = test_store(policy);

        // Expires exactly now, so it is already at-or-before the clock
        store.set(key.clone(), value, Instant::now());

        prop_assert_eq!(store.get(&key), None);

        match policy {
            CleanupPolicy::Lazy => prop_assert!(!store.contains_key(&key)),
            CleanupPolicy::Active | CleanupPolicy::None => {
                prop_assert!(store.contains_key(&key))
            }
        }
    }

    // A key that was never set is never found.
    #[test]
    fn prop_missing_key_not_found(policy in policy_strategy(), key in key_strategy()) {
        let mut store = test_store(policy);
        prop_assert_eq!(store.get(&key), None);
        prop_assert_eq!(store.peek(&key), None);
    }

    // Any sequence of set/get/delete on live entries leaves the store
    // agreeing with a plain map model.
    #[test]
    fn prop_matches_map_model(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = test_store(CleanupPolicy::Active);
        let mut model: HashMap<String, Vec<u8>> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), value.clone(), far_future());
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(store.get(&key), model.get(&key).cloned());
                }
                CacheOp::Delete { key } => {
                    store.delete(&key);
                    model.remove(&key);
                }
            }
        }

        prop_assert_eq!(store.len(), model.len());
        for (key, value) in &model {
            prop_assert_eq!(store.get(key), Some(value.clone()));
        }
    }
}

// Separate proptest block with fewer cases for time-sensitive properties
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // The full visibility timeline: visible strictly before the
    // expiration time, gone from reads once it is reached.
    #[test]
    fn prop_visibility_follows_the_clock(
        policy in policy_strategy(),
        key in key_strategy(),
        value in value_strategy()
    ) {
        let mut store = test_store(policy);

        store.set(key.clone(), value.clone(), Instant::now() + Duration::from_millis(60));

        prop_assert_eq!(store.get(&key), Some(value));

        std::thread::sleep(Duration::from_millis(100));

        prop_assert_eq!(store.get(&key), None);
    }
}
