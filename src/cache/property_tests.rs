//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check key identity and reaping invariants.

use proptest::prelude::*;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::cache::{ArgValue, Args, CacheKey, CacheStore};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
fn arg_value_strategy() -> impl Strategy<Value = ArgValue> {
    prop_oneof![
        Just(ArgValue::Unit),
        any::<bool>().prop_map(ArgValue::Bool),
        any::<i64>().prop_map(ArgValue::Int),
        any::<u64>().prop_map(ArgValue::UInt),
        "[a-zA-Z0-9]{0,42}".prop_map(ArgValue::Str),
    ]
}

fn named_strategy() -> impl Strategy<Value = BTreeMap<String, ArgValue>> {
    prop::collection::btree_map("[a-z]{1,8}", arg_value_strategy(), 0..6)
}

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Named arguments supplied in any order produce the same key.
    #[test]
    fn prop_named_order_is_irrelevant(named in named_strategy()) {
        let forward = named
            .iter()
            .fold(Args::new(), |args, (k, v)| args.named(k.clone(), v.clone()));
        let backward = named
            .iter()
            .rev()
            .fold(Args::new(), |args, (k, v)| args.named(k.clone(), v.clone()));

        prop_assert_eq!(
            CacheKey::new("op", forward),
            CacheKey::new("op", backward)
        );
    }

    // Swapping two different positional arguments changes the key.
    #[test]
    fn prop_positional_order_matters(a in arg_value_strategy(), b in arg_value_strategy()) {
        prop_assume!(a != b);

        let ab = CacheKey::new("op", Args::new().arg(a.clone()).arg(b.clone()));
        let ba = CacheKey::new("op", Args::new().arg(b).arg(a));

        prop_assert_ne!(ab, ba);
    }

    // Identical arguments under different operation names never collide.
    #[test]
    fn prop_operation_identity_separates_keys(
        positional in prop::collection::vec(arg_value_strategy(), 0..5)
    ) {
        let args = positional
            .into_iter()
            .fold(Args::new(), |args, v| args.arg(v));

        prop_assert_ne!(
            CacheKey::new("fetch_bubble", args.clone()),
            CacheKey::new("fetch_meta", args)
        );
    }

    // After a sweep, exactly the entries inserted after the TTL elapsed remain.
    #[test]
    fn prop_sweep_keeps_only_fresh(stale in 0u64..50, fresh in 0u64..50) {
        let rt = paused_runtime();
        let (removed, remaining) = rt.block_on(async {
            let mut store = CacheStore::new(TEST_TTL);
            for n in 0..stale {
                store.put(CacheKey::new("stale", Args::new().arg(n)), n, None);
            }
            tokio::time::advance(TEST_TTL + Duration::from_secs(1)).await;
            for n in 0..fresh {
                store.put(CacheKey::new("fresh", Args::new().arg(n)), n, None);
            }
            let removed = store.sweep();
            (removed, store.len())
        });

        prop_assert_eq!(removed as u64, stale);
        prop_assert_eq!(remaining as u64, fresh);
    }

    // Repeated puts under one key never grow the store beyond one entry.
    #[test]
    fn prop_overwrite_keeps_single_entry(values in prop::collection::vec(any::<u32>(), 1..20)) {
        let rt = paused_runtime();
        let (len, last) = rt.block_on(async {
            let mut store = CacheStore::new(TEST_TTL);
            let key = CacheKey::new("op", Args::new().arg("eth"));
            for v in &values {
                store.put(key.clone(), *v, None);
            }
            (store.len(), store.get::<u32>(&key))
        });

        prop_assert_eq!(len, 1);
        prop_assert_eq!(last, values.last().copied());
    }
}
