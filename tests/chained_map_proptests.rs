// ChainedMap property tests (public API, consolidated).
//
// Property 1: operation-sequence equivalence with std::collections::HashMap.
//  - Model: HashMap<String, i32> with insert-if-vacant semantics.
//  - Operations: insert, replace, remove, get, contains, for_each.
//  - Invariant after each step: len parity; get/contains parity for the
//    touched key; for_each covers exactly the model's entry set.
//
// Property 2: dense keyspaces force collisions and growth.
//  - Keys k0..kN with N past the first capacity step; every key must
//    round-trip, and the bucket count must advance monotonically.
use chained_hashmap::{ChainedMap, InsertError};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Property 1: equivalence with the std model under random op sequences.
proptest! {
    #[test]
    fn prop_model_equivalence(
        keys in 1usize..=6,
        ops in proptest::collection::vec((0u8..=5u8, 0usize..64, any::<i32>()), 1..120)
    ) {
        let mut m: ChainedMap<i32> = ChainedMap::new();
        let mut model: HashMap<String, i32> = HashMap::new();

        for (op, raw_k, v) in ops {
            let key = format!("k{}", raw_k % keys);
            match op {
                // Insert-if-vacant; duplicate hands the value back.
                0 => match m.insert(&key, v) {
                    Ok(()) => {
                        prop_assert!(!model.contains_key(&key));
                        model.insert(key.clone(), v);
                    }
                    Err(InsertError::DuplicateKey { value }) => {
                        prop_assert!(model.contains_key(&key));
                        prop_assert_eq!(value, v);
                    }
                },
                // Replace present/absent.
                1 => match m.replace(&key, v) {
                    Ok(prev) => {
                        let mprev = model.insert(key.clone(), v);
                        prop_assert_eq!(Some(prev), mprev);
                    }
                    Err(back) => {
                        prop_assert_eq!(back, v);
                        prop_assert!(!model.contains_key(&key));
                    }
                },
                2 => prop_assert_eq!(m.remove(&key), model.remove(&key)),
                3 => prop_assert_eq!(m.get(&key), model.get(&key)),
                4 => prop_assert_eq!(m.contains_key(&key), model.contains_key(&key)),
                // Traversal parity.
                5 => {
                    let mut pairs = Vec::new();
                    m.for_each(|k, val| pairs.push((k.to_string(), *val)));
                    let seen: BTreeSet<(String, i32)> = pairs.iter().cloned().collect();
                    let expected: BTreeSet<(String, i32)> =
                        model.iter().map(|(k, val)| (k.clone(), *val)).collect();
                    prop_assert_eq!(pairs.len(), seen.len(), "a binding was visited twice");
                    prop_assert_eq!(seen, expected);
                }
                _ => unreachable!(),
            }

            prop_assert_eq!(m.len(), model.len());
            prop_assert_eq!(m.is_empty(), model.is_empty());
        }
    }
}

// Property 2: every key in a dense keyspace round-trips across growth.
proptest! {
    #![proptest_config(ProptestConfig { cases: 16, .. ProptestConfig::default() })]
    #[test]
    fn prop_dense_keyspace_round_trips(count in 510usize..900) {
        let mut m: ChainedMap<usize> = ChainedMap::new();
        let mut bucket_counts = vec![m.bucket_count()];
        for i in 0..count {
            m.insert(&format!("k{i}"), i).unwrap();
            if m.bucket_count() != *bucket_counts.last().unwrap() {
                bucket_counts.push(m.bucket_count());
            }
        }
        prop_assert_eq!(m.len(), count);
        prop_assert!(bucket_counts.windows(2).all(|w| w[0] < w[1]), "bucket count must only grow");
        prop_assert!(m.bucket_count() >= 1021);
        for i in 0..count {
            prop_assert_eq!(m.get(&format!("k{i}")), Some(&i));
        }
        // Absent keys stay absent even in a dense map.
        prop_assert_eq!(m.get(&format!("k{count}")), None);
        prop_assert_eq!(m.get("unrelated"), None);
    }
}
