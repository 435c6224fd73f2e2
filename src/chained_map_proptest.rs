#![cfg(test)]

// Property tests for ChainedMap kept inside the crate so they can reach the
// ListMap baseline and the structural audit, neither of which is public.

use crate::chained_map::{ChainedMap, InsertError};
use crate::list_map::ListMap;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Replace(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    ForEach,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::btree_set("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let pool: Vec<String> = pool.into_iter().collect();
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Replace(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::ForEach),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against two oracles: the linked-list
// baseline (same interface, linear scans) and std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Duplicate inserts reject with the value handed back; the stored value
//   never changes except through `replace`/`get_mut`.
// - `get`/`contains_key` parity with both oracles for present and absent keys.
// - `remove` returns the oracle's value and leaves absent keys untouched.
// - `for_each`/`iter` cover exactly the oracle's key set.
// - After every op: len parity and a full structural audit (bucket placement,
//   uniqueness, reachable count).
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: ChainedMap<i32> = ChainedMap::new();
        let mut baseline: ListMap<i32> = ListMap::new();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = &pool[i];
                    let already = model.contains_key(k);
                    match sut.insert(k, v) {
                        Ok(()) => {
                            prop_assert!(!already, "insert must fail on duplicate");
                            prop_assert!(baseline.insert(k, v).is_ok());
                            model.insert(k.clone(), v);
                        }
                        Err(InsertError::DuplicateKey { value }) => {
                            prop_assert!(already, "duplicate error only when key exists");
                            prop_assert_eq!(value, v, "rejected value must come back");
                            prop_assert!(baseline.insert(k, v).is_err());
                        }
                    }
                }
                OpI::Replace(i, v) => {
                    let k = &pool[i];
                    let got = sut.replace(k, v);
                    prop_assert_eq!(got, baseline.replace(k, v));
                    match got {
                        Ok(prev) => {
                            let mprev = model.insert(k.clone(), v).expect("present in model");
                            prop_assert_eq!(prev, mprev);
                        }
                        Err(back) => {
                            prop_assert_eq!(back, v);
                            prop_assert!(!model.contains_key(k));
                        }
                    }
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    let got = sut.remove(k);
                    prop_assert_eq!(got, baseline.remove(k));
                    prop_assert_eq!(got, model.remove(k));
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k), baseline.get(k));
                    prop_assert_eq!(sut.get(k), model.get(k));
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains_key(&s), baseline.contains_key(&s));
                    prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
                }
                OpI::Mutate(i, d) => {
                    let k = &pool[i];
                    match sut.get_mut(k) {
                        Some(v) => {
                            *v = v.saturating_add(d);
                            let bv = baseline.replace(k, *v).expect("present in baseline");
                            let mv = model.get_mut(k).expect("present in model");
                            prop_assert_eq!(bv.saturating_add(d), *v);
                            *mv = mv.saturating_add(d);
                        }
                        None => prop_assert!(!model.contains_key(k)),
                    }
                }
                OpI::ForEach => {
                    let mut visited = Vec::new();
                    sut.for_each(|k, v| visited.push((k.to_string(), *v)));
                    let sut_pairs: BTreeSet<(String, i32)> = visited.iter().cloned().collect();
                    prop_assert_eq!(visited.len(), sut_pairs.len(), "a binding was visited twice");
                    let mut base_pairs = BTreeSet::new();
                    baseline.for_each(|k, v| {
                        base_pairs.insert((k.to_string(), *v));
                    });
                    let model_pairs: BTreeSet<(String, i32)> =
                        model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    prop_assert_eq!(&sut_pairs, &base_pairs);
                    prop_assert_eq!(&sut_pairs, &model_pairs);
                }
                OpI::Iterate => {
                    let sut_pairs: BTreeSet<(String, i32)> =
                        sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();
                    let model_pairs: BTreeSet<(String, i32)> =
                        model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    prop_assert_eq!(sut_pairs, model_pairs);
                }
            }

            // Post-conditions after each op.
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.len(), baseline.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            sut.audit();
        }
    }
}

// Property: growth never loses, duplicates, or corrupts a binding. Inserts
// enough distinct keys to cross at least one capacity step, removes a
// deterministic slice, and audits the final structure.
proptest! {
    #![proptest_config(ProptestConfig { cases: 16, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_preserves_content(count in 510usize..1100, stride in 2usize..7) {
        let mut sut: ChainedMap<usize> = ChainedMap::new();
        for i in 0..count {
            sut.insert(&format!("k{i}"), i).unwrap();
        }
        prop_assert!(sut.bucket_count() >= 1021, "at least one growth step");
        prop_assert_eq!(sut.len(), count);
        sut.audit();

        let mut removed = 0;
        for i in (0..count).step_by(stride) {
            prop_assert_eq!(sut.remove(&format!("k{i}")), Some(i));
            removed += 1;
        }
        sut.audit();
        prop_assert_eq!(sut.len(), count - removed);
        for i in 0..count {
            let expect = if i % stride == 0 { None } else { Some(i) };
            prop_assert_eq!(sut.get(&format!("k{i}")).copied(), expect);
        }
    }
}
