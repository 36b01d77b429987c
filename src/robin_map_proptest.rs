#![cfg(test)]

// Property tests for RobinMap kept inside the crate so they can run the
// internal invariant scanner after every operation.

use crate::robin_map::{RobinMap, MAX_LOAD_FACTOR};
use crate::Value;
use proptest::prelude::*;
use std::collections::BTreeMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, Value),
    Get(usize),
    Remove(usize),
    Bump(usize, Value),
    Iterate,
}

fn arb_ops(pool_len: usize, max_ops: usize) -> impl Strategy<Value = Vec<OpI>> {
    let idx = 0..pool_len;
    let op = prop_oneof![
        4 => (idx.clone(), any::<Value>()).prop_map(|(i, v)| OpI::Put(i, v)),
        3 => idx.clone().prop_map(OpI::Get),
        3 => idx.clone().prop_map(OpI::Remove),
        1 => (idx, -1000 as Value..1000).prop_map(|(i, d)| OpI::Bump(i, d)),
        1 => Just(OpI::Iterate),
    ];
    proptest::collection::vec(op, 1..max_ops)
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::btree_set("[a-zA-Z0-9]{1,4}", 1..=64)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_flat_map(|pool| {
            let n = pool.len();
            (Just(pool), arb_ops(n, 2000))
        })
}

// Keys built from "Aa" and "BB" blocks: every key with the same number of
// blocks has the same full hash, so chains collide at every capacity.
fn arb_colliding_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    let block = prop_oneof![Just("Aa"), Just("BB")];
    proptest::collection::btree_set(
        proptest::collection::vec(block, 1..=4).prop_map(|bs| bs.concat()),
        1..=12,
    )
    .prop_map(|set| set.into_iter().collect::<Vec<_>>())
    .prop_flat_map(|pool| {
        let n = pool.len();
        (Just(pool), arb_ops(n, 600))
    })
}

fn check_against_model(
    initial_capacity: usize,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut sut = RobinMap::with_capacity(initial_capacity).expect("valid capacity");
    let mut model: BTreeMap<String, Value> = BTreeMap::new();

    for op in ops {
        let capacity_before = sut.capacity();
        match op {
            OpI::Put(i, v) => {
                let k = &pool[i];
                let existed = model.contains_key(k);
                let stored = *sut.put(k, v).expect("put succeeds");
                prop_assert_eq!(stored, v);
                model.insert(k.clone(), v);
                if existed {
                    prop_assert_eq!(sut.capacity(), capacity_before, "update must not grow");
                }
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k).copied());
                prop_assert_eq!(sut.contains_key(k), model.contains_key(k));
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
                prop_assert_eq!(sut.get(k), None);
            }
            OpI::Bump(i, d) => {
                let k = &pool[i];
                match (sut.get_mut(k), model.get_mut(k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.wrapping_add(d);
                        *mv = mv.wrapping_add(d);
                    }
                    (None, None) => {}
                    (s, m) => prop_assert!(false, "presence mismatch: {:?} vs {:?}", s, m),
                }
            }
            OpI::Iterate => {
                let s: BTreeMap<String, Value> =
                    sut.iter().map(|(k, v)| (k.to_string(), v)).collect();
                prop_assert_eq!(&s, &model);
            }
        }

        // Post-conditions after each op
        sut.assert_invariants();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.load_factor() < MAX_LOAD_FACTOR);
        prop_assert!(sut.capacity() == capacity_before || sut.capacity() == capacity_before * 2);
    }

    // Every surviving pair is still reachable once the run ends.
    for (k, v) in &model {
        prop_assert_eq!(sut.get(k), Some(*v));
    }
    Ok(())
}

// Property: state-machine equivalence against a BTreeMap model, starting from
// the minimum capacity so long runs cross several growth events.
proptest! {
    #![proptest_config(ProptestConfig { cases: 48, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        check_against_model(5, &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_default_capacity((pool, ops) in arb_scenario()) {
        check_against_model(crate::DEFAULT_CAPACITY, &pool, ops)?;
    }
}

// Property: same invariants under full-hash collisions, which builds long
// displacement chains and exercises swaps and backward shifts across them.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_colliding_scenario()) {
        check_against_model(5, &pool, ops)?;
    }
}

// Property: lookups of keys never inserted are always absent, however
// crowded their chains are.
proptest! {
    #[test]
    fn prop_absent_keys_not_found(
        keys in proptest::collection::btree_set("[a-z]{1,3}", 0..200),
        probes in proptest::collection::vec("[A-Z]{1,3}", 1..50),
    ) {
        let mut m = RobinMap::with_capacity(5).unwrap();
        for (i, k) in keys.iter().enumerate() {
            m.put(k, i as Value).unwrap();
        }
        for p in &probes {
            prop_assert_eq!(m.get(p), None);
            prop_assert_eq!(m.remove(p), None);
        }
        prop_assert_eq!(m.len(), keys.len());
        m.assert_invariants();
    }
}
