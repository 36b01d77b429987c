// RobinMap public API test suite.
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Last write wins: get returns the most recent value put for a key.
// - Counting: put of a new key adds one entry, an update adds none,
//   remove of a present key drops one, remove of an absent key drops none.
// - Displacement: every occupied slot sits exactly `displacement` slots
//   after its home index (mod capacity).
// - Growth: capacity doubles before the load factor could reach 0.7 and
//   no entry is lost or duplicated.
use robin_map::{hash, Error, RobinMap, Value, DEFAULT_CAPACITY, MAX_LOAD_FACTOR};
use std::collections::BTreeMap;

fn assert_displacements(m: &RobinMap) {
    let capacity = m.capacity();
    let mut occupied = 0;
    for (index, slot) in m.slots().enumerate() {
        if let Some(s) = slot {
            occupied += 1;
            let home = m.home_index(s.key);
            assert_eq!(home as u64, hash(s.key) % capacity as u64);
            assert_eq!(
                s.displacement,
                (index + capacity - home) % capacity,
                "slot {index} holding {:?}",
                s.key
            );
        }
    }
    assert_eq!(occupied, m.len());
}

// Test: the put/put/update scenario.
// Assumes: keys are compared by content, not by identity.
// Verifies: a=3, b=2, two live entries.
#[test]
fn update_overwrites_and_keeps_count() {
    let mut m = RobinMap::new();
    m.put("a", 1).unwrap();
    m.put("b", 2).unwrap();
    m.put("a", 3).unwrap();
    assert_eq!(m.get("a"), Some(3));
    assert_eq!(m.get("b"), Some(2));
    assert_eq!(m.len(), 2);
    assert_displacements(&m);
}

// Test: the table owns its keys.
// Assumes: put copies the caller's key.
// Verifies: mutating or dropping the caller's buffer does not affect lookups.
#[test]
fn keys_are_copied_on_put() {
    let mut m = RobinMap::new();
    let mut key = String::from("owned");
    m.put(&key, 5).unwrap();
    key.push_str("-changed");
    drop(key);
    assert_eq!(m.get("owned"), Some(5));
    assert_eq!(m.keys().collect::<Vec<_>>(), vec!["owned"]);
}

// Test: colliding keys in sequence x, y, z.
// Assumes: "AaAa", "AaBB" and "BBAa" share a full hash.
// Verifies: each resolves to its own value regardless of physical slot,
// including after the head of the chain is removed.
#[test]
fn colliding_keys_resolve_independently() {
    let mut m = RobinMap::with_capacity(5).unwrap();
    let (x, y, z) = ("AaAa", "AaBB", "BBAa");
    assert_eq!(hash(x), hash(y));
    assert_eq!(hash(y), hash(z));

    m.put(x, 10).unwrap();
    m.put(y, 20).unwrap();
    m.put(z, 30).unwrap();
    assert_eq!((m.get(x), m.get(y), m.get(z)), (Some(10), Some(20), Some(30)));
    assert_displacements(&m);

    assert_eq!(m.remove(x), Some(10));
    assert_eq!((m.get(x), m.get(y), m.get(z)), (None, Some(20), Some(30)));
    assert_displacements(&m);
}

// Test: growth point from the minimum capacity.
// Assumes: growth is checked before placing a new key.
// Verifies: the fourth key into capacity 5 doubles it to 10; all keys remain.
#[test]
fn fourth_insert_into_five_slots_grows() {
    let mut m = RobinMap::with_capacity(5).unwrap();
    for (i, k) in ["one", "two", "three"].into_iter().enumerate() {
        m.put(k, i as Value).unwrap();
        assert_eq!(m.capacity(), 5);
    }
    m.put("four", 3).unwrap();
    assert_eq!(m.capacity(), 10);
    for (i, k) in ["one", "two", "three", "four"].into_iter().enumerate() {
        assert_eq!(m.get(k), Some(i as Value));
    }
    assert!(m.load_factor() < MAX_LOAD_FACTOR);
    assert_displacements(&m);
}

// Test: growth across many doublings.
// Assumes: capacity only ever doubles.
// Verifies: every pair survives, count is exact, load factor stays < 0.7.
#[test]
fn repeated_growth_preserves_pairs() {
    let mut m = RobinMap::with_capacity(5).unwrap();
    for i in 0..5_000 {
        m.put(&format!("key-{i}"), i).unwrap();
        assert!(m.load_factor() < MAX_LOAD_FACTOR);
    }
    assert_eq!(m.len(), 5_000);
    assert_eq!(m.capacity(), 5 * 2usize.pow(11));
    for i in 0..5_000 {
        assert_eq!(m.get(&format!("key-{i}")), Some(i));
    }
    assert_displacements(&m);
}

// Test: removal bookkeeping.
// Assumes: absent removals are not errors.
// Verifies: count changes only for present keys; other entries untouched.
#[test]
fn remove_present_and_absent() {
    let mut m = RobinMap::new();
    for (k, v) in [("a", 1), ("b", 0), ("c", -3)] {
        m.put(k, v).unwrap();
    }
    assert_eq!(m.remove("zzz"), None);
    assert_eq!(m.len(), 3);
    assert_eq!(m.remove("b"), Some(0));
    assert_eq!(m.len(), 2);
    assert_eq!(m.get("b"), None);
    assert_eq!((m.get("a"), m.get("c")), (Some(1), Some(-3)));
    assert_displacements(&m);
}

// Test: explicit configuration errors.
// Assumes: capacities below 5 and empty keys are caller errors.
// Verifies: both are reported as typed errors with readable messages.
#[test]
fn precondition_errors_are_reported() {
    let err = RobinMap::with_capacity(4).unwrap_err();
    assert_eq!(
        err,
        Error::CapacityTooSmall {
            requested: 4,
            minimum: 5
        }
    );
    assert_eq!(
        err.to_string(),
        "initial capacity 4 is below the minimum of 5 slots"
    );

    let mut m = RobinMap::default();
    assert_eq!(m.capacity(), DEFAULT_CAPACITY);
    let err = m.put("", 1).unwrap_err();
    assert_eq!(err, Error::EmptyKey);
    assert!(m.is_empty());
}

// Test: deterministic mixed workload against an ordered model.
// Assumes: a fixed LCG drives key choice and operation kind.
// Verifies: every observable result matches BTreeMap over 20k operations.
#[test]
fn mixed_workload_matches_model() {
    let mut m = RobinMap::with_capacity(5).unwrap();
    let mut model: BTreeMap<String, Value> = BTreeMap::new();
    let mut s = 0x9e37_79b9_7f4a_7c15u64;
    for step in 0..20_000 {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let key = format!("k{}", (s >> 33) % 512);
        match (s >> 20) % 3 {
            0 => {
                m.put(&key, step).unwrap();
                model.insert(key, step);
            }
            1 => assert_eq!(m.remove(&key), model.remove(&key)),
            _ => assert_eq!(m.get(&key), model.get(&key).copied()),
        }
        assert_eq!(m.len(), model.len());
    }
    let ours: BTreeMap<String, Value> = m.iter().map(|(k, v)| (k.to_string(), v)).collect();
    assert_eq!(ours, model);
    assert_displacements(&m);
}

// Test: clear.
// Assumes: clear keeps the storage.
// Verifies: no entries remain and the table is reusable.
#[test]
fn clear_then_reuse() {
    let mut m = RobinMap::with_capacity(8).unwrap();
    for i in 0..5 {
        m.put(&i.to_string(), i).unwrap();
    }
    let capacity = m.capacity();
    m.clear();
    assert_eq!(m.len(), 0);
    assert_eq!(m.capacity(), capacity);
    assert_eq!(m.iter().count(), 0);
    m.put("again", 1).unwrap();
    assert_eq!(m.get("again"), Some(1));
    assert_displacements(&m);
}
