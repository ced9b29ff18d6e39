use super::*;

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

/// Maps keys onto a handful of hashes so probe sequences overlap heavily.
struct ClusteredTraits;

impl HashTraits<u16> for ClusteredTraits {
    fn hash(value: &u16) -> u64 {
        (*value % 8) as u64
    }

    fn equals(a: &u16, b: &u16) -> bool {
        a == b
    }
}

fn validate_table<T, Tr>(t: &Table<T, Tr>) {
    assert!(t.debug_sentinel_ok(), "sentinel must be the last bucket only");
    assert_eq!(
        t.debug_recount(),
        (t.len(), t.tombstone_count()),
        "counters must match the bucket array"
    );
    if t.capacity() != 0 {
        assert!(
            t.len() + t.tombstone_count() < t.capacity(),
            "at least one bucket must stay empty"
        );
    }
}

#[derive(Clone, Debug)]
enum Op<V> {
    Insert(u16, V),
    Remove(u16),
    Get(u16),
    Reserve(usize),
}

fn key_strategy() -> impl Strategy<Value = u16> + Clone {
    // A small key space makes removes and re-inserts hit the same keys.
    0u16..64
}

fn set_ops_strategy() -> impl Strategy<Value = Vec<Op<()>>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => key.clone().prop_map(|k| Op::Insert(k, ())),
        30 => key.clone().prop_map(Op::Remove),
        18 => key.clone().prop_map(Op::Get),
        2 => (0usize..32).prop_map(Op::Reserve),
    ];
    prop::collection::vec(op, 0..=1000)
}

fn map_ops_strategy() -> impl Strategy<Value = Vec<Op<u32>>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        30 => key.clone().prop_map(Op::Remove),
        18 => key.clone().prop_map(Op::Get),
        2 => (0usize..32).prop_map(Op::Reserve),
    ];
    prop::collection::vec(op, 0..=1000)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_table_equivalence(ops in set_ops_strategy()) {
        let mut t: Table<u16, ClusteredTraits> = Table::new();
        let mut m: HashSet<u16> = HashSet::new();

        for op in ops {
            let capacity = t.capacity();

            match op {
                Op::Insert(key, ()) => {
                    let result = t.insert(key);
                    let expected = if m.insert(key) {
                        InsertResult::InsertedNew
                    } else {
                        InsertResult::ReplacedExisting
                    };
                    prop_assert_eq!(result, expected);
                }
                Op::Remove(key) => {
                    let removed = t.remove(&key);
                    let expected = m.take(&key);
                    prop_assert_eq!(removed, expected);
                }
                Op::Get(key) => {
                    prop_assert_eq!(t.find(&key), m.get(&key));
                }
                Op::Reserve(additional) => {
                    t.reserve(additional);
                    if additional != 0 {
                        let used = t.len() + t.tombstone_count() + additional;
                        prop_assert!(used * 100 < t.capacity() * LOAD_FACTOR_PERCENT);
                    }
                }
            }

            prop_assert!(t.capacity() >= capacity, "capacity must never shrink");
            prop_assert_eq!(t.len(), m.len());
            validate_table(&t);
        }

        let got: HashSet<u16> = t.iter().copied().collect();
        prop_assert_eq!(t.iter().count(), m.len());
        prop_assert_eq!(got, m);
    }

    #[test]
    fn prop_table_reserve_avoids_growth(present in 0usize..40, additional in 0usize..100) {
        let mut t: Table<u16, ClusteredTraits> = Table::new();
        for key in 0..present as u16 {
            t.insert(key);
        }

        t.reserve(additional);
        let capacity = t.capacity();

        for key in 0..additional as u16 {
            t.insert(1000 + key);
        }

        prop_assert_eq!(t.capacity(), capacity);
        prop_assert_eq!(t.len(), present + additional);
        validate_table(&t);
    }

    #[test]
    fn prop_table_clone_matches(ops in set_ops_strategy()) {
        let mut t: Table<u16, ClusteredTraits> = Table::new();
        for op in ops {
            match op {
                Op::Insert(key, ()) => {
                    t.insert(key);
                }
                Op::Remove(key) => {
                    t.remove(&key);
                }
                Op::Get(_) | Op::Reserve(_) => {}
            }
        }

        let cloned = t.clone();

        prop_assert_eq!(cloned.capacity(), t.capacity());
        prop_assert_eq!(cloned.len(), t.len());
        prop_assert_eq!(cloned.tombstone_count(), 0);
        for key in &t {
            prop_assert!(cloned.contains(key));
        }
        validate_table(&cloned);
    }

    #[test]
    fn prop_map_equivalence(ops in map_ops_strategy()) {
        let mut t: Map<u16, u32> = Map::new();
        let mut m: HashMap<u16, u32> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let result = t.insert(key, value);
                    let expected = if m.insert(key, value).is_none() {
                        InsertResult::InsertedNew
                    } else {
                        InsertResult::ReplacedExisting
                    };
                    prop_assert_eq!(result, expected);
                }
                Op::Remove(key) => {
                    prop_assert_eq!(t.take(&key), m.remove(&key));
                }
                Op::Get(key) => {
                    prop_assert_eq!(t.get(&key), m.get(&key));
                    prop_assert_eq!(t.contains(&key), m.contains_key(&key));
                }
                Op::Reserve(additional) => {
                    t.reserve(additional);
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        let mut got: Vec<(u16, u32)> = t.iter().map(|(k, v)| (*k, *v)).collect();
        let mut expected: Vec<(u16, u32)> = m.into_iter().collect();
        got.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(got, expected);
    }
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys: Vec<u16> = vec![0, 8, 16, 1, 9];

    // Every removal order of a colliding cluster must keep the rest reachable.
    let mut orders = vec![Vec::new()];
    for _ in 0..keys.len() {
        let mut next = Vec::new();
        for order in &orders {
            for &key in &keys {
                if !order.contains(&key) {
                    let mut extended: Vec<u16> = order.clone();
                    extended.push(key);
                    next.push(extended);
                }
            }
        }
        orders = next;
    }
    assert_eq!(orders.len(), 120);

    for order in orders {
        let mut t: Table<u16, ClusteredTraits> = Table::with_capacity(16);
        for &key in &keys {
            t.insert(key);
        }

        for (removed, key) in order.iter().enumerate() {
            assert_eq!(t.remove(key), Some(*key));
            for rest in &order[removed + 1..] {
                assert!(t.contains(rest), "{rest} lost after removing {order:?}");
            }
        }

        assert!(t.is_empty());
        validate_table(&t);
    }
}
