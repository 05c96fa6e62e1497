#![cfg(feature = "invariant")]
//! Property-based tests for RedBlackTree.
//!
//! These tests verify the ordering, error and size laws of the tree, and
//! that every red-black invariant holds after every single operation.

use proptest::prelude::*;
use rbmap::TreeError;
use rbmap::tree::RedBlackTree;
use std::collections::BTreeMap;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum Operation {
    Insert(i16),
    Remove(i16),
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        any::<i16>().prop_map(|key| Operation::Insert(key % 64)),
        any::<i16>().prop_map(|key| Operation::Remove(key % 64)),
    ]
}

fn tree_from(keys: &[i32]) -> RedBlackTree<i32, i32> {
    let mut tree = RedBlackTree::new();
    for &key in keys {
        let _ = tree.insert(key, key.wrapping_mul(3));
    }
    tree
}

// =============================================================================
// Ordering Laws
// =============================================================================

proptest! {
    /// Law: traversal of distinct inserted keys is strictly ascending.
    #[test]
    fn prop_traverse_strictly_ascending(
        keys in prop::collection::btree_set(any::<i32>(), 0..200)
    ) {
        let mut shuffled: Vec<i32> = keys.iter().copied().collect();
        shuffled.reverse();
        let third = shuffled.len() / 3;
        shuffled.rotate_left(third);

        let tree = tree_from(&shuffled);
        let traversal = tree.traverse();

        prop_assert!(traversal.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(traversal, keys.into_iter().collect::<Vec<_>>());
    }
}

// =============================================================================
// Error Laws
// =============================================================================

proptest! {
    /// Law: inserting a present key fails and changes nothing.
    #[test]
    fn prop_duplicate_insert_rejected(
        keys in prop::collection::vec(any::<i32>(), 1..100),
        pick: prop::sample::Index,
        value: i32
    ) {
        let mut tree = tree_from(&keys);
        let before: Vec<(i32, i32)> = tree.iter().map(|(&key, &value)| (key, value)).collect();
        let key = keys[pick.index(keys.len())];

        prop_assert_eq!(tree.insert(key, value), Err(TreeError::DuplicateKey));

        let after: Vec<(i32, i32)> = tree.iter().map(|(&key, &value)| (key, value)).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(tree.validate(), Ok(()));
    }

    /// Law: removing an absent key fails and changes nothing.
    #[test]
    fn prop_absent_remove_rejected(
        keys in prop::collection::vec(0..1_000i32, 0..100),
        key in 1_000..2_000i32
    ) {
        let mut tree = tree_from(&keys);
        let before = tree.traverse();

        prop_assert_eq!(tree.remove(&key), Err(TreeError::KeyNotFound));
        prop_assert_eq!(tree.lookup(&key), Err(TreeError::KeyNotFound));
        prop_assert_eq!(tree.traverse(), before);
    }
}

// =============================================================================
// Round-trip Laws
// =============================================================================

proptest! {
    /// Law: insert followed by remove of a fresh key restores the traversal.
    /// !tree.contains_key(&key) => tree.insert(key, v); tree.remove(&key) == tree
    #[test]
    fn prop_insert_remove_round_trip(
        keys in prop::collection::vec(any::<i32>(), 0..100),
        key: i32,
        value: i32
    ) {
        let mut tree = tree_from(&keys);
        prop_assume!(!tree.contains_key(&key));
        let before = tree.clone();

        tree.insert(key, value).unwrap();
        prop_assert_eq!(tree.remove(&key), Ok(value));

        prop_assert_eq!(tree.traverse(), before.traverse());
        prop_assert_eq!(tree, before);
    }

    /// Law: get after insert returns the inserted value.
    #[test]
    fn prop_get_insert_law(
        keys in prop::collection::vec(any::<i32>(), 0..50),
        key: i32,
        value: i32
    ) {
        let mut tree = tree_from(&keys);
        let _ = tree.remove(&key);
        tree.insert(key, value).unwrap();
        prop_assert_eq!(tree.get(&key), Some(&value));
    }
}

// =============================================================================
// Model and Invariant Laws
// =============================================================================

proptest! {
    /// Law: after every operation the invariants hold, the contents match a
    /// BTreeMap model, and len equals successful inserts minus removes.
    #[test]
    fn prop_invariants_hold_after_every_operation(
        operations in prop::collection::vec(operation(), 0..300)
    ) {
        let mut tree = RedBlackTree::new();
        let mut model = BTreeMap::new();
        let mut successes: usize = 0;

        for operation in operations {
            match operation {
                Operation::Insert(key) => {
                    let expected = if model.contains_key(&key) {
                        Err(TreeError::DuplicateKey)
                    } else {
                        model.insert(key, i32::from(key));
                        successes += 1;
                        Ok(())
                    };
                    prop_assert_eq!(tree.insert(key, i32::from(key)), expected);
                }
                Operation::Remove(key) => {
                    let expected = model.remove(&key).ok_or(TreeError::KeyNotFound);
                    if expected.is_ok() {
                        successes -= 1;
                    }
                    prop_assert_eq!(tree.remove(&key), expected);
                }
            }

            prop_assert_eq!(tree.validate(), Ok(()));
            prop_assert_eq!(tree.len(), successes);
            prop_assert!(tree.iter().map(|(key, value)| (*key, *value)).eq(model.iter().map(|(key, value)| (*key, *value))));
        }
    }

    /// Law: successor and predecessor agree with the model's range queries.
    #[test]
    fn prop_neighbors_match_model(
        keys in prop::collection::btree_set(-500..500i32, 0..100),
        probe in -600..600i32
    ) {
        let tree = tree_from(&keys.iter().copied().collect::<Vec<_>>());

        let expected_successor = keys.range((probe + 1)..).next().copied();
        let expected_predecessor = keys.range(..probe).next_back().copied();

        prop_assert_eq!(tree.successor(&probe).map(|(key, _)| *key), expected_successor);
        prop_assert_eq!(tree.predecessor(&probe).map(|(key, _)| *key), expected_predecessor);
    }
}
