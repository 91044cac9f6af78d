mod common;

use std::collections::BTreeMap;

use avl_dealer::{AvlTree, Direction};
use common::{assert_valid, count_nodes, in_order};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(i16),
    Remove(i16),
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(
        prop_oneof![
            3 => (-64i16..64).prop_map(Op::Insert),
            2 => (-64i16..64).prop_map(Op::Remove),
        ],
        0..200,
    )
}

/// Multiset model: value -> copies
fn model_values(model: &BTreeMap<i16, usize>) -> Vec<i16> {
    model
        .iter()
        .flat_map(|(&v, &n)| std::iter::repeat(v).take(n))
        .collect()
}

proptest! {
    #[test]
    fn random_ops_keep_invariants(ops in ops()) {
        let mut tree = AvlTree::new();
        let mut model: BTreeMap<i16, usize> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(v) => {
                    tree.insert(v).expect("insert succeeds");
                    *model.entry(v).or_default() += 1;
                }
                Op::Remove(v) => {
                    let removed = tree.remove(&v);
                    match model.get_mut(&v) {
                        Some(n) => {
                            prop_assert_eq!(removed, Some(v));
                            *n -= 1;
                            if *n == 0 {
                                model.remove(&v);
                            }
                        }
                        None => prop_assert_eq!(removed, None),
                    }
                }
            }
            assert_valid(&tree);
        }

        let expected = model_values(&model);
        prop_assert_eq!(tree.len(), expected.len(), "size must follow inserts minus removals");
        prop_assert_eq!(count_nodes(&tree), expected.len());
        prop_assert_eq!(in_order(&tree), expected.clone());
        prop_assert_eq!(tree.min().ok(), expected.first());
        prop_assert_eq!(tree.max().ok(), expected.last());
    }

    #[test]
    fn bounded_traversal_matches_in_order_prefix(
        values in proptest::collection::vec(any::<i32>(), 0..128),
        removals in proptest::collection::vec(any::<prop::sample::Index>(), 0..64),
        k in 0usize..160,
    ) {
        let mut tree = AvlTree::new();
        for &v in &values {
            tree.insert(v).expect("insert succeeds");
        }

        // Removal rotations rebuild parent links and the cached extremes
        let mut remaining = values.clone();
        for index in removals {
            if remaining.is_empty() {
                break;
            }
            let v = remaining.swap_remove(index.index(remaining.len()));
            prop_assert_eq!(tree.remove(&v), Some(v));
        }
        remaining.sort_unstable();
        prop_assert_eq!(tree.min().ok(), remaining.first());
        prop_assert_eq!(tree.max().ok(), remaining.last());

        let ascending: Vec<&i32> = tree.iter().take(k).collect();
        let descending: Vec<&i32> = tree.iter_desc().take(k).collect();
        prop_assert_eq!(tree.bounded_traversal(Direction::Ascending, k), ascending);
        prop_assert_eq!(tree.bounded_traversal(Direction::Descending, k), descending);
        prop_assert_eq!(
            tree.bounded_traversal(Direction::Ascending, k).len(),
            k.min(remaining.len())
        );
    }

    #[test]
    fn from_sorted_is_perfectly_shaped(mut values in proptest::collection::vec(any::<u16>(), 0..300)) {
        values.sort_unstable();
        let n = values.len();
        let tree: AvlTree<u16> = AvlTree::from_sorted_default(values.clone()).expect("build succeeds");

        assert_valid(&tree);
        prop_assert_eq!(in_order(&tree), values);
        let expected_height = if n == 0 { -1 } else { n.ilog2() as i32 };
        prop_assert_eq!(tree.height(), expected_height);
    }

    #[test]
    fn built_tree_accepts_further_mutation(
        n in 1usize..100,
        extra in proptest::collection::vec(0usize..200, 0..50),
    ) {
        let mut tree: AvlTree<usize> = AvlTree::from_sorted_default((0..n).collect()).expect("build succeeds");
        for &v in &extra {
            tree.insert(v).expect("insert succeeds");
        }
        for v in (0..n).step_by(3) {
            prop_assert_eq!(tree.remove(&v), Some(v));
        }
        assert_valid(&tree);
        prop_assert_eq!(tree.len(), n + extra.len() - (0..n).step_by(3).count());
    }
}
