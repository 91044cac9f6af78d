//! Fixed scenarios against the public tree API

mod common;

use avl_dealer::tree::Side;
use avl_dealer::{AvlTree, Direction, FnComparator, TreeError};
use common::{assert_valid, count_nodes, in_order, tree_of};

#[test]
fn test_insert_sequence_shape() {
    let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
    assert_eq!(in_order(&tree), vec![1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(tree.height(), 2);
    assert_eq!(tree.root(), Some(&5));
    assert_valid(&tree);
}

#[test]
fn test_bounded_traversal_scenario() {
    let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
    assert_eq!(tree.bounded_traversal(Direction::Ascending, 3), vec![&1, &3, &4]);
    assert_eq!(tree.bounded_traversal(Direction::Descending, 2), vec![&9, &8]);
}

#[test]
fn test_delete_root_scenario() {
    let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
    assert_eq!(tree.remove(&5), Some(5));
    assert_eq!(in_order(&tree), vec![1, 3, 4, 7, 8, 9]);
    assert_valid(&tree);
    // Successor moved up into the root
    assert_eq!(tree.root(), Some(&7));
}

#[test]
fn test_build_from_sorted_scenario() {
    let tree: AvlTree<i32> = AvlTree::from_sorted_default((1..=7).collect()).unwrap();
    assert_eq!(tree.root(), Some(&4));
    assert_eq!(in_order(&tree), (1..=7).collect::<Vec<_>>());
    assert_valid(&tree);
}

#[test]
fn test_errors_on_empty_and_missing() {
    let mut tree = tree_of(&[]);
    assert_eq!(tree.min(), Err(TreeError::EmptyTree));
    assert_eq!(tree.max(), Err(TreeError::EmptyTree));
    assert_eq!(tree.find(&1), Err(TreeError::NotFound));
    assert_eq!(tree.remove(&1), None);
    assert!(tree.bounded_traversal(Direction::Ascending, 3).is_empty());
    assert_valid(&tree);
}

#[test]
fn test_parent_links_mirror_children() {
    let tree = tree_of(&(0..100).collect::<Vec<_>>());
    let root = tree.root_id().unwrap();
    assert_eq!(tree.node(root).unwrap().parent(), None);

    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let node = tree.node(id).unwrap();
        for side in [Side::Left, Side::Right] {
            if let Some(child) = node.child(side) {
                assert_eq!(tree.node(child).unwrap().parent(), Some(id));
                stack.push(child);
            }
        }
    }
    assert_eq!(count_nodes(&tree), 100);
}

#[test]
fn test_stable_tie_break_keeps_duplicates_ordered() {
    // Order by score, then id: equal scores never collide
    let by_score_then_id = FnComparator(|a: &(i64, u32), b: &(i64, u32)| {
        a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1))
    });
    let mut tree = AvlTree::with_comparator(by_score_then_id);
    for (id, score) in [(1, 0), (2, -3), (3, 0), (4, 7), (5, -3)] {
        tree.insert((score, id)).unwrap();
    }
    let worst: Vec<u32> = tree
        .bounded_traversal(Direction::Ascending, 3)
        .into_iter()
        .map(|&(_, id)| id)
        .collect();
    assert_eq!(worst, vec![2, 5, 1]);

    assert_eq!(tree.remove(&(0, 3)), Some((0, 3)));
    assert_eq!(tree.find(&(0, 1)), Ok(&(0, 1)));
    assert_valid(&tree);
}

#[test]
fn test_large_churn_stays_logarithmic() {
    let mut tree = AvlTree::new();
    for v in 0..4096u32 {
        tree.insert(v.wrapping_mul(2_654_435_761) % 10_007).unwrap();
    }
    // AVL bound: h < 1.45 log2(n + 2)
    assert!(tree.height() <= 17, "height {}", tree.height());
    for v in (0..4096u32).step_by(2) {
        tree.remove(&(v.wrapping_mul(2_654_435_761) % 10_007));
    }
    assert_eq!(tree.len(), 2048);
    assert_valid(&tree);
}

#[test]
fn test_clear_releases_everything() {
    let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.root_id(), None);
    assert_valid(&tree);
}

#[test]
fn test_failed_reservation_leaves_tree_intact() {
    let mut tree = tree_of(&(0..10).collect::<Vec<_>>());
    tree.remove(&4);
    let before = in_order(&tree);

    assert!(matches!(tree.reserve(usize::MAX), Err(TreeError::Allocation(_))));
    assert_eq!(tree.len(), 9);
    assert_eq!(in_order(&tree), before);
    assert_valid(&tree);

    // Freed slot and fresh growth both still work
    tree.insert(4).unwrap();
    tree.insert(10).unwrap();
    assert_eq!(in_order(&tree), (0..=10).collect::<Vec<_>>());
    assert_eq!(tree.max(), Ok(&10));
    assert_valid(&tree);
}
