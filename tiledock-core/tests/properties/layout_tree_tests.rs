//! Property-based tests for layout tree transforms
//!
//! Moves and removals on arbitrary well-formed trees must keep the tree
//! well-formed and must neither lose nor duplicate tabs.

use std::sync::Arc;

use proptest::prelude::*;
use proptest::sample::Index;
use tiledock_core::layout::{
    content_container_ids, find, parent_tab_group, set_split_weights, tab_groups,
};
use tiledock_core::{
    DropRegion, DropTarget, LayoutNode, apply_drop, apply_remove, check_invariants,
    count_instances,
};

use super::{arb_tree, leaf_ids, node_ids};

fn arb_split_region() -> impl Strategy<Value = DropRegion> {
    prop_oneof![
        Just(DropRegion::Top),
        Just(DropRegion::Left),
        Just(DropRegion::Bottom),
        Just(DropRegion::Right),
    ]
}

// ============================================================================
// Moves
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Appending any tab or tile to any tab group keeps every leaf exactly
    /// once and leaves a well-formed tree with root weight 1.
    #[test]
    fn prop_append_to_tab_group_preserves_leaves(
        tree in arb_tree(),
        from in any::<Index>(),
        to in any::<Index>(),
    ) {
        let leaves = leaf_ids(&tree);
        let groups: Vec<_> = tab_groups(&tree).iter().map(|group| group.id.clone()).collect();
        prop_assume!(!groups.is_empty());
        let from_id = from.get(&leaves).clone();
        let to_id = to.get(&groups).clone();

        let moved = apply_drop(Some(&tree), &from_id, &to_id, DropTarget::append())
            .expect("drop should succeed")
            .expect("tree should not become empty");

        prop_assert!(check_invariants(&moved).is_empty(), "{:?}", check_invariants(&moved));
        prop_assert_eq!(leaf_ids(&moved), leaves);
        prop_assert_eq!(moved.weight(), Some(1.0));
        prop_assert_eq!(count_instances(Some(&moved), &from_id), 1);

        let holder = parent_tab_group(&moved, &from_id).expect("moved tab has a group");
        prop_assert_eq!(&holder.id, &to_id);
    }

    /// Splitting any node with any leaf keeps the tree well-formed and puts
    /// the leaf alone in a new tab group.
    #[test]
    fn prop_split_drop_wraps_leaf_in_new_group(
        tree in arb_tree(),
        from in any::<Index>(),
        to in any::<Index>(),
        region in arb_split_region(),
    ) {
        let leaves = leaf_ids(&tree);
        let targets = node_ids(&tree);
        let from_id = from.get(&leaves).clone();
        let to_id = to.get(&targets).clone();
        prop_assume!(from_id != to_id);

        let moved = apply_drop(Some(&tree), &from_id, &to_id, DropTarget::DropRegion(region))
            .expect("drop should succeed")
            .expect("tree should not become empty");

        prop_assert!(check_invariants(&moved).is_empty(), "{:?}", check_invariants(&moved));
        prop_assert_eq!(leaf_ids(&moved), leaves);
        prop_assert_eq!(moved.weight(), Some(1.0));

        let holder = parent_tab_group(&moved, &from_id).expect("moved tab has a group");
        prop_assert_eq!(holder.tabs.len(), 1);
        prop_assert_eq!(holder.weight, Some(1.0));
    }

    /// Dropping an item onto itself returns the very same tree.
    #[test]
    fn prop_drop_onto_self_is_identity(
        tree in arb_tree(),
        item in any::<Index>(),
        region in arb_split_region(),
    ) {
        let leaves = leaf_ids(&tree);
        let id = item.get(&leaves).clone();

        let result = apply_drop(Some(&tree), &id, &id, DropTarget::DropRegion(region))
            .expect("self drop is not an error")
            .expect("tree is kept");
        prop_assert!(Arc::ptr_eq(&result, &tree));
    }

    /// Moving a tab ordinally into the group that already holds it changes
    /// nothing.
    #[test]
    fn prop_reorder_within_group_is_identity(
        tree in arb_tree(),
        group in any::<Index>(),
        tab in any::<Index>(),
        index in -1i64..5,
    ) {
        let groups = tab_groups(&tree);
        prop_assume!(!groups.is_empty());
        let group = group.get(&groups);
        let tab_id = tab.get(&group.tabs).id.clone();

        let result = apply_drop(Some(&tree), &tab_id, &group.id, DropTarget::TabIndex(index))
            .unwrap()
            .unwrap();
        prop_assert!(Arc::ptr_eq(&result, &tree));
    }
}

// ============================================================================
// Removal
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Removing a leaf drops exactly that leaf and prunes what it leaves
    /// behind.
    #[test]
    fn prop_remove_drops_exactly_one_leaf(tree in arb_tree(), item in any::<Index>()) {
        let leaves = leaf_ids(&tree);
        let id = item.get(&leaves).clone();

        let remaining = apply_remove(Some(&tree), &id).expect("leaf exists");

        let mut expected = leaves.clone();
        expected.retain(|leaf| leaf != &id);
        match remaining {
            None => prop_assert!(expected.is_empty()),
            Some(remaining) => {
                prop_assert!(check_invariants(&remaining).is_empty());
                prop_assert_eq!(leaf_ids(&remaining), expected);
                prop_assert_eq!(remaining.weight(), Some(1.0));
                prop_assert_eq!(count_instances(Some(&remaining), &id), 0);
            }
        }
    }

    /// Groups can never be removed directly.
    #[test]
    fn prop_groups_are_not_removable(tree in arb_tree(), item in any::<Index>()) {
        let groups: Vec<_> = node_ids(&tree)
            .into_iter()
            .filter(|id| find(&tree, id).is_some_and(|node| node.is_group() || node.is_tab_group()))
            .collect();
        prop_assume!(!groups.is_empty());
        let id = item.get(&groups);
        prop_assert!(apply_remove(Some(&tree), id).is_err());
    }
}

// ============================================================================
// Queries and weights
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every tab yields a label and a body container, every tile a body.
    #[test]
    fn prop_content_containers_cover_every_leaf(tree in arb_tree()) {
        let tabs: usize = tab_groups(&tree).iter().map(|group| group.tabs.len()).sum();
        let tiles = leaf_ids(&tree).len() - tabs;
        prop_assert_eq!(content_container_ids(Some(&tree)).len(), tabs * 2 + tiles);
    }

    /// Writing border weights touches only the two siblings of that border.
    #[test]
    fn prop_split_weights_touch_only_border_siblings(
        tree in arb_tree(),
        split in any::<Index>(),
        border in any::<Index>(),
        a in 1.0..2000.0f64,
        b in 1.0..2000.0f64,
    ) {
        let splits: Vec<_> = node_ids(&tree)
            .into_iter()
            .filter(|id| find(&tree, id).is_some_and(|node| node.as_split_group().is_some()))
            .collect();
        prop_assume!(!splits.is_empty());
        let split_id = split.get(&splits).clone();
        let before = find(&tree, &split_id).and_then(|node| node.as_split_group()).unwrap().clone();
        let border = border.index(before.items.len() - 1);

        let updated = set_split_weights(&tree, &split_id, border, (a, b)).unwrap();
        let LayoutNode::SplitGroup(after) = find(&updated, &split_id).unwrap().as_ref() else {
            panic!("split group changed kind");
        };

        for (index, (old, new)) in before.items.iter().zip(&after.items).enumerate() {
            if index == border {
                prop_assert_eq!(new.weight(), Some(a));
            } else if index == border + 1 {
                prop_assert_eq!(new.weight(), Some(b));
            } else {
                prop_assert!(Arc::ptr_eq(old, new));
            }
        }
        prop_assert_eq!(leaf_ids(&updated), leaf_ids(&tree));
    }
}
