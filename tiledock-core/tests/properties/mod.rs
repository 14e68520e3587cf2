//! Property test modules and the layout tree generators they share

pub mod coordinator_tests;
pub mod drop_region_tests;
pub mod layout_tree_tests;
pub mod persistence_tests;
pub mod resize_tests;

use std::sync::Arc;

use proptest::prelude::*;
use tiledock_core::layout::with_root_weight;
use tiledock_core::{ItemId, LayoutNode, NodeRef, SplitDirection, SplitGroup, TabGroup, TabRef, Tile};

/// Tree shape before ids are assigned.
#[derive(Debug, Clone)]
pub enum Shape {
    Tile,
    Tabs(usize),
    Split(SplitDirection, Vec<Shape>),
}

pub fn arb_direction() -> impl Strategy<Value = SplitDirection> {
    prop_oneof![Just(SplitDirection::Row), Just(SplitDirection::Column)]
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![Just(Shape::Tile), (1usize..4).prop_map(Shape::Tabs)];
    leaf.prop_recursive(3, 24, 4, |inner| {
        (arb_direction(), prop::collection::vec(inner, 2..4))
            .prop_map(|(direction, items)| Shape::Split(direction, items))
    })
}

fn build(shape: &Shape, next: &mut usize) -> NodeRef {
    *next += 1;
    let n = *next;
    let node = match shape {
        Shape::Tile => LayoutNode::Tile(Tile {
            id: ItemId::new(format!("tile-{n}")),
            weight: Some(1.0),
            size: None,
            renderer_type: "pane".to_string(),
        }),
        Shape::Tabs(count) => LayoutNode::TabGroup(TabGroup {
            id: ItemId::new(format!("group-{n}")),
            weight: Some(1.0),
            size: None,
            renderer_type: "pane".to_string(),
            tabs: (0..*count)
                .map(|i| TabRef::new(format!("tab-{n}-{i}"), "pane"))
                .collect(),
        }),
        Shape::Split(direction, items) => LayoutNode::SplitGroup(SplitGroup {
            id: ItemId::new(format!("split-{n}")),
            weight: Some(1.0),
            size: None,
            direction: *direction,
            gap: None,
            items: items.iter().map(|item| build(item, next)).collect(),
        }),
    };
    Arc::new(node)
}

/// Strategy for generating well-formed layout trees with unique ids
pub fn arb_tree() -> impl Strategy<Value = NodeRef> {
    arb_shape().prop_map(|shape| with_root_weight(&build(&shape, &mut 0)))
}

/// Tab and tile ids, sorted.
pub fn leaf_ids(node: &LayoutNode) -> Vec<ItemId> {
    fn walk(node: &LayoutNode, out: &mut Vec<ItemId>) {
        match node {
            LayoutNode::Tile(tile) => out.push(tile.id.clone()),
            LayoutNode::TabGroup(group) => out.extend(group.tabs.iter().map(|tab| tab.id.clone())),
            LayoutNode::SplitGroup(group) => {
                for child in &group.items {
                    walk(child, out);
                }
            }
        }
    }
    let mut out = Vec::new();
    walk(node, &mut out);
    out.sort();
    out
}

/// Ids of every node (groups and tiles), in depth-first order.
pub fn node_ids(node: &LayoutNode) -> Vec<ItemId> {
    let mut out = vec![node.id().clone()];
    if let LayoutNode::SplitGroup(group) = node {
        for child in &group.items {
            out.extend(node_ids(child));
        }
    }
    out
}
