//! Layout tree algorithms
//!
//! All functions here are pure: they take a shared tree handle and return a
//! new one. Nodes along the changed path are rebuilt; every other subtree is
//! shared with the input through its `Arc`.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::error::LayoutError;
use super::types::{
    ContainerKind, ContentContainerId, DropTarget, ItemId, LayoutNode, NodeRef, SplitGroup,
    TabGroup, TabRef,
};
use crate::geometry::DropRegion;

/// Weight forced onto the root after every structural change.
pub const ROOT_WEIGHT: f64 = 1.0;

/// Returns true if the node is a split group.
#[must_use]
pub const fn is_group(node: &LayoutNode) -> bool {
    node.is_group()
}

/// Returns true if the node is a tab group.
#[must_use]
pub const fn is_tab_group(node: &LayoutNode) -> bool {
    node.is_tab_group()
}

/// Result of detaching a leaf from a tree.
#[derive(Debug, Clone)]
pub struct Removal {
    /// The tree without the leaf, `None` if the leaf was the whole tree.
    ///
    /// Not pruned: a tab group may be left empty and a split group may be
    /// left with a single child.
    pub tree: Option<NodeRef>,
    /// The detached leaf, as a tab reference.
    pub removed: TabRef,
}

/// Detaches the tab or tile with the given id.
///
/// The first match in depth-first order is removed.
///
/// # Errors
///
/// Returns `ItemNotFound` if no tab or tile has this id, or
/// `GroupNotMovable` if the id belongs to a group.
pub fn find_and_remove(id: &ItemId, tree: &NodeRef) -> Result<Removal, LayoutError> {
    match remove_from(id, tree)? {
        Some((tree, removed)) => Ok(Removal { tree, removed }),
        None => Err(LayoutError::ItemNotFound(id.clone())),
    }
}

type Detached = (Option<NodeRef>, TabRef);

fn remove_from(id: &ItemId, node: &NodeRef) -> Result<Option<Detached>, LayoutError> {
    match node.as_ref() {
        LayoutNode::Tile(tile) => {
            if &tile.id == id {
                let leaf = TabRef::new(tile.id.clone(), tile.renderer_type.clone());
                Ok(Some((None, leaf)))
            } else {
                Ok(None)
            }
        }
        LayoutNode::TabGroup(group) => {
            if &group.id == id {
                return Err(LayoutError::GroupNotMovable(id.clone()));
            }
            let Some(index) = group.tabs.iter().position(|tab| &tab.id == id) else {
                return Ok(None);
            };
            let mut next = group.clone();
            let removed = next.tabs.remove(index);
            Ok(Some((Some(Arc::new(LayoutNode::TabGroup(next))), removed)))
        }
        LayoutNode::SplitGroup(group) => {
            if &group.id == id {
                return Err(LayoutError::GroupNotMovable(id.clone()));
            }
            for (index, child) in group.items.iter().enumerate() {
                if let Some((replacement, removed)) = remove_from(id, child)? {
                    let mut next = group.clone();
                    match replacement {
                        Some(child) => next.items[index] = child,
                        None => {
                            next.items.remove(index);
                        }
                    }
                    return Ok(Some((Some(Arc::new(LayoutNode::SplitGroup(next))), removed)));
                }
            }
            Ok(None)
        }
    }
}

/// Inserts a leaf relative to the node `target_id`.
///
/// - An ordinal target on a tab group splices the leaf into its tabs
///   (negative or past-the-end indexes append).
/// - `Cover` on a tab group appends.
/// - Any other region wraps the leaf in a new tab group and splits the
///   target with it. The new split group takes the target's place and
///   weight; both children get weight 1.
///
/// The returned root has weight [`ROOT_WEIGHT`]. An ordinal insert into a
/// tab group that already holds the leaf returns `tree` itself (same
/// `Arc`): a group never lists a tab twice.
///
/// # Errors
///
/// Returns `DropTargetNotFound` if no node has `target_id`, or
/// `IncompatibleDropTarget` for an ordinal drop on something other than a
/// tab group.
pub fn insert(
    leaf: TabRef,
    target_id: &ItemId,
    drop_target: DropTarget,
    tree: &NodeRef,
) -> Result<NodeRef, LayoutError> {
    if drop_target.is_ordinal() && group_holds_tab(tree, target_id, &leaf.id) {
        tracing::debug!(tab = %leaf.id, group = %target_id, "Tab already in group");
        return Ok(Arc::clone(tree));
    }
    let inserted = insert_into(&leaf, target_id, drop_target, tree, None)?
        .ok_or_else(|| LayoutError::DropTargetNotFound(target_id.clone()))?;
    Ok(with_root_weight(&inserted))
}

fn insert_into(
    leaf: &TabRef,
    target_id: &ItemId,
    drop_target: DropTarget,
    node: &NodeRef,
    enclosing_gap: Option<f64>,
) -> Result<Option<NodeRef>, LayoutError> {
    if node.id() == target_id {
        return place_at_target(leaf, drop_target, node, enclosing_gap).map(Some);
    }
    let LayoutNode::SplitGroup(group) = node.as_ref() else {
        return Ok(None);
    };
    let gap = group.gap.or(enclosing_gap);
    for (index, child) in group.items.iter().enumerate() {
        if let Some(replacement) = insert_into(leaf, target_id, drop_target, child, gap)? {
            let mut next = group.clone();
            next.items[index] = replacement;
            return Ok(Some(Arc::new(LayoutNode::SplitGroup(next))));
        }
    }
    Ok(None)
}

fn place_at_target(
    leaf: &TabRef,
    drop_target: DropTarget,
    target: &NodeRef,
    gap: Option<f64>,
) -> Result<NodeRef, LayoutError> {
    let incompatible = || LayoutError::IncompatibleDropTarget {
        target: target.id().clone(),
        drop_target,
    };
    match (drop_target, target.as_ref()) {
        (_, LayoutNode::TabGroup(group))
            if drop_target.is_ordinal() && group.tabs.iter().any(|tab| tab.id == leaf.id) =>
        {
            Ok(Arc::clone(target))
        }
        (DropTarget::TabIndex(index), LayoutNode::TabGroup(group)) => {
            Ok(Arc::new(LayoutNode::TabGroup(splice_tab(group, leaf, index))))
        }
        (DropTarget::DropRegion(DropRegion::Cover), LayoutNode::TabGroup(group)) => {
            Ok(Arc::new(LayoutNode::TabGroup(splice_tab(group, leaf, -1))))
        }
        (DropTarget::TabIndex(_), _) => Err(incompatible()),
        (DropTarget::DropRegion(region), _) => match region.split_direction() {
            Some(direction) => {
                let wrapper: NodeRef = Arc::new(LayoutNode::TabGroup(TabGroup {
                    id: ItemId::generate(),
                    weight: Some(1.0),
                    size: None,
                    renderer_type: leaf.renderer_type.clone(),
                    tabs: vec![leaf.clone()],
                }));
                let existing = Arc::new(target.with_weight(Some(1.0)));
                let items = if region.places_after() {
                    vec![existing, wrapper]
                } else {
                    vec![wrapper, existing]
                };
                Ok(Arc::new(LayoutNode::SplitGroup(SplitGroup {
                    id: ItemId::generate(),
                    weight: target.weight(),
                    size: None,
                    direction,
                    gap,
                    items,
                })))
            }
            None => Err(incompatible()),
        },
    }
}

fn splice_tab(group: &TabGroup, leaf: &TabRef, index: i64) -> TabGroup {
    let mut next = group.clone();
    let len = next.tabs.len();
    let at = usize::try_from(index).map_or(len, |index| index.min(len));
    next.tabs.insert(at, leaf.clone());
    next
}

/// Removes empty groups and collapses single-child split groups.
///
/// Works bottom-up, so a collapse can cascade to the parent. A collapsed
/// child takes over its former parent's weight. Returns `None` when nothing
/// is left. Unchanged subtrees are returned as the same `Arc`.
#[must_use]
pub fn prune(node: &NodeRef) -> Option<NodeRef> {
    match node.as_ref() {
        LayoutNode::Tile(_) => Some(Arc::clone(node)),
        LayoutNode::TabGroup(group) => (!group.tabs.is_empty()).then(|| Arc::clone(node)),
        LayoutNode::SplitGroup(group) => {
            let mut changed = false;
            let mut items = Vec::with_capacity(group.items.len());
            for child in &group.items {
                match prune(child) {
                    Some(pruned) => {
                        changed |= !Arc::ptr_eq(&pruned, child);
                        items.push(pruned);
                    }
                    None => changed = true,
                }
            }
            match items.len() {
                0 => None,
                1 => items.pop().map(|only| reweighted(&only, group.weight)),
                _ if changed => Some(Arc::new(LayoutNode::SplitGroup(SplitGroup {
                    id: group.id.clone(),
                    weight: group.weight,
                    size: group.size,
                    direction: group.direction,
                    gap: group.gap,
                    items,
                }))),
                _ => Some(Arc::clone(node)),
            }
        }
    }
}

fn reweighted(node: &NodeRef, weight: Option<f64>) -> NodeRef {
    if node.weight() == weight {
        Arc::clone(node)
    } else {
        Arc::new(node.with_weight(weight))
    }
}

/// Returns the tree with its root weight set to [`ROOT_WEIGHT`].
#[must_use]
pub fn with_root_weight(root: &NodeRef) -> NodeRef {
    reweighted(root, Some(ROOT_WEIGHT))
}

/// Moves the leaf `from_id` to `to_id`.
///
/// Dropping an item onto itself, or ordinally into a tab group that already
/// holds it, returns the input tree unchanged (same `Arc`).
///
/// # Errors
///
/// - `EmptyLayout` when there is no tree
/// - `DraggedItemNotFound` when `from_id` is absent
/// - `DropTargetNotFound` when `to_id` is absent once the leaf is detached
/// - `GroupNotMovable` when `from_id` names a group
/// - `IncompatibleDropTarget` when the drop target does not apply to `to_id`
pub fn apply_drop(
    tree: Option<&NodeRef>,
    from_id: &ItemId,
    to_id: &ItemId,
    drop_target: DropTarget,
) -> Result<Option<NodeRef>, LayoutError> {
    let Some(tree) = tree else {
        return Err(LayoutError::EmptyLayout);
    };

    if from_id == to_id || (drop_target.is_ordinal() && group_holds_tab(tree, to_id, from_id)) {
        tracing::debug!(from = %from_id, to = %to_id, "Drop leaves layout unchanged");
        return Ok(Some(Arc::clone(tree)));
    }

    let Removal { tree: remaining, removed } =
        find_and_remove(from_id, tree).map_err(|err| match err {
            LayoutError::ItemNotFound(id) => LayoutError::DraggedItemNotFound(id),
            other => other,
        })?;
    let remaining = remaining.ok_or_else(|| LayoutError::DropTargetNotFound(to_id.clone()))?;

    let inserted = insert_into(&removed, to_id, drop_target, &remaining, None)?
        .ok_or_else(|| LayoutError::DropTargetNotFound(to_id.clone()))?;

    tracing::debug!(from = %from_id, to = %to_id, target = %drop_target, "Applied drop");
    Ok(prune(&inserted).map(|root| with_root_weight(&root)))
}

/// Removes the tab or tile `id` and prunes the result.
///
/// Returns `None` when the layout becomes empty.
///
/// # Errors
///
/// Returns `ItemNotFound` if the id is absent (or the tree is empty) and
/// `GroupNotMovable` if it names a group.
pub fn apply_remove(tree: Option<&NodeRef>, id: &ItemId) -> Result<Option<NodeRef>, LayoutError> {
    let Some(tree) = tree else {
        return Err(LayoutError::ItemNotFound(id.clone()));
    };
    let Removal { tree: remaining, .. } = find_and_remove(id, tree)?;
    tracing::debug!(id = %id, "Removed item");
    Ok(remaining
        .and_then(|root| prune(&root))
        .map(|root| with_root_weight(&root)))
}

fn group_holds_tab(tree: &NodeRef, group_id: &ItemId, tab_id: &ItemId) -> bool {
    find(tree, group_id)
        .and_then(|node| node.as_tab_group())
        .is_some_and(|group| group.tabs.iter().any(|tab| &tab.id == tab_id))
}

/// Finds the node with the given id (groups and tiles, not tabs).
#[must_use]
pub fn find<'a>(tree: &'a NodeRef, id: &ItemId) -> Option<&'a NodeRef> {
    if tree.id() == id {
        return Some(tree);
    }
    match tree.as_ref() {
        LayoutNode::SplitGroup(group) => group.items.iter().find_map(|child| find(child, id)),
        _ => None,
    }
}

/// Finds the first tab group holding the tab `tab_id`.
#[must_use]
pub fn parent_tab_group<'a>(tree: &'a NodeRef, tab_id: &ItemId) -> Option<&'a TabGroup> {
    match tree.as_ref() {
        LayoutNode::TabGroup(group) => group
            .tabs
            .iter()
            .any(|tab| &tab.id == tab_id)
            .then_some(group),
        LayoutNode::SplitGroup(group) => group
            .items
            .iter()
            .find_map(|child| parent_tab_group(child, tab_id)),
        LayoutNode::Tile(_) => None,
    }
}

/// Collects every tab group in depth-first order.
#[must_use]
pub fn tab_groups(tree: &NodeRef) -> Vec<&TabGroup> {
    let mut groups = Vec::new();
    collect_tab_groups(tree, &mut groups);
    groups
}

fn collect_tab_groups<'a>(node: &'a NodeRef, out: &mut Vec<&'a TabGroup>) {
    match node.as_ref() {
        LayoutNode::TabGroup(group) => out.push(group),
        LayoutNode::SplitGroup(group) => {
            for child in &group.items {
                collect_tab_groups(child, out);
            }
        }
        LayoutNode::Tile(_) => {}
    }
}

/// Lists every distinct renderable content container.
///
/// Each tab yields a `tab` container (label) and a `tile` container (body);
/// each tile yields a `tile` container. Duplicates from cloned tabs are
/// listed once, in first-seen order.
#[must_use]
pub fn content_container_ids(tree: Option<&NodeRef>) -> Vec<ContentContainerId> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    if let Some(tree) = tree {
        collect_containers(tree, &mut seen, &mut ids);
    }
    ids
}

fn collect_containers(
    node: &NodeRef,
    seen: &mut HashSet<ContentContainerId>,
    out: &mut Vec<ContentContainerId>,
) {
    match node.as_ref() {
        LayoutNode::Tile(tile) => push_unique(
            ContentContainerId::new(tile.renderer_type.clone(), ContainerKind::Tile, tile.id.clone()),
            seen,
            out,
        ),
        LayoutNode::TabGroup(group) => {
            for tab in &group.tabs {
                for container in [ContainerKind::Tab, ContainerKind::Tile] {
                    push_unique(
                        ContentContainerId::new(tab.renderer_type.clone(), container, tab.id.clone()),
                        seen,
                        out,
                    );
                }
            }
        }
        LayoutNode::SplitGroup(group) => {
            for child in &group.items {
                collect_containers(child, seen, out);
            }
        }
    }
}

fn push_unique(
    id: ContentContainerId,
    seen: &mut HashSet<ContentContainerId>,
    out: &mut Vec<ContentContainerId>,
) {
    if seen.insert(id.clone()) {
        out.push(id);
    }
}

/// Counts how many times `id` occurs as a tab.
#[must_use]
pub fn count_instances(tree: Option<&NodeRef>, id: &ItemId) -> usize {
    tree.map_or(0, |tree| {
        tab_groups(tree)
            .iter()
            .map(|group| group.tabs.iter().filter(|tab| &tab.id == id).count())
            .sum()
    })
}

/// Writes new weights for the two children around a border.
///
/// Border `n` sits between `items[n]` and `items[n + 1]` of the split group.
/// Weights are stored as given; only non-finite values are rejected.
///
/// # Errors
///
/// Returns `ItemNotFound`, `NotASplitGroup`, `BorderOutOfRange` or
/// `InvalidWeight`.
pub fn set_split_weights(
    tree: &NodeRef,
    group_id: &ItemId,
    border: usize,
    weights: (f64, f64),
) -> Result<NodeRef, LayoutError> {
    for weight in [weights.0, weights.1] {
        if !weight.is_finite() {
            return Err(LayoutError::InvalidWeight(weight));
        }
    }
    replace_node(tree, group_id, &|node: &NodeRef| {
        let LayoutNode::SplitGroup(group) = node.as_ref() else {
            return Err(LayoutError::NotASplitGroup(group_id.clone()));
        };
        if border + 1 >= group.items.len() {
            return Err(LayoutError::BorderOutOfRange {
                group: group_id.clone(),
                border,
            });
        }
        let mut next = group.clone();
        next.items[border] = reweighted(&group.items[border], Some(weights.0));
        next.items[border + 1] = reweighted(&group.items[border + 1], Some(weights.1));
        Ok(Arc::new(LayoutNode::SplitGroup(next)))
    })?
    .ok_or_else(|| LayoutError::ItemNotFound(group_id.clone()))
}

type Replace<'a> = dyn Fn(&NodeRef) -> Result<NodeRef, LayoutError> + 'a;

fn replace_node(
    node: &NodeRef,
    id: &ItemId,
    replace: &Replace<'_>,
) -> Result<Option<NodeRef>, LayoutError> {
    if node.id() == id {
        return replace(node).map(Some);
    }
    let LayoutNode::SplitGroup(group) = node.as_ref() else {
        return Ok(None);
    };
    for (index, child) in group.items.iter().enumerate() {
        if let Some(replacement) = replace_node(child, id, replace)? {
            let mut next = group.clone();
            next.items[index] = replacement;
            return Ok(Some(Arc::new(LayoutNode::SplitGroup(next))));
        }
    }
    Ok(None)
}

/// A structural problem found by [`check_invariants`].
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    /// Two nodes share an id.
    DuplicateNodeId(ItemId),
    /// A tab appears twice in the same group.
    DuplicateTabInGroup {
        /// Group holding the duplicate.
        group: ItemId,
        /// Repeated tab id.
        tab: ItemId,
    },
    /// A tab group without tabs.
    EmptyTabGroup(ItemId),
    /// A split group with fewer than two children.
    UnderfilledSplitGroup {
        /// Group identifier.
        group: ItemId,
        /// Number of children.
        items: usize,
    },
    /// A NaN or infinite weight.
    NonFiniteWeight(ItemId),
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateNodeId(id) => write!(f, "duplicate node id {id}"),
            Self::DuplicateTabInGroup { group, tab } => {
                write!(f, "tab {tab} appears more than once in group {group}")
            }
            Self::EmptyTabGroup(id) => write!(f, "tab group {id} has no tabs"),
            Self::UnderfilledSplitGroup { group, items } => {
                write!(f, "split group {group} has {items} item(s), expected at least 2")
            }
            Self::NonFiniteWeight(id) => write!(f, "node {id} has a non-finite weight"),
        }
    }
}

/// Checks the structural invariants of a pruned tree.
#[must_use]
pub fn check_invariants(tree: &NodeRef) -> Vec<InvariantViolation> {
    let mut node_ids = HashSet::new();
    let mut violations = Vec::new();
    check_node(tree, &mut node_ids, &mut violations);
    violations
}

fn check_node(
    node: &NodeRef,
    node_ids: &mut HashSet<ItemId>,
    violations: &mut Vec<InvariantViolation>,
) {
    if !node_ids.insert(node.id().clone()) {
        violations.push(InvariantViolation::DuplicateNodeId(node.id().clone()));
    }
    if node.weight().is_some_and(|weight| !weight.is_finite()) {
        violations.push(InvariantViolation::NonFiniteWeight(node.id().clone()));
    }
    match node.as_ref() {
        LayoutNode::Tile(_) => {}
        LayoutNode::TabGroup(group) => {
            if group.tabs.is_empty() {
                violations.push(InvariantViolation::EmptyTabGroup(group.id.clone()));
            }
            let mut tabs = HashSet::new();
            for tab in &group.tabs {
                if !tabs.insert(&tab.id) {
                    violations.push(InvariantViolation::DuplicateTabInGroup {
                        group: group.id.clone(),
                        tab: tab.id.clone(),
                    });
                }
            }
        }
        LayoutNode::SplitGroup(group) => {
            if group.items.len() < 2 {
                violations.push(InvariantViolation::UnderfilledSplitGroup {
                    group: group.id.clone(),
                    items: group.items.len(),
                });
            }
            for child in &group.items {
                check_node(child, node_ids, violations);
            }
        }
    }
}
