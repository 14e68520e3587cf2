//! Layout node definitions
//!
//! The persisted shape of a layout is a recursive tree of split groups,
//! tab groups and tiles. Node kinds are told apart by the fields they carry
//! (`items`, `tabs` or a bare `type`), so a JSON blob written by any host
//! deserializes without an explicit tag.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::DropRegion;

/// Shared handle to an immutable layout node.
///
/// Tree operations never mutate a node in place; they build new nodes along
/// the changed path and clone the `Arc` of every untouched subtree.
pub type NodeRef = Arc<LayoutNode>;

/// Opaque identifier of a layout item (tab, tile or group).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Axis along which a split group arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    /// Children side by side, left to right.
    Row,
    /// Children stacked, top to bottom.
    Column,
}

impl fmt::Display for SplitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => write!(f, "row"),
            Self::Column => write!(f, "column"),
        }
    }
}

/// Reference to one tab inside a tab group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabRef {
    /// Identity of the tab content.
    pub id: ItemId,
    /// Renderer type used for both the tab label and the tab body.
    #[serde(rename = "type")]
    pub renderer_type: String,
}

impl TabRef {
    /// Creates a tab reference.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, renderer_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            renderer_type: renderer_type.into(),
        }
    }
}

/// A group arranging two or more children along one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitGroup {
    /// Group identifier.
    #[serde(default)]
    pub id: ItemId,
    /// Relative share of the parent's axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Fixed size in pixels, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Layout axis of the children.
    pub direction: SplitDirection,
    /// Gap between children in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    /// Child nodes in display order.
    pub items: Vec<NodeRef>,
}

/// A leaf region with a strip of tabs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabGroup {
    /// Group identifier.
    #[serde(default)]
    pub id: ItemId,
    /// Relative share of the parent's axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Fixed size in pixels, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Renderer type of the group itself.
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub renderer_type: String,
    /// Tabs in strip order.
    pub tabs: Vec<TabRef>,
}

/// A leaf region with a single, non-tabbed content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Tile identifier.
    #[serde(default)]
    pub id: ItemId,
    /// Relative share of the parent's axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Fixed size in pixels, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Renderer type of the tile body.
    #[serde(rename = "type")]
    pub renderer_type: String,
}

/// One node of the layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutNode {
    /// A split group (`items`).
    SplitGroup(SplitGroup),
    /// A tab group (`tabs`).
    TabGroup(TabGroup),
    /// A single tile (`type` only).
    Tile(Tile),
}

impl LayoutNode {
    /// Returns the node identifier.
    #[must_use]
    pub fn id(&self) -> &ItemId {
        match self {
            Self::SplitGroup(group) => &group.id,
            Self::TabGroup(group) => &group.id,
            Self::Tile(tile) => &tile.id,
        }
    }

    /// Returns the node weight, if set.
    #[must_use]
    pub fn weight(&self) -> Option<f64> {
        match self {
            Self::SplitGroup(group) => group.weight,
            Self::TabGroup(group) => group.weight,
            Self::Tile(tile) => tile.weight,
        }
    }

    /// Returns the node's fixed size, if set.
    #[must_use]
    pub fn size(&self) -> Option<f64> {
        match self {
            Self::SplitGroup(group) => group.size,
            Self::TabGroup(group) => group.size,
            Self::Tile(tile) => tile.size,
        }
    }

    /// Returns a copy of this node with a different weight.
    ///
    /// Child handles are shared with the original.
    #[must_use]
    pub fn with_weight(&self, weight: Option<f64>) -> Self {
        let mut node = self.clone();
        match &mut node {
            Self::SplitGroup(group) => group.weight = weight,
            Self::TabGroup(group) => group.weight = weight,
            Self::Tile(tile) => tile.weight = weight,
        }
        node
    }

    /// Returns true for split groups.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self, Self::SplitGroup(_))
    }

    /// Returns true for tab groups.
    #[must_use]
    pub const fn is_tab_group(&self) -> bool {
        matches!(self, Self::TabGroup(_))
    }

    /// Returns the tab group payload, if this node is one.
    #[must_use]
    pub const fn as_tab_group(&self) -> Option<&TabGroup> {
        match self {
            Self::TabGroup(group) => Some(group),
            _ => None,
        }
    }

    /// Returns the split group payload, if this node is one.
    #[must_use]
    pub const fn as_split_group(&self) -> Option<&SplitGroup> {
        match self {
            Self::SplitGroup(group) => Some(group),
            _ => None,
        }
    }
}

/// Where a dragged item lands relative to its drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DropTarget {
    /// Spatial drop onto a region body.
    DropRegion(DropRegion),
    /// Ordinal drop into a tab strip; negative means append.
    TabIndex(i64),
}

impl DropTarget {
    /// Ordinal drop at the end of a tab strip.
    #[must_use]
    pub const fn append() -> Self {
        Self::TabIndex(-1)
    }

    /// Returns true for drops that add a tab to an existing strip rather
    /// than splitting a region.
    #[must_use]
    pub const fn is_ordinal(self) -> bool {
        matches!(
            self,
            Self::TabIndex(_) | Self::DropRegion(DropRegion::Cover)
        )
    }
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DropRegion(region) => write!(f, "dropRegion:{region}"),
            Self::TabIndex(index) => write!(f, "tabIndex:{index}"),
        }
    }
}

/// Which host renders a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// The body of a tile or the active tab.
    Tile,
    /// The label in a tab strip.
    Tab,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tile => write!(f, "tile"),
            Self::Tab => write!(f, "tab"),
        }
    }
}

/// Address of one renderable content container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentContainerId {
    /// Renderer type.
    #[serde(rename = "type")]
    pub renderer_type: String,
    /// Tab label or tile body.
    pub container: ContainerKind,
    /// Content identity.
    pub id: ItemId,
}

impl ContentContainerId {
    /// Creates a container address.
    #[must_use]
    pub fn new(renderer_type: impl Into<String>, container: ContainerKind, id: ItemId) -> Self {
        Self {
            renderer_type: renderer_type.into(),
            container,
            id,
        }
    }

    /// Flat string key, unique per container.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}:{}:{}", self.renderer_type, self.container, self.id)
    }
}

/// Active tab index per tab group.
///
/// Keyed on group id so entries survive tree mutations that keep the group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveTabState(BTreeMap<ItemId, usize>);

impl ActiveTabState {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active index of a group.
    #[must_use]
    pub fn get(&self, group_id: &ItemId) -> Option<usize> {
        self.0.get(group_id).copied()
    }

    /// Sets the active index of a group, returning true if it changed.
    pub fn set(&mut self, group_id: ItemId, index: usize) -> bool {
        self.0.insert(group_id, index) != Some(index)
    }

    /// Removes a group entry, returning true if one existed.
    pub fn remove(&mut self, group_id: &ItemId) -> bool {
        self.0.remove(group_id).is_some()
    }

    /// Number of tracked groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no group is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in group id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, usize)> {
        self.0.iter().map(|(id, index)| (id, *index))
    }

    /// Fits the table to `tree`: entries of vanished groups are dropped,
    /// new groups start at their first tab and indexes past the last tab
    /// are clamped to it. Returns true if anything changed.
    pub fn reconcile(&mut self, tree: Option<&NodeRef>) -> bool {
        let groups: Vec<(&ItemId, usize)> = tree
            .map(|tree| {
                super::tree::tab_groups(tree)
                    .into_iter()
                    .map(|group| (&group.id, group.tabs.len()))
                    .collect()
            })
            .unwrap_or_default();

        let before = self.0.len();
        self.0.retain(|id, _| groups.iter().any(|(group, _)| *group == id));
        let mut changed = before != self.0.len();
        for (group, len) in groups {
            let last = len.saturating_sub(1);
            match self.get(group) {
                None => changed |= self.set(group.clone(), 0),
                Some(index) if index > last => changed |= self.set(group.clone(), last),
                Some(_) => {}
            }
        }
        changed
    }
}

impl FromIterator<(ItemId, usize)> for ActiveTabState {
    fn from_iter<T: IntoIterator<Item = (ItemId, usize)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
