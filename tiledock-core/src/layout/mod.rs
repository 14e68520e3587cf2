//! Layout tree model
//!
//! This module provides the data model of a tile/tab layout and the pure
//! transforms that drag-and-drop and tab-close gestures are built from.
//!
//! # Architecture
//!
//! - **Immutable nodes**: every transform returns a new tree; untouched
//!   subtrees are shared through `Arc`
//! - **Identity addressing**: tabs, tiles and groups are located by id,
//!   never by position
//! - **Self-normalizing**: empty groups are pruned, single-child splits
//!   collapse, and the root weight is reset to 1 after every change
//!
//! # Module Structure
//!
//! - `types` - Node types (`LayoutNode`, `SplitGroup`, `TabGroup`, `Tile`, `TabRef`)
//! - `tree` - Transforms (`apply_drop`, `apply_remove`, `insert`, `prune`, ...)
//! - `error` - Error types (`LayoutError`)
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tiledock_core::layout::{apply_drop, DropTarget, ItemId, LayoutNode};
//!
//! let tree: LayoutNode = serde_json::from_str(
//!     r#"{"direction":"row","items":[
//!         {"id":"g1","type":"x","tabs":[{"id":"a","type":"x"}]},
//!         {"id":"g2","type":"x","tabs":[{"id":"b","type":"x"}]}
//!     ]}"#,
//! )
//! .unwrap();
//! let tree = Arc::new(tree);
//!
//! // Move tab "a" to the end of group "g2"; "g1" is pruned away.
//! let moved = apply_drop(
//!     Some(&tree),
//!     &ItemId::from("a"),
//!     &ItemId::from("g2"),
//!     DropTarget::append(),
//! )
//! .unwrap()
//! .unwrap();
//!
//! assert_eq!(moved.id(), &ItemId::from("g2"));
//! assert_eq!(moved.weight(), Some(1.0));
//! ```

mod error;
mod tree;
mod types;

pub use error::LayoutError;
pub use tree::{
    InvariantViolation, ROOT_WEIGHT, Removal, apply_drop, apply_remove, check_invariants,
    content_container_ids, count_instances, find, find_and_remove, insert, is_group,
    is_tab_group, parent_tab_group, prune, set_split_weights, tab_groups, with_root_weight,
};
pub use types::{
    ActiveTabState, ContainerKind, ContentContainerId, DropTarget, ItemId, LayoutNode, NodeRef,
    SplitDirection, SplitGroup, TabGroup, TabRef, Tile,
};
