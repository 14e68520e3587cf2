//! Error types for layout tree operations

use super::types::{DropTarget, ItemId};

/// Errors that can occur while transforming a layout tree.
///
/// Every variant leaves the input tree untouched; operations either produce
/// a complete new tree or fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// A drag and drop was attempted on an empty layout.
    #[error("cannot drag and drop within an empty layout")]
    EmptyLayout,

    /// The item was not found anywhere in the tree.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// The dragged item was not found.
    #[error("could not find dragged item: {0}")]
    DraggedItemNotFound(ItemId),

    /// The drop target was not found.
    #[error("could not find drop target: {0}")]
    DropTargetNotFound(ItemId),

    /// Groups cannot be detached as a single unit.
    #[error("attempted to remove group {0}: only tabs and tiles can be moved")]
    GroupNotMovable(ItemId),

    /// The drop target kind does not apply to the target node.
    #[error("drop target {drop_target} is not valid for {target}")]
    IncompatibleDropTarget {
        /// Node the drop was addressed to.
        target: ItemId,
        /// Requested drop target.
        drop_target: DropTarget,
    },

    /// The node is not a split group.
    #[error("{0} is not a split group")]
    NotASplitGroup(ItemId),

    /// There is no border at this index.
    #[error("border {border} is out of range for split group {group}")]
    BorderOutOfRange {
        /// Split group identifier.
        group: ItemId,
        /// Requested border index.
        border: usize,
    },

    /// A weight was NaN or infinite.
    #[error("invalid weight: {0}")]
    InvalidWeight(f64),
}
