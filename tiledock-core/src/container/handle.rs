//! Logical handles for mounted regions

use std::fmt;

use crate::drag_drop::{DraggableAttributes, DropzoneAttributes};
use crate::layout::ItemId;

/// A mounted piece of the layout that takes part in drag and drop.
///
/// Handles are logical: they name layout ids, never host widgets, so the
/// same handle can be rebuilt by the host on every render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionHandle {
    /// The body of a tile or tab group.
    Body(ItemId),
    /// One tab in a tab strip.
    Tab {
        /// Tab content id.
        id: ItemId,
        /// Owning tab group.
        group: ItemId,
        /// Position in the strip.
        index: usize,
    },
    /// The strip of a tab group (empty area after the last tab).
    TabStrip(ItemId),
}

impl RegionHandle {
    /// Layout id moved when this handle is dragged.
    #[must_use]
    pub fn item_id(&self) -> &ItemId {
        match self {
            Self::Body(id) | Self::TabStrip(id) | Self::Tab { id, .. } => id,
        }
    }
}

impl fmt::Display for RegionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body(id) => write!(f, "body:{id}"),
            Self::Tab { id, group, index } => write!(f, "tab:{group}[{index}]:{id}"),
            Self::TabStrip(id) => write!(f, "strip:{id}"),
        }
    }
}

/// Attributes for an element that is both draggable and a dropzone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragAttributes {
    /// Draggable marker.
    pub draggable: DraggableAttributes,
    /// Dropzone marker.
    pub dropzone: DropzoneAttributes,
}

/// What a drop did to the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// No drag was in flight; the event belongs to someone else.
    Ignored,
    /// The drop resolved but left the layout as it was.
    Unchanged,
    /// The item moved; focus follows on the next tick.
    Moved(ItemId),
}
