//! Error types for the layout container

use thiserror::Error;

use crate::drag_drop::DragDropError;
use crate::layout::{ContainerKind, ItemId, LayoutError};

/// Errors surfaced by [`LayoutContainer`](super::LayoutContainer).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContainerError {
    /// A tree transform failed; the stored layout is unchanged.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// A drag gesture could not be resolved.
    #[error(transparent)]
    DragDrop(#[from] DragDropError),

    /// The layout references a renderer type nobody registered.
    #[error("no {container} renderer registered for type '{renderer_type}'")]
    MissingRenderer {
        /// Tab label or tile body.
        container: ContainerKind,
        /// Renderer type named by the layout.
        renderer_type: String,
    },

    /// A region took part in a gesture before its bounds were reported.
    #[error("bounds of region {0} are unknown")]
    RegionBoundsUnknown(ItemId),
}

/// Result type for container operations
pub type ContainerResult<T> = Result<T, ContainerError>;
