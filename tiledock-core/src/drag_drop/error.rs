//! Error types for drag-and-drop coordination

use super::ids::{DraggableId, DropzoneId};

/// Contract violations detected while coordinating a drag gesture.
///
/// None of these are recoverable at runtime; they point to a wiring bug in
/// the host, such as an element carrying a stale or foreign id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DragDropError {
    /// The transfer payload carries no draggable token.
    #[error("drag event is missing a draggable id in its transfer payload")]
    MissingTransferToken,

    /// The token in the payload is not a draggable id.
    #[error("transfer payload token is not a draggable id: {0}")]
    MalformedTransferToken(String),

    /// No live component is registered for the draggable id.
    #[error("no draggable registered for {0}")]
    UnknownDraggable(DraggableId),

    /// No live component is registered for the dropzone id.
    #[error("no dropzone registered for {0}")]
    UnknownDropzone(DropzoneId),
}
