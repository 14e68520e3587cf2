//! Drag-and-drop coordination
//!
//! Turns the noisy stream of native drag events into logical gestures
//! between registered components.
//!
//! # Module Structure
//!
//! - `ids` - Draggable and dropzone ids, transfer payload
//! - `registry` - Bidirectional handle/id registry
//! - `element` - Element ancestry used for drag-leave filtering
//! - `coordinator` - The gesture state machine (`DragDropCoordinator`)
//! - `error` - Error types (`DragDropError`)

mod coordinator;
mod element;
mod error;
mod ids;
mod registry;

pub use coordinator::{DragDropCoordinator, DragNotification, DragState, ResolvedDrop};
pub use element::{ElementArena, ElementRef, ElementTree, closest_dropzone_ancestor};
pub use error::DragDropError;
pub use ids::{
    DataTransfer, DraggableAttributes, DraggableId, DropzoneAttributes, DropzoneId,
    TRANSFER_FORMAT,
};
pub use registry::Registry;
