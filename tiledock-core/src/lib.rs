//! `TileDock` Core Library
//!
//! This crate provides the core of the `TileDock` recursive tile and tab layout
//! manager: an immutable layout tree, a drag-and-drop gesture coordinator,
//! border resizing and the stateful container a host embeds.
//!
//! # Crate Structure
//!
//! - [`layout`] - Layout tree model and pure transforms (`apply_drop`, `apply_remove`)
//! - [`geometry`] - Pointer-to-drop-region classification
//! - [`drag_drop`] - Native drag event coordination
//! - [`resize`] - Border resize state machine
//! - [`container`] - `LayoutContainer`, the host-facing orchestrator
//! - [`persistence`] - Versioned layout documents and key-value stores
//! - [`config`] - Settings file management
//! - [`tracing`] - Structured logging setup and span names

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod container;
pub mod drag_drop;
pub mod geometry;
pub mod layout;
pub mod persistence;
pub mod resize;
pub mod tracing;

// =============================================================================
// Convenience re-exports
//
// Flat re-exports used by the property and integration tests and the CLI.
// Modular paths (e.g. `tiledock_core::layout::LayoutNode`) work as well.
// =============================================================================

pub use config::{
    ConfigError, ConfigManager, ConfigResult, LayoutSettings, LoggingSettings, StorageSettings,
    TileDockSettings,
};
pub use container::{
    ContainerError, ContainerResult, ContentHostPlan, DragAttributes, DropOutcome,
    LayoutContainer, RegionHandle, Renderers,
};
pub use drag_drop::{
    DataTransfer, DragDropCoordinator, DragDropError, DragNotification, DragState,
    DraggableId, DropzoneId, ElementArena, ElementTree, ResolvedDrop,
};
pub use geometry::{DROP_REGION_LENGTH_PX, DropRegion, Point, Rect, drop_region};
pub use layout::{
    ActiveTabState, ContainerKind, ContentContainerId, DropTarget, ItemId, LayoutError,
    LayoutNode, NodeRef, SplitDirection, SplitGroup, TabGroup, TabRef, Tile, apply_drop,
    apply_remove, check_invariants, count_instances,
};
pub use persistence::{
    DocumentFormat, FileLayoutStore, LayoutDocument, LayoutStore, MemoryLayoutStore,
    PersistenceError, PersistenceResult,
};
pub use resize::{BorderResizeMachine, ResizeEffect, ResizeState, ResizeTarget};
pub use self::tracing::{TracingConfig, TracingError, TracingLevel, TracingOutput, init_tracing};
