//! Layout container
//!
//! The stateful service a host embeds: it owns the current tree, routes
//! native drag events through the coordinator into tree transforms, drives
//! border resizing and tells the host which content hosts to mount.
//!
//! # Module Structure
//!
//! - `orchestrator` - `LayoutContainer`
//! - `handle` - Region handles and drop outcomes
//! - `renderers` - Renderer registries and content host planning
//! - `error` - Error types (`ContainerError`)

mod error;
mod handle;
mod orchestrator;
mod renderers;

pub use error::{ContainerError, ContainerResult};
pub use handle::{DragAttributes, DropOutcome, RegionHandle};
pub use orchestrator::LayoutContainer;
pub use renderers::{ContentHostPlan, Renderers};
