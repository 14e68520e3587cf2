//! Content renderer registries and host planning
//!
//! A layout only names renderer types. The host registers one renderer per
//! type for tile bodies and one for tab labels; the container checks every
//! type the layout references against those registries up front and
//! diffs the set of content hosts whenever the tree changes.

use std::collections::{BTreeMap, BTreeSet};

use super::error::{ContainerError, ContainerResult};
use crate::layout::{ContainerKind, ContentContainerId, NodeRef, content_container_ids};

/// Renderers keyed by renderer type.
#[derive(Debug, Clone)]
pub struct Renderers<R> {
    by_type: BTreeMap<String, R>,
}

impl<R> Default for Renderers<R> {
    fn default() -> Self {
        Self {
            by_type: BTreeMap::new(),
        }
    }
}

impl<R> Renderers<R> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a renderer, builder style.
    #[must_use]
    pub fn with(mut self, renderer_type: impl Into<String>, renderer: R) -> Self {
        self.by_type.insert(renderer_type.into(), renderer);
        self
    }

    /// Looks up the renderer for a type.
    #[must_use]
    pub fn get(&self, renderer_type: &str) -> Option<&R> {
        self.by_type.get(renderer_type)
    }

    /// Returns true if a renderer is registered for the type.
    #[must_use]
    pub fn contains(&self, renderer_type: &str) -> bool {
        self.by_type.contains_key(renderer_type)
    }

    /// Registered types in sorted order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.by_type.keys().map(String::as_str)
    }
}

impl<R> FromIterator<(String, R)> for Renderers<R> {
    fn from_iter<T: IntoIterator<Item = (String, R)>>(iter: T) -> Self {
        Self {
            by_type: iter.into_iter().collect(),
        }
    }
}

/// The tile-body and tab-label registries of one container.
#[derive(Debug, Clone)]
pub(crate) struct RendererSet<R> {
    tiles: Renderers<R>,
    tabs: Renderers<R>,
}

impl<R> RendererSet<R> {
    pub(crate) fn new(tiles: Renderers<R>, tabs: Renderers<R>) -> Self {
        Self { tiles, tabs }
    }

    pub(crate) fn resolve(&self, id: &ContentContainerId) -> ContainerResult<&R> {
        let registry = match id.container {
            ContainerKind::Tile => &self.tiles,
            ContainerKind::Tab => &self.tabs,
        };
        registry
            .get(&id.renderer_type)
            .ok_or_else(|| ContainerError::MissingRenderer {
                container: id.container,
                renderer_type: id.renderer_type.clone(),
            })
    }

    /// Fails on the first container of `tree` without a renderer.
    pub(crate) fn validate(&self, tree: Option<&NodeRef>) -> ContainerResult<()> {
        for id in content_container_ids(tree) {
            self.resolve(&id)?;
        }
        Ok(())
    }
}

/// Content hosts to create and destroy after a layout change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentHostPlan {
    /// Containers that appeared, in tree order.
    pub mount: Vec<ContentContainerId>,
    /// Containers that disappeared, in key order.
    pub unmount: Vec<ContentContainerId>,
}

impl ContentHostPlan {
    /// Returns true when nothing needs to change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mount.is_empty() && self.unmount.is_empty()
    }

    /// Diffs the containers of `tree` against `mounted`, updating `mounted`.
    pub(crate) fn diff(tree: Option<&NodeRef>, mounted: &mut BTreeSet<ContentContainerId>) -> Self {
        let wanted = content_container_ids(tree);
        let wanted_set: BTreeSet<_> = wanted.iter().cloned().collect();

        let unmount: Vec<_> = mounted.difference(&wanted_set).cloned().collect();
        let mount: Vec<_> = wanted
            .into_iter()
            .filter(|id| !mounted.contains(id))
            .collect();

        *mounted = wanted_set;
        Self { mount, unmount }
    }
}
