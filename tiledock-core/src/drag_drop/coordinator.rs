//! Logical drag-and-drop coordinator
//!
//! Native drag events bubble through every ancestor and fire enter/leave
//! for each nested element. The coordinator turns that stream into logical
//! notifications addressed to one draggable and one dropzone, tracks the
//! single component being dragged and resolves it again at drop time from
//! the token stored in the transfer payload.

use std::collections::HashSet;
use std::hash::Hash;

use super::element::{ElementTree, closest_dropzone_ancestor};
use super::error::DragDropError;
use super::ids::{
    DataTransfer, DraggableAttributes, DraggableId, DropzoneAttributes, DropzoneId,
    TRANSFER_FORMAT,
};
use super::registry::Registry;

/// Lifecycle state of one draggable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// Not being dragged.
    #[default]
    Idle,
    /// Currently being dragged.
    Dragging,
}

/// App-wide notification emitted at the edges of a drag cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragNotification {
    /// A drag cycle began.
    BeginDrag,
    /// A drag cycle ended, by drop or by cancellation.
    EndDrag,
}

/// A drop resolved to its logical source and target.
///
/// A resolved drop always closes the drag cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDrop<H> {
    /// Component that was dragged.
    pub source: H,
    /// Dropzone component that received the drop.
    pub target: H,
}

/// Coordinates drag gestures between registered components.
///
/// `H` is the host's handle for a logical component (a tab, a tab strip,
/// a region body). Handles are registered explicitly and must be
/// unregistered when the component goes away.
#[derive(Debug)]
pub struct DragDropCoordinator<H> {
    draggables: Registry<DraggableId, H>,
    dropzones: Registry<DropzoneId, H>,
    dragged: Option<H>,
    dragging: HashSet<DraggableId>,
    drag_over: HashSet<DropzoneId>,
    prevent_next_drag: bool,
    pointer_outside_window: bool,
}

impl<H> Default for DragDropCoordinator<H> {
    fn default() -> Self {
        Self {
            draggables: Registry::default(),
            dropzones: Registry::default(),
            dragged: None,
            dragging: HashSet::new(),
            drag_over: HashSet::new(),
            prevent_next_drag: false,
            pointer_outside_window: false,
        }
    }
}

impl<H> DragDropCoordinator<H>
where
    H: Clone + Eq + Hash + std::fmt::Debug,
{
    /// Creates a coordinator with no registered components.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Marks a component as draggable, assigning a stable id on first use.
    pub fn mark_draggable(&mut self, handle: &H) -> DraggableAttributes {
        let draggable_id = self.draggables.get_or_register(handle, DraggableId::new);
        DraggableAttributes {
            draggable: true,
            draggable_id,
        }
    }

    /// Marks a component as a dropzone, assigning a stable id on first use.
    pub fn mark_dropzone(&mut self, handle: &H) -> DropzoneAttributes {
        DropzoneAttributes {
            dropzone_id: self.dropzones.get_or_register(handle, DropzoneId::new),
        }
    }

    /// Forgets a draggable component.
    ///
    /// A drag already in flight keeps its source handle until it ends.
    pub fn unregister_draggable(&mut self, handle: &H) -> Option<DraggableId> {
        let id = self.draggables.unregister(handle)?;
        self.dragging.remove(&id);
        Some(id)
    }

    /// Forgets a dropzone component.
    pub fn unregister_dropzone(&mut self, handle: &H) -> Option<DropzoneId> {
        let id = self.dropzones.unregister(handle)?;
        self.drag_over.remove(&id);
        Some(id)
    }

    /// Looks up the component behind a dropzone id.
    #[must_use]
    pub fn dropzone_handle(&self, id: &DropzoneId) -> Option<&H> {
        self.dropzones.handle_of(id)
    }

    // ------------------------------------------------------------------
    // Global pointer state
    // ------------------------------------------------------------------

    /// Suppresses the next drag start, e.g. for a close button that owns
    /// the pointer-down.
    pub fn prevent_next_drag(&mut self) {
        self.prevent_next_drag = true;
    }

    /// Handles a window-level pointer-up.
    pub fn pointer_up(&mut self) {
        self.prevent_next_drag = false;
    }

    /// Records that the pointer left the window.
    pub fn pointer_left_window(&mut self) {
        self.pointer_outside_window = true;
    }

    /// Records that the pointer re-entered the window.
    pub fn pointer_entered_window(&mut self) {
        self.pointer_outside_window = false;
    }

    // ------------------------------------------------------------------
    // Draggable events
    // ------------------------------------------------------------------

    /// Starts a drag of the component behind `source`.
    ///
    /// Writes the draggable token into `transfer`. Returns `None` when the
    /// drag was suppressed by [`prevent_next_drag`](Self::prevent_next_drag).
    ///
    /// # Errors
    ///
    /// Returns `UnknownDraggable` if `source` is not registered.
    pub fn drag_start(
        &mut self,
        source: &DraggableId,
        transfer: &mut DataTransfer,
    ) -> Result<Option<DragNotification>, DragDropError> {
        if self.prevent_next_drag {
            self.prevent_next_drag = false;
            tracing::debug!(draggable = %source, "Drag start suppressed");
            return Ok(None);
        }

        let handle = self
            .draggables
            .handle_of(source)
            .cloned()
            .ok_or_else(|| DragDropError::UnknownDraggable(source.clone()))?;

        if let Some(previous) = self.dragged.replace(handle) {
            tracing::debug!(?previous, "Replacing stale dragged component");
        }
        self.dragging.insert(source.clone());
        transfer.set_data(TRANSFER_FORMAT, source.as_str());
        tracing::debug!(draggable = %source, "Drag started");
        Ok(Some(DragNotification::BeginDrag))
    }

    /// Ends the drag of `source`, whether or not it was dropped.
    ///
    /// Returns `EndDrag` if a drag cycle was still open.
    pub fn drag_end(&mut self, source: &DraggableId) -> Option<DragNotification> {
        self.dragging.remove(source);
        self.drag_over.clear();
        self.dragged.take().map(|_| {
            tracing::debug!(draggable = %source, "Drag ended without drop");
            DragNotification::EndDrag
        })
    }

    /// State of one draggable.
    #[must_use]
    pub fn drag_state(&self, source: &DraggableId) -> DragState {
        if self.dragging.contains(source) {
            DragState::Dragging
        } else {
            DragState::Idle
        }
    }

    /// Returns true while a drag cycle is open.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    /// The component being dragged, if any.
    #[must_use]
    pub fn dragged(&self) -> Option<&H> {
        self.dragged.as_ref()
    }

    // ------------------------------------------------------------------
    // Dropzone events
    // ------------------------------------------------------------------

    /// Handles a drag entering a dropzone. Returns true if accepted.
    pub fn drag_enter(&mut self, zone: &DropzoneId) -> bool {
        self.hover(zone)
    }

    /// Handles a drag moving over a dropzone. Returns true if the host
    /// should signal that the element accepts drops.
    pub fn drag_over(&mut self, zone: &DropzoneId) -> bool {
        self.hover(zone)
    }

    fn hover(&mut self, zone: &DropzoneId) -> bool {
        if self.dragged.is_none() {
            return false;
        }
        self.drag_over.insert(zone.clone());
        true
    }

    /// Handles a native leave event on a dropzone.
    ///
    /// The leave only counts if the element now under the pointer no longer
    /// belongs to this dropzone: moving onto a child element of the same
    /// dropzone is ignored. Returns true if the drag-over state was cleared.
    pub fn drag_leave<T>(&mut self, zone: &DropzoneId, elements: &T, hovered: Option<T::Element>) -> bool
    where
        T: ElementTree + ?Sized,
    {
        if !self.pointer_outside_window {
            let still_inside = hovered
                .and_then(|element| closest_dropzone_ancestor(elements, element))
                .and_then(|element| elements.dropzone_id(element))
                .is_some_and(|hovered_zone| hovered_zone == zone);
            if still_inside {
                return false;
            }
        }
        self.drag_over.remove(zone)
    }

    /// Returns true while a drag hovers over the dropzone.
    #[must_use]
    pub fn is_drag_over(&self, zone: &DropzoneId) -> bool {
        self.drag_over.contains(zone)
    }

    /// Resolves the dropzone under the pointer to its component.
    pub fn hovered_dropzone<T>(&self, elements: &T, hovered: Option<T::Element>) -> Option<&H>
    where
        T: ElementTree + ?Sized,
    {
        if self.pointer_outside_window {
            return None;
        }
        let element = closest_dropzone_ancestor(elements, hovered?)?;
        self.dropzones.handle_of(elements.dropzone_id(element)?)
    }

    /// Handles a drop on a dropzone.
    ///
    /// Returns `Ok(None)` when no drag cycle is open (a foreign drag).
    ///
    /// # Errors
    ///
    /// Fails when the payload token is missing or unresolvable, or when the
    /// dropzone is not registered.
    pub fn drop(
        &mut self,
        zone: &DropzoneId,
        transfer: &DataTransfer,
    ) -> Result<Option<ResolvedDrop<H>>, DragDropError> {
        if self.dragged.take().is_none() {
            return Ok(None);
        }
        self.drag_over.remove(zone);

        let source = self.resolve_dropped(transfer)?.clone();
        let target = self
            .dropzones
            .handle_of(zone)
            .cloned()
            .ok_or_else(|| DragDropError::UnknownDropzone(zone.clone()))?;

        tracing::debug!(dropzone = %zone, ?source, ?target, "Drop resolved");
        Ok(Some(ResolvedDrop { source, target }))
    }

    /// Resolves the dragged component from the token in `transfer`.
    ///
    /// # Errors
    ///
    /// Returns `MissingTransferToken`, `MalformedTransferToken` or
    /// `UnknownDraggable`.
    pub fn resolve_dropped(&self, transfer: &DataTransfer) -> Result<&H, DragDropError> {
        let token = transfer
            .get_data(TRANSFER_FORMAT)
            .filter(|token| !token.is_empty())
            .ok_or(DragDropError::MissingTransferToken)?;
        let id = DraggableId::parse(token)
            .ok_or_else(|| DragDropError::MalformedTransferToken(token.to_string()))?;
        self.draggables.handle_of(&id).ok_or_else(|| {
            tracing::warn!(draggable = %id, "Dropped component is not registered");
            DragDropError::UnknownDraggable(id)
        })
    }

    /// Dropzone components currently showing a drag-over state.
    #[must_use]
    pub fn drag_over_handles(&self) -> Vec<&H> {
        self.drag_over
            .iter()
            .filter_map(|id| self.dropzones.handle_of(id))
            .collect()
    }
}
