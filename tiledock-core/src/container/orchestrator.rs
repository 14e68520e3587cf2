//! The layout container
//!
//! Owns the tree and everything keyed on it: the active tab table, the
//! drag-and-drop coordinator, region bounds, the border resize machine and
//! the content host set. Every structural change goes through
//! [`LayoutContainer::store_layout`], which reconciles the active tab table
//! and notifies observers when the tree changed by reference.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::Arc;

use super::error::{ContainerError, ContainerResult};
use super::handle::{DragAttributes, DropOutcome, RegionHandle};
use super::renderers::{ContentHostPlan, RendererSet, Renderers};
use crate::config::LayoutSettings;
use crate::drag_drop::{
    DataTransfer, DragDropCoordinator, DragNotification, DraggableId, DropzoneAttributes,
    DropzoneId, ElementTree,
};
use crate::geometry::{DROP_REGION_LENGTH_PX, DropRegion, Point, Rect, drop_region_with_band};
use crate::layout::{
    ActiveTabState, ContainerKind, ContentContainerId, DropTarget, ItemId, LayoutError,
    LayoutNode, NodeRef, TabRef, apply_drop, apply_remove, count_instances, find, insert,
    parent_tab_group, set_split_weights,
};
use crate::resize::{BorderResizeMachine, ResizeEffect, ResizeTarget, ResizeTransition};
use crate::tracing::span_names;

type LayoutChangeCallback = Box<dyn FnMut(Option<&NodeRef>)>;
type ActiveTabCallback = Box<dyn FnMut(&ActiveTabState)>;
type ConfirmCloseHook = Box<dyn FnMut(&ItemId) -> bool>;
type TabStripDoubleClickHook = Box<dyn FnMut(&ItemId) -> Option<TabRef>>;

/// Orchestrates a recursive tile/tab layout.
///
/// `R` is whatever the host uses to render content (a constructor, a
/// widget factory, a plain type tag); the container only stores and looks
/// it up.
pub struct LayoutContainer<R> {
    root: Option<NodeRef>,
    active_tabs: ActiveTabState,
    coordinator: DragDropCoordinator<RegionHandle>,
    bounds: HashMap<ItemId, Rect>,
    resize: BorderResizeMachine,
    renderers: RendererSet<R>,
    mounted: BTreeSet<ContentContainerId>,
    pending_focus: VecDeque<ItemId>,
    is_dragging: bool,
    drop_region_band: f64,
    on_layout_change: Option<LayoutChangeCallback>,
    on_active_tab_state_change: Option<ActiveTabCallback>,
    confirm_close: Option<ConfirmCloseHook>,
    on_double_click_tab_strip: Option<TabStripDoubleClickHook>,
}

impl<R> LayoutContainer<R> {
    /// Creates a container for `layout`.
    ///
    /// # Errors
    ///
    /// Returns `MissingRenderer` if the layout references a renderer type
    /// absent from `tiles` (bodies) or `tabs` (labels).
    pub fn new(
        layout: Option<NodeRef>,
        tiles: Renderers<R>,
        tabs: Renderers<R>,
    ) -> ContainerResult<Self> {
        let renderers = RendererSet::new(tiles, tabs);
        renderers.validate(layout.as_ref())?;

        let mut container = Self {
            root: layout,
            active_tabs: ActiveTabState::new(),
            coordinator: DragDropCoordinator::new(),
            bounds: HashMap::new(),
            resize: BorderResizeMachine::new(),
            renderers,
            mounted: BTreeSet::new(),
            pending_focus: VecDeque::new(),
            is_dragging: false,
            drop_region_band: DROP_REGION_LENGTH_PX,
            on_layout_change: None,
            on_active_tab_state_change: None,
            confirm_close: None,
            on_double_click_tab_strip: None,
        };
        container.reconcile_active_tabs();
        Ok(container)
    }

    /// Restores a saved active tab table. Stale or out-of-range entries are
    /// fixed up against the current tree.
    #[must_use]
    pub fn with_active_tab_state(mut self, state: ActiveTabState) -> Self {
        self.active_tabs = state;
        self.reconcile_active_tabs();
        self
    }

    /// Applies layout settings.
    #[must_use]
    pub fn with_settings(mut self, settings: &LayoutSettings) -> Self {
        self.drop_region_band = settings.effective_band();
        self
    }

    /// Observer called with the new tree whenever it changes by reference.
    #[must_use]
    pub fn on_layout_change(mut self, callback: impl FnMut(Option<&NodeRef>) + 'static) -> Self {
        self.on_layout_change = Some(Box::new(callback));
        self
    }

    /// Observer called whenever the active tab table changes.
    #[must_use]
    pub fn on_active_tab_state_change(
        mut self,
        callback: impl FnMut(&ActiveTabState) + 'static,
    ) -> Self {
        self.on_active_tab_state_change = Some(Box::new(callback));
        self
    }

    /// Hook asked before closing a dirty tab that exists only once. Returning
    /// false keeps the tab.
    #[must_use]
    pub fn confirm_close(mut self, hook: impl FnMut(&ItemId) -> bool + 'static) -> Self {
        self.confirm_close = Some(Box::new(hook));
        self
    }

    /// Hook run on a double click in a tab strip; a returned tab is appended
    /// to that group.
    #[must_use]
    pub fn on_double_click_tab_strip(
        mut self,
        hook: impl FnMut(&ItemId) -> Option<TabRef> + 'static,
    ) -> Self {
        self.on_double_click_tab_strip = Some(Box::new(hook));
        self
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    /// The current tree, `None` once everything has been closed.
    #[must_use]
    pub fn layout(&self) -> Option<&NodeRef> {
        self.root.as_ref()
    }

    /// The active tab table.
    #[must_use]
    pub fn active_tab_state(&self) -> &ActiveTabState {
        &self.active_tabs
    }

    /// Active tab index of a group.
    #[must_use]
    pub fn active_tab_index(&self, group_id: &ItemId) -> Option<usize> {
        self.active_tabs.get(group_id)
    }

    /// Whether any tab or strip is being dragged.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Width of the edge bands used to classify body drops.
    #[must_use]
    pub fn drop_region_band(&self) -> f64 {
        self.drop_region_band
    }

    /// Read access to the drag-and-drop coordinator.
    #[must_use]
    pub fn coordinator(&self) -> &DragDropCoordinator<RegionHandle> {
        &self.coordinator
    }

    /// Renderer for a content container.
    ///
    /// # Errors
    ///
    /// Returns `MissingRenderer` if none is registered.
    pub fn renderer_for(&self, id: &ContentContainerId) -> ContainerResult<&R> {
        self.renderers.resolve(id)
    }

    /// Replaces the whole tree, as when the host loads a saved layout.
    ///
    /// # Errors
    ///
    /// Returns `MissingRenderer` and keeps the current tree if the new one
    /// references an unknown renderer type.
    pub fn replace_layout(&mut self, layout: Option<NodeRef>) -> ContainerResult<()> {
        self.renderers.validate(layout.as_ref())?;
        self.store_layout(layout);
        Ok(())
    }

    /// Stores a new tree, reconciles the active tab table and fires the
    /// change observers.
    fn store_layout(&mut self, layout: Option<NodeRef>) {
        let changed = match (&self.root, &layout) {
            (Some(old), Some(new)) => !Arc::ptr_eq(old, new),
            (None, None) => false,
            _ => true,
        };
        self.root = layout;
        if changed {
            if let Some(callback) = self.on_layout_change.as_mut() {
                callback(self.root.as_ref());
            }
        }
        self.reconcile_active_tabs();
    }

    fn reconcile_active_tabs(&mut self) {
        if self.active_tabs.reconcile(self.root.as_ref()) {
            self.notify_active_tabs();
        }
    }

    fn notify_active_tabs(&mut self) {
        if let Some(callback) = self.on_active_tab_state_change.as_mut() {
            callback(&self.active_tabs);
        }
    }

    /// Makes `index` the active tab of a group, as on a tab click.
    ///
    /// Returns true if the table changed.
    pub fn set_active_tab(&mut self, group_id: &ItemId, index: usize) -> bool {
        if !self.active_tabs.set(group_id.clone(), index) {
            return false;
        }
        self.notify_active_tabs();
        true
    }

    // ------------------------------------------------------------------
    // Content hosts
    // ------------------------------------------------------------------

    /// Diffs the content containers of the current tree against the hosts
    /// mounted so far and records the new set as mounted.
    pub fn content_host_plan(&mut self) -> ContentHostPlan {
        ContentHostPlan::diff(self.root.as_ref(), &mut self.mounted)
    }

    /// Asks for a tab label to re-render. Returns true if its host is mounted.
    pub fn update_tab(&self, renderer_type: &str, id: &ItemId) -> bool {
        let key = ContentContainerId::new(renderer_type, ContainerKind::Tab, id.clone());
        let mounted = self.mounted.contains(&key);
        if mounted {
            tracing::debug!(tab = %key.key(), "Tab re-render requested");
        }
        mounted
    }

    // ------------------------------------------------------------------
    // Region registry
    // ------------------------------------------------------------------

    /// Registers a tab; tabs are draggable and accept drops.
    pub fn register_tab(&mut self, id: ItemId, group: ItemId, index: usize) -> DragAttributes {
        self.register_draggable_zone(RegionHandle::Tab { id, group, index })
    }

    /// Registers the strip of a tab group.
    pub fn register_tab_strip(&mut self, group: ItemId) -> DragAttributes {
        self.register_draggable_zone(RegionHandle::TabStrip(group))
    }

    fn register_draggable_zone(&mut self, handle: RegionHandle) -> DragAttributes {
        DragAttributes {
            draggable: self.coordinator.mark_draggable(&handle),
            dropzone: self.coordinator.mark_dropzone(&handle),
        }
    }

    /// Registers the body of a tile or tab group together with its bounds.
    pub fn register_body(&mut self, id: ItemId, bounds: Rect) -> DropzoneAttributes {
        self.bounds.insert(id.clone(), bounds);
        self.coordinator.mark_dropzone(&RegionHandle::Body(id))
    }

    /// Records the on-screen bounds of any node, including split groups.
    pub fn set_region_bounds(&mut self, id: ItemId, bounds: Rect) {
        self.bounds.insert(id, bounds);
    }

    /// Bounds last reported for a node.
    #[must_use]
    pub fn region_bounds(&self, id: &ItemId) -> Option<Rect> {
        self.bounds.get(id).copied()
    }

    /// Forgets a region on unmount.
    pub fn unregister(&mut self, handle: &RegionHandle) {
        self.coordinator.unregister_draggable(handle);
        self.coordinator.unregister_dropzone(handle);
        if let RegionHandle::Body(id) = handle {
            self.bounds.remove(id);
        }
    }

    // ------------------------------------------------------------------
    // Drag and drop
    // ------------------------------------------------------------------

    /// Suppresses the next drag start (close buttons inside tabs).
    pub fn prevent_next_drag(&mut self) {
        self.coordinator.prevent_next_drag();
    }

    /// Window-level pointer-up.
    pub fn pointer_up(&mut self) {
        self.coordinator.pointer_up();
    }

    /// The pointer left the host window; the next drag leave clears its
    /// dropzone whatever element is reported under the pointer.
    pub fn pointer_left_window(&mut self) {
        self.coordinator.pointer_left_window();
    }

    /// The pointer came back into the host window.
    pub fn pointer_entered_window(&mut self) {
        self.coordinator.pointer_entered_window();
    }

    /// Returns true while a drag hovers over the dropzone.
    #[must_use]
    pub fn is_drag_over(&self, zone: &DropzoneId) -> bool {
        self.coordinator.is_drag_over(zone)
    }

    /// Native drag start on a registered draggable.
    ///
    /// # Errors
    ///
    /// Returns `DragDrop(UnknownDraggable)` for an unregistered id.
    pub fn drag_start(
        &mut self,
        source: &DraggableId,
        transfer: &mut DataTransfer,
    ) -> ContainerResult<()> {
        if let Some(notification) = self.coordinator.drag_start(source, transfer)? {
            self.apply_drag_notification(notification);
        }
        Ok(())
    }

    /// Native drag end on a draggable.
    pub fn drag_end(&mut self, source: &DraggableId) {
        if let Some(notification) = self.coordinator.drag_end(source) {
            self.apply_drag_notification(notification);
        }
    }

    fn apply_drag_notification(&mut self, notification: DragNotification) {
        self.is_dragging = matches!(notification, DragNotification::BeginDrag);
    }

    /// Native drag enter on a dropzone.
    pub fn drag_enter(&mut self, zone: &DropzoneId) -> bool {
        self.coordinator.drag_enter(zone)
    }

    /// Native drag over on a dropzone.
    ///
    /// For a body dropzone, returns the drop region under the pointer so the
    /// host can paint the matching indicator.
    pub fn drag_over(&mut self, zone: &DropzoneId, pointer: Point) -> Option<DropRegion> {
        if !self.coordinator.drag_over(zone) {
            return None;
        }
        match self.coordinator.dropzone_handle(zone)? {
            RegionHandle::Body(id) => self
                .bounds
                .get(id)
                .map(|bounds| drop_region_with_band(bounds, pointer, self.drop_region_band)),
            _ => None,
        }
    }

    /// Native drag leave on a dropzone.
    pub fn drag_leave<T>(&mut self, zone: &DropzoneId, elements: &T, hovered: Option<T::Element>) -> bool
    where
        T: ElementTree + ?Sized,
    {
        self.coordinator.drag_leave(zone, elements, hovered)
    }

    /// Native drop on a dropzone.
    ///
    /// # Errors
    ///
    /// Fails if the dragged component cannot be resolved or the move is
    /// rejected by the tree; the layout is left untouched.
    pub fn handle_drop(
        &mut self,
        zone: &DropzoneId,
        transfer: &DataTransfer,
        pointer: Point,
    ) -> ContainerResult<DropOutcome> {
        let _span =
            crate::trace_operation!(span_names::CONTAINER_HANDLE_DROP, dropzone = %zone).entered();
        let resolved = self.coordinator.drop(zone, transfer);
        // The gesture is over even when the payload turns out to be invalid.
        if !matches!(resolved, Ok(None)) {
            self.apply_drag_notification(DragNotification::EndDrag);
        }
        let Some(resolved) = resolved? else {
            return Ok(DropOutcome::Ignored);
        };
        self.drop_onto(&resolved.source, &resolved.target, pointer)
    }

    /// Moves the item behind `source` onto `target`.
    ///
    /// `pointer` is only used for body targets, to pick the drop region.
    ///
    /// # Errors
    ///
    /// Returns `RegionBoundsUnknown` for a body without bounds, or the
    /// layout error of the move.
    pub fn drop_onto(
        &mut self,
        source: &RegionHandle,
        target: &RegionHandle,
        pointer: Point,
    ) -> ContainerResult<DropOutcome> {
        let from_id = source.item_id().clone();
        let (to_id, drop_target) = match target {
            RegionHandle::TabStrip(group) => (group.clone(), DropTarget::append()),
            RegionHandle::Tab { group, index, .. } => {
                (group.clone(), DropTarget::TabIndex(*index as i64))
            }
            RegionHandle::Body(id) => {
                let bounds = self
                    .bounds
                    .get(id)
                    .ok_or_else(|| ContainerError::RegionBoundsUnknown(id.clone()))?;
                match drop_region_with_band(bounds, pointer, self.drop_region_band) {
                    DropRegion::Cover => match self.cover_target(id, &from_id) {
                        Some(drop_target) => (id.clone(), drop_target),
                        None => {
                            tracing::debug!(from = %from_id, to = %id, "Cover drop leaves layout unchanged");
                            return Ok(DropOutcome::Unchanged);
                        }
                    },
                    region => (id.clone(), DropTarget::DropRegion(region)),
                }
            }
        };

        let next = apply_drop(self.root.as_ref(), &from_id, &to_id, drop_target)?;
        if same_tree(self.root.as_ref(), next.as_ref()) {
            return Ok(DropOutcome::Unchanged);
        }
        tracing::debug!(from = %from_id, to = %to_id, target = %drop_target, "Drop applied");
        self.store_layout(next);
        self.pending_focus.push_back(from_id.clone());
        Ok(DropOutcome::Moved(from_id))
    }

    /// Ordinal target for a cover drop on a body, `None` when the drop
    /// should not change anything.
    fn cover_target(&self, body_id: &ItemId, from_id: &ItemId) -> Option<DropTarget> {
        let root = self.root.as_ref()?;
        let group = find(root, body_id)?.as_tab_group()?;
        if group.tabs.iter().any(|tab| &tab.id == from_id) {
            return None;
        }
        let index = self
            .active_tabs
            .get(body_id)
            .map_or(-1, |active| active as i64 + 1);
        Some(DropTarget::TabIndex(index))
    }

    // ------------------------------------------------------------------
    // Tabs
    // ------------------------------------------------------------------

    /// Closes a tab or tile.
    ///
    /// # Errors
    ///
    /// Returns the layout error if the id is absent or names a group.
    pub fn close_tab(&mut self, id: &ItemId) -> ContainerResult<()> {
        let _span = crate::trace_operation!(span_names::CONTAINER_CLOSE_TAB, id = %id).entered();
        let next = apply_remove(self.root.as_ref(), id)?;
        self.store_layout(next);
        Ok(())
    }

    /// Close button handler.
    ///
    /// When the tab is dirty and this is its only instance, the confirm hook
    /// decides. Returns true if the tab was closed.
    ///
    /// # Errors
    ///
    /// Same as [`close_tab`](Self::close_tab).
    pub fn request_close_tab(&mut self, id: &ItemId, dirty: bool) -> ContainerResult<bool> {
        if dirty && count_instances(self.root.as_ref(), id) == 1 {
            if let Some(confirm) = self.confirm_close.as_mut() {
                if !confirm(id) {
                    tracing::debug!(id = %id, "Close vetoed");
                    return Ok(false);
                }
            }
        }
        self.close_tab(id)?;
        Ok(true)
    }

    /// Appends a tab to a tab group and focuses it on the next tick.
    ///
    /// If the group already holds the tab the tree is left as it is and
    /// only the focus is queued.
    ///
    /// # Errors
    ///
    /// Returns `MissingRenderer` for an unknown tab type, `EmptyLayout`
    /// without a tree, or the layout error of the insert.
    pub fn append_tile(&mut self, group_id: &ItemId, tab: TabRef) -> ContainerResult<()> {
        let Some(root) = self.root.as_ref() else {
            return Err(LayoutError::EmptyLayout.into());
        };
        for container in [ContainerKind::Tile, ContainerKind::Tab] {
            self.renderers.resolve(&ContentContainerId::new(
                tab.renderer_type.clone(),
                container,
                tab.id.clone(),
            ))?;
        }
        let tab_id = tab.id.clone();
        let next = insert(tab, group_id, DropTarget::append(), root)?;
        self.store_layout(Some(next));
        self.pending_focus.push_back(tab_id);
        Ok(())
    }

    /// Double click on a tab strip. Returns the id of the tab the hook
    /// appended, if any.
    ///
    /// # Errors
    ///
    /// Same as [`append_tile`](Self::append_tile).
    pub fn double_click_tab_strip(&mut self, group_id: &ItemId) -> ContainerResult<Option<ItemId>> {
        let Some(tab) = self.on_double_click_tab_strip.as_mut().and_then(|hook| hook(group_id))
        else {
            return Ok(None);
        };
        let id = tab.id.clone();
        self.append_tile(group_id, tab)?;
        Ok(Some(id))
    }

    /// Makes a tab the active one of its group right away.
    ///
    /// Returns false, with a warning, if no group holds the tab.
    pub fn focus_tab(&mut self, id: &ItemId) -> bool {
        let target = self.root.as_ref().and_then(|root| {
            let group = parent_tab_group(root, id)?;
            let index = group.tabs.iter().position(|tab| &tab.id == id)?;
            Some((group.id.clone(), index))
        });
        let Some((group, index)) = target else {
            tracing::warn!(id = %id, "Could not find parent tab group of tab");
            return false;
        };
        self.set_active_tab(&group, index);
        true
    }

    /// Runs deferred work: focuses tabs moved or appended since the last
    /// tick. Returns how many were focused.
    pub fn tick(&mut self) -> usize {
        let pending: Vec<_> = self.pending_focus.drain(..).collect();
        pending.iter().filter(|id| self.focus_tab(id)).count()
    }

    /// Tabs waiting for focus on the next tick.
    #[must_use]
    pub fn pending_focus(&self) -> impl Iterator<Item = &ItemId> {
        self.pending_focus.iter()
    }

    // ------------------------------------------------------------------
    // Border resize
    // ------------------------------------------------------------------

    /// Pointer-down on the border after child `border` of a split group.
    ///
    /// # Errors
    ///
    /// Returns a layout error for an unknown group, a non-split node or a
    /// border out of range, and `RegionBoundsUnknown` when the siblings'
    /// bounds were never reported.
    pub fn begin_border_resize(
        &mut self,
        group_id: &ItemId,
        border: usize,
        pointer: Point,
    ) -> ContainerResult<ResizeTransition> {
        let root = self.root.as_ref().ok_or(LayoutError::EmptyLayout)?;
        let node = find(root, group_id).ok_or_else(|| LayoutError::ItemNotFound(group_id.clone()))?;
        let LayoutNode::SplitGroup(group) = node.as_ref() else {
            return Err(LayoutError::NotASplitGroup(group_id.clone()).into());
        };
        let (Some(before), Some(after)) = (group.items.get(border), group.items.get(border + 1))
        else {
            return Err(LayoutError::BorderOutOfRange {
                group: group_id.clone(),
                border,
            }
            .into());
        };

        let extent = |node: &NodeRef| {
            self.bounds
                .get(node.id())
                .map(|bounds| bounds.extent(group.direction))
                .ok_or_else(|| ContainerError::RegionBoundsUnknown(node.id().clone()))
        };
        let extents = (extent(before)?, extent(after)?);
        let target = ResizeTarget::new(group_id.clone(), border, group.direction);
        Ok(self.resize.pointer_down(target, pointer, extents))
    }

    /// Pointer-move during a border resize.
    pub fn move_border_resize(&mut self, pointer: Point) -> ResizeTransition {
        self.resize.pointer_move(pointer)
    }

    /// Pointer-up ending a border resize; commits the weights into the tree.
    ///
    /// # Errors
    ///
    /// Returns the layout error if the group vanished mid-gesture; the
    /// gesture still ends.
    pub fn end_border_resize(&mut self) -> ContainerResult<ResizeTransition> {
        let transition = self.resize.pointer_up();
        if let ResizeEffect::Committed { target, weights } = &transition.effect {
            let _span = crate::trace_operation!(
                span_names::RESIZE_COMMIT,
                group = %target.group,
                border = target.border
            )
            .entered();
            let root = self.root.as_ref().ok_or(LayoutError::EmptyLayout)?;
            let next = set_split_weights(root, &target.group, target.border, *weights)?;
            self.store_layout(Some(next));
        }
        Ok(transition)
    }

    /// Abandons a running border resize, as on pointer capture loss. The
    /// tree keeps its weights. Returns `None` when no resize is running.
    pub fn cancel_border_resize(&mut self) -> Option<ResizeTransition> {
        let transition = self.resize.cancel()?;
        tracing::debug!(transition = transition.transition_id, "Border resize canceled");
        Some(transition)
    }

    /// Pending weights to paint for a border while it is dragged.
    #[must_use]
    pub fn pending_weights(&self, group_id: &ItemId, border: usize) -> Option<(f64, f64)> {
        self.resize.pending_weights(group_id, border)
    }

    /// Cursor override while a border is dragged.
    #[must_use]
    pub fn resize_cursor(&self) -> Option<&'static str> {
        self.resize.cursor()
    }
}

fn same_tree(a: Option<&NodeRef>, b: Option<&NodeRef>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
