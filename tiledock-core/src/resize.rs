//! Border resize lifecycle
//!
//! A pointer-down on the border between two siblings of a split group
//! starts a gesture; every move recomputes the pair's pending weights from
//! the net pointer delta; pointer-up commits them. The machine is pure: it
//! never touches the layout tree, the container commits the final weights.
//!
//! ```text
//! Idle -> Resizing -> Idle
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::layout::{ItemId, SplitDirection};

/// Cursor shown while resizing a row border.
pub const CURSOR_EW_RESIZE: &str = "ew-resize";
/// Cursor shown while resizing a column border.
pub const CURSOR_NS_RESIZE: &str = "ns-resize";

/// Cursor override for a resize along `direction`.
#[must_use]
pub const fn resize_cursor(direction: SplitDirection) -> &'static str {
    match direction {
        SplitDirection::Row => CURSOR_EW_RESIZE,
        SplitDirection::Column => CURSOR_NS_RESIZE,
    }
}

/// The border being dragged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeTarget {
    /// Split group owning the border.
    pub group: ItemId,
    /// Border index: between `items[border]` and `items[border + 1]`.
    pub border: usize,
    /// Axis of the split group.
    pub direction: SplitDirection,
}

impl ResizeTarget {
    /// Creates a target.
    #[must_use]
    pub fn new(group: ItemId, border: usize, direction: SplitDirection) -> Self {
        Self {
            group,
            border,
            direction,
        }
    }

    fn axis_delta(&self, origin: Point, position: Point) -> f64 {
        match self.direction {
            SplitDirection::Row => position.x - origin.x,
            SplitDirection::Column => position.y - origin.y,
        }
    }
}

/// Lifecycle state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResizeState {
    /// No gesture.
    #[default]
    Idle,
    /// A border is being dragged.
    Resizing {
        /// Border being dragged.
        target: ResizeTarget,
        /// Pointer position at pointer-down.
        origin: Point,
        /// Pixel extent of the sibling before the border at pointer-down.
        start_a: f64,
        /// Pixel extent of the sibling after the border at pointer-down.
        start_b: f64,
        /// Weights to paint until the gesture commits.
        pending: (f64, f64),
    },
}

/// Why an event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeNoopReason {
    /// Move or up without a gesture.
    IdleWithoutActiveResize,
    /// Pointer-down while a gesture is running.
    ResizeAlreadyInProgress,
}

/// What one event did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ResizeEffect {
    /// A gesture started; the host should apply the cursor override.
    Started {
        /// Border being dragged.
        target: ResizeTarget,
        /// Cursor override.
        cursor: String,
    },
    /// Pending weights changed.
    Updated {
        /// Border being dragged.
        target: ResizeTarget,
        /// New pending weights.
        weights: (f64, f64),
    },
    /// The gesture ended; the host should clear the cursor override and
    /// write `weights` into the tree.
    Committed {
        /// Border that was dragged.
        target: ResizeTarget,
        /// Final weights.
        weights: (f64, f64),
    },
    /// The gesture was abandoned without committing.
    Canceled {
        /// Border that was dragged.
        target: ResizeTarget,
    },
    /// The event was ignored.
    Noop {
        /// Why.
        reason: ResizeNoopReason,
    },
}

/// One state-machine step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeTransition {
    /// Monotonic step counter.
    pub transition_id: u64,
    /// State before the event.
    pub from: ResizeState,
    /// State after the event.
    pub to: ResizeState,
    /// Effect of the event.
    pub effect: ResizeEffect,
}

/// Runtime lifecycle machine for border resizing.
#[derive(Debug, Clone, Default)]
pub struct BorderResizeMachine {
    state: ResizeState,
    transition_counter: u64,
}

impl BorderResizeMachine {
    /// Creates an idle machine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &ResizeState {
        &self.state
    }

    /// Whether a gesture is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, ResizeState::Resizing { .. })
    }

    /// Cursor override to show, if any.
    #[must_use]
    pub fn cursor(&self) -> Option<&'static str> {
        match &self.state {
            ResizeState::Resizing { target, .. } => Some(resize_cursor(target.direction)),
            ResizeState::Idle => None,
        }
    }

    /// Pending weights for a group's border, if that border is being dragged.
    #[must_use]
    pub fn pending_weights(&self, group: &ItemId, border: usize) -> Option<(f64, f64)> {
        match &self.state {
            ResizeState::Resizing {
                target, pending, ..
            } if &target.group == group && target.border == border => Some(*pending),
            _ => None,
        }
    }

    /// Pointer-down on a border. `extents` are the pixel sizes of the two
    /// siblings along the split axis.
    pub fn pointer_down(
        &mut self,
        target: ResizeTarget,
        origin: Point,
        extents: (f64, f64),
    ) -> ResizeTransition {
        if self.is_active() {
            return self.noop(ResizeNoopReason::ResizeAlreadyInProgress);
        }
        let cursor = resize_cursor(target.direction).to_string();
        let to = ResizeState::Resizing {
            target: target.clone(),
            origin,
            start_a: extents.0,
            start_b: extents.1,
            pending: extents,
        };
        tracing::debug!(group = %target.group, border = target.border, "Border resize started");
        self.step(to, ResizeEffect::Started { target, cursor })
    }

    /// Pointer-move anywhere in the window.
    pub fn pointer_move(&mut self, position: Point) -> ResizeTransition {
        let ResizeState::Resizing {
            target,
            origin,
            start_a,
            start_b,
            ..
        } = &self.state
        else {
            return self.noop(ResizeNoopReason::IdleWithoutActiveResize);
        };

        let delta = target.axis_delta(*origin, position);
        let weights = (start_a + delta, start_b - delta);
        let to = ResizeState::Resizing {
            target: target.clone(),
            origin: *origin,
            start_a: *start_a,
            start_b: *start_b,
            pending: weights,
        };
        let effect = ResizeEffect::Updated {
            target: target.clone(),
            weights,
        };
        self.step(to, effect)
    }

    /// Pointer-up anywhere in the window: ends the gesture with the weights
    /// of the last move.
    pub fn pointer_up(&mut self) -> ResizeTransition {
        let ResizeState::Resizing {
            target, pending, ..
        } = &self.state
        else {
            return self.noop(ResizeNoopReason::IdleWithoutActiveResize);
        };
        let effect = ResizeEffect::Committed {
            target: target.clone(),
            weights: *pending,
        };
        self.step(ResizeState::Idle, effect)
    }

    /// Drops a running gesture without committing.
    pub fn cancel(&mut self) -> Option<ResizeTransition> {
        let ResizeState::Resizing { target, .. } = &self.state else {
            return None;
        };
        let effect = ResizeEffect::Canceled {
            target: target.clone(),
        };
        Some(self.step(ResizeState::Idle, effect))
    }

    fn noop(&mut self, reason: ResizeNoopReason) -> ResizeTransition {
        let to = self.state.clone();
        self.step(to, ResizeEffect::Noop { reason })
    }

    fn step(&mut self, to: ResizeState, effect: ResizeEffect) -> ResizeTransition {
        let from = std::mem::replace(&mut self.state, to.clone());
        self.transition_counter = self.transition_counter.saturating_add(1);
        ResizeTransition {
            transition_id: self.transition_counter,
            from,
            to,
            effect,
        }
    }
}
