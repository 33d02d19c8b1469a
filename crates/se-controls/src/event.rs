//! Controller notifications
//!
//! The controller queues events instead of calling back into the
//! host; hosts drain the queue once per frame (after pumping pointer
//! input) and react, e.g. re-sync physics on `ObjectChanged` or
//! disable orbit controls between `DragStart` and `DragEnd`.

use std::collections::VecDeque;

use crate::axis::{GizmoAxis, GizmoMode, GizmoSpace};

/// A notification emitted by the transform controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoEvent {
    /// Any visual or configuration state changed.
    Changed,
    /// The attached node's local transform was mutated.
    ObjectChanged,
    /// A drag began on a handle.
    DragStart(GizmoMode),
    /// A drag ended.
    DragEnd(GizmoMode),
    /// The manipulation mode changed.
    ModeChanged(GizmoMode),
    /// The coordinate space changed.
    SpaceChanged(GizmoSpace),
    /// The hovered/active axis changed.
    AxisChanged(Option<GizmoAxis>),
}

/// FIFO queue of pending events.
#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    events: VecDeque<GizmoEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: GizmoEvent) {
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = GizmoEvent> + '_ {
        self.events.drain(..)
    }
}
