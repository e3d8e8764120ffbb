//! Collaborator interface for the floating menu view
//!
//! The controller never touches rendering or persistence itself. It reads
//! geometry through [`MenuView`] and reports every resting position, dock and
//! drag back through it.

use crate::position::Position;
use driftdock_animation::AnimatedProperty;
use driftdock_core::{Axis, Rect};
use std::rc::Rc;

/// The menu view as seen by the motion controller
///
/// Methods take `&self`; implementors hold their state behind interior
/// mutability, as they are shared with in-flight animations.
pub trait MenuView {
    /// Region the menu may be dragged within; queried fresh on every use
    fn draggable_bounds(&self) -> Rect;

    /// Current displayed offset along `axis`
    fn translation(&self, axis: Axis) -> f32;

    fn set_translation(&self, axis: Axis, value: f32);

    fn width(&self) -> f32;

    /// True when the menu's list cannot overscroll, so vertical moves belong
    /// to the menu rather than to nested scrolling
    fn is_overscroll_disabled(&self) -> bool;

    fn set_alpha(&self, alpha: f32);

    /// The menu came to rest at `(x, y)` in parent coordinates
    fn on_bounds_in_parent_changed(&self, x: i32, y: i32);

    fn on_position_changed(&self);

    fn on_edge_changed_if_needed(&self);

    fn on_dragging_start(&self);

    /// Store the normalized resting position and refresh any edge affordance
    fn persist_position_and_update_edge(&self, position: Position);
}

/// One translation axis of a [`MenuView`], animatable by an axis motion
pub struct MenuTranslation {
    view: Rc<dyn MenuView>,
    axis: Axis,
}

impl MenuTranslation {
    pub fn new(view: Rc<dyn MenuView>, axis: Axis) -> Self {
        Self { view, axis }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }
}

impl AnimatedProperty for MenuTranslation {
    fn value(&self) -> f32 {
        self.view.translation(self.axis)
    }

    fn set_value(&self, value: f32) {
        self.view.set_translation(self.axis, value);
    }
}
