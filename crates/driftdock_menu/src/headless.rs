//! In-memory menu view
//!
//! Keeps translation, alpha and bounds in plain fields and records every
//! callback the controller makes. Used by the CLI simulator and the tests.

use crate::position::Position;
use crate::view::MenuView;
use driftdock_core::{Axis, Point, Rect};
use serde::Serialize;
use std::cell::RefCell;

/// A view callback, in the order the controller made it
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewEvent {
    BoundsInParentChanged { x: i32, y: i32 },
    PositionChanged,
    EdgeChangedIfNeeded,
    DraggingStart,
    PositionPersisted { position: Position },
}

#[derive(Debug)]
struct HeadlessState {
    bounds: Rect,
    translation: Point,
    width: f32,
    overscroll_disabled: bool,
    alpha: f32,
    events: Vec<ViewEvent>,
    persisted: Option<Position>,
}

#[derive(Debug)]
pub struct HeadlessMenuView {
    state: RefCell<HeadlessState>,
}

impl HeadlessMenuView {
    pub fn new(bounds: Rect, width: f32) -> Self {
        Self {
            state: RefCell::new(HeadlessState {
                bounds,
                translation: Point::new(bounds.left, bounds.top),
                width,
                overscroll_disabled: true,
                alpha: 1.0,
                events: Vec::new(),
                persisted: None,
            }),
        }
    }

    pub fn with_translation(self, translation: Point) -> Self {
        self.state.borrow_mut().translation = translation;
        self
    }

    pub fn with_overscroll_disabled(self, disabled: bool) -> Self {
        self.state.borrow_mut().overscroll_disabled = disabled;
        self
    }

    /// Replace the draggable region, e.g. after a rotation
    pub fn set_bounds(&self, bounds: Rect) {
        self.state.borrow_mut().bounds = bounds;
    }

    pub fn translation_point(&self) -> Point {
        self.state.borrow().translation
    }

    pub fn alpha(&self) -> f32 {
        self.state.borrow().alpha
    }

    /// Last position handed to persistence
    pub fn persisted(&self) -> Option<Position> {
        self.state.borrow().persisted
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.state.borrow().events.clone()
    }

    /// Drain the recorded events
    pub fn take_events(&self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.state.borrow_mut().events)
    }

    fn record(&self, event: ViewEvent) {
        self.state.borrow_mut().events.push(event);
    }
}

impl MenuView for HeadlessMenuView {
    fn draggable_bounds(&self) -> Rect {
        self.state.borrow().bounds
    }

    fn translation(&self, axis: Axis) -> f32 {
        self.state.borrow().translation.on(axis)
    }

    fn set_translation(&self, axis: Axis, value: f32) {
        let mut state = self.state.borrow_mut();
        match axis {
            Axis::X => state.translation.x = value,
            Axis::Y => state.translation.y = value,
        }
    }

    fn width(&self) -> f32 {
        self.state.borrow().width
    }

    fn is_overscroll_disabled(&self) -> bool {
        self.state.borrow().overscroll_disabled
    }

    fn set_alpha(&self, alpha: f32) {
        self.state.borrow_mut().alpha = alpha;
    }

    fn on_bounds_in_parent_changed(&self, x: i32, y: i32) {
        self.record(ViewEvent::BoundsInParentChanged { x, y });
    }

    fn on_position_changed(&self) {
        self.record(ViewEvent::PositionChanged);
    }

    fn on_edge_changed_if_needed(&self) {
        self.record(ViewEvent::EdgeChangedIfNeeded);
    }

    fn on_dragging_start(&self) {
        self.record(ViewEvent::DraggingStart);
    }

    fn persist_position_and_update_edge(&self, position: Position) {
        let mut state = self.state.borrow_mut();
        state.persisted = Some(position);
        state.events.push(ViewEvent::PositionPersisted { position });
    }
}
