//! Floating menu motion controller
//!
//! Turns drag releases into motion: each axis flings, then springs to rest.
//! The x spring always lands on an edge of the draggable region; the y spring
//! lands where the fling stopped, pulled back inside the region. Once at
//! rest the position is reported, persisted and the idle fade is armed.
//!
//! A release past the region's horizontal span docks the menu half hidden
//! against that edge instead.

use crate::config::MotionConfig;
use crate::edge::{self, EdgeFling};
use crate::error::Result;
use crate::fade::{FadeScheduler, FadeState};
use crate::position::Position;
use crate::view::{MenuTranslation, MenuView};
use driftdock_animation::AxisMotion;
use driftdock_core::{Axis, Point, UiExecutor};
use std::cell::Cell;
use std::rc::{Rc, Weak};

struct ControllerInner {
    view: Rc<dyn MenuView>,
    config: MotionConfig,
    x: AxisMotion<MenuTranslation>,
    y: AxisMotion<MenuTranslation>,
    fade: FadeScheduler,
    docked: Cell<bool>,
    position: Cell<Option<Position>>,
}

/// Orchestrates position motion, edge docking and the idle fade of a
/// floating menu
///
/// Dropping the controller cancels its motions and any pending fade.
pub struct MenuAnimationController {
    inner: Rc<ControllerInner>,
}

impl MenuAnimationController {
    pub fn new(view: Rc<dyn MenuView>, executor: UiExecutor, config: MotionConfig) -> Self {
        let axis_motion = |axis| {
            AxisMotion::new(
                Rc::new(MenuTranslation::new(view.clone(), axis)),
                executor.clone(),
            )
        };
        let x = axis_motion(Axis::X);
        let y = axis_motion(Axis::Y);

        let alpha_view = view.clone();
        let fade = FadeScheduler::new(
            executor,
            config.fade_timing(),
            Rc::new(move |alpha| alpha_view.set_alpha(alpha)),
        );

        Self {
            inner: Rc::new(ControllerInner {
                view,
                config,
                x,
                y,
                fade,
                docked: Cell::new(false),
                position: Cell::new(None),
            }),
        }
    }

    /// Create a controller on the UI executor installed on this thread
    pub fn for_current_thread(view: Rc<dyn MenuView>, config: MotionConfig) -> Result<Self> {
        let executor = UiExecutor::current()?;
        Ok(Self::new(view, executor, config))
    }

    pub fn config(&self) -> &MotionConfig {
        &self.inner.config
    }

    /// Place the menu at `point` without animating
    pub fn move_to(&self, point: Point) {
        self.move_to_x(point.x);
        self.inner.view.set_translation(Axis::Y, point.y);
    }

    pub fn move_to_x(&self, x: f32) {
        self.inner.view.set_translation(Axis::X, x);
    }

    /// Move vertically only when the menu list cannot overscroll; otherwise
    /// the vertical gesture belongs to the list.
    pub fn move_to_y_if_needed(&self, y: f32) {
        if self.inner.view.is_overscroll_disabled() {
            self.inner.view.set_translation(Axis::Y, y);
        }
    }

    /// Place the menu at `point`, report it and persist it
    pub fn move_and_persist(&self, point: Point) {
        self.inner.move_and_persist(point);
    }

    /// Fling both axes from a drag release, then spring each to rest.
    ///
    /// `release_x` is where the finger left the menu; the current translation
    /// decides which side the menu starts on.
    pub fn fling_then_spring_to_edge(&self, release_x: f32, velocity_x: f32, velocity_y: f32) {
        let inner = &self.inner;
        let bounds = inner.view.draggable_bounds();
        let plan = EdgeFling::plan(
            inner.view.translation(Axis::X),
            release_x,
            velocity_x,
            &bounds,
            &inner.config,
        );
        tracing::debug!(
            release_x,
            velocity_x,
            velocity_y,
            toward = ?plan.toward,
            start_velocity = plan.start_velocity,
            "menu released"
        );

        inner.fling_then_spring(Axis::X, plan.start_velocity, Some(plan.target_x));
        inner.fling_then_spring(Axis::Y, velocity_y, None);
    }

    /// Dock the menu if it was released outside the region's horizontal span.
    ///
    /// Returns true if the menu docked; otherwise the idle fade is armed.
    pub fn maybe_dock_and_hide(&self, current_x: f32) -> bool {
        let bounds = self.inner.view.draggable_bounds();
        // `current_x` only decides whether to dock; the view's translation
        // decides where.
        if edge::is_outside(current_x, &bounds) {
            self.dock_and_hide();
            return true;
        }
        self.inner.fade.fade_out_if_enabled();
        false
    }

    /// Move the menu half past the edge on its current side and fade it
    ///
    /// The side and y come from the view's current translation, not from any
    /// release coordinate a caller checked beforehand.
    pub fn dock_and_hide(&self) {
        let inner = &self.inner;
        inner.docked.set(true);

        let bounds = inner.view.draggable_bounds();
        let (edge, resting) = edge::docked_position(inner.current(), inner.view.width(), &bounds);
        inner.move_and_persist(resting);

        // The touch region stays on the edge so the menu can be pulled back.
        inner
            .view
            .on_bounds_in_parent_changed(edge.x_in(&bounds) as i32, resting.y as i32);
        tracing::debug!(?edge, x = resting.x, y = resting.y, "menu docked");

        inner.fade.fade_out_if_enabled();
    }

    pub fn undock_and_show(&self) {
        self.inner.docked.set(false);
        self.inner.view.on_position_changed();
        self.inner.view.on_edge_changed_if_needed();
    }

    pub fn is_docked(&self) -> bool {
        self.inner.docked.get()
    }

    /// Cancel both axes. Safe to call when nothing is moving.
    pub fn cancel_all_motion(&self) {
        self.inner.x.cancel();
        self.inner.y.cancel();
    }

    pub fn on_drag_start(&self) {
        self.inner.view.on_dragging_start();
    }

    pub fn update_opacity_with(&self, fade_enabled: bool, opacity: f32) {
        self.inner.fade.update_opacity_with(fade_enabled, opacity);
    }

    pub fn fade_in_now_if_enabled(&self) {
        self.inner.fade.fade_in_now_if_enabled();
    }

    pub fn fade_out_if_enabled(&self) {
        self.inner.fade.fade_out_if_enabled();
    }

    pub fn motion(&self, axis: Axis) -> &AxisMotion<MenuTranslation> {
        self.inner.motion(axis)
    }

    pub fn is_animating(&self) -> bool {
        self.inner.x.is_running() || self.inner.y.is_running()
    }

    /// Last persisted position, if the menu has come to rest yet
    pub fn position(&self) -> Option<Position> {
        self.inner.position.get()
    }

    pub fn opacity(&self) -> f32 {
        self.inner.fade.opacity()
    }

    pub fn fade_state(&self) -> FadeState {
        self.inner.fade.state()
    }
}

impl Drop for MenuAnimationController {
    fn drop(&mut self) {
        self.cancel_all_motion();
        self.inner.fade.cancel();
    }
}

impl ControllerInner {
    fn motion(&self, axis: Axis) -> &AxisMotion<MenuTranslation> {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    fn current(&self) -> Point {
        Point::new(self.view.translation(Axis::X), self.view.translation(Axis::Y))
    }

    fn fling_then_spring(self: &Rc<Self>, axis: Axis, velocity: f32, target: Option<f32>) {
        let motion = self.motion(axis);
        let bounds = self.view.draggable_bounds();
        let (low, high) = bounds.range(axis);
        let (min, max) = edge::fling_range(axis, self.view.translation(axis), &bounds);

        let weak: Weak<Self> = Rc::downgrade(self);
        motion.start_fling(velocity, self.config.fling_friction_scalar, min, max, move |end| {
            if end.cancelled {
                tracing::trace!(?axis, "fling cancelled; no settle");
                return;
            }
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let target = target.unwrap_or_else(|| end.value.min(high).max(low));
            inner.spring_to(axis, end.velocity, target);
        });
    }

    fn spring_to(self: &Rc<Self>, axis: Axis, velocity: f32, target: f32) {
        let weak: Weak<Self> = Rc::downgrade(self);
        self.motion(axis)
            .start_spring(self.config.settle_spring(), velocity, target, move |end| {
                if end.cancelled || (end.value - target).abs() > f32::EPSILON {
                    return;
                }
                if let Some(inner) = weak.upgrade() {
                    tracing::trace!(?axis, value = end.value, "spring settled");
                    inner.on_spring_settled();
                }
            });
    }

    fn on_spring_settled(&self) {
        let resting = self.current();
        self.view
            .on_bounds_in_parent_changed(resting.x as i32, resting.y as i32);
        self.persist(resting);
        self.fade.fade_out_if_enabled();
    }

    fn move_and_persist(&self, point: Point) {
        self.view.set_translation(Axis::X, point.x);
        self.view.set_translation(Axis::Y, point.y);
        self.view
            .on_bounds_in_parent_changed(point.x as i32, point.y as i32);
        self.persist(point);
    }

    fn persist(&self, point: Point) {
        let bounds = self.view.draggable_bounds();
        let position = Position::from_pixels(point, &bounds);
        self.position.set(Some(position));
        self.view.persist_position_and_update_edge(position);
    }
}
