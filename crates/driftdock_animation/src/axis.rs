//! Per-axis motion engine
//!
//! An [`AxisMotion`] drives one animated property with at most one live
//! motion: a fling, a spring, or nothing. Frames come from the
//! [`UiExecutor`]; every frame writes the new value to the property.
//!
//! Each motion reports its end exactly once through its listener. Starting a
//! motion cancels the one in flight first, and a cancelled motion reports
//! (with `cancelled: true`) synchronously, before the replacement runs a
//! single frame.

use crate::fling::Fling;
use crate::spring::{Spring, SpringConfig};
use driftdock_core::{TaskId, UiExecutor};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// A float property an [`AxisMotion`] reads its start value from and writes
/// every frame to
pub trait AnimatedProperty {
    fn value(&self) -> f32;
    fn set_value(&self, value: f32);
}

/// Which kind of motion is live on an axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionKind {
    Fling,
    Spring,
}

/// How a motion ended
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionEnd {
    pub value: f32,
    pub velocity: f32,
    pub cancelled: bool,
}

type EndListener = Box<dyn FnOnce(MotionEnd)>;

enum Driver {
    Fling(Fling),
    Spring(Spring),
}

impl Driver {
    fn kind(&self) -> MotionKind {
        match self {
            Driver::Fling(_) => MotionKind::Fling,
            Driver::Spring(_) => MotionKind::Spring,
        }
    }

    fn step(&mut self, dt: f32) -> bool {
        match self {
            Driver::Fling(fling) => fling.step(dt),
            Driver::Spring(spring) => spring.step(dt),
        }
    }

    fn value(&self) -> f32 {
        match self {
            Driver::Fling(fling) => fling.value(),
            Driver::Spring(spring) => spring.value(),
        }
    }

    fn velocity(&self) -> f32 {
        match self {
            Driver::Fling(fling) => fling.velocity(),
            Driver::Spring(spring) => spring.velocity(),
        }
    }
}

struct ActiveMotion {
    generation: u64,
    driver: Driver,
    /// Frame time of the previous step; `None` until the first frame
    last_frame: Option<Duration>,
    frame: Option<TaskId>,
    on_end: Option<EndListener>,
}

impl ActiveMotion {
    fn end(&self, cancelled: bool) -> MotionEnd {
        MotionEnd {
            value: self.driver.value(),
            velocity: self.driver.velocity(),
            cancelled,
        }
    }
}

#[derive(Default)]
struct AxisSlot {
    generation: u64,
    active: Option<ActiveMotion>,
}

enum FrameOutcome {
    /// First frame of the motion; only the clock was recorded
    Started,
    Moved(f32),
    Finished(MotionEnd, Option<EndListener>),
}

/// Motion state holder for one animated property
pub struct AxisMotion<P> {
    property: Rc<P>,
    executor: UiExecutor,
    slot: Rc<RefCell<AxisSlot>>,
}

impl<P> Clone for AxisMotion<P> {
    fn clone(&self) -> Self {
        Self {
            property: self.property.clone(),
            executor: self.executor.clone(),
            slot: self.slot.clone(),
        }
    }
}

impl<P: AnimatedProperty + 'static> AxisMotion<P> {
    pub fn new(property: Rc<P>, executor: UiExecutor) -> Self {
        Self {
            property,
            executor,
            slot: Rc::new(RefCell::new(AxisSlot::default())),
        }
    }

    pub fn property(&self) -> &Rc<P> {
        &self.property
    }

    /// Start a decelerating motion from the property's current value,
    /// clamped to `[min, max]`
    pub fn start_fling<F>(
        &self,
        start_velocity: f32,
        friction_scalar: f32,
        min: f32,
        max: f32,
        on_end: F,
    ) where
        F: FnOnce(MotionEnd) + 'static,
    {
        let fling = Fling::new(self.property.value(), start_velocity, friction_scalar)
            .with_bounds(min, max);
        tracing::trace!(start_velocity, friction_scalar, min, max, "fling started");
        self.start(Driver::Fling(fling), Box::new(on_end));
    }

    /// Start a spring from the property's current value toward `target`
    pub fn start_spring<F>(
        &self,
        config: SpringConfig,
        start_velocity: f32,
        target: f32,
        on_end: F,
    ) where
        F: FnOnce(MotionEnd) + 'static,
    {
        let spring = Spring::new(config, self.property.value())
            .with_velocity(start_velocity)
            .with_target(target);
        tracing::trace!(start_velocity, target, "spring started");
        self.start(Driver::Spring(spring), Box::new(on_end));
    }

    /// Stop the live motion, if any, reporting it as cancelled. Safe to call
    /// when idle.
    pub fn cancel(&self) {
        let Some(mut active) = self.slot.borrow_mut().active.take() else {
            return;
        };
        if let Some(frame) = active.frame.take() {
            self.executor.cancel(frame);
        }

        let end = active.end(true);
        tracing::debug!(kind = ?active.driver.kind(), value = end.value, "motion cancelled");
        if let Some(on_end) = active.on_end.take() {
            on_end(end);
        }
    }

    pub fn is_running(&self) -> bool {
        self.slot.borrow().active.is_some()
    }

    pub fn kind(&self) -> Option<MotionKind> {
        self.slot
            .borrow()
            .active
            .as_ref()
            .map(|active| active.driver.kind())
    }

    fn start(&self, driver: Driver, on_end: EndListener) {
        self.cancel();

        // The cancelled listener may have started a motion of its own; the
        // new motion replaces it.
        let (generation, superseded) = {
            let mut slot = self.slot.borrow_mut();
            slot.generation += 1;
            let generation = slot.generation;
            let superseded = slot.active.replace(ActiveMotion {
                generation,
                driver,
                last_frame: None,
                frame: None,
                on_end: Some(on_end),
            });
            (generation, superseded)
        };
        self.schedule_frame(generation);

        if let Some(mut superseded) = superseded {
            if let Some(frame) = superseded.frame.take() {
                self.executor.cancel(frame);
            }
            tracing::debug!(kind = ?superseded.driver.kind(), "motion superseded");
            if let Some(on_end) = superseded.on_end.take() {
                on_end(superseded.end(true));
            }
        }
    }

    fn schedule_frame(&self, generation: u64) {
        let engine = self.clone();
        let id = self
            .executor
            .request_frame(move |frame_time| engine.on_frame(generation, frame_time));

        if let Some(active) = self.slot.borrow_mut().active.as_mut() {
            if active.generation == generation {
                active.frame = Some(id);
            }
        }
    }

    fn on_frame(&self, generation: u64, frame_time: Duration) {
        let outcome = {
            let mut slot = self.slot.borrow_mut();
            let Some(active) = slot
                .active
                .as_mut()
                .filter(|active| active.generation == generation)
            else {
                return;
            };
            active.frame = None;

            match active.last_frame.replace(frame_time) {
                None => FrameOutcome::Started,
                Some(last) => {
                    let dt = frame_time.saturating_sub(last).as_secs_f32();
                    if active.driver.step(dt) {
                        let end = active.end(false);
                        let on_end = active.on_end.take();
                        slot.active = None;
                        FrameOutcome::Finished(end, on_end)
                    } else {
                        FrameOutcome::Moved(active.driver.value())
                    }
                }
            }
        };

        match outcome {
            FrameOutcome::Started => self.schedule_frame(generation),
            FrameOutcome::Moved(value) => {
                self.property.set_value(value);
                self.schedule_frame(generation);
            }
            FrameOutcome::Finished(end, on_end) => {
                self.property.set_value(end.value);
                tracing::trace!(value = end.value, velocity = end.velocity, "motion finished");
                if let Some(on_end) = on_end {
                    on_end(end);
                }
            }
        }
    }
}
