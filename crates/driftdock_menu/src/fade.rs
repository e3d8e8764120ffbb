//! Idle fade for the floating menu
//!
//! After the menu comes to rest it waits out a quiet period, then fades from
//! fully opaque to the configured opacity. Any interaction cancels the fade.
//! There is a single fade slot: arming a new fade always replaces the pending
//! or running one first.

use driftdock_animation::Tween;
use driftdock_core::{TaskId, UiExecutor};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Fully opaque alpha
pub const OPAQUE: f32 = 1.0;

/// Fade-out timing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FadeTiming {
    /// Quiet period before the fade starts
    pub delay: Duration,
    /// Length of the fade itself
    pub duration: Duration,
}

impl Default for FadeTiming {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(3_000),
            duration: Duration::from_millis(1_000),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeState {
    /// No fade armed
    #[default]
    Idle,
    /// Waiting out the quiet period
    Pending,
    Fading,
    /// Resting at the target opacity
    Faded,
}

struct FadeSlot {
    enabled: bool,
    target_opacity: f32,
    opacity: f32,
    state: FadeState,
    generation: u64,
    pending: Option<TaskId>,
    frame: Option<TaskId>,
    tween: Option<(Tween, Duration)>,
}

/// Delayed, cancellable fade-out driven by a [`UiExecutor`]
///
/// Every opacity change is pushed to the sink.
#[derive(Clone)]
pub struct FadeScheduler {
    executor: UiExecutor,
    timing: FadeTiming,
    sink: Rc<dyn Fn(f32)>,
    slot: Rc<RefCell<FadeSlot>>,
}

impl FadeScheduler {
    pub fn new(executor: UiExecutor, timing: FadeTiming, sink: Rc<dyn Fn(f32)>) -> Self {
        Self {
            executor,
            timing,
            sink,
            slot: Rc::new(RefCell::new(FadeSlot {
                enabled: false,
                target_opacity: OPAQUE,
                opacity: OPAQUE,
                state: FadeState::Idle,
                generation: 0,
                pending: None,
                frame: None,
                tween: None,
            })),
        }
    }

    /// Store the fade settings, drop any fade in progress and show the menu
    /// fully opaque. The new opacity is used by the next fade-out.
    pub fn update_opacity_with(&self, enabled: bool, opacity: f32) {
        {
            let mut slot = self.slot.borrow_mut();
            slot.enabled = enabled;
            slot.target_opacity = opacity;
        }
        self.cancel();
        self.apply(OPAQUE, FadeState::Idle);
    }

    pub fn fade_in_now_if_enabled(&self) {
        if !self.is_enabled() {
            return;
        }
        self.cancel();
        self.apply(OPAQUE, FadeState::Idle);
    }

    /// Restart the quiet period; the fade begins once it passes undisturbed
    pub fn fade_out_if_enabled(&self) {
        if !self.is_enabled() {
            return;
        }
        self.cancel();

        let generation = self.slot.borrow().generation;
        let scheduler = self.clone();
        let id = self
            .executor
            .post_delayed(self.timing.delay, move || scheduler.begin_fade(generation));

        let mut slot = self.slot.borrow_mut();
        slot.pending = Some(id);
        slot.state = FadeState::Pending;
        tracing::debug!(delay_ms = self.timing.delay.as_millis() as u64, "fade-out armed");
    }

    /// Drop the pending or running fade. The current opacity is kept.
    pub fn cancel(&self) {
        let (pending, frame) = {
            let mut slot = self.slot.borrow_mut();
            slot.generation += 1;
            slot.tween = None;
            if matches!(slot.state, FadeState::Pending | FadeState::Fading) {
                slot.state = FadeState::Idle;
            }
            (slot.pending.take(), slot.frame.take())
        };
        for id in pending.into_iter().chain(frame) {
            self.executor.cancel(id);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.slot.borrow().enabled
    }

    pub fn target_opacity(&self) -> f32 {
        self.slot.borrow().target_opacity
    }

    /// Last opacity pushed to the sink
    pub fn opacity(&self) -> f32 {
        self.slot.borrow().opacity
    }

    pub fn state(&self) -> FadeState {
        self.slot.borrow().state
    }

    pub fn timing(&self) -> FadeTiming {
        self.timing
    }

    fn begin_fade(&self, generation: u64) {
        let from = {
            let mut slot = self.slot.borrow_mut();
            if slot.generation != generation {
                return;
            }
            slot.pending = None;
            let tween = Tween::new(OPAQUE, slot.target_opacity, self.timing.duration);
            slot.tween = Some((tween, self.executor.now()));
            tween.from()
        };
        tracing::trace!(duration_ms = self.timing.duration.as_millis() as u64, "fade-out started");
        self.apply(from, FadeState::Fading);
        self.schedule_frame(generation);
    }

    fn schedule_frame(&self, generation: u64) {
        let scheduler = self.clone();
        let id = self
            .executor
            .request_frame(move |frame_time| scheduler.on_frame(generation, frame_time));

        let mut slot = self.slot.borrow_mut();
        if slot.generation == generation {
            slot.frame = Some(id);
        }
    }

    fn on_frame(&self, generation: u64, frame_time: Duration) {
        let (value, finished) = {
            let mut slot = self.slot.borrow_mut();
            if slot.generation != generation {
                return;
            }
            slot.frame = None;
            let Some((tween, started)) = slot.tween else {
                return;
            };
            let elapsed = frame_time.saturating_sub(started);
            if tween.is_finished(elapsed) {
                slot.tween = None;
                (tween.to(), true)
            } else {
                (tween.sample(elapsed), false)
            }
        };

        if finished {
            self.apply(value, FadeState::Faded);
        } else {
            self.apply(value, FadeState::Fading);
            self.schedule_frame(generation);
        }
    }

    fn apply(&self, opacity: f32, state: FadeState) {
        {
            let mut slot = self.slot.borrow_mut();
            slot.opacity = opacity;
            slot.state = state;
        }
        (self.sink)(opacity);
    }
}

impl fmt::Debug for FadeScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("FadeScheduler")
            .field("timing", &self.timing)
            .field("enabled", &slot.enabled)
            .field("target_opacity", &slot.target_opacity)
            .field("opacity", &slot.opacity)
            .field("state", &slot.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Samples = Rc<RefCell<Vec<(Duration, f32)>>>;

    fn scheduler() -> (UiExecutor, FadeScheduler, Samples) {
        let executor = UiExecutor::new();
        let samples: Samples = Rc::new(RefCell::new(Vec::new()));
        let clock = executor.clone();
        let sink = samples.clone();
        let fade = FadeScheduler::new(
            executor.clone(),
            FadeTiming::default(),
            Rc::new(move |alpha| sink.borrow_mut().push((clock.now(), alpha))),
        );
        (executor, fade, samples)
    }

    #[test]
    fn test_disabled_fade_does_nothing() {
        let (executor, fade, samples) = scheduler();

        fade.fade_out_if_enabled();
        fade.fade_in_now_if_enabled();

        assert!(executor.is_idle());
        assert!(samples.borrow().is_empty());
        assert_eq!(fade.state(), FadeState::Idle);
    }

    #[test]
    fn test_update_applies_full_opacity_immediately() {
        let (executor, fade, samples) = scheduler();

        fade.update_opacity_with(true, 0.4);

        assert_eq!(*samples.borrow(), vec![(Duration::ZERO, OPAQUE)]);
        assert_eq!(fade.target_opacity(), 0.4);
        assert!(executor.is_idle());
    }

    #[test]
    fn test_fade_waits_for_quiet_period() {
        let (executor, fade, samples) = scheduler();
        fade.update_opacity_with(true, 0.4);
        samples.borrow_mut().clear();

        fade.fade_out_if_enabled();
        assert_eq!(fade.state(), FadeState::Pending);

        executor.advance_by(Duration::from_millis(2_999));
        assert!(samples.borrow().is_empty());
        assert_eq!(fade.state(), FadeState::Pending);

        executor.advance_by(Duration::from_millis(1));
        assert_eq!(fade.state(), FadeState::Fading);

        assert!(executor.run_until_idle(Duration::from_secs(5)));
        assert_eq!(fade.state(), FadeState::Faded);
        assert_eq!(fade.opacity(), 0.4);

        let samples = samples.borrow();
        assert_eq!(samples[0], (Duration::from_millis(3_000), OPAQUE));
        let (last_at, last) = samples[samples.len() - 1];
        assert_eq!(last, 0.4);
        assert!(last_at >= Duration::from_millis(4_000));
        assert!(samples.windows(2).all(|pair| pair[1].1 <= pair[0].1));
    }

    #[test]
    fn test_double_fade_out_runs_once_with_latest_target() {
        let (executor, fade, samples) = scheduler();
        fade.update_opacity_with(true, 0.6);
        fade.fade_out_if_enabled();

        executor.advance_by(Duration::from_millis(2_000));
        fade.update_opacity_with(true, 0.3);
        fade.fade_out_if_enabled();
        samples.borrow_mut().clear();

        executor.advance_by(Duration::from_millis(1_500));
        assert!(samples.borrow().is_empty());

        assert!(executor.run_until_idle(Duration::from_secs(10)));
        let samples = samples.borrow();
        assert!(samples[0].0 >= Duration::from_millis(5_000));
        assert_eq!(samples.iter().filter(|(_, alpha)| *alpha == OPAQUE).count(), 1);
        assert_eq!(samples[samples.len() - 1].1, 0.3);
    }

    #[test]
    fn test_fade_in_interrupts_running_fade() {
        let (executor, fade, _samples) = scheduler();
        fade.update_opacity_with(true, 0.2);
        fade.fade_out_if_enabled();

        executor.advance_by(Duration::from_millis(3_500));
        assert_eq!(fade.state(), FadeState::Fading);
        assert!(fade.opacity() < OPAQUE);

        fade.fade_in_now_if_enabled();
        assert_eq!(fade.opacity(), OPAQUE);
        assert_eq!(fade.state(), FadeState::Idle);
        assert!(executor.is_idle());
    }

    #[test]
    fn test_cancel_keeps_opacity_and_is_idempotent() {
        let (executor, fade, _samples) = scheduler();
        fade.update_opacity_with(true, 0.2);
        fade.fade_out_if_enabled();
        executor.advance_by(Duration::from_millis(3_500));
        let partial = fade.opacity();

        fade.cancel();
        fade.cancel();

        assert_eq!(fade.opacity(), partial);
        assert_eq!(fade.state(), FadeState::Idle);
        assert!(executor.is_idle());
    }

    #[test]
    fn test_zero_duration_fade_jumps_to_target() {
        let executor = UiExecutor::new();
        let fade = FadeScheduler::new(
            executor.clone(),
            FadeTiming {
                delay: Duration::from_millis(100),
                duration: Duration::ZERO,
            },
            Rc::new(|_: f32| {}),
        );
        fade.update_opacity_with(true, 0.5);
        fade.fade_out_if_enabled();

        assert!(executor.run_until_idle(Duration::from_secs(1)));
        assert_eq!(fade.opacity(), 0.5);
        assert_eq!(fade.state(), FadeState::Faded);
    }
}
