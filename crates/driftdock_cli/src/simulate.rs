//! Headless drag-release simulation

use anyhow::{Context, Result};
use driftdock_core::{Point, Rect, UiExecutor};
use driftdock_menu::{
    FadeState, HeadlessMenuView, MenuAnimationController, MotionConfig, Position, ViewEvent,
};
use serde::Serialize;
use std::rc::Rc;
use std::time::Duration;

/// One release to replay
#[derive(Debug, Clone)]
pub struct Release {
    pub bounds: Rect,
    pub width: f32,
    /// Menu translation when the finger lifts
    pub at: Point,
    pub velocity: Point,
    /// Fade target opacity; `None` leaves the fade disabled
    pub fade: Option<f32>,
    /// Longest simulated time to wait for the menu to come to rest
    pub max_duration: Duration,
}

/// Outcome of a simulated release
#[derive(Debug, Serialize)]
pub struct ReleaseReport {
    pub docked: bool,
    /// Whether every motion and fade finished within the time limit
    pub settled: bool,
    pub elapsed_ms: u64,
    pub translation: Point,
    pub position: Option<Position>,
    pub opacity: f32,
    pub fade_state: FadeState,
    pub events: Vec<ViewEvent>,
}

pub fn run(release: &Release, config: MotionConfig) -> Result<ReleaseReport> {
    let executor = UiExecutor::new();
    executor.make_current();

    let view = Rc::new(
        HeadlessMenuView::new(release.bounds, release.width).with_translation(release.at),
    );
    let controller = MenuAnimationController::for_current_thread(view.clone(), config)
        .context("Failed to create menu controller")?;

    if let Some(opacity) = release.fade {
        controller.update_opacity_with(true, opacity);
    }

    controller.on_drag_start();
    let docked = controller.maybe_dock_and_hide(release.at.x);
    if !docked {
        controller.fling_then_spring_to_edge(release.at.x, release.velocity.x, release.velocity.y);
    }

    let settled = executor.run_until_idle(release.max_duration);
    if !settled {
        tracing::warn!(
            limit_ms = release.max_duration.as_millis() as u64,
            "menu still moving when the simulation stopped"
        );
    }

    let report = ReleaseReport {
        docked,
        settled,
        elapsed_ms: executor.now().as_millis() as u64,
        translation: view.translation_point(),
        position: controller.position(),
        opacity: controller.opacity(),
        fade_state: controller.fade_state(),
        events: view.take_events(),
    };

    drop(controller);
    UiExecutor::clear_current();
    Ok(report)
}
