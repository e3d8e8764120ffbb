//! Integration tests: drag release to resting position
//!
//! Drives the controller against a headless view on a virtual clock and
//! checks where the menu ends up, what the view was told, and how the idle
//! fade follows the motion.

use driftdock_core::{Axis, Point, Rect, UiExecutor};
use driftdock_menu::{
    FadeState, HeadlessMenuView, MenuAnimationController, MotionConfig, Position, ViewEvent,
};
use std::rc::Rc;
use std::time::Duration;

const BOUNDS: Rect = Rect::new(0.0, 0.0, 500.0, 1000.0);
const MENU_WIDTH: f32 = 80.0;

struct Harness {
    executor: UiExecutor,
    view: Rc<HeadlessMenuView>,
    controller: MenuAnimationController,
}

impl Harness {
    fn at(point: Point) -> Self {
        let executor = UiExecutor::new();
        let view = Rc::new(HeadlessMenuView::new(BOUNDS, MENU_WIDTH).with_translation(point));
        let controller =
            MenuAnimationController::new(view.clone(), executor.clone(), MotionConfig::default());
        Self {
            executor,
            view,
            controller,
        }
    }

    /// Advance frame by frame until both axes are at rest
    fn settle(&self) {
        let mut frames = 0;
        while self.controller.is_animating() {
            self.executor.advance_by(self.executor.frame_interval());
            frames += 1;
            assert!(frames < 1_000, "menu never came to rest");
        }
    }

    fn persisted_events(&self) -> Vec<Position> {
        self.view
            .events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::PositionPersisted { position } => Some(position),
                _ => None,
            })
            .collect()
    }
}

#[test]
fn test_fast_release_right_settles_on_right_edge() {
    let harness = Harness::at(Point::new(400.0, 300.0));

    harness.controller.fling_then_spring_to_edge(400.0, 2_000.0, 0.0);
    assert!(harness.controller.is_animating());
    harness.settle();

    assert_eq!(harness.view.translation_point(), Point::new(500.0, 300.0));
    assert_eq!(harness.controller.position(), Some(Position::new(1.0, 0.3)));
    assert_eq!(harness.view.persisted(), Some(Position::new(1.0, 0.3)));
    assert!(!harness.controller.is_docked());
}

#[test]
fn test_throw_into_edge_carries_momentum_into_settle() {
    let harness = Harness::at(Point::new(400.0, 300.0));

    harness.controller.fling_then_spring_to_edge(400.0, 5_000.0, 0.0);

    let mut furthest: f32 = 0.0;
    let mut frames = 0;
    while harness.controller.is_animating() {
        harness.executor.advance_by(harness.executor.frame_interval());
        furthest = furthest.max(harness.view.translation_point().x);
        frames += 1;
        assert!(frames < 1_000, "menu never came to rest");
    }

    // The fling stops at the edge still moving, so the spring swings past it.
    assert!(furthest > 510.0, "furthest x = {}", furthest);
    assert_eq!(harness.view.translation_point().x, 500.0);
    assert_eq!(harness.controller.position().map(|p| p.percent_x()), Some(1.0));
}

#[test]
fn test_slow_release_on_left_returns_to_left_edge() {
    let harness = Harness::at(Point::new(100.0, 200.0));

    harness.controller.fling_then_spring_to_edge(100.0, 500.0, 800.0);
    harness.settle();

    let resting = harness.view.translation_point();
    assert_eq!(resting.x, 0.0);
    assert!(resting.y > 250.0 && resting.y < 350.0, "y = {}", resting.y);

    let position = harness.controller.position().unwrap();
    assert_eq!(position.percent_x(), 0.0);
    assert!((position.percent_y() - resting.y / 1000.0).abs() < 1e-6);
}

#[test]
fn test_hard_throw_left_escapes_right_side() {
    let harness = Harness::at(Point::new(400.0, 300.0));

    harness.controller.fling_then_spring_to_edge(400.0, -3_000.0, 0.0);
    harness.settle();

    assert_eq!(harness.view.translation_point().x, 0.0);
    assert_eq!(harness.controller.position().map(|p| p.percent_x()), Some(0.0));
}

#[test]
fn test_vertical_fling_is_clamped_into_bounds() {
    let harness = Harness::at(Point::new(100.0, 950.0));

    harness.controller.fling_then_spring_to_edge(100.0, 0.0, 5_000.0);
    harness.settle();

    assert_eq!(harness.view.translation_point(), Point::new(0.0, 1000.0));
    assert_eq!(harness.controller.position(), Some(Position::new(0.0, 1.0)));
}

#[test]
fn test_menu_below_region_springs_back_inside() {
    let harness = Harness::at(Point::new(100.0, 1_100.0));

    harness.controller.fling_then_spring_to_edge(100.0, 0.0, 0.0);
    harness.settle();

    assert_eq!(harness.view.translation_point().y, 1_000.0);
}

#[test]
fn test_settle_reports_bounds_before_persisting() {
    let harness = Harness::at(Point::new(400.0, 300.0));

    harness.controller.fling_then_spring_to_edge(400.0, 2_000.0, 0.0);
    harness.settle();

    let events = harness.view.events();
    let last_two = &events[events.len() - 2..];
    assert_eq!(
        last_two,
        [
            ViewEvent::BoundsInParentChanged { x: 500, y: 300 },
            ViewEvent::PositionPersisted {
                position: Position::new(1.0, 0.3)
            },
        ]
    );
}

#[test]
fn test_cancel_all_motion_leaves_both_axes_idle() {
    let harness = Harness::at(Point::new(400.0, 300.0));

    harness.controller.fling_then_spring_to_edge(400.0, 2_000.0, 1_500.0);
    harness.executor.advance_by(Duration::from_millis(48));
    let moved_to = harness.view.translation_point();

    harness.controller.cancel_all_motion();
    harness.controller.cancel_all_motion();

    assert!(!harness.controller.motion(Axis::X).is_running());
    assert!(!harness.controller.motion(Axis::Y).is_running());
    assert!(harness.executor.is_idle());

    harness.executor.advance_by(Duration::from_secs(1));
    assert_eq!(harness.view.translation_point(), moved_to);
    assert!(harness.persisted_events().is_empty());
    assert_eq!(harness.controller.position(), None);
}

#[test]
fn test_second_release_replaces_first() {
    let harness = Harness::at(Point::new(400.0, 300.0));

    harness.controller.fling_then_spring_to_edge(400.0, 2_000.0, 0.0);
    harness.executor.advance_by(Duration::from_millis(48));

    let x = harness.view.translation_point().x;
    harness.controller.fling_then_spring_to_edge(x, -3_000.0, 0.0);
    harness.settle();

    assert_eq!(harness.view.translation_point().x, 0.0);
    let persisted = harness.persisted_events();
    assert_eq!(persisted.last().map(|p| p.percent_x()), Some(0.0));
}

#[test]
fn test_release_inside_region_does_not_dock() {
    let harness = Harness::at(Point::new(490.0, 300.0));
    harness.controller.update_opacity_with(true, 0.5);

    assert!(!harness.controller.maybe_dock_and_hide(490.0));
    assert!(!harness.controller.is_docked());
    assert_eq!(harness.controller.fade_state(), FadeState::Pending);
    assert_eq!(harness.view.translation_point(), Point::new(490.0, 300.0));
    assert!(harness.view.events().is_empty());
}

#[test]
fn test_release_past_right_edge_docks_half_hidden() {
    let harness = Harness::at(Point::new(520.0, 300.0));
    harness.controller.update_opacity_with(true, 0.5);

    assert!(harness.controller.maybe_dock_and_hide(520.0));
    assert!(harness.controller.is_docked());
    assert_eq!(
        harness.view.translation_point(),
        Point::new(500.0 + MENU_WIDTH / 2.0, 300.0)
    );
    assert_eq!(
        harness.view.events(),
        vec![
            ViewEvent::BoundsInParentChanged { x: 540, y: 300 },
            ViewEvent::PositionPersisted {
                position: Position::new(1.0, 0.3)
            },
            ViewEvent::BoundsInParentChanged { x: 500, y: 300 },
        ]
    );
    assert_eq!(harness.controller.fade_state(), FadeState::Pending);
}

#[test]
fn test_release_past_left_edge_docks_on_left() {
    let harness = Harness::at(Point::new(-30.0, 1_200.0));

    assert!(harness.controller.maybe_dock_and_hide(-30.0));
    assert_eq!(
        harness.view.translation_point(),
        Point::new(-MENU_WIDTH / 2.0, 1000.0)
    );
    assert_eq!(harness.controller.position(), Some(Position::new(0.0, 1.0)));
}

#[test]
fn test_fade_follows_settle() {
    let harness = Harness::at(Point::new(400.0, 300.0));
    harness.controller.update_opacity_with(true, 0.4);

    harness.controller.fling_then_spring_to_edge(400.0, 2_000.0, 0.0);
    harness.settle();
    assert_eq!(harness.controller.fade_state(), FadeState::Pending);
    assert_eq!(harness.view.alpha(), 1.0);

    harness.executor.advance_by(Duration::from_millis(2_900));
    assert_eq!(harness.view.alpha(), 1.0);

    assert!(harness.executor.run_until_idle(Duration::from_secs(5)));
    assert_eq!(harness.controller.fade_state(), FadeState::Faded);
    assert_eq!(harness.view.alpha(), 0.4);
    assert_eq!(harness.controller.opacity(), 0.4);
}

#[test]
fn test_drag_start_fades_back_in() {
    let harness = Harness::at(Point::new(400.0, 300.0));
    harness.controller.update_opacity_with(true, 0.4);
    harness.controller.fade_out_if_enabled();
    assert!(harness.executor.run_until_idle(Duration::from_secs(5)));
    assert_eq!(harness.view.alpha(), 0.4);

    harness.controller.on_drag_start();
    harness.controller.fade_in_now_if_enabled();

    assert_eq!(harness.view.alpha(), 1.0);
    assert_eq!(harness.view.events(), vec![ViewEvent::DraggingStart]);
}

#[test]
fn test_fade_disabled_keeps_menu_opaque() {
    let harness = Harness::at(Point::new(400.0, 300.0));
    harness.controller.update_opacity_with(false, 0.4);

    harness.controller.fling_then_spring_to_edge(400.0, 2_000.0, 0.0);
    assert!(harness.executor.run_until_idle(Duration::from_secs(10)));

    assert_eq!(harness.controller.fade_state(), FadeState::Idle);
    assert_eq!(harness.view.alpha(), 1.0);
}

#[test]
fn test_persisted_position_survives_rotation() {
    let harness = Harness::at(Point::new(400.0, 300.0));
    harness.controller.fling_then_spring_to_edge(400.0, 2_000.0, 0.0);
    harness.settle();

    let rotated = Rect::new(0.0, 0.0, 1_000.0, 500.0);
    harness.view.set_bounds(rotated);

    let position = harness.controller.position().unwrap();
    harness.controller.move_and_persist(position.to_pixels(&rotated));

    assert_eq!(harness.view.translation_point(), Point::new(1_000.0, 150.0));
    assert_eq!(harness.view.persisted(), Some(position));
}
