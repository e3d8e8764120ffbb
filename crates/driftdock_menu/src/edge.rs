//! Edge decisions: which way a release flings, and where a docked menu rests

use crate::config::MotionConfig;
use driftdock_animation::Fling;
use driftdock_core::{Axis, Point, Rect};
use serde::{Deserialize, Serialize};

/// Horizontal edge of the draggable region
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Left,
    Right,
}

impl Edge {
    /// Side of the region that `x` currently sits on
    pub fn nearest(x: f32, bounds: &Rect) -> Self {
        if is_on_left_side(x, bounds) {
            Edge::Left
        } else {
            Edge::Right
        }
    }

    /// x coordinate of this edge in `bounds`
    pub fn x_in(self, bounds: &Rect) -> f32 {
        match self {
            Edge::Left => bounds.left,
            Edge::Right => bounds.right,
        }
    }
}

pub fn is_on_left_side(x: f32, bounds: &Rect) -> bool {
    x < bounds.center_x()
}

/// Whether a release with `velocity_x` heads for the left edge.
///
/// A menu on the left half stays left unless thrown right faster than the
/// escape velocity; a menu on the right half goes left only when thrown left
/// faster than it.
pub fn should_fling_left(
    current_x: f32,
    velocity_x: f32,
    bounds: &Rect,
    escape_velocity: f32,
) -> bool {
    if is_on_left_side(current_x, bounds) {
        velocity_x < escape_velocity
    } else {
        velocity_x < -escape_velocity
    }
}

/// True when `x` lies outside the horizontal span of `bounds`
pub fn is_outside(x: f32, bounds: &Rect) -> bool {
    !bounds.contains_x(x)
}

/// Horizontal fling plan for a drag release
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeFling {
    pub toward: Edge,
    /// Where the settle spring puts the menu
    pub target_x: f32,
    /// Fling start velocity, raised if needed so the fling reaches the edge
    pub start_velocity: f32,
}

impl EdgeFling {
    /// Plan the x fling for a release at `release_x`.
    ///
    /// `current_x` is the displayed translation, used to pick the side.
    pub fn plan(
        current_x: f32,
        release_x: f32,
        velocity_x: f32,
        bounds: &Rect,
        config: &MotionConfig,
    ) -> Self {
        let fling_left = should_fling_left(current_x, velocity_x, bounds, config.escape_velocity);
        let toward = if fling_left { Edge::Left } else { Edge::Right };
        let target_x = toward.x_in(bounds);

        let minimum_velocity =
            Fling::velocity_to_travel(target_x - release_x, config.fling_friction_scalar);
        let start_velocity = if fling_left {
            minimum_velocity.min(velocity_x)
        } else {
            minimum_velocity.max(velocity_x)
        };

        Self {
            toward,
            target_x,
            start_velocity,
        }
    }
}

/// Fling clamp range on `axis`, widened so it always contains `current`
pub fn fling_range(axis: Axis, current: f32, bounds: &Rect) -> (f32, f32) {
    let (low, high) = bounds.range(axis);
    (current.min(low), current.max(high))
}

/// Resting point of a menu docked against the edge on its current side.
///
/// Half the menu stays visible past the edge; y is pulled back inside the
/// region.
pub fn docked_position(current: Point, width: f32, bounds: &Rect) -> (Edge, Point) {
    let edge = Edge::nearest(current.x, bounds);
    let half_width = width / 2.0;
    let x = match edge {
        Edge::Left => bounds.left - half_width,
        Edge::Right => bounds.right + half_width,
    };
    (edge, Point::new(x, bounds.constrain(Axis::Y, current.y)))
}
