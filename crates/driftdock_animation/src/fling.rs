//! Fling (drag decay) physics
//!
//! Velocity decays exponentially under a constant friction:
//!
//! ```text
//! v(t) = v0 * e^(-f*t)
//! x(t) = x0 + v0/f * (1 - e^(-f*t))
//! ```
//!
//! where `f = friction_scalar * BASE_FRICTION`. A fling starting at `v0`
//! therefore travels at most `v0 / f` before stopping.

use crate::spring::MassState;
use crate::VELOCITY_THRESHOLD;

/// Friction applied by a fling with a friction scalar of 1.0
pub const BASE_FRICTION: f32 = 4.2;

/// A decelerating motion, optionally clamped to `[min, max]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fling {
    friction: f32,
    min: f32,
    max: f32,
    state: MassState,
}

impl Fling {
    /// Create an unbounded fling from `start_value` at `start_velocity`
    pub fn new(start_value: f32, start_velocity: f32, friction_scalar: f32) -> Self {
        Self {
            friction: friction_scalar.max(f32::EPSILON) * BASE_FRICTION,
            min: f32::NEG_INFINITY,
            max: f32::INFINITY,
            state: MassState {
                value: start_value,
                velocity: start_velocity,
            },
        }
    }

    /// Clamp the motion to `[min, max]`; reaching either bound ends it
    pub fn with_bounds(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Total friction (`friction_scalar * BASE_FRICTION`)
    pub fn friction(&self) -> f32 {
        self.friction
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn value(&self) -> f32 {
        self.state.value
    }

    pub fn velocity(&self) -> f32 {
        self.state.velocity
    }

    /// Advance by `dt` seconds. Returns true once the fling has stopped, either
    /// by slowing below the velocity threshold or by reaching a bound. The
    /// remaining velocity is kept so a follow-up motion can carry it on.
    pub fn step(&mut self, dt: f32) -> bool {
        let decay = (-self.friction * dt.max(0.0)).exp();
        let velocity = self.state.velocity * decay;
        let value = self.state.value + self.state.velocity / self.friction * (1.0 - decay);

        self.state = MassState {
            value: value.min(self.max).max(self.min),
            velocity,
        };
        self.is_at_equilibrium()
    }

    fn is_at_equilibrium(&self) -> bool {
        self.state.value >= self.max
            || self.state.value <= self.min
            || self.state.velocity.abs() < VELOCITY_THRESHOLD
    }

    /// Distance a fling starting at `velocity` covers before stopping,
    /// ignoring the velocity threshold and bounds
    pub fn travel(velocity: f32, friction_scalar: f32) -> f32 {
        velocity / (friction_scalar.max(f32::EPSILON) * BASE_FRICTION)
    }

    /// Start velocity needed to cover `distance` (signed)
    pub fn velocity_to_travel(distance: f32, friction_scalar: f32) -> f32 {
        distance * friction_scalar * BASE_FRICTION
    }
}
