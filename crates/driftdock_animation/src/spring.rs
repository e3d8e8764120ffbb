//! Spring physics
//!
//! A unit-mass damped harmonic oscillator solved in closed form for each step,
//! so long frame gaps never destabilize it. Under-, critically- and
//! over-damped ratios are all supported.

use crate::{VALUE_THRESHOLD, VELOCITY_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Value and velocity of an animated mass
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MassState {
    pub value: f32,
    pub velocity: f32,
}

/// Spring tuning
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    /// 1.0 is critically damped; below bounces, above creeps
    pub damping_ratio: f32,
}

impl SpringConfig {
    pub const STIFFNESS_HIGH: f32 = 10_000.0;
    pub const STIFFNESS_MEDIUM: f32 = 1_500.0;

    pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;
    pub const DAMPING_RATIO_MEDIUM_BOUNCY: f32 = 0.5;

    pub const fn new(stiffness: f32, damping_ratio: f32) -> Self {
        Self {
            stiffness,
            damping_ratio,
        }
    }

    /// Fast, no overshoot
    pub const fn stiff() -> Self {
        Self::new(Self::STIFFNESS_HIGH, Self::DAMPING_RATIO_NO_BOUNCY)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(Self::STIFFNESS_MEDIUM, Self::DAMPING_RATIO_MEDIUM_BOUNCY)
    }
}

/// A spring pulling a value toward its target
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    state: MassState,
    target: f32,
}

impl Spring {
    /// Create a spring resting at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            state: MassState {
                value: initial,
                velocity: 0.0,
            },
            target: initial,
        }
    }

    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.state.velocity = velocity;
        self
    }

    pub fn with_target(mut self, target: f32) -> Self {
        self.target = target;
        self
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn value(&self) -> f32 {
        self.state.value
    }

    pub fn velocity(&self) -> f32 {
        self.state.velocity
    }

    pub fn state(&self) -> MassState {
        self.state
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Whether the spring is resting at its target
    pub fn is_settled(&self) -> bool {
        self.state.velocity.abs() < VELOCITY_THRESHOLD
            && (self.state.value - self.target).abs() < VALUE_THRESHOLD
    }

    /// Advance by `dt` seconds. Returns true once settled; a settled spring
    /// snaps exactly onto its target with zero velocity.
    pub fn step(&mut self, dt: f32) -> bool {
        let displacement = (self.state.value - self.target) as f64;
        let (displacement, velocity) = solve(
            &self.config,
            displacement,
            self.state.velocity as f64,
            dt.max(0.0) as f64,
        );
        self.state = MassState {
            value: self.target + displacement as f32,
            velocity: velocity as f32,
        };

        if self.is_settled() {
            self.state = MassState {
                value: self.target,
                velocity: 0.0,
            };
            return true;
        }
        false
    }
}

/// Displacement and velocity after `t` seconds, starting from `displacement`
/// and `velocity` relative to the rest position.
fn solve(config: &SpringConfig, displacement: f64, velocity: f64, t: f64) -> (f64, f64) {
    let omega = (config.stiffness.max(0.0) as f64).sqrt();
    let zeta = config.damping_ratio.max(0.0) as f64;

    if omega == 0.0 {
        return (displacement + velocity * t, velocity);
    }

    if zeta > 1.0 {
        let root = omega * (zeta * zeta - 1.0).sqrt();
        let gamma_plus = -zeta * omega + root;
        let gamma_minus = -zeta * omega - root;
        let coeff_b = (gamma_minus * displacement - velocity) / (gamma_minus - gamma_plus);
        let coeff_a = displacement - coeff_b;
        let decay_minus = (gamma_minus * t).exp();
        let decay_plus = (gamma_plus * t).exp();
        (
            coeff_a * decay_minus + coeff_b * decay_plus,
            coeff_a * gamma_minus * decay_minus + coeff_b * gamma_plus * decay_plus,
        )
    } else if (zeta - 1.0).abs() < 1e-6 {
        let coeff_a = displacement;
        let coeff_b = velocity + omega * displacement;
        let decay = (-omega * t).exp();
        let position = (coeff_a + coeff_b * t) * decay;
        (position, position * -omega + coeff_b * decay)
    } else {
        let damped = omega * (1.0 - zeta * zeta).sqrt();
        let cos_coeff = displacement;
        let sin_coeff = (zeta * omega * displacement + velocity) / damped;
        let decay = (-zeta * omega * t).exp();
        let (sin, cos) = (damped * t).sin_cos();
        let position = decay * (cos_coeff * cos + sin_coeff * sin);
        (
            position,
            position * -zeta * omega + decay * (-damped * cos_coeff * sin + damped * sin_coeff * cos),
        )
    }
}
