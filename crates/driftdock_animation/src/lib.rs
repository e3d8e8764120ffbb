//! driftdock Animation System
//!
//! Physics and time-based motion for a single animated value.
//!
//! # Features
//!
//! - **Fling**: exponential drag decay with optional clamp bounds
//! - **Spring Physics**: closed-form damped springs with stiffness and damping ratio
//! - **Tweens**: fixed-duration interpolation with easing
//! - **Axis Motion**: one live motion per animated property, cancellable, with
//!   exactly-once completion reports

pub mod axis;
pub mod easing;
pub mod fling;
pub mod spring;
pub mod tween;

pub use axis::{AnimatedProperty, AxisMotion, MotionEnd, MotionKind};
pub use easing::Easing;
pub use fling::{Fling, BASE_FRICTION};
pub use spring::{MassState, Spring, SpringConfig};
pub use tween::Tween;

/// Smallest value change worth drawing, in pixels
pub const MIN_VISIBLE_CHANGE: f32 = 1.0;

/// Motions closer than this to their resting value are considered at rest
pub const VALUE_THRESHOLD: f32 = MIN_VISIBLE_CHANGE * 0.75;

/// Speed (units per second) below which a motion is considered stopped
pub const VELOCITY_THRESHOLD: f32 = VALUE_THRESHOLD * 62.5;
