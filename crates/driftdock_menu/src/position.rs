//! Normalized resting position
//!
//! Pixel positions depend on the current draggable region, which changes with
//! rotation or an on-screen keyboard. The persisted form is a pair of fractions
//! of that region instead.

use driftdock_core::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Resting position as fractions of the draggable region
///
/// Both components always lie in `[0.0, 1.0]`. `percent_x` only ever takes
/// the two extremes: the menu rests on the left or the right half.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    percent_x: f32,
    percent_y: f32,
}

impl Position {
    pub const MIN_PERCENT: f32 = 0.0;
    pub const MAX_PERCENT: f32 = 1.0;

    /// Create a position, clamping both components into `[0.0, 1.0]`
    pub fn new(percent_x: f32, percent_y: f32) -> Self {
        Self {
            percent_x: constrain_percent(percent_x),
            percent_y: constrain_percent(percent_y),
        }
    }

    /// Normalize a resting pixel position against `bounds`
    pub fn from_pixels(point: Point, bounds: &Rect) -> Self {
        let percent_x = if point.x < bounds.center_x() {
            Self::MIN_PERCENT
        } else {
            Self::MAX_PERCENT
        };

        let offset_y = point.y - bounds.top;
        let percent_y = if offset_y < 0.0 || bounds.height() == 0.0 {
            Self::MIN_PERCENT
        } else {
            (offset_y / bounds.height()).min(Self::MAX_PERCENT)
        };

        Self::new(percent_x, percent_y)
    }

    /// Pixel position of this fraction within `bounds`
    pub fn to_pixels(&self, bounds: &Rect) -> Point {
        Point::new(
            bounds.left + self.percent_x * bounds.width(),
            bounds.top + self.percent_y * bounds.height(),
        )
    }

    pub fn percent_x(&self) -> f32 {
        self.percent_x
    }

    pub fn percent_y(&self) -> f32 {
        self.percent_y
    }
}

fn constrain_percent(value: f32) -> f32 {
    if value.is_nan() {
        return Position::MIN_PERCENT;
    }
    value.min(Position::MAX_PERCENT).max(Position::MIN_PERCENT)
}
