//! Pixel-space geometry shared by the executor clients

use serde::{Deserialize, Serialize};

/// One of the two animated translation axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// A point in pixel space
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component along `axis`
    pub fn on(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// Axis-aligned rectangle in pixel space
///
/// Edges are stored as-is; an inverted rectangle reports a zero width or
/// height instead of a negative one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        (self.right - self.left).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.bottom - self.top).max(0.0)
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    /// The `(low, high)` edges along `axis`
    pub fn range(&self, axis: Axis) -> (f32, f32) {
        match axis {
            Axis::X => (self.left, self.right),
            Axis::Y => (self.top, self.bottom),
        }
    }

    /// Whether `x` lies within the horizontal edges, inclusive
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left && x <= self.right
    }

    /// Clamp `value` into the edges along `axis`.
    ///
    /// Unlike `f32::clamp` this never panics on an inverted range; the low
    /// edge wins.
    pub fn constrain(&self, axis: Axis, value: f32) -> f32 {
        let (low, high) = self.range(axis);
        value.min(high).max(low)
    }
}
