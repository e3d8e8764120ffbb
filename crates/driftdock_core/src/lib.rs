//! driftdock Core Runtime
//!
//! This crate provides the foundational primitives the floating-menu motion
//! controller is built on:
//!
//! - **UI Executor**: an explicit single-threaded task queue with delayed
//!   tasks, frame callbacks and a deterministic clock
//! - **Geometry**: pixel-space rectangles, points and the two animated axes
//!
//! # Example
//!
//! ```rust
//! use driftdock_core::UiExecutor;
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let executor = UiExecutor::new();
//! let fired = Rc::new(Cell::new(false));
//!
//! let flag = fired.clone();
//! executor.post_delayed(Duration::from_millis(100), move || flag.set(true));
//!
//! executor.advance_by(Duration::from_millis(50));
//! assert!(!fired.get());
//!
//! executor.advance_by(Duration::from_millis(50));
//! assert!(fired.get());
//! ```

pub mod error;
pub mod executor;
pub mod geometry;

pub use error::{CoreError, Result};
pub use executor::{TaskId, UiExecutor, DEFAULT_FRAME_INTERVAL};
pub use geometry::{Axis, Point, Rect};
