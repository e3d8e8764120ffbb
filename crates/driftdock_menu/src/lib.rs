//! driftdock Floating Menu Motion
//!
//! Positions and animates a small draggable menu affordance:
//!
//! - **Release handling**: a drag release becomes a fling followed by a spring
//!   settle on each axis, with the x axis steered toward the nearer edge
//! - **Edge docking**: a menu released past the draggable region docks half
//!   hidden against that edge
//! - **Position model**: resting positions are persisted as fractions of the
//!   draggable region so they survive rotation and resizing
//! - **Idle fade**: after a quiet period the menu fades to a configured opacity
//!
//! # Example
//!
//! ```rust
//! use driftdock_core::{Point, Rect, UiExecutor};
//! use driftdock_menu::{HeadlessMenuView, MenuAnimationController, MotionConfig};
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! let executor = UiExecutor::new();
//! let view = Rc::new(
//!     HeadlessMenuView::new(Rect::new(0.0, 0.0, 500.0, 1000.0), 80.0)
//!         .with_translation(Point::new(400.0, 300.0)),
//! );
//! let controller =
//!     MenuAnimationController::new(view.clone(), executor.clone(), MotionConfig::default());
//!
//! controller.fling_then_spring_to_edge(400.0, 2_000.0, 0.0);
//! executor.run_until_idle(Duration::from_secs(10));
//!
//! assert_eq!(view.translation_point().x, 500.0);
//! assert_eq!(controller.position().map(|p| p.percent_x()), Some(1.0));
//! ```

pub mod config;
pub mod controller;
pub mod edge;
pub mod error;
pub mod fade;
pub mod headless;
pub mod position;
pub mod view;

pub use config::MotionConfig;
pub use controller::MenuAnimationController;
pub use edge::{Edge, EdgeFling};
pub use error::{MenuError, Result};
pub use fade::{FadeScheduler, FadeState, FadeTiming};
pub use headless::{HeadlessMenuView, ViewEvent};
pub use position::Position;
pub use view::{MenuTranslation, MenuView};
