//! # gilt-interact
//!
//! Timed interaction controllers for gilt UIs: the small state machines that
//! sit between raw input events and a widget's visible state.
//!
//! Each controller is sans-IO. The host forwards input (hover, focus, keys,
//! pointer presses), calls `poll()` when time has passed, and drains output
//! events. Time comes from an injected [`timing::Clock`], so tests run on a
//! virtual clock instead of waiting on the wall clock.
//!
//! ## Controllers
//!
//! - **[`visibility`]** — Tooltip show/hide debouncing across hover, focus and dismissal
//! - **[`stepper`]** — Numeric stepping with bounds, large steps and press-and-hold repeat
//! - **[`ripple`]** — Press ripple spawn, minimum visible time, fade and removal
//!
//! ## Core Systems
//!
//! - **[`timing`]** — Clocks and the slotmap-backed timer queue
//! - **[`controller`]** — The `Controller` trait and controlled/uncontrolled state
//! - **[`driver`]** — Tokio host loop for running a controller
//! - **[`config`]** — Serde/TOML configuration with defaults
//! - **[`event`]** — Key and pointer input, with crossterm conversions
//! - **[`testing`]** — Headless `Pilot` and timeline snapshots
//! - **[`geometry`]** — Point and Rect

// Foundation
pub mod error;
pub mod geometry;
pub mod timing;

// Core systems
pub mod config;
pub mod controller;
pub mod event;

// Controllers
pub mod ripple;
pub mod stepper;
pub mod visibility;

// Hosting
pub mod driver;
pub mod testing;

pub use config::{InteractConfig, RippleConfig, StepperConfig, TooltipConfig, TriggerMode};
pub use controller::{Controllable, Controller};
pub use error::{ConfigError, ConfigWarning};
pub use ripple::RippleController;
pub use stepper::StepperController;
pub use visibility::VisibilityController;
