//! Driving domain model.
//!
//! This module contains pure logic (no FFI dependencies): the tilt filter,
//! the touch-driven drive intents, the shared driving controls and the
//! configuration constants.
//!
//! Platform-specific wiring is in `platform::ios`.

pub mod config;
pub mod constants;
pub mod controls;
pub mod drive;
pub mod tilt;

pub use config::DriveConfig;
pub use constants::*;
pub use controls::DriveControls;
pub use drive::{DriveIntent, WheelForces};
pub use tilt::{low_pass, steering_angle, AccelerometerSample, Axis, TiltFilter};
