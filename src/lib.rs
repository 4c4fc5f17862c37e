#![allow(unexpected_cfgs)] // Silence cfg warnings from objc macros

//! Tilt-steered AR vehicle demo.
//!
//! Everything outside `platform` is plain Rust with no Apple FFI, so the
//! whole core (filter, touch classifier, overlay and spawn rules, controller)
//! runs as normal unit and integration tests against the headless scene.

pub mod app;
pub mod error;
pub mod events;
pub mod handlers;
pub mod input;
pub mod logging;
pub mod model;
pub mod net;
pub mod platform;
pub mod scene;

pub use app::VehicleController;
pub use error::{AssetStructureError, ConfigError, SensorError, TelemetryError};
pub use events::{AppEvent, EventBus, EventPublisher};
pub use model::{DriveConfig, DriveControls, DriveIntent, TiltFilter};

use std::f64::consts::PI;

/// Convert whole degrees to radians (`degrees * π / 180`).
pub fn degrees_to_radians(degrees: i32) -> f64 {
    f64::from(degrees) * PI / 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_to_radians() {
        assert_eq!(degrees_to_radians(0), 0.0);
        assert!((degrees_to_radians(90) - PI / 2.0).abs() < 1e-12);
        assert!((degrees_to_radians(-180) + PI).abs() < 1e-12);
    }
}
