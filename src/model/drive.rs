//! Drive intents selected by touch input, and the wheel forces they map to.

use super::config::DriveConfig;
use super::constants::{TOUCHES_ACCELERATE, TOUCHES_BRAKE, TOUCHES_REVERSE};

/// Driver command derived from the touch counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DriveIntent {
    #[default]
    Idle,
    Accelerate,
    Reverse,
    Brake,
}

impl DriveIntent {
    /// Map an accumulated touch count to an intent.
    ///
    /// Any count other than 1, 2 or 3 (including 0 and 4+) is `Idle`.
    pub fn from_touch_count(count: usize) -> Self {
        match count {
            TOUCHES_ACCELERATE => DriveIntent::Accelerate,
            TOUCHES_REVERSE => DriveIntent::Reverse,
            TOUCHES_BRAKE => DriveIntent::Brake,
            _ => DriveIntent::Idle,
        }
    }

    /// Engine and braking set-points for each rear wheel.
    pub fn forces(self, config: &DriveConfig) -> WheelForces {
        match self {
            DriveIntent::Idle => WheelForces::NONE,
            DriveIntent::Accelerate => WheelForces {
                engine: config.engine_force,
                braking: 0.0,
            },
            DriveIntent::Reverse => WheelForces {
                engine: -config.engine_force,
                braking: 0.0,
            },
            DriveIntent::Brake => WheelForces {
                engine: 0.0,
                braking: config.braking_force,
            },
        }
    }

    /// Returns a human-readable description of the intent for debugging.
    pub fn description(&self) -> &'static str {
        match self {
            DriveIntent::Idle => "Coasting",
            DriveIntent::Accelerate => "Accelerating forward",
            DriveIntent::Reverse => "Accelerating in reverse",
            DriveIntent::Brake => "Braking",
        }
    }
}

/// Per-wheel force set-points for the driven (rear) axle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelForces {
    pub engine: f64,
    pub braking: f64,
}

impl WheelForces {
    pub const NONE: WheelForces = WheelForces {
        engine: 0.0,
        braking: 0.0,
    };
}
