//! Accelerometer boundary.
//!
//! The platform's motion callback feeds raw samples here; the handler owns
//! the filter memory and writes the derived steering angle into the shared
//! controls. If the sensor is unavailable nothing is ever written and the
//! steering angle stays at its last value (initially zero).

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::SensorError;
use crate::model::{AccelerometerSample, Axis, DriveConfig, DriveControls, TiltFilter};

pub struct MotionHandler {
    filter: TiltFilter,
    controls: Arc<DriveControls>,
    update_interval: f64,
    unavailable: bool,
}

impl MotionHandler {
    pub fn new(controls: Arc<DriveControls>, config: &DriveConfig) -> Self {
        Self {
            filter: TiltFilter::new(config.filtering_factor),
            controls,
            update_interval: config.accelerometer_interval,
            unavailable: false,
        }
    }

    /// Filter one sample and publish the resulting steering angle.
    pub fn on_sample(&mut self, sample: AccelerometerSample) -> f64 {
        let angle = self.filter.apply(sample);
        self.controls.set_steering_angle(angle);
        angle
    }

    /// Handle a delivery failure: log it and skip the update.
    pub fn on_error(&mut self, error: SensorError) {
        match error {
            SensorError::Unavailable => self.on_unavailable(),
            SensorError::Delivery(_) => debug!("{}", error),
        }
    }

    /// The sensor cannot be started. Logged once; steering stays frozen.
    pub fn on_unavailable(&mut self) {
        if !self.unavailable {
            warn!("{}; steering angle frozen", SensorError::Unavailable);
            self.unavailable = true;
        }
    }

    pub fn is_unavailable(&self) -> bool {
        self.unavailable
    }

    /// Requested delivery interval in seconds.
    pub fn update_interval(&self) -> f64 {
        self.update_interval
    }

    /// Current filtered (x, y) readings.
    pub fn filtered(&self) -> (f64, f64) {
        (self.filter.filtered(Axis::X), self.filter.filtered(Axis::Y))
    }
}
