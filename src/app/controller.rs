//! The per-session controller.
//!
//! One `VehicleController` exists per AR session. It owns the scene host,
//! the drive configuration, the live vehicle handle and the diagnostics
//! counter, and shares the steering/touch state with the sensor and touch
//! handlers it hands out.

use std::sync::Arc;

use tracing::debug;

use crate::error::AssetStructureError;
use crate::events::AppEvent;
use crate::handlers::dispatch_events;
use crate::input::{MotionHandler, TouchHandler};
use crate::model::constants::DIAGNOSTICS_INTERVAL_TICKS;
use crate::model::{DriveConfig, DriveControls};
use crate::net::telemetry;
use crate::scene::host::{AnchorHost, VehicleHost};
use crate::scene::{overlay, vehicle, TrackedAnchor};

pub struct VehicleController<H: AnchorHost + VehicleHost> {
    host: H,
    config: DriveConfig,
    controls: Arc<DriveControls>,
    vehicle: Option<H::Vehicle>,
    ticks: u32,
}

impl<H: AnchorHost + VehicleHost> VehicleController<H> {
    /// Build a controller around `host`. The config is validated first.
    pub fn new(host: H, mut config: DriveConfig) -> Self {
        config.validate();
        Self {
            host,
            config,
            controls: Arc::new(DriveControls::new()),
            vehicle: None,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    /// Shared steering/touch state.
    pub fn controls(&self) -> Arc<DriveControls> {
        Arc::clone(&self.controls)
    }

    /// A sensor handler writing into this controller's steering angle.
    pub fn motion_handler(&self) -> MotionHandler {
        MotionHandler::new(self.controls(), &self.config)
    }

    /// A touch handler writing into this controller's touch counter.
    pub fn touch_handler(&self) -> TouchHandler {
        TouchHandler::new(self.controls())
    }

    pub fn anchor_added(&mut self, anchor: &TrackedAnchor) {
        overlay::anchor_added(&mut self.host, anchor);
    }

    pub fn anchor_updated(&mut self, anchor: &TrackedAnchor) {
        overlay::anchor_updated(&mut self.host, anchor);
    }

    pub fn anchor_removed(&mut self, anchor: &TrackedAnchor) {
        overlay::anchor_removed(&mut self.host, anchor);
    }

    /// Spawn a vehicle in front of the camera, replacing any previous one.
    ///
    /// `Ok(false)` means there was no camera pose yet and nothing changed.
    pub fn spawn_vehicle(&mut self) -> Result<bool, AssetStructureError> {
        vehicle::spawn(&mut self.host, &mut self.vehicle, &self.config)
    }

    /// Fire the telemetry POST in the background.
    pub fn send_telemetry(&self) {
        // Detached: the handle is dropped and the thread finishes on its own
        let _ = telemetry::send_detached(&self.config.telemetry_url);
    }

    /// Run one physics step: handle queued UI events, push the current
    /// steering and forces to the vehicle, then advance the diagnostics
    /// counter.
    pub fn physics_tick(&mut self, time: f64, events: Vec<AppEvent>) {
        dispatch_events(self, events);

        let steering = self.controls.steering_angle();
        let intent = self.controls.intent();
        if let Some(vehicle) = self.vehicle.as_mut() {
            vehicle::actuate(vehicle, steering, intent.forces(&self.config));
        }

        self.ticks += 1;
        if self.ticks >= DIAGNOSTICS_INTERVAL_TICKS {
            self.ticks = 0;
            debug!(
                time,
                steering,
                touches = self.controls.touch_count(),
                vehicle = self.vehicle.is_some(),
                "{}",
                intent.description()
            );
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn has_vehicle(&self) -> bool {
        self.vehicle.is_some()
    }

    /// Ticks since the last diagnostics line (0..60).
    pub fn ticks(&self) -> u32 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::HeadlessScene;

    #[test]
    fn test_tick_counter_wraps() {
        let mut controller = VehicleController::new(HeadlessScene::new(), DriveConfig::default());
        for _ in 0..DIAGNOSTICS_INTERVAL_TICKS - 1 {
            controller.physics_tick(0.0, Vec::new());
        }
        assert_eq!(controller.ticks(), DIAGNOSTICS_INTERVAL_TICKS - 1);
        controller.physics_tick(1.0, Vec::new());
        assert_eq!(controller.ticks(), 0);
    }

    #[test]
    fn test_handlers_share_controls() {
        let controller = VehicleController::new(HeadlessScene::new(), DriveConfig::default());
        controller.touch_handler().touches_began(1);
        assert_eq!(controller.controls().touch_count(), 1);
    }

    #[test]
    fn test_config_is_validated() {
        let config = DriveConfig {
            filtering_factor: 4.0,
            ..DriveConfig::default()
        };
        let controller = VehicleController::new(HeadlessScene::new(), config);
        assert_eq!(controller.config().filtering_factor, 1.0);
    }
}
