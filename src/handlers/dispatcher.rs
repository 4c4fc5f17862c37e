//! Event dispatcher for UI actions.
//!
//! Button taps and sensor setup run on the main thread while the vehicle is
//! driven from the physics tick. Actions travel over the event bus and are
//! handled here, in batch, at the start of each tick.
//!
//! ```text
//! EventBus::drain() → dispatch_events() → controller actions
//! ```

use tracing::{debug, error, warn};

use crate::app::VehicleController;
use crate::events::AppEvent;
use crate::scene::host::{AnchorHost, VehicleHost};

/// Handle every event in arrival order.
pub fn dispatch_events<H>(controller: &mut VehicleController<H>, events: Vec<AppEvent>)
where
    H: AnchorHost + VehicleHost,
{
    for event in events {
        dispatch_single_event(controller, event);
    }
}

fn dispatch_single_event<H>(controller: &mut VehicleController<H>, event: AppEvent)
where
    H: AnchorHost + VehicleHost,
{
    debug!(scene = event.touches_scene(), "Dispatching: {}", event.description());

    match event {
        AppEvent::SpawnVehicle => match controller.spawn_vehicle() {
            Ok(true) => {}
            Ok(false) => debug!("Spawn skipped, camera pose not available"),
            Err(e) => error!("Vehicle not spawned: {}", e),
        },
        AppEvent::SendTelemetry => controller.send_telemetry(),
        AppEvent::SensorUnavailable => {
            warn!("Accelerometer unavailable; steering will not respond to tilt")
        }
    }
}
