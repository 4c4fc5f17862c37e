//! Application events for inter-module communication.
//!
//! These events represent user or system actions that are published by the
//! UI layer (buttons, sensor setup) and handled by the dispatcher on the
//! next physics tick. This module is pure Rust with no FFI dependencies.

/// Application-level events for decoupled communication between modules.
///
/// Continuous input (tilt, touches) does not go through the bus; it is
/// written straight into `DriveControls`. Only discrete actions do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    // === UI Actions ===
    /// "Add car" button: spawn (or respawn) the vehicle in front of the camera
    SpawnVehicle,

    /// "Send data" button: fire-and-forget telemetry POST
    SendTelemetry,

    // === System Events ===
    /// The accelerometer could not be started
    SensorUnavailable,
}

impl AppEvent {
    /// Returns true if handling this event changes the scene graph.
    pub fn touches_scene(&self) -> bool {
        matches!(self, AppEvent::SpawnVehicle)
    }

    /// Returns a human-readable description of the event for debugging.
    pub fn description(&self) -> &'static str {
        match self {
            AppEvent::SpawnVehicle => "Spawn vehicle in front of camera",
            AppEvent::SendTelemetry => "Send telemetry",
            AppEvent::SensorUnavailable => "Accelerometer unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_spawn_touches_scene() {
        assert!(AppEvent::SpawnVehicle.touches_scene());
        assert!(!AppEvent::SendTelemetry.touches_scene());
        assert!(!AppEvent::SensorUnavailable.touches_scene());
    }

    #[test]
    fn test_event_debug() {
        let event = AppEvent::SpawnVehicle;
        let debug_str = format!("{:?}", event);
        assert_eq!(debug_str, "SpawnVehicle");
    }

    #[test]
    fn test_all_events_have_descriptions() {
        let events = [
            AppEvent::SpawnVehicle,
            AppEvent::SendTelemetry,
            AppEvent::SensorUnavailable,
        ];

        for event in events {
            assert!(!event.description().is_empty());
        }
    }
}
