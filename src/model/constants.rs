//! Configuration constants and default values.
//!
//! This module contains all application constants including driving
//! defaults, scene asset names and the telemetry endpoint.

// === Tilt Steering ===

/// Weight of the newest accelerometer sample in the low-pass filter.
pub const FILTERING_FACTOR: f64 = 0.5;

/// Accelerometer delivery interval in seconds (60 Hz).
pub const ACCELEROMETER_UPDATE_INTERVAL: f64 = 1.0 / 60.0;

/// Smallest accepted accelerometer interval in seconds.
pub const MIN_ACCELEROMETER_INTERVAL: f64 = 1.0 / 1000.0;

// === Drive Forces ===

/// Engine force applied to each rear wheel while accelerating (negated in reverse).
pub const ENGINE_FORCE: f64 = 20.0;

/// Braking force applied to each rear wheel while braking.
pub const BRAKING_FORCE: f64 = 100.0;

/// Mass of the chassis rigid body.
pub const CHASSIS_MASS: f64 = 5.0;

// === Touch Counts ===

/// Touch count selecting forward acceleration.
pub const TOUCHES_ACCELERATE: usize = 1;

/// Touch count selecting reverse.
pub const TOUCHES_REVERSE: usize = 2;

/// Touch count selecting the brake.
pub const TOUCHES_BRAKE: usize = 3;

// === Scene Assets ===

/// Scene file holding the vehicle model.
pub const VEHICLE_ASSET: &str = "car.scn";

/// Name of the chassis node; also tags live vehicles in the scene root.
pub const CHASSIS_NODE: &str = "chassis";

/// Rear left wheel parent node.
pub const REAR_LEFT_WHEEL_NODE: &str = "rearLeftParent";

/// Rear right wheel parent node.
pub const REAR_RIGHT_WHEEL_NODE: &str = "rearRightParent";

/// Front left wheel parent node.
pub const FRONT_LEFT_WHEEL_NODE: &str = "frontLeftParent";

/// Front right wheel parent node.
pub const FRONT_RIGHT_WHEEL_NODE: &str = "frontRightParent";

/// Image used as the diffuse texture of ground overlays.
pub const GROUND_MATERIAL: &str = "concrete";

/// Rotation about X that lays a vertical plane geometry flat, in degrees.
pub const GROUND_TILT_DEGREES: i32 = 90;

// === Diagnostics ===

/// Physics ticks between two diagnostic log lines (~1 s at 60 Hz).
pub const DIAGNOSTICS_INTERVAL_TICKS: u32 = 60;

// === Telemetry ===

/// LAN endpoint receiving the telemetry POST.
pub const TELEMETRY_URL: &str = "http://192.168.1.234:8888/poit/index.php";

/// Form fields sent as the telemetry request body.
pub const TELEMETRY_QUERY: [(&str, &str); 2] = [("id", "test"), ("key2", "1")];
