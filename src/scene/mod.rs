//! Scene and physics boundary.
//!
//! Plane tracking, rendering and vehicle dynamics belong to the host engine.
//! This module holds the placement rules the core applies through it:
//!
//! - [`types`]: anchors, ground overlays, camera pose, wheel slots
//! - [`host`]: traits the host engine implements
//! - [`overlay`]: plane anchor lifecycle → ground overlays
//! - [`vehicle`]: vehicle spawn and per-tick actuation
//! - [`headless`]: in-memory host for tests and desktop replay

pub mod headless;
pub mod host;
pub mod overlay;
pub mod types;
pub mod vehicle;

pub use headless::HeadlessScene;
pub use host::{AnchorHost, VehicleActuator, VehicleHost};
pub use types::{
    AnchorId, BodyKind, CameraPose, GroundOverlay, PlaneAnchor, TrackedAnchor, WheelSlot,
};
pub use vehicle::VehicleRig;
