//! Session-level wiring.

pub mod controller;

pub use controller::VehicleController;
