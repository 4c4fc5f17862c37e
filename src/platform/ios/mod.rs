//! iOS host adapter using UIKit / ARKit / SceneKit / CoreMotion via objc2.
//!
//! - FFI bridge and struct encodings
//! - SceneKit implementation of the scene host traits
//! - CoreMotion accelerometer feed
//! - The `VehicleViewController` class and the app entry point

pub mod app;
pub mod ffi;
pub mod input;
pub mod scene;
pub mod ui;

pub use app::run;
pub use ffi::bridge;
