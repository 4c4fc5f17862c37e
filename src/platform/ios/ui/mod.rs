//! UIKit classes registered at runtime.

pub mod view_controller;

pub use view_controller::view_controller_class;
