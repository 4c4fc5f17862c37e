//! iOS input sources. Touches arrive through the view controller.

pub mod motion;

pub use motion::start_accelerometer;
