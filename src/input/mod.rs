//! Input handling module.
//!
//! This module contains the platform-independent input handlers:
//! - motion.rs: accelerometer samples → tilt filter → steering angle
//! - touch.rs: touch began/ended → touch counter → drive intent

pub mod motion;
pub mod touch;

pub use motion::MotionHandler;
pub use touch::TouchHandler;
