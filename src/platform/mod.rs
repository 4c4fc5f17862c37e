//! Platform-specific implementations.
//!
//! Only iOS has a real host: ARKit plane tracking, SceneKit rendering and
//! physics, CoreMotion and UIKit input, bound through objc2. Other targets
//! use the headless scene in `crate::scene::headless`.

#[cfg(target_os = "ios")]
pub mod ios;
