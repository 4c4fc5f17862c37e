//! FFI glue for the iOS frameworks.

pub mod bridge;
pub mod types;

pub use bridge::*;
pub use types::{CmAcceleration, ScnMatrix4, ScnVector3, SimdFloat3};
