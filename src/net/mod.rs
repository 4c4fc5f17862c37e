//! Network access. Only the telemetry button talks to the network.

pub mod telemetry;

pub use telemetry::{post_form, send_detached};
