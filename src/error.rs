//! Error types for asset loading, sensors, telemetry and configuration.

use thiserror::Error;

/// The vehicle asset does not have the structure spawning relies on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetStructureError {
    /// The scene file could not be loaded at all
    #[error("Vehicle asset `{asset}` could not be loaded")]
    MissingAsset {
        /// Asset file name
        asset: String,
    },

    /// A required named node is absent
    #[error("Vehicle asset `{asset}` has no node `{node}` under `{parent}`")]
    MissingNode {
        /// Asset file name
        asset: String,
        /// Node that was searched (non-recursively)
        parent: String,
        /// Missing child name
        node: String,
    },
}

/// Motion sensor failures. Neither is fatal: steering simply stops updating.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SensorError {
    /// The device has no accelerometer (or it is disabled)
    #[error("Accelerometer not available")]
    Unavailable,

    /// The sensor delivered an error instead of a sample
    #[error("Accelerometer delivery failed: {0}")]
    Delivery(String),
}

/// Telemetry POST failures. Logged and swallowed by the sender.
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Connection, TLS or HTTP status failure
    #[error("Telemetry transport failed: {0}")]
    Transport(#[from] ureq::Error),

    /// Response body was not valid JSON
    #[error("Telemetry response is not JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Invalid embedded configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid drive configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
