//! Driving configuration (pure Rust, no FFI).
//!
//! `DriveConfig` gathers the tunables used by the filter, the force mapping
//! and vehicle spawning. Defaults come from [`super::constants`]; an
//! embedding host may also hand one over as JSON.

use serde::{Deserialize, Serialize};

use super::constants::*;
use crate::error::ConfigError;

/// Tunables for one driving session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Low-pass weight of the newest sample [0.0, 1.0].
    pub filtering_factor: f64,
    /// Accelerometer delivery interval in seconds.
    pub accelerometer_interval: f64,
    /// Engine force per rear wheel.
    pub engine_force: f64,
    /// Braking force per rear wheel.
    pub braking_force: f64,
    /// Chassis rigid-body mass.
    pub chassis_mass: f64,
    /// Telemetry endpoint.
    pub telemetry_url: String,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            filtering_factor: FILTERING_FACTOR,
            accelerometer_interval: ACCELEROMETER_UPDATE_INTERVAL,
            engine_force: ENGINE_FORCE,
            braking_force: BRAKING_FORCE,
            chassis_mass: CHASSIS_MASS,
            telemetry_url: TELEMETRY_URL.to_string(),
        }
    }
}

impl DriveConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: DriveConfig = serde_json::from_str(json)?;
        config.validate();
        Ok(config)
    }

    /// Validates and clamps all values to valid ranges.
    pub fn validate(&mut self) {
        self.filtering_factor = self.filtering_factor.clamp(0.0, 1.0);
        self.accelerometer_interval = self.accelerometer_interval.max(MIN_ACCELEROMETER_INTERVAL);
        self.engine_force = self.engine_force.max(0.0);
        self.braking_force = self.braking_force.max(0.0);
        self.chassis_mass = self.chassis_mass.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = DriveConfig::from_json(r#"{ "engine_force": 35.0 }"#).unwrap();
        assert_eq!(config.engine_force, 35.0);
        assert_eq!(config.braking_force, BRAKING_FORCE);
        assert_eq!(config.telemetry_url, TELEMETRY_URL);
    }

    #[test]
    fn test_from_json_validates() {
        let config = DriveConfig::from_json(r#"{ "filtering_factor": 3.0 }"#).unwrap();
        assert_eq!(config.filtering_factor, 1.0);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(DriveConfig::from_json("not json").is_err());
    }
}
