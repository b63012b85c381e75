//! Startup configuration
//!
//! Read once when the page (or the headless runner) starts. Nothing is
//! written back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{MotionProfile, MotionType, TrackLayout, TrackLength};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Malformed JSON or wrong field types
    #[error("Config parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// Well-formed but out of range
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// False for negatives and NaN
fn non_negative(x: f64) -> bool {
    x >= 0.0
}

/// Initial motion parameters for one car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarConfig {
    pub label: String,
    #[serde(default)]
    pub motion: MotionType,
    #[serde(default)]
    pub initial_velocity: f64,
    #[serde(default)]
    pub acceleration: f64,
}

impl CarConfig {
    pub fn to_profile(&self) -> MotionProfile {
        MotionProfile {
            motion: self.motion,
            initial_velocity: self.initial_velocity,
            acceleration: self.acceleration,
            label: self.label.clone(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !non_negative(self.initial_velocity) {
            return Err(ConfigError::Invalid(format!(
                "{}: initial velocity must be >= 0, got {}",
                self.label, self.initial_velocity
            )));
        }
        if !non_negative(self.acceleration) {
            return Err(ConfigError::Invalid(format!(
                "{}: acceleration must be >= 0, got {}",
                self.label, self.acceleration
            )));
        }
        Ok(())
    }
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// One shared finish line or one per lane
    pub track_layout: TrackLayout,
    /// Initial finish-line distance (m); `null` starts with the track unset
    pub track_length: Option<f64>,
    pub car1: CarConfig,
    pub car2: CarConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            track_layout: TrackLayout::PerEntity,
            track_length: Some(DEFAULT_TRACK_LENGTH),
            car1: CarConfig {
                label: "Mobil 1".to_string(),
                motion: MotionType::Uniform,
                initial_velocity: CAR1_INITIAL_VELOCITY,
                acceleration: 0.0,
            },
            car2: CarConfig {
                label: "Mobil 2".to_string(),
                motion: MotionType::Accelerated,
                initial_velocity: CAR2_INITIAL_VELOCITY,
                acceleration: CAR2_ACCELERATION,
            },
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(len) = self.track_length {
            if !non_negative(len) {
                return Err(ConfigError::Invalid(format!(
                    "track length must be >= 0, got {}",
                    len
                )));
            }
        }
        self.car1.validate()?;
        self.car2.validate()
    }

    pub fn initial_track(&self) -> TrackLength {
        match self.track_length {
            Some(m) => TrackLength::Meters(m),
            None => TrackLength::Unset,
        }
    }

    /// Element holding an optional inline JSON config
    #[cfg(target_arch = "wasm32")]
    const CONFIG_ELEMENT_ID: &'static str = "sim-config";

    /// Load config from the page's inline JSON element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = text {
            match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from #{}", Self::CONFIG_ELEMENT_ID);
                    return config;
                }
                Err(e) => log::warn!("{}, using defaults", e),
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Load config from an optional JSON file path (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: Option<&std::path::Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            log::info!("Using default config");
            return Ok(Self::default());
        };
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Invalid(format!("{}: {}", path.display(), e)))?;
        log::info!("Loaded config from {}", path.display());
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = SimConfig::from_json(r#"{ "track_layout": "Shared", "track_length": 120.0 }"#).unwrap();
        assert_eq!(config.track_layout, TrackLayout::Shared);
        assert_eq!(config.initial_track(), TrackLength::Meters(120.0));
        assert_eq!(config.car2, SimConfig::default().car2);
    }

    #[test]
    fn test_null_track_is_unset() {
        let config = SimConfig::from_json(r#"{ "track_length": null }"#).unwrap();
        assert_eq!(config.initial_track(), TrackLength::Unset);
    }

    #[test]
    fn test_car_override() {
        let json = r#"{
            "car1": { "label": "Blue", "motion": "Accelerated", "initial_velocity": 0.0, "acceleration": 2.0 }
        }"#;
        let config = SimConfig::from_json(json).unwrap();
        let profile = config.car1.to_profile();
        assert_eq!(profile.label, "Blue");
        assert_eq!(profile.motion, MotionType::Accelerated);
        assert_eq!(profile.acceleration, 2.0);
    }

    #[test]
    fn test_negative_values_rejected() {
        let err = SimConfig::from_json(r#"{ "track_length": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let json = r#"{ "car2": { "label": "Red", "initial_velocity": -5.0 } }"#;
        assert!(matches!(SimConfig::from_json(json), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_default_labels() {
        let config = SimConfig::default();
        assert_eq!(config.car1.label, "Mobil 1");
        assert_eq!(config.car2.label, "Mobil 2");
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(SimConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_default_round_trips_through_json() {
        let json = serde_json::to_string(&SimConfig::default()).unwrap();
        assert_eq!(SimConfig::from_json(&json).unwrap(), SimConfig::default());
    }
}
