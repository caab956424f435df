// THEORY:
// Every number that needs re-tuning when the lens, the sensor or the room lighting
// changes lives here as a named field with a named default. Nothing downstream
// hard-codes a threshold.
//
// Configuration is read once and then treated as immutable: a locator is built from
// a validated `LocatorConfig` and never sees it change mid-stream. Files are JSON,
// and every field is optional so a file only has to name what it overrides.

use crate::core_modules::union_find::{FOREGROUND, Label};
use crate::error::{LocateError, LocateResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-channel brightness a pixel must exceed (0..=255) to count as light.
pub const DEFAULT_BRIGHTNESS_THRESHOLD: u8 = 230;
/// Components smaller than this are treated as noise.
pub const DEFAULT_MIN_BLOB_PIXELS: u32 = 3;
/// Components less round than this are treated as reflections.
pub const DEFAULT_MIN_CIRCULARITY: f32 = 0.5;
/// Label table slots, including the reserved background slot.
pub const DEFAULT_LABEL_CAPACITY: Label = 256;

pub const DEFAULT_GAZE_GAIN: f32 = 100.0;

/// Tunables for the localization pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub brightness_threshold: u8,
    pub min_blob_pixels: u32,
    pub min_circularity: f32,
    /// Size of the label table. Regions first seen after it fills are dropped.
    pub label_capacity: Label,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            brightness_threshold: DEFAULT_BRIGHTNESS_THRESHOLD,
            min_blob_pixels: DEFAULT_MIN_BLOB_PIXELS,
            min_circularity: DEFAULT_MIN_CIRCULARITY,
            label_capacity: DEFAULT_LABEL_CAPACITY,
        }
    }
}

impl LocatorConfig {
    pub fn validate(&self) -> LocateResult<()> {
        if !self.min_circularity.is_finite() || !(0.0..=1.0).contains(&self.min_circularity) {
            return Err(LocateError::InvalidConfig(format!(
                "min_circularity must be within [0, 1], got {}",
                self.min_circularity
            )));
        }
        if self.min_blob_pixels == 0 {
            return Err(LocateError::InvalidConfig(
                "min_blob_pixels must be at least 1".to_string(),
            ));
        }
        if self.label_capacity < 2 || self.label_capacity >= FOREGROUND {
            return Err(LocateError::InvalidConfig(format!(
                "label_capacity must be within [2, {}), got {}",
                FOREGROUND, self.label_capacity
            )));
        }
        Ok(())
    }
}

/// What the gaze mapper reports for a frame with no light source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Keep pointing at the last known position.
    #[default]
    HoldLast,
    /// Return to the centre.
    Center,
}

/// Gains from the normalized coordinate to a display offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeConfig {
    pub x_gain: f32,
    pub y_gain: f32,
    pub on_missing: MissingPolicy,
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            x_gain: DEFAULT_GAZE_GAIN,
            y_gain: DEFAULT_GAZE_GAIN,
            on_missing: MissingPolicy::default(),
        }
    }
}

impl GazeConfig {
    pub fn validate(&self) -> LocateResult<()> {
        if !self.x_gain.is_finite() || !self.y_gain.is_finite() {
            return Err(LocateError::InvalidConfig(
                "gaze gains must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeaconConfig {
    pub locator: LocatorConfig,
    pub gaze: GazeConfig,
}

impl BeaconConfig {
    pub fn from_json_str(json: &str) -> LocateResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> LocateResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> LocateResult<()> {
        self.locator.validate()?;
        self.gaze.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = BeaconConfig::default();
        config.validate().unwrap();
        assert_eq!(config.locator.brightness_threshold, 230);
        assert_eq!(config.locator.min_blob_pixels, 3);
        assert_eq!(config.locator.min_circularity, 0.5);
        assert_eq!(config.locator.label_capacity, 256);
        assert_eq!(config.gaze.on_missing, MissingPolicy::HoldLast);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config = BeaconConfig::from_json_str(
            r#"{ "locator": { "min_circularity": 0.7 }, "gaze": { "on_missing": "center" } }"#,
        )
        .unwrap();
        assert_eq!(config.locator.min_circularity, 0.7);
        assert_eq!(config.locator.brightness_threshold, DEFAULT_BRIGHTNESS_THRESHOLD);
        assert_eq!(config.gaze.on_missing, MissingPolicy::Center);
        assert_eq!(config.gaze.x_gain, DEFAULT_GAZE_GAIN);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let bad = LocatorConfig {
            min_circularity: 1.5,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(LocateError::InvalidConfig(_))));

        let bad = LocatorConfig {
            label_capacity: FOREGROUND,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(LocateError::InvalidConfig(_))));

        let bad = LocatorConfig {
            min_blob_pixels: 0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let err = BeaconConfig::from_json_str(r#"{ "locator": { "min_circularity": -0.1 } }"#);
        assert!(matches!(err, Err(LocateError::InvalidConfig(_))));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = BeaconConfig::from_json_str("{ locator: ");
        assert!(matches!(err, Err(LocateError::ConfigParse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = BeaconConfig::from_file(Path::new("/nonexistent/beacon.json"));
        assert!(matches!(err, Err(LocateError::ConfigIo(_))));
    }
}
