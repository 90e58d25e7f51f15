//! Servo profile configuration.
//!
//! This module provides the [`ServoProfile`] struct describing a servo
//! model's pulse width range, mechanical travel, and angular speed,
//! loaded from a JSON profile file or taken from a pre-configured
//! preset for common servo models like SG90 and MG995.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Physical characteristics of one servo model.
///
/// Immutable after load. The only way to obtain one is through a
/// validating constructor, so a held profile always has a usable
/// angular speed.
#[derive(Debug, Clone, PartialEq)]
pub struct ServoProfile {
    /// Model identifier, e.g. "SG90".
    pub model: String,
    /// Smallest pulse width the servo accepts, in microseconds.
    pub pwm_min_us: f64,
    /// Largest pulse width the servo accepts, in microseconds.
    pub pwm_max_us: f64,
    /// Total mechanical sweep in degrees, centred at 0.
    pub max_travel_degrees: f64,
    /// Derived travel lag, seconds per degree of rotation.
    seconds_per_degree: f64,
}

/// On-disk profile layout. Field names match the original profile
/// files shipped with each servo model.
#[derive(Deserialize)]
struct ProfileFile {
    model: String,
    #[serde(rename = "PWM_min_us")]
    pwm_min_us: f64,
    #[serde(rename = "PWM_max_us")]
    pwm_max_us: f64,
    max_travel_degrees: f64,
    #[serde(rename = "travel_lag_numerator__seconds")]
    travel_lag_numerator_seconds: f64,
    #[serde(rename = "travel_lag_denominator__degrees")]
    travel_lag_denominator_degrees: f64,
}

impl ServoProfile {
    /// Builds a profile from raw field values, validating them.
    ///
    /// The travel lag is given as a measured fraction (numerator
    /// seconds over denominator degrees); a zero denominator, a
    /// non-positive travel range, and an inverted pulse range are all
    /// rejected as configuration errors.
    pub fn new(
        model: impl Into<String>,
        pwm_min_us: f64,
        pwm_max_us: f64,
        max_travel_degrees: f64,
        travel_lag_numerator_seconds: f64,
        travel_lag_denominator_degrees: f64,
    ) -> Result<Self> {
        if travel_lag_denominator_degrees == 0.0 {
            return Err(Error::InvalidProfile {
                field: "travel_lag_denominator__degrees",
                value: travel_lag_denominator_degrees,
            });
        }
        if max_travel_degrees <= 0.0 {
            return Err(Error::InvalidProfile {
                field: "max_travel_degrees",
                value: max_travel_degrees,
            });
        }
        if pwm_max_us <= pwm_min_us {
            return Err(Error::InvalidProfile {
                field: "PWM_max_us",
                value: pwm_max_us,
            });
        }
        Ok(Self {
            model: model.into(),
            pwm_min_us,
            pwm_max_us,
            max_travel_degrees,
            seconds_per_degree: travel_lag_numerator_seconds / travel_lag_denominator_degrees,
        })
    }

    /// Loads and validates a profile from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::ProfileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parses and validates a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: ProfileFile = serde_json::from_str(json)?;
        Self::new(
            raw.model,
            raw.pwm_min_us,
            raw.pwm_max_us,
            raw.max_travel_degrees,
            raw.travel_lag_numerator_seconds,
            raw.travel_lag_denominator_degrees,
        )
    }

    /// Profile for the [SG90](https://www.friendlywire.com/projects/ne555-servo-safe/SG90-datasheet.pdf).
    /// Can be used for SG90S as well.
    pub fn sg90() -> Self {
        Self {
            model: "SG90".to_string(),
            pwm_min_us: 500.0,
            pwm_max_us: 2400.0,
            max_travel_degrees: 180.0,
            // datasheet: 0.12 s / 60 degrees
            seconds_per_degree: 0.12 / 60.0,
        }
    }

    /// Profile for the [MG995](https://www.electronicoscaldas.com/datasheet/MG995_Tower-Pro.pdf).
    /// High-torque servo motor with metal gears.
    /// Can be used for MG996, MG996R as well.
    pub fn mg995() -> Self {
        Self {
            model: "MG995".to_string(),
            pwm_min_us: 1000.0,
            pwm_max_us: 2000.0,
            max_travel_degrees: 180.0,
            // datasheet: 0.2 s / 60 degrees at 4.8V
            seconds_per_degree: 0.2 / 60.0,
        }
    }

    /// Travel lag in seconds per degree of rotation.
    pub fn seconds_per_degree(&self) -> f64 {
        self.seconds_per_degree
    }

    /// Angular speed in degrees per second.
    pub fn speed_degrees_per_second(&self) -> f64 {
        1.0 / self.seconds_per_degree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::path::PathBuf;

    const SG90_JSON: &str = r#"{
        "model": "SG90",
        "PWM_min_us": 500,
        "PWM_max_us": 2400,
        "max_travel_degrees": 180,
        "travel_lag_numerator__seconds": 0.12,
        "travel_lag_denominator__degrees": 60
    }"#;

    #[test]
    fn parses_a_complete_profile() {
        let profile = ServoProfile::from_json(SG90_JSON).unwrap();
        assert_eq!(profile.model, "SG90");
        assert_eq!(profile.pwm_min_us, 500.0);
        assert_eq!(profile.pwm_max_us, 2400.0);
        assert_eq!(profile.max_travel_degrees, 180.0);
        assert!((profile.seconds_per_degree() - 0.002).abs() < 1e-12);
        assert!((profile.speed_degrees_per_second() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn missing_field_is_a_configuration_error() {
        let json = r#"{
            "model": "SG90",
            "PWM_min_us": 500,
            "PWM_max_us": 2400,
            "max_travel_degrees": 180
        }"#;
        let err = ServoProfile::from_json(json).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn malformed_json_is_a_configuration_error() {
        let err = ServoProfile::from_json("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn zero_lag_denominator_is_rejected() {
        let err = ServoProfile::new("X", 1000.0, 2000.0, 180.0, 1.0, 0.0).unwrap_err();
        match err {
            Error::InvalidProfile { field, value } => {
                assert_eq!(field, "travel_lag_denominator__degrees");
                assert_eq!(value, 0.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn degenerate_ranges_are_rejected() {
        assert!(ServoProfile::new("X", 1000.0, 2000.0, 0.0, 1.0, 90.0).is_err());
        assert!(ServoProfile::new("X", 2000.0, 1000.0, 180.0, 1.0, 90.0).is_err());
    }

    #[test]
    fn missing_profile_file_reports_the_path() {
        let err = ServoProfile::from_path("/nonexistent/servo.json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("/nonexistent/servo.json"));
    }

    #[test]
    fn bundled_profiles_match_the_presets() {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("profiles");
        let sg90 = ServoProfile::from_path(dir.join("sg90.json")).unwrap();
        assert_eq!(sg90, ServoProfile::sg90());
        let mg995 = ServoProfile::from_path(dir.join("mg995.json")).unwrap();
        assert_eq!(mg995, ServoProfile::mg995());
    }
}
