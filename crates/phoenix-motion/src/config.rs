//! Servo configuration file
//!
//! ```toml
//! style = "voltage"
//! throttle = 0.4
//! target_heading = 0.0
//!
//! [params]
//! p = 0.02
//! d = 0.001
//! max_out = 6.0
//! ```
//!
//! Every key is optional. `y` is accepted as an alias for `throttle`.

use crate::drive::{SmartDrivetrain, Style};
use crate::error::MotionError;
use crate::go_straight::ServoGoStraightWithImuSmart;
use crate::imu::Imu;
use crate::servo_params::ServoParameters;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServoConfig {
    pub style: Style,
    /// Forward command, interpreted by the drivetrain in `style` units
    #[serde(alias = "y")]
    pub throttle: f64,
    /// Heading to hold, degrees
    pub target_heading: f64,
    pub params: ServoParameters,
}

impl ServoConfig {
    /// Read and parse a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MotionError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| MotionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), ?config, "loaded servo config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, MotionError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String, MotionError> {
        Ok(toml::to_string(self)?)
    }

    /// Build a servo routine from this configuration
    pub fn build<I: Imu, D: SmartDrivetrain>(
        &self,
        imu: I,
        drivetrain: D,
    ) -> ServoGoStraightWithImuSmart<I, D> {
        ServoGoStraightWithImuSmart::with_target(
            imu,
            drivetrain,
            self.style,
            self.params.clone(),
            self.throttle,
            self.target_heading,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
style = "voltage"
throttle = 0.4
target_heading = 15.0

[params]
p = 0.02
d = 0.001
max_out = 6.0
"#;

    #[test]
    fn test_parse_sample() {
        let config = ServoConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.style, Style::Voltage);
        assert_eq!(config.throttle, 0.4);
        assert_eq!(config.target_heading, 15.0);
        assert_eq!(config.params.p, 0.02);
        assert_eq!(config.params.i, 0.0);
        assert_eq!(config.params.d, 0.001);
        assert_eq!(config.params.max_out, 6.0);
    }

    #[test]
    fn test_empty_is_default() {
        let config = ServoConfig::from_toml_str("").unwrap();
        assert_eq!(config, ServoConfig::default());
        assert!(!config.params.gains_are_set());
    }

    #[test]
    fn test_y_alias() {
        let config = ServoConfig::from_toml_str("y = -0.25").unwrap();
        assert_eq!(config.throttle, -0.25);
    }

    #[test]
    fn test_unknown_style_rejected() {
        let err = ServoConfig::from_toml_str(r#"style = "torque""#).unwrap_err();
        assert!(matches!(err, MotionError::Toml(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ServoConfig {
            style: Style::VelocityClosedLoop,
            throttle: 250.0,
            target_heading: -30.0,
            params: ServoParameters::new(0.5, 0.01, 0.2)
                .with_i_zone(10.0)
                .with_i_max(50.0),
        };
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("velocity_closed_loop"));
        assert_eq!(ServoConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = ServoConfig::load(file.path()).unwrap();
        assert_eq!(config.style, Style::Voltage);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        match ServoConfig::load(&path) {
            Err(MotionError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
