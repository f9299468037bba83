//! Drivetrain abstraction consumed by the servo loops

use serde::{Deserialize, Serialize};

/// How a drive command is applied by the motor controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Fraction of bus voltage, [-1, 1]
    #[default]
    PercentOutput,
    /// Voltage compensated output, scaled to the configured peak
    Voltage,
    /// Velocity closed loop running on the motor controller. Gains are
    /// configured by the caller on the controllers themselves.
    VelocityClosedLoop,
}

impl std::str::FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percent_output" | "percent" => Ok(Style::PercentOutput),
            "voltage" => Ok(Style::Voltage),
            "velocity_closed_loop" | "velocity" => Ok(Style::VelocityClosedLoop),
            other => Err(format!(
                "unknown style '{other}', expected percent_output, voltage or velocity_closed_loop"
            )),
        }
    }
}

/// Arcade style drivetrain with configurable output limits
pub trait SmartDrivetrain {
    /// Command `forward` throttle and `turn` rate in the given style
    fn set(&mut self, style: Style, forward: f64, turn: f64);

    /// Minimum output applied when not in neutral
    fn config_nominal_percent_output_voltage(&mut self, forward_voltage: f64, reverse_voltage: f64);

    /// Maximum output in each direction
    fn config_peak_percent_output_voltage(&mut self, forward_voltage: f64, reverse_voltage: f64);
}

impl<D: SmartDrivetrain + ?Sized> SmartDrivetrain for &mut D {
    fn set(&mut self, style: Style, forward: f64, turn: f64) {
        (**self).set(style, forward, turn)
    }

    fn config_nominal_percent_output_voltage(&mut self, forward_voltage: f64, reverse_voltage: f64) {
        (**self).config_nominal_percent_output_voltage(forward_voltage, reverse_voltage)
    }

    fn config_peak_percent_output_voltage(&mut self, forward_voltage: f64, reverse_voltage: f64) {
        (**self).config_peak_percent_output_voltage(forward_voltage, reverse_voltage)
    }
}
