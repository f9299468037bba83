//! Kinematic robot model
//!
//! [`SimulatedRobot`] implements [`SmartDrivetrain`] and feeds the resulting
//! heading back into a [`MockPigeonBackend`], so a servo routine can be run
//! end to end without hardware. Every `set` call advances the model by one
//! tick of `dt` seconds.
//!
//! Positive turn commands rotate clockwise, which lowers the yaw reported by
//! the IMU.

use crate::hal::mock::MockPigeonBackend;
use crate::motion::{SmartDrivetrain, Style};
use tracing::trace;

/// Bus voltage used to normalise `Style::Voltage` commands
pub const NOMINAL_BUS_VOLTAGE: f64 = 12.0;

/// Last command received by the drivetrain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveCommand {
    pub style: Style,
    pub forward: f64,
    pub turn: f64,
}

pub struct SimulatedRobot {
    pigeon: MockPigeonBackend,
    dt: f64,
    max_turn_rate_dps: f64,
    heading: f64,
    nominal_voltage: (f64, f64),
    peak_voltage: (f64, f64),
    last_command: Option<DriveCommand>,
    ticks: usize,
}

impl SimulatedRobot {
    /// Model stepped `dt` seconds per command, starting from the backend's
    /// current yaw
    pub fn new(pigeon: MockPigeonBackend, dt: f64) -> Self {
        let heading = pigeon.heading();
        Self {
            pigeon,
            dt,
            max_turn_rate_dps: 180.0,
            heading,
            nominal_voltage: (0.0, 0.0),
            peak_voltage: (NOMINAL_BUS_VOLTAGE, -NOMINAL_BUS_VOLTAGE),
            last_command: None,
            ticks: 0,
        }
    }

    /// Heading rate at full turn output
    pub fn with_max_turn_rate(mut self, dps: f64) -> Self {
        self.max_turn_rate_dps = dps;
        self
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn last_command(&self) -> Option<DriveCommand> {
        self.last_command
    }

    pub fn nominal_voltage(&self) -> (f64, f64) {
        self.nominal_voltage
    }

    pub fn peak_voltage(&self) -> (f64, f64) {
        self.peak_voltage
    }

    /// Number of `set` calls so far
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    fn turn_fraction(&self, style: Style, turn: f64) -> f64 {
        match style {
            Style::Voltage => {
                let (peak_fwd, peak_rev) = self.peak_voltage;
                turn.clamp(peak_rev.min(0.0), peak_fwd.max(0.0)) / NOMINAL_BUS_VOLTAGE
            },
            Style::PercentOutput | Style::VelocityClosedLoop => turn,
        }
        .clamp(-1.0, 1.0)
    }
}

impl SmartDrivetrain for SimulatedRobot {
    fn set(&mut self, style: Style, forward: f64, turn: f64) {
        let rate = -self.turn_fraction(style, turn) * self.max_turn_rate_dps;
        self.heading += rate * self.dt;
        self.pigeon.set_heading(self.heading, rate);

        self.last_command = Some(DriveCommand {
            style,
            forward,
            turn,
        });
        self.ticks += 1;
        trace!(?style, forward, turn, heading = self.heading, "simulated drive step");
    }

    fn config_nominal_percent_output_voltage(&mut self, forward_voltage: f64, reverse_voltage: f64) {
        self.nominal_voltage = (forward_voltage, reverse_voltage);
    }

    fn config_peak_percent_output_voltage(&mut self, forward_voltage: f64, reverse_voltage: f64) {
        self.peak_voltage = (forward_voltage, reverse_voltage);
    }
}
