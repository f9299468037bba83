//! Simulated go-straight run
//!
//! Builds the servo from an optional TOML config, applies the command line
//! overrides and ticks it against [`SimulatedRobot`] in real time.

use anyhow::{Context, Result};
use clap::Args;
use phoenix_sdk::hal::mock::MockPigeonBackend;
use phoenix_sdk::sim::SimulatedRobot;
use phoenix_sdk::{LoopConfig, PigeonImu, ServoConfig, Style, run_loopable};
use std::path::PathBuf;
use tracing::info;

/// Simulation command arguments
///
/// Every servo option left unset falls back to the config file, then to
/// [`ServoConfig::default`].
#[derive(Args, Debug)]
pub struct SimulateCommand {
    /// Servo config file (TOML)
    ///
    /// Same layout as [`ServoConfig`]: `style`, `throttle` (or `y`),
    /// `target_heading` and a `[params]` table.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output style: percent_output, voltage or velocity_closed_loop
    ///
    /// `voltage` also sets the drivetrain peak output to `params.max_out`.
    #[arg(short, long)]
    pub style: Option<Style>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 250)]
    pub ticks: usize,

    /// Target heading (degrees)
    #[arg(long, allow_negative_numbers = true)]
    pub target: Option<f64>,

    /// Forward throttle, passed through unchanged on every tick
    #[arg(long, allow_negative_numbers = true)]
    pub throttle: Option<f64>,

    /// Tick rate (Hz)
    ///
    /// # Notes
    ///
    /// - the loop runs in real time, so `ticks / rate` is the wall time
    /// - the simulated robot advances `1 / rate` seconds per tick
    /// - must be positive with a period that fits in a `Duration`
    #[arg(short, long, default_value_t = 50.0)]
    pub rate: f64,

    /// Heading the robot starts at (degrees)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub initial: f64,

    /// Proportional gain override
    #[arg(long)]
    pub kp: Option<f64>,

    /// Integral gain override
    ///
    /// Accumulates only inside `params.i_zone` when that is set.
    #[arg(long)]
    pub ki: Option<f64>,

    /// Derivative gain override, applied to the IMU yaw rate
    #[arg(long)]
    pub kd: Option<f64>,
}

impl SimulateCommand {
    /// Config file contents with command line overrides applied
    pub fn servo_config(&self) -> Result<ServoConfig> {
        let mut config = match &self.config {
            Some(path) => ServoConfig::load(path)
                .with_context(|| format!("loading servo config {}", path.display()))?,
            None => ServoConfig::default(),
        };

        if let Some(style) = self.style {
            config.style = style;
        }
        if let Some(target) = self.target {
            config.target_heading = target;
        }
        if let Some(throttle) = self.throttle {
            config.throttle = throttle;
        }
        if let Some(p) = self.kp {
            config.params.p = p;
        }
        if let Some(i) = self.ki {
            config.params.i = i;
        }
        if let Some(d) = self.kd {
            config.params.d = d;
        }
        Ok(config)
    }

    /// Run the simulation and print the final heading
    pub fn execute(&self) -> Result<()> {
        // === 1. Configuration ===

        let config = self.servo_config()?;
        let loop_config = LoopConfig {
            frequency_hz: self.rate,
            max_iterations: Some(self.ticks),
        };
        loop_config.validate()?;

        // === 2. Simulated hardware ===

        let backend = MockPigeonBackend::ready();
        backend.set_heading(self.initial, 0.0);
        let pigeon = PigeonImu::new(backend.clone(), 0);
        let robot = SimulatedRobot::new(backend, 1.0 / self.rate);

        // === 3. Run ===

        info!(
            style = ?config.style,
            target = config.target_heading,
            initial = self.initial,
            "starting simulation"
        );
        let mut servo = config.build(&pigeon, robot);
        let stats = run_loopable(&mut servo, &loop_config)?;

        println!(
            "final heading: {:.3} deg (target {:.3} deg, {} ticks, {} overruns)",
            servo.imu_heading(),
            config.target_heading,
            stats.iterations,
            stats.overruns
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn command() -> SimulateCommand {
        SimulateCommand {
            config: None,
            style: None,
            ticks: 10,
            target: None,
            throttle: None,
            rate: 1000.0,
            initial: 0.0,
            kp: None,
            ki: None,
            kd: None,
        }
    }

    #[test]
    fn test_defaults_without_config() {
        let config = command().servo_config().unwrap();
        assert_eq!(config, ServoConfig::default());
    }

    #[test]
    fn test_overrides_apply_on_top_of_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "style = \"voltage\"\nthrottle = 0.2\n[params]\np = 0.1\nmax_out = 6.0").unwrap();

        let cmd = SimulateCommand {
            config: Some(file.path().to_path_buf()),
            target: Some(-45.0),
            kd: Some(0.5),
            ..command()
        };
        let config = cmd.servo_config().unwrap();

        assert_eq!(config.style, Style::Voltage);
        assert_eq!(config.throttle, 0.2);
        assert_eq!(config.target_heading, -45.0);
        assert_eq!(config.params.p, 0.1);
        assert_eq!(config.params.d, 0.5);
        assert_eq!(config.params.max_out, 6.0);
    }

    #[test]
    fn test_missing_config_is_error() {
        let cmd = SimulateCommand {
            config: Some(PathBuf::from("/nonexistent/servo.toml")),
            ..command()
        };
        assert!(cmd.servo_config().is_err());
    }

    #[test]
    fn test_invalid_rate_is_error() {
        let cmd = SimulateCommand {
            rate: 0.0,
            ..command()
        };
        assert!(cmd.execute().is_err());
    }
}
