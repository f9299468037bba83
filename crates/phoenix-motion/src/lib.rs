//! # Phoenix Motion
//!
//! Closed-loop helpers that sit on top of the device layer.
//!
//! - [`Loopable`]: start / loop / stop lifecycle ticked by the host
//! - [`ServoParameters`]: PID gains, integral accumulator and output clamp
//! - [`ServoGoStraightWithImuSmart`]: heading-hold servo driving a
//!   [`SmartDrivetrain`] from [`Imu`] feedback
//! - [`logger`]: error-code reporting through `tracing`
//! - [`runner`]: fixed-rate tick driver for any `Loopable`
//! - [`config`]: TOML configuration for the servo

pub mod config;
pub mod drive;
mod error;
pub mod go_straight;
pub mod imu;
pub mod logger;
pub mod loopable;
pub mod runner;
pub mod servo_params;

pub use config::ServoConfig;
pub use drive::{SmartDrivetrain, Style};
pub use error::MotionError;
pub use go_straight::{ServoGoStraightWithImuSmart, ServoState};
pub use imu::Imu;
pub use loopable::Loopable;
pub use runner::{LoopConfig, LoopStats, run_loopable};
pub use servo_params::ServoParameters;
