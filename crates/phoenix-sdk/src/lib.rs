//! Phoenix SDK
//!
//! Rust SDK for CANifier and Pigeon IMU devices and the heading-hold servo
//! that drives a robot straight from IMU feedback.
//!
//! # Architecture
//!
//! Layered, from the bottom up:
//!
//! - **Protocol** (`protocol`): error codes, pin and parameter identifiers,
//!   IMU state enums
//! - **HAL** (`hal`): firmware backend traits and the typed device wrappers
//! - **Motion** (`motion`): PID parameters, the go-straight servo, the loop
//!   runner and its configuration
//! - **Simulation** (`sim`, `mock` feature): kinematic drivetrain closing the
//!   loop through the in-memory Pigeon backend
//!
//! # Quick start
//!
//! ```rust
//! use phoenix_sdk::prelude::*;
//! ```
//!
//! A firmware binding implements [`PigeonBackend`] (and [`CanifierBackend`]
//! for the CANifier). The drivetrain side implements [`SmartDrivetrain`].
//! With both in hand:
//!
//! ```rust,ignore
//! let imu = PigeonImu::new(my_backend, 0);
//! let config = ServoConfig::load("servo.toml")?;
//! let mut servo = config.build(&imu, my_drivetrain);
//! run_loopable(&mut servo, &LoopConfig::default())?;
//! ```

pub use phoenix_hal as hal;
pub use phoenix_motion as motion;
pub use phoenix_protocol as protocol;

pub mod prelude;

#[cfg(any(test, feature = "mock"))]
pub mod sim;

// Protocol
pub use protocol::{CalibrationMode, ErrorCode, GeneralPin, ParamEnum, PigeonState, ProtocolError};

// Devices
pub use hal::{
    Canifier, CanifierBackend, DeviceHandle, FusionStatus, GeneralStatus, LedChannel, PigeonBackend,
    PigeonImu, PinValues, PwmChannel, PwmInput,
};

// Control
pub use motion::{
    Imu, LoopConfig, LoopStats, Loopable, MotionError, ServoConfig, ServoGoStraightWithImuSmart,
    ServoParameters, ServoState, SmartDrivetrain, Style, run_loopable,
};

use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber and bridge `log` records into it
///
/// The filter is read from `RUST_LOG` and defaults to `info`. Calling this
/// more than once is harmless: later calls leave the first subscriber in
/// place and return `false`.
pub fn init_logger() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return false;
    }
    // a `log` logger may already be installed by the host application
    let _ = tracing_log::LogTracer::init();
    true
}
