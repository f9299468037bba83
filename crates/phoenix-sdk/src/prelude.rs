//! Prelude - common imports
//!
//! ```rust
//! use phoenix_sdk::prelude::*;
//! ```

// Devices
pub use crate::hal::{Canifier, CanifierBackend, LedChannel, PigeonBackend, PigeonImu, PwmChannel};

// Control
pub use crate::motion::{
    Imu, LoopConfig, Loopable, ServoConfig, ServoGoStraightWithImuSmart, ServoParameters,
    SmartDrivetrain, Style, run_loopable,
};

// Codes and errors
pub use crate::motion::MotionError;
pub use crate::protocol::{ErrorCode, GeneralPin, PigeonState, ProtocolError};
