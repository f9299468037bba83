//! # Phoenix Protocol
//!
//! Integer-backed enumerations shared between the device layer and the
//! control layer. Nothing in here talks to hardware.
//!
//! ## Modules
//!
//! - `error_code`: outcome codes reported by firmware and API helpers
//! - `pins`: CANifier general-purpose pin identifiers
//! - `params`: configuration parameter identifiers
//! - `pigeon`: Pigeon IMU state and calibration mode
//!
//! Every enum keeps the exact integer value used on the wire, so values can
//! be passed straight through a firmware binding.

pub mod error_code;
pub mod params;
pub mod pigeon;
pub mod pins;

pub use error_code::ErrorCode;
pub use params::ParamEnum;
pub use pigeon::{CalibrationMode, PigeonState};
pub use pins::GeneralPin;

use thiserror::Error;

/// Protocol decoding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: i64 },
}

impl ProtocolError {
    pub(crate) fn invalid(field: &'static str, value: impl Into<i64>) -> Self {
        ProtocolError::InvalidValue {
            field,
            value: value.into(),
        }
    }
}
