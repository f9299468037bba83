//! # Phoenix HAL
//!
//! Binding layer between typed device objects and vendor firmware.
//!
//! Firmware is reached through backend traits ([`CanifierBackend`],
//! [`PigeonBackend`]). A backend is a flat list of entry points: it does no
//! validation, keeps no state of its own and never retries. Whatever a call
//! does on failure is up to the firmware on the other side; the outcome is
//! read back through `last_error`.
//!
//! The typed wrappers ([`Canifier`], [`PigeonImu`]) add unit scaling,
//! clamping and enum conversion on top of a backend and release the device
//! handle when dropped.
//!
//! With the `mock` feature, the `mock` module provides in-memory backends
//! that stand in for the firmware in tests and simulation.

pub mod canifier;
pub mod pigeon;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use canifier::{Canifier, CanifierBackend, LedChannel, PinValues, PwmChannel, PwmInput};
pub use pigeon::{
    FusionStatus, GeneralStatus, PigeonBackend, PigeonImu, RawFusionStatus, RawGeneralStatus,
};

pub use phoenix_protocol::{CalibrationMode, ErrorCode, GeneralPin, PigeonState};

/// Opaque device identifier issued by firmware
///
/// Firmware owns the device behind the handle. The binding layer only
/// passes the handle back on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceHandle(pub i64);

impl DeviceHandle {
    pub fn raw(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}
