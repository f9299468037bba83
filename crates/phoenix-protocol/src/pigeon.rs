//! Pigeon IMU state and calibration modes

use crate::ProtocolError;
use num_enum::{FromPrimitive, IntoPrimitive, TryFromPrimitive};

/// Overall state of the Pigeon
///
/// Unknown raw values read as `NoComm`: the signals are not trustworthy
/// unless the sensor positively reports `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum PigeonState {
    #[num_enum(default)]
    NoComm = 0,
    Initializing = 1,
    Ready = 2,
    UserCalibration = 3,
}

impl PigeonState {
    pub fn is_ready(self) -> bool {
        self == PigeonState::Ready
    }
}

impl std::fmt::Display for PigeonState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PigeonState::NoComm => "NoComm",
            PigeonState::Initializing => "Initializing",
            PigeonState::Ready => "Ready",
            PigeonState::UserCalibration => "UserCalibration",
        };
        f.write_str(name)
    }
}

/// Calibration modes supported by the Pigeon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum CalibrationMode {
    BootTareGyroAccel = 0,
    Temperature = 1,
    Magnetometer12Pt = 2,
    Magnetometer360 = 3,
    Accelerometer = 5,
}

impl CalibrationMode {
    pub fn from_code(code: i32) -> Result<Self, ProtocolError> {
        Self::try_from(code).map_err(|e| ProtocolError::invalid("CalibrationMode", e.number))
    }
}

impl std::fmt::Display for CalibrationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CalibrationMode::BootTareGyroAccel => "BootTareGyroAccel",
            CalibrationMode::Temperature => "Temperature",
            CalibrationMode::Magnetometer12Pt => "Magnetometer12Pt",
            CalibrationMode::Magnetometer360 => "Magnetometer360",
            CalibrationMode::Accelerometer => "Accelerometer",
        };
        f.write_str(name)
    }
}
