//! Pigeon IMU
//!
//! Heading, angular rate and calibration status. Backend calls return an
//! integer error code; the wrapper mirrors the most recent one so callers
//! can check [`PigeonImu::last_error`] after a read.

use crate::DeviceHandle;
use phoenix_protocol::{CalibrationMode, ErrorCode, PigeonState};
use std::cell::Cell;
use tracing::debug;

/// General status fields as delivered by firmware
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawGeneralStatus {
    pub state: i32,
    pub current_mode: i32,
    pub calibration_error: i32,
    pub cal_is_booting: bool,
    pub temp_c: f64,
    pub up_time_sec: i32,
    pub no_motion_bias_count: i32,
    pub temp_compensation_count: i32,
}

/// Fused heading fields as delivered by firmware
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawFusionStatus {
    pub heading: f64,
    pub is_fusing: bool,
    pub is_valid: bool,
}

/// Call contract into Pigeon firmware
pub trait PigeonBackend {
    fn create(&self, device_number: i32) -> DeviceHandle;

    fn destroy(&self, _handle: DeviceHandle) {}

    /// Yaw, pitch and roll in degrees
    fn yaw_pitch_roll(&self, handle: DeviceHandle, ypr: &mut [f64; 3]) -> i32;

    /// Angular rate around x, y, z in degrees per second
    fn raw_gyro(&self, handle: DeviceHandle, xyz_dps: &mut [f64; 3]) -> i32;

    fn state(&self, handle: DeviceHandle) -> i32;

    fn set_yaw(&self, handle: DeviceHandle, angle_deg: f64) -> i32;

    fn fused_heading(&self, handle: DeviceHandle, status: &mut RawFusionStatus) -> i32;

    fn general_status(&self, handle: DeviceHandle, status: &mut RawGeneralStatus) -> i32;

    fn last_error(&self, handle: DeviceHandle) -> i32;
}

/// Decoded general status
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralStatus {
    /// Motion driver state, tells whether the signals are accurate
    pub state: PigeonState,
    /// Calibration mode in progress, or the last one selected. `None` when
    /// firmware reports a mode this crate does not know.
    pub current_mode: Option<CalibrationMode>,
    /// Result of the last calibration, zero on success
    pub calibration_error: i32,
    pub cal_is_booting: bool,
    pub temp_c: f64,
    /// Capped at 255 seconds
    pub up_time_sec: i32,
    pub no_motion_bias_count: i32,
    pub temp_compensation_count: i32,
    /// Error code of the status read itself
    pub last_error: ErrorCode,
}

impl GeneralStatus {
    pub fn from_raw(raw: &RawGeneralStatus, err_code: i32) -> Self {
        Self {
            state: PigeonState::from(raw.state),
            current_mode: CalibrationMode::from_code(raw.current_mode).ok(),
            calibration_error: raw.calibration_error,
            cal_is_booting: raw.cal_is_booting,
            temp_c: raw.temp_c,
            up_time_sec: raw.up_time_sec,
            no_motion_bias_count: raw.no_motion_bias_count,
            temp_compensation_count: raw.temp_compensation_count,
            last_error: ErrorCode::from(err_code),
        }
    }

    /// Operator facing explanation of the current status
    pub fn description(&self) -> String {
        if !self.last_error.is_ok() {
            return "Status frame was not received, check wired connections and web-based config."
                .to_string();
        }
        if self.cal_is_booting {
            return "Pigeon is boot-caling to properly bias accel and gyro.  Do not move Pigeon.  \
                    When finished biasing, calibration mode will start."
                .to_string();
        }
        match self.state {
            PigeonState::UserCalibration => match self.current_mode {
                Some(CalibrationMode::BootTareGyroAccel) => {
                    "Boot-Calibration: Gyro and Accelerometer are being biased.".to_string()
                },
                Some(CalibrationMode::Temperature) => {
                    "Temperature-Calibration: Pigeon is collecting temp data and will finish \
                     when temp range is reached.  Do not move Pigeon."
                        .to_string()
                },
                Some(CalibrationMode::Magnetometer12Pt) => {
                    "Magnetometer Level 1 calibration: Orient the Pigeon PCB in the 12 positions \
                     documented in the User's Manual."
                        .to_string()
                },
                Some(CalibrationMode::Magnetometer360) => {
                    "Magnetometer Level 2 calibration: Spin robot slowly in 360' fashion."
                        .to_string()
                },
                Some(CalibrationMode::Accelerometer) => {
                    "Accelerometer Calibration: Pigeon PCB must be placed on a level source.  \
                     Follow User's Guide for how to level surface."
                        .to_string()
                },
                None => "Not enough data to determine status.".to_string(),
            },
            PigeonState::Ready => format!(
                "Pigeon is running normally.  Last CAL error code was {}.",
                self.calibration_error
            ),
            PigeonState::Initializing => {
                "Pigeon is boot-caling to properly bias accel and gyro.  Do not move Pigeon."
                    .to_string()
            },
            PigeonState::NoComm => "Not enough data to determine status.".to_string(),
        }
    }
}

/// Decoded fused heading status
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionStatus {
    pub heading: f64,
    pub is_fusing: bool,
    pub is_valid: bool,
    pub last_error: ErrorCode,
}

impl FusionStatus {
    /// A failed read clears both flags, the heading is kept as delivered
    pub fn from_raw(raw: &RawFusionStatus, err_code: i32) -> Self {
        let last_error = ErrorCode::from(err_code);
        let ok = last_error.is_ok();
        Self {
            heading: raw.heading,
            is_fusing: ok && raw.is_fusing,
            is_valid: ok && raw.is_valid,
            last_error,
        }
    }

    pub fn description(&self) -> &'static str {
        if !self.last_error.is_ok() {
            "Could not receive status frame.  Check wiring and web-config."
        } else if !self.is_valid {
            "Fused Heading is not valid."
        } else if !self.is_fusing {
            "Fused Heading is valid."
        } else {
            "Fused Heading is valid and is fusing compass."
        }
    }
}

/// Pigeon IMU device
pub struct PigeonImu<B: PigeonBackend> {
    backend: B,
    handle: DeviceHandle,
    device_number: i32,
    last_error: Cell<i32>,
}

impl<B: PigeonBackend> PigeonImu<B> {
    /// Construct the device with CAN id `device_number` (0..=62)
    pub fn new(backend: B, device_number: i32) -> Self {
        let handle = backend.create(device_number);
        debug!(device_number, %handle, "Pigeon IMU created");
        Self {
            backend,
            handle,
            device_number,
            last_error: Cell::new(0),
        }
    }

    pub fn handle(&self) -> DeviceHandle {
        self.handle
    }

    pub fn device_number(&self) -> i32 {
        self.device_number
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn mirror(&self, err_code: i32) -> ErrorCode {
        self.last_error.set(err_code);
        ErrorCode::from(err_code)
    }

    /// Yaw, pitch and roll in degrees
    pub fn yaw_pitch_roll(&self) -> [f64; 3] {
        let mut ypr = [0.0; 3];
        let err = self.backend.yaw_pitch_roll(self.handle, &mut ypr);
        self.mirror(err);
        ypr
    }

    /// Angular rate in degrees per second, z is the heading rate
    pub fn raw_gyro(&self) -> [f64; 3] {
        let mut xyz = [0.0; 3];
        let err = self.backend.raw_gyro(self.handle, &mut xyz);
        self.mirror(err);
        xyz
    }

    pub fn state(&self) -> PigeonState {
        PigeonState::from(self.backend.state(self.handle))
    }

    pub fn set_yaw(&mut self, angle_deg: f64) -> ErrorCode {
        let err = self.backend.set_yaw(self.handle, angle_deg);
        self.mirror(err)
    }

    pub fn fusion_status(&self) -> FusionStatus {
        let mut raw = RawFusionStatus::default();
        let err = self.backend.fused_heading(self.handle, &mut raw);
        self.mirror(err);
        FusionStatus::from_raw(&raw, err)
    }

    pub fn fused_heading(&self) -> f64 {
        self.fusion_status().heading
    }

    pub fn general_status(&self) -> GeneralStatus {
        let mut raw = RawGeneralStatus::default();
        let err = self.backend.general_status(self.handle, &mut raw);
        self.mirror(err);
        GeneralStatus::from_raw(&raw, err)
    }

    /// Error code of the most recent wrapper call
    pub fn last_error(&self) -> ErrorCode {
        ErrorCode::from(self.last_error.get())
    }

    /// Error code held by firmware for this device
    pub fn firmware_last_error(&self) -> ErrorCode {
        ErrorCode::from(self.backend.last_error(self.handle))
    }
}

impl<B: PigeonBackend> Drop for PigeonImu<B> {
    fn drop(&mut self) {
        self.backend.destroy(self.handle);
    }
}
