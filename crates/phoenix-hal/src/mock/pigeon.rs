use super::lock;
use crate::pigeon::{PigeonBackend, RawFusionStatus, RawGeneralStatus};
use crate::DeviceHandle;
use phoenix_protocol::PigeonState;
use std::sync::{Arc, Mutex};

const HANDLE_BASE: i64 = 0x0400_0000;

#[derive(Debug, Clone)]
pub struct MockPigeonState {
    pub destroyed: Vec<DeviceHandle>,
    pub ypr: [f64; 3],
    pub raw_gyro: [f64; 3],
    pub state: PigeonState,
    pub fusion: RawFusionStatus,
    pub general: RawGeneralStatus,
    /// Returned by every call that reports an error code
    pub error_code: i32,
}

impl Default for MockPigeonState {
    fn default() -> Self {
        Self {
            destroyed: Vec::new(),
            ypr: [0.0; 3],
            raw_gyro: [0.0; 3],
            state: PigeonState::NoComm,
            fusion: RawFusionStatus::default(),
            general: RawGeneralStatus::default(),
            error_code: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockPigeonBackend {
    state: Arc<Mutex<MockPigeonState>>,
}

impl MockPigeonBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already reports `Ready`
    pub fn ready() -> Self {
        let backend = Self::default();
        backend.set_state(PigeonState::Ready);
        backend
    }

    pub fn snapshot(&self) -> MockPigeonState {
        lock(&self.state).clone()
    }

    pub fn destroyed(&self) -> Vec<DeviceHandle> {
        lock(&self.state).destroyed.clone()
    }

    /// Set yaw (degrees) and yaw rate (degrees per second)
    pub fn set_heading(&self, yaw_deg: f64, rate_dps: f64) {
        let mut state = lock(&self.state);
        state.ypr[0] = yaw_deg;
        state.raw_gyro[2] = rate_dps;
    }

    pub fn heading(&self) -> f64 {
        lock(&self.state).ypr[0]
    }

    pub fn set_state(&self, pigeon_state: PigeonState) {
        let mut state = lock(&self.state);
        state.state = pigeon_state;
        state.general.state = pigeon_state.into();
    }

    pub fn set_fusion(&self, heading: f64, is_fusing: bool, is_valid: bool) {
        lock(&self.state).fusion = RawFusionStatus {
            heading,
            is_fusing,
            is_valid,
        };
    }

    pub fn set_general_status(&self, general: RawGeneralStatus) {
        lock(&self.state).general = general;
    }

    pub fn set_error_code(&self, code: i32) {
        lock(&self.state).error_code = code;
    }
}

impl PigeonBackend for MockPigeonBackend {
    fn create(&self, device_number: i32) -> DeviceHandle {
        DeviceHandle(HANDLE_BASE | device_number as i64)
    }

    fn destroy(&self, handle: DeviceHandle) {
        lock(&self.state).destroyed.push(handle);
    }

    fn yaw_pitch_roll(&self, _handle: DeviceHandle, ypr: &mut [f64; 3]) -> i32 {
        let state = lock(&self.state);
        *ypr = state.ypr;
        state.error_code
    }

    fn raw_gyro(&self, _handle: DeviceHandle, xyz_dps: &mut [f64; 3]) -> i32 {
        let state = lock(&self.state);
        *xyz_dps = state.raw_gyro;
        state.error_code
    }

    fn state(&self, _handle: DeviceHandle) -> i32 {
        lock(&self.state).state.into()
    }

    fn set_yaw(&self, _handle: DeviceHandle, angle_deg: f64) -> i32 {
        let mut state = lock(&self.state);
        state.ypr[0] = angle_deg;
        state.error_code
    }

    fn fused_heading(&self, _handle: DeviceHandle, status: &mut RawFusionStatus) -> i32 {
        let state = lock(&self.state);
        *status = state.fusion;
        state.error_code
    }

    fn general_status(&self, _handle: DeviceHandle, status: &mut RawGeneralStatus) -> i32 {
        let state = lock(&self.state);
        *status = state.general;
        state.error_code
    }

    fn last_error(&self, _handle: DeviceHandle) -> i32 {
        lock(&self.state).error_code
    }
}
