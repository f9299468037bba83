use super::lock;
use crate::canifier::{CanifierBackend, LedChannel, PwmChannel};
use crate::DeviceHandle;
use phoenix_protocol::GeneralPin;
use std::sync::{Arc, Mutex};

const HANDLE_BASE: i64 = 0x0300_0000;

#[derive(Debug, Clone, Default)]
pub struct MockCanifierState {
    pub created: Vec<i32>,
    pub destroyed: Vec<DeviceHandle>,
    pub led_outputs: [i32; 3],
    pub output_bits: i32,
    pub is_output_bits: i32,
    pub pwm_outputs: [i32; 4],
    pub pwm_enabled: [bool; 4],
    pub inputs: [bool; GeneralPin::COUNT],
    pub pwm_inputs: [[f32; 2]; 4],
    pub last_error: i32,
    pub battery_voltage: f32,
}

#[derive(Debug, Clone, Default)]
pub struct MockCanifierBackend {
    state: Arc<Mutex<MockCanifierState>>,
}

impl MockCanifierBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle issued for `device_number`
    pub fn handle_for(device_number: i32) -> DeviceHandle {
        DeviceHandle(HANDLE_BASE | device_number as i64)
    }

    pub fn snapshot(&self) -> MockCanifierState {
        lock(&self.state).clone()
    }

    pub fn created(&self) -> Vec<i32> {
        lock(&self.state).created.clone()
    }

    pub fn destroyed(&self) -> Vec<DeviceHandle> {
        lock(&self.state).destroyed.clone()
    }

    pub fn led_output(&self, channel: LedChannel) -> i32 {
        lock(&self.state).led_outputs[channel as usize]
    }

    /// `(duty_cycle, enabled)`
    pub fn pwm_output(&self, channel: PwmChannel) -> (i32, bool) {
        let state = lock(&self.state);
        (
            state.pwm_outputs[channel as usize],
            state.pwm_enabled[channel as usize],
        )
    }

    /// `(output_bits, is_output_bits)`
    pub fn general_outputs(&self) -> (i32, i32) {
        let state = lock(&self.state);
        (state.output_bits, state.is_output_bits)
    }

    pub fn set_input(&self, pin: GeneralPin, level: bool) {
        lock(&self.state).inputs[pin.index()] = level;
    }

    pub fn set_pwm_input(&self, channel: PwmChannel, duty_cycle_us: f32, period_us: f32) {
        lock(&self.state).pwm_inputs[channel as usize] = [duty_cycle_us, period_us];
    }

    pub fn set_last_error(&self, code: i32) {
        lock(&self.state).last_error = code;
    }

    pub fn set_battery_voltage(&self, volts: f32) {
        lock(&self.state).battery_voltage = volts;
    }
}

impl CanifierBackend for MockCanifierBackend {
    fn create(&self, device_number: i32) -> DeviceHandle {
        lock(&self.state).created.push(device_number);
        Self::handle_for(device_number)
    }

    fn destroy(&self, handle: DeviceHandle) {
        lock(&self.state).destroyed.push(handle);
    }

    fn set_led_output(&self, _handle: DeviceHandle, duty_cycle: i32, led_channel: i32) {
        if let Some(slot) = lock(&self.state).led_outputs.get_mut(led_channel as usize) {
            *slot = duty_cycle;
        }
    }

    fn set_general_outputs(&self, _handle: DeviceHandle, output_bits: i32, is_output_bits: i32) {
        let mut state = lock(&self.state);
        state.output_bits = output_bits;
        state.is_output_bits = is_output_bits;
    }

    fn set_general_output(
        &self,
        _handle: DeviceHandle,
        output_pin: i32,
        output_value: bool,
        output_enable: bool,
    ) {
        // unknown pins are ignored, like out-of-range LED and PWM channels
        let Ok(pin) = GeneralPin::from_code(output_pin) else {
            return;
        };
        let mask = pin.mask();
        let mut state = lock(&self.state);
        if output_value {
            state.output_bits |= mask;
        } else {
            state.output_bits &= !mask;
        }
        if output_enable {
            state.is_output_bits |= mask;
        } else {
            state.is_output_bits &= !mask;
        }
    }

    fn set_pwm_output(&self, _handle: DeviceHandle, pwm_channel: i32, duty_cycle: i32) {
        if let Some(slot) = lock(&self.state).pwm_outputs.get_mut(pwm_channel as usize) {
            *slot = duty_cycle;
        }
    }

    fn enable_pwm_output(&self, _handle: DeviceHandle, pwm_channel: i32, enable: bool) {
        if let Some(slot) = lock(&self.state).pwm_enabled.get_mut(pwm_channel as usize) {
            *slot = enable;
        }
    }

    fn general_inputs(&self, _handle: DeviceHandle, all_pins: &mut [bool]) {
        let state = lock(&self.state);
        for (dst, src) in all_pins.iter_mut().zip(state.inputs.iter()) {
            *dst = *src;
        }
    }

    fn general_input(&self, _handle: DeviceHandle, input_pin: i32) -> bool {
        lock(&self.state)
            .inputs
            .get(input_pin as usize)
            .copied()
            .unwrap_or(false)
    }

    fn pwm_input(&self, _handle: DeviceHandle, pwm_channel: i32, duty_cycle_and_period: &mut [f32; 2]) {
        if let Some(values) = lock(&self.state).pwm_inputs.get(pwm_channel as usize) {
            *duty_cycle_and_period = *values;
        }
    }

    fn last_error(&self, _handle: DeviceHandle) -> i32 {
        lock(&self.state).last_error
    }

    fn battery_voltage(&self, _handle: DeviceHandle) -> f32 {
        lock(&self.state).battery_voltage
    }
}
