//! CANifier: LED/PWM outputs, general pin I/O, PWM inputs and battery voltage

use crate::DeviceHandle;
use phoenix_protocol::{ErrorCode, GeneralPin};
use tracing::{debug, trace};

/// Full-scale duty cycle for LED and PWM outputs
pub const DUTY_CYCLE_MAX: i32 = 1023;

/// Call contract into CANifier firmware
///
/// One method per native entry point. Implementations forward the call and
/// return whatever firmware returns; failures surface through
/// [`last_error`](CanifierBackend::last_error).
pub trait CanifierBackend {
    fn create(&self, device_number: i32) -> DeviceHandle;

    /// Release the device. Bindings without an explicit destructor can leave
    /// this empty.
    fn destroy(&self, _handle: DeviceHandle) {}

    fn set_led_output(&self, handle: DeviceHandle, duty_cycle: i32, led_channel: i32);

    /// `output_bits` holds the level of each pin, `is_output_bits` selects
    /// which pins are driven. Bit N is `GeneralPin` N.
    fn set_general_outputs(&self, handle: DeviceHandle, output_bits: i32, is_output_bits: i32);

    fn set_general_output(
        &self,
        handle: DeviceHandle,
        output_pin: i32,
        output_value: bool,
        output_enable: bool,
    );

    fn set_pwm_output(&self, handle: DeviceHandle, pwm_channel: i32, duty_cycle: i32);

    fn enable_pwm_output(&self, handle: DeviceHandle, pwm_channel: i32, enable: bool);

    /// Fill `all_pins` with the level of every general pin
    fn general_inputs(&self, handle: DeviceHandle, all_pins: &mut [bool]);

    fn general_input(&self, handle: DeviceHandle, input_pin: i32) -> bool;

    /// Fill `[duty_cycle_us, period_us]` for the PWM input channel
    fn pwm_input(&self, handle: DeviceHandle, pwm_channel: i32, duty_cycle_and_period: &mut [f32; 2]);

    fn last_error(&self, handle: DeviceHandle) -> i32;

    fn battery_voltage(&self, handle: DeviceHandle) -> f32;
}

/// LED output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedChannel {
    A = 0,
    B = 1,
    C = 2,
}

/// PWM output/input channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PwmChannel {
    Channel0 = 0,
    Channel1 = 1,
    Channel2 = 2,
    Channel3 = 3,
}

impl PwmChannel {
    pub const ALL: [PwmChannel; 4] = [
        PwmChannel::Channel0,
        PwmChannel::Channel1,
        PwmChannel::Channel2,
        PwmChannel::Channel3,
    ];
}

/// Snapshot of every general pin level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PinValues(pub [bool; GeneralPin::COUNT]);

impl PinValues {
    pub fn get(&self, pin: GeneralPin) -> bool {
        self.0[pin.index()]
    }

    /// Pins that read high
    pub fn high(&self) -> impl Iterator<Item = GeneralPin> + '_ {
        GeneralPin::ALL.into_iter().filter(|pin| self.get(*pin))
    }
}

/// Measured PWM input, in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PwmInput {
    pub duty_cycle_us: f32,
    pub period_us: f32,
}

impl PwmInput {
    /// Duty cycle as a fraction of the period, 0 when no period was measured
    pub fn fraction(&self) -> f32 {
        if self.period_us > 0.0 {
            self.duty_cycle_us / self.period_us
        } else {
            0.0
        }
    }
}

/// CANifier device
///
/// Holds the firmware handle for its lifetime and releases it on drop.
pub struct Canifier<B: CanifierBackend> {
    backend: B,
    handle: DeviceHandle,
    device_number: i32,
}

impl<B: CanifierBackend> Canifier<B> {
    /// Construct the device with CAN id `device_number`
    pub fn new(backend: B, device_number: i32) -> Self {
        let handle = backend.create(device_number);
        debug!(device_number, %handle, "CANifier created");
        Self {
            backend,
            handle,
            device_number,
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

    /// Drive an LED channel, `percent_output` in [0, 1]
    pub fn set_led_output(&mut self, percent_output: f64, channel: LedChannel) {
        let duty_cycle = (percent_output.clamp(0.0, 1.0) * DUTY_CYCLE_MAX as f64) as i32;
        trace!(?channel, duty_cycle, "set LED output");
        self.backend
            .set_led_output(self.handle, duty_cycle, channel as i32);
    }

    pub fn set_general_output(&mut self, pin: GeneralPin, value: bool, enable: bool) {
        self.backend
            .set_general_output(self.handle, pin.value(), value, enable);
    }

    /// Set every general output at once. Bit N of each mask is `GeneralPin` N.
    pub fn set_general_outputs(&mut self, output_bits: i32, is_output_bits: i32) {
        self.backend
            .set_general_outputs(self.handle, output_bits, is_output_bits);
    }

    /// Duty cycle in [0, 1023], values outside are clamped
    pub fn set_pwm_output(&mut self, channel: PwmChannel, duty_cycle: i32) {
        let duty_cycle = duty_cycle.clamp(0, DUTY_CYCLE_MAX);
        self.backend
            .set_pwm_output(self.handle, channel as i32, duty_cycle);
    }

    pub fn enable_pwm_output(&mut self, channel: PwmChannel, enable: bool) {
        self.backend
            .enable_pwm_output(self.handle, channel as i32, enable);
    }

    pub fn general_inputs(&self) -> PinValues {
        let mut pins = [false; GeneralPin::COUNT];
        self.backend.general_inputs(self.handle, &mut pins);
        PinValues(pins)
    }

    pub fn general_input(&self, pin: GeneralPin) -> bool {
        self.backend.general_input(self.handle, pin.value())
    }

    pub fn pwm_input(&self, channel: PwmChannel) -> PwmInput {
        let mut duty_cycle_and_period = [0.0f32; 2];
        self.backend
            .pwm_input(self.handle, channel as i32, &mut duty_cycle_and_period);
        PwmInput {
            duty_cycle_us: duty_cycle_and_period[0],
            period_us: duty_cycle_and_period[1],
        }
    }

    /// Outcome of the most recent call, unknown codes read as `GeneralError`
    pub fn last_error(&self) -> ErrorCode {
        ErrorCode::from(self.backend.last_error(self.handle))
    }

    pub fn battery_voltage(&self) -> f32 {
        self.backend.battery_voltage(self.handle)
    }
}

impl<B: CanifierBackend> Drop for Canifier<B> {
    fn drop(&mut self) {
        debug!(device_number = self.device_number, handle = %self.handle, "CANifier released");
        self.backend.destroy(self.handle);
    }
}
