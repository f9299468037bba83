//! CANifier and Pigeon status readout on the in-memory firmware
//!
//! ```bash
//! cargo run -p phoenix-sdk --features mock --example canifier_status
//! ```

use phoenix_sdk::hal::mock::{MockCanifierBackend, MockPigeonBackend};
use phoenix_sdk::prelude::*;

fn main() {
    phoenix_sdk::init_logger();

    let backend = MockCanifierBackend::new();
    backend.set_battery_voltage(12.3);
    backend.set_input(GeneralPin::LimF, true);
    backend.set_pwm_input(PwmChannel::Channel0, 1500.0, 20000.0);

    let mut canifier = Canifier::new(backend, 0);
    canifier.set_led_output(0.5, LedChannel::A);
    canifier.set_led_output(0.1, LedChannel::B);

    println!("CANifier {} ({})", canifier.device_number(), canifier.handle());
    println!("  battery: {:.1} V", canifier.battery_voltage());
    for pin in canifier.general_inputs().high() {
        println!("  input high: {pin:?}");
    }
    let pwm = canifier.pwm_input(PwmChannel::Channel0);
    println!(
        "  pwm0: {:.0} us / {:.0} us ({:.1}%)",
        pwm.duty_cycle_us,
        pwm.period_us,
        pwm.fraction() * 100.0
    );
    println!("  last error: {}", canifier.last_error());

    let pigeon = PigeonImu::new(MockPigeonBackend::new(), 1);
    let status = pigeon.general_status();
    println!("Pigeon {}: {}", pigeon.device_number(), status.state);
    println!("  {}", status.description());
}
