//! Go-straight servo against the simulated robot
//!
//! ```bash
//! RUST_LOG=debug cargo run -p phoenix-sdk --features mock --example go_straight_sim
//! ```

use phoenix_sdk::hal::mock::MockPigeonBackend;
use phoenix_sdk::prelude::*;
use phoenix_sdk::sim::SimulatedRobot;

fn main() -> anyhow::Result<()> {
    phoenix_sdk::init_logger();

    let backend = MockPigeonBackend::ready();
    backend.set_heading(25.0, 0.0);
    let pigeon = PigeonImu::new(backend.clone(), 0);

    let loop_config = LoopConfig {
        frequency_hz: 50.0,
        max_iterations: Some(150),
    };
    let robot = SimulatedRobot::new(backend, 1.0 / loop_config.frequency_hz);

    let params = ServoParameters::new(0.02, 0.0, 0.0).with_max_out(1.0);
    let mut servo =
        ServoGoStraightWithImuSmart::with_target(&pigeon, robot, Style::PercentOutput, params, 0.4, 0.0);

    println!("start heading: {:.2} deg", servo.imu_heading());
    let stats = run_loopable(&mut servo, &loop_config)?;
    println!(
        "final heading: {:.2} deg after {} ticks ({} overruns)",
        servo.imu_heading(),
        stats.iterations,
        stats.overruns
    );
    Ok(())
}
