//! Heading-hold servo
//!
//! Drives a [`SmartDrivetrain`] forward at a fixed throttle while a PID loop
//! on IMU heading holds a target heading.
//!
//! Each tick:
//! 1. read heading and heading rate from the IMU
//! 2. if the IMU is `Ready`: `turn = -pid(target - heading, rate)` and
//!    command `(throttle, turn)` in the selected [`Style`]
//! 3. otherwise command zero output in `PercentOutput`
//!
//! # Example
//!
//! ```rust
//! use phoenix_motion::{Imu, Loopable, ServoGoStraightWithImuSmart, ServoParameters, SmartDrivetrain, Style};
//! use phoenix_protocol::PigeonState;
//!
//! struct Level;
//! impl Imu for Level {
//!     fn heading(&self) -> f64 { 10.0 }
//!     fn angular_rate(&self) -> f64 { 0.0 }
//!     fn state(&self) -> PigeonState { PigeonState::Ready }
//! }
//!
//! #[derive(Default)]
//! struct Drive { turn: f64 }
//! impl SmartDrivetrain for Drive {
//!     fn set(&mut self, _style: Style, _forward: f64, turn: f64) { self.turn = turn; }
//!     fn config_nominal_percent_output_voltage(&mut self, _f: f64, _r: f64) {}
//!     fn config_peak_percent_output_voltage(&mut self, _f: f64, _r: f64) {}
//! }
//!
//! let params = ServoParameters::new(0.01, 0.0, 0.0);
//! let mut servo = ServoGoStraightWithImuSmart::with_target(
//!     Level, Drive::default(), Style::PercentOutput, params, 0.5, 0.0,
//! );
//! servo.on_start();
//! servo.on_loop();
//! // heading 10 deg right of target: steer back
//! assert!((servo.drivetrain().turn - 0.1).abs() < 1e-9);
//! ```

use crate::drive::{SmartDrivetrain, Style};
use crate::imu::Imu;
use crate::logger;
use crate::loopable::Loopable;
use crate::servo_params::ServoParameters;
use phoenix_protocol::ErrorCode;
use tracing::{debug, trace};

const ORIGIN: &str = "Servo Go Straight With IMU Smart";

/// Lifecycle of a servo routine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoState {
    NotStarted,
    Running,
    /// Terminal until `on_start` re-arms the routine
    Done,
}

pub struct ServoGoStraightWithImuSmart<I: Imu, D: SmartDrivetrain> {
    imu: I,
    drivetrain: D,
    style: Style,
    params: ServoParameters,
    throttle: f64,
    target_heading: f64,
    state: ServoState,
    /// Set once the zero-gain warning was emitted for the current parameters
    gains_warned: bool,
}

impl<I: Imu, D: SmartDrivetrain> ServoGoStraightWithImuSmart<I, D> {
    /// Servo with default (zero) gains, zero throttle and target heading 0
    pub fn new(imu: I, drivetrain: D, style: Style) -> Self {
        Self::with_target(imu, drivetrain, style, ServoParameters::default(), 0.0, 0.0)
    }

    pub fn with_target(
        imu: I,
        drivetrain: D,
        style: Style,
        params: ServoParameters,
        throttle: f64,
        target_heading: f64,
    ) -> Self {
        Self {
            imu,
            drivetrain,
            style,
            params,
            throttle,
            target_heading,
            state: ServoState::NotStarted,
            gains_warned: false,
        }
    }

    /// Update throttle and target heading (degrees)
    pub fn set(&mut self, throttle: f64, target_heading: f64) {
        self.throttle = throttle;
        self.target_heading = target_heading;
    }

    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    pub fn target_heading(&self) -> f64 {
        self.target_heading
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn servo_params(&self) -> &ServoParameters {
        &self.params
    }

    /// Install a new parameter set. The zero-gain warning re-arms.
    pub fn set_servo_params(&mut self, params: ServoParameters) {
        self.params = params;
        self.gains_warned = false;
    }

    pub fn reset_i_accum(&mut self) {
        self.params.reset_i_accum();
    }

    /// Current IMU heading in degrees
    pub fn imu_heading(&self) -> f64 {
        self.imu.heading()
    }

    pub fn state(&self) -> ServoState {
        self.state
    }

    pub fn imu(&self) -> &I {
        &self.imu
    }

    pub fn drivetrain(&self) -> &D {
        &self.drivetrain
    }

    pub fn drivetrain_mut(&mut self) -> &mut D {
        &mut self.drivetrain
    }

    pub fn into_parts(self) -> (I, D) {
        (self.imu, self.drivetrain)
    }

    fn go_straight(&mut self) {
        if !self.params.gains_are_set() && !self.gains_warned {
            logger::log(ErrorCode::GainsAreNotSet, ORIGIN);
            self.gains_warned = true;
        }

        let heading = self.imu.heading();
        let rate = self.imu.angular_rate();

        if !self.imu.is_ready() {
            trace!(state = %self.imu.state(), "IMU not ready, holding drivetrain at zero");
            self.drivetrain.set(Style::PercentOutput, 0.0, 0.0);
            return;
        }

        let heading_error = self.target_heading - heading;
        let turn = -self.params.pid(heading_error, rate);
        trace!(heading, rate, heading_error, turn, "heading servo tick");

        match self.style {
            Style::PercentOutput => {
                self.drivetrain
                    .set(Style::PercentOutput, self.throttle, turn);
            },
            Style::Voltage => {
                let peak = self.params.max_out;
                self.drivetrain
                    .config_nominal_percent_output_voltage(0.0, -0.0);
                self.drivetrain
                    .config_peak_percent_output_voltage(peak, -peak);
                self.drivetrain.set(Style::Voltage, self.throttle, turn);
            },
            Style::VelocityClosedLoop => {
                self.drivetrain
                    .set(Style::VelocityClosedLoop, self.throttle, turn);
            },
        }
    }
}

impl<I: Imu, D: SmartDrivetrain> Loopable for ServoGoStraightWithImuSmart<I, D> {
    fn on_start(&mut self) {
        debug!(
            style = ?self.style,
            throttle = self.throttle,
            target_heading = self.target_heading,
            "go-straight servo started"
        );
        self.state = ServoState::Running;
        self.params.on_start();
    }

    fn on_loop(&mut self) {
        match self.state {
            ServoState::Done => {},
            ServoState::NotStarted => {
                self.state = ServoState::Running;
                self.go_straight();
            },
            ServoState::Running => self.go_straight(),
        }
    }

    fn is_done(&self) -> bool {
        self.state == ServoState::Done
    }

    fn on_stop(&mut self) {
        self.drivetrain.set(Style::PercentOutput, 0.0, 0.0);
        self.state = ServoState::Done;
        debug!("go-straight servo stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phoenix_hal::PigeonImu;
    use phoenix_hal::mock::MockPigeonBackend;
    use phoenix_protocol::PigeonState;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Set(Style, f64, f64),
        Nominal(f64, f64),
        Peak(f64, f64),
    }

    #[derive(Default)]
    struct RecordingDrivetrain {
        calls: Vec<Call>,
    }

    impl RecordingDrivetrain {
        fn last_set(&self) -> Option<(Style, f64, f64)> {
            self.calls.iter().rev().find_map(|c| match *c {
                Call::Set(style, forward, turn) => Some((style, forward, turn)),
                _ => None,
            })
        }
    }

    impl SmartDrivetrain for RecordingDrivetrain {
        fn set(&mut self, style: Style, forward: f64, turn: f64) {
            self.calls.push(Call::Set(style, forward, turn));
        }

        fn config_nominal_percent_output_voltage(&mut self, forward_voltage: f64, reverse_voltage: f64) {
            self.calls
                .push(Call::Nominal(forward_voltage, reverse_voltage));
        }

        fn config_peak_percent_output_voltage(&mut self, forward_voltage: f64, reverse_voltage: f64) {
            self.calls.push(Call::Peak(forward_voltage, reverse_voltage));
        }
    }

    struct FixedImu {
        heading: f64,
        rate: f64,
        state: PigeonState,
    }

    impl FixedImu {
        fn ready(heading: f64, rate: f64) -> Self {
            Self {
                heading,
                rate,
                state: PigeonState::Ready,
            }
        }
    }

    impl Imu for FixedImu {
        fn heading(&self) -> f64 {
            self.heading
        }

        fn angular_rate(&self) -> f64 {
            self.rate
        }

        fn state(&self) -> PigeonState {
            self.state
        }
    }

    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    /// Run `f` and return the number of warnings it emitted
    fn count_warnings(f: impl FnOnce()) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(count.clone()));
        tracing::subscriber::with_default(subscriber, f);
        count.load(Ordering::SeqCst)
    }

    fn servo(
        imu: FixedImu,
        style: Style,
        params: ServoParameters,
    ) -> ServoGoStraightWithImuSmart<FixedImu, RecordingDrivetrain> {
        ServoGoStraightWithImuSmart::with_target(
            imu,
            RecordingDrivetrain::default(),
            style,
            params,
            0.4,
            0.0,
        )
    }

    #[test]
    fn test_initial_state() {
        let servo = servo(FixedImu::ready(0.0, 0.0), Style::PercentOutput, ServoParameters::default());
        assert_eq!(servo.state(), ServoState::NotStarted);
        assert!(!servo.is_done());
        assert!(servo.drivetrain().calls.is_empty());
    }

    #[test]
    fn test_correction_is_negated_pid_output() {
        let params = ServoParameters::new(0.05, 0.0, 0.0);
        let mut servo = servo(FixedImu::ready(10.0, 0.0), Style::PercentOutput, params);
        servo.on_start();
        servo.on_loop();

        // error = 0 - 10 = -10, pid = -0.5, applied = +0.5
        let (style, forward, turn) = servo.drivetrain().last_set().unwrap();
        assert_eq!(style, Style::PercentOutput);
        assert_eq!(forward, 0.4);
        assert!((turn - 0.5).abs() < 1e-12, "turn = {turn}");
    }

    #[test]
    fn test_derivative_uses_angular_rate() {
        let params = ServoParameters::new(0.0, 0.0, 0.1);
        let mut servo = servo(FixedImu::ready(0.0, 20.0), Style::PercentOutput, params);
        servo.on_start();
        servo.on_loop();

        let (_, _, turn) = servo.drivetrain().last_set().unwrap();
        assert!((turn + 2.0).abs() < 1e-12, "turn = {turn}");
    }

    #[test]
    fn test_imu_not_ready_commands_zero() {
        for state in [PigeonState::NoComm, PigeonState::Initializing, PigeonState::UserCalibration] {
            for target in [-90.0, 0.0, 45.0, 180.0] {
                let imu = FixedImu {
                    heading: 30.0,
                    rate: 5.0,
                    state,
                };
                let mut servo = servo(imu, Style::Voltage, ServoParameters::new(1.0, 1.0, 1.0));
                servo.set(0.8, target);
                servo.on_start();
                servo.on_loop();

                assert_eq!(servo.drivetrain().calls, vec![Call::Set(Style::PercentOutput, 0.0, 0.0)]);
            }
        }
    }

    #[test]
    fn test_imu_not_ready_keeps_integral() {
        let imu = FixedImu {
            heading: 30.0,
            rate: 0.0,
            state: PigeonState::NoComm,
        };
        let mut servo = servo(imu, Style::PercentOutput, ServoParameters::new(0.0, 1.0, 0.0));
        servo.on_start();
        servo.on_loop();
        assert_eq!(servo.servo_params().i_accum(), 0.0);
    }

    #[test]
    fn test_voltage_style_configures_peak() {
        let params = ServoParameters::new(0.1, 0.0, 0.0).with_max_out(6.0);
        let mut servo = servo(FixedImu::ready(-5.0, 0.0), Style::Voltage, params);
        servo.on_start();
        servo.on_loop();

        let calls = &servo.drivetrain().calls;
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], Call::Nominal(0.0, -0.0));
        assert_eq!(calls[1], Call::Peak(6.0, -6.0));
        match calls[2] {
            Call::Set(Style::Voltage, forward, turn) => {
                assert_eq!(forward, 0.4);
                assert!((turn + 0.5).abs() < 1e-12, "turn = {turn}");
            },
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn test_velocity_style_passes_through() {
        let params = ServoParameters::new(0.1, 0.0, 0.0);
        let mut servo = servo(FixedImu::ready(0.0, 0.0), Style::VelocityClosedLoop, params);
        servo.set(300.0, 20.0);
        servo.on_start();
        servo.on_loop();

        assert_eq!(servo.drivetrain().calls.len(), 1);
        let (style, forward, turn) = servo.drivetrain().last_set().unwrap();
        assert_eq!(style, Style::VelocityClosedLoop);
        assert_eq!(forward, 300.0);
        assert!((turn + 2.0).abs() < 1e-12, "turn = {turn}");
    }

    #[test]
    fn test_stop_drives_zero_and_marks_done() {
        for style in [Style::PercentOutput, Style::Voltage, Style::VelocityClosedLoop] {
            let mut servo = servo(FixedImu::ready(15.0, 1.0), style, ServoParameters::new(0.2, 0.0, 0.0));
            servo.on_start();
            servo.on_loop();
            servo.on_stop();

            assert!(servo.is_done());
            assert_eq!(servo.state(), ServoState::Done);
            assert_eq!(
                servo.drivetrain().calls.last(),
                Some(&Call::Set(Style::PercentOutput, 0.0, 0.0))
            );
        }
    }

    #[test]
    fn test_stop_without_start() {
        let mut servo = servo(FixedImu::ready(0.0, 0.0), Style::PercentOutput, ServoParameters::default());
        servo.on_stop();
        assert!(servo.is_done());
        assert_eq!(servo.drivetrain().calls, vec![Call::Set(Style::PercentOutput, 0.0, 0.0)]);
    }

    #[test]
    fn test_loop_after_done_is_ignored() {
        let mut servo = servo(FixedImu::ready(15.0, 0.0), Style::PercentOutput, ServoParameters::new(0.2, 0.0, 0.0));
        servo.on_start();
        servo.on_stop();
        servo.on_loop();
        assert_eq!(servo.drivetrain().calls.len(), 1);

        // restart re-arms
        servo.on_start();
        assert!(!servo.is_done());
        servo.on_loop();
        assert_eq!(servo.drivetrain().calls.len(), 2);
    }

    #[test]
    fn test_loop_without_start_runs() {
        let mut servo = servo(FixedImu::ready(0.0, 0.0), Style::PercentOutput, ServoParameters::new(0.2, 0.0, 0.0));
        servo.on_loop();
        assert_eq!(servo.state(), ServoState::Running);
        assert_eq!(servo.drivetrain().calls.len(), 1);
    }

    #[test]
    fn test_start_resets_integral() {
        let mut servo = servo(FixedImu::ready(10.0, 0.0), Style::PercentOutput, ServoParameters::new(0.0, 1.0, 0.0));
        servo.on_start();
        servo.on_loop();
        servo.on_loop();
        assert_eq!(servo.servo_params().i_accum(), -20.0);

        servo.on_start();
        assert_eq!(servo.servo_params().i_accum(), 0.0);

        servo.on_loop();
        servo.reset_i_accum();
        assert_eq!(servo.servo_params().i_accum(), 0.0);
    }

    #[test]
    fn test_zero_gains_warn_once_per_configuration() {
        let mut servo = servo(FixedImu::ready(10.0, 3.0), Style::PercentOutput, ServoParameters::default());

        let warnings = count_warnings(|| {
            servo.on_start();
            for _ in 0..5 {
                servo.on_loop();
            }
        });
        assert_eq!(warnings, 1);

        // loop kept running with a no-op correction
        assert_eq!(servo.drivetrain().calls.len(), 5);
        assert_eq!(servo.drivetrain().last_set(), Some((Style::PercentOutput, 0.4, 0.0)));

        // new configuration, still no gains: one more warning
        let warnings = count_warnings(|| {
            servo.set_servo_params(ServoParameters::default().with_max_out(1.0));
            for _ in 0..3 {
                servo.on_loop();
            }
        });
        assert_eq!(warnings, 1);

        // gains set: no warning
        let warnings = count_warnings(|| {
            servo.set_servo_params(ServoParameters::new(0.1, 0.0, 0.0));
            for _ in 0..3 {
                servo.on_loop();
            }
        });
        assert_eq!(warnings, 0);
    }

    #[test]
    fn test_with_pigeon_imu() {
        let backend = MockPigeonBackend::ready();
        let firmware = backend.clone();
        let pigeon = PigeonImu::new(backend, 0);

        let mut servo = ServoGoStraightWithImuSmart::with_target(
            &pigeon,
            RecordingDrivetrain::default(),
            Style::PercentOutput,
            ServoParameters::new(0.1, 0.0, 0.0),
            0.3,
            0.0,
        );
        servo.on_start();

        firmware.set_heading(-4.0, 0.0);
        servo.on_loop();
        let (_, _, turn) = servo.drivetrain().last_set().unwrap();
        assert!((turn + 0.4).abs() < 1e-12, "turn = {turn}");
        assert_eq!(servo.imu_heading(), -4.0);

        firmware.set_state(PigeonState::NoComm);
        servo.on_loop();
        assert_eq!(servo.drivetrain().last_set(), Some((Style::PercentOutput, 0.0, 0.0)));
    }
}
