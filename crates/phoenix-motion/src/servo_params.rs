//! Servo PID parameters
//!
//! ```text
//! output = P * err + I * iAccum + D * dErr
//! ```
//!
//! The integral accumulates raw error once per tick (no `dt` scaling: the
//! loop runs at a fixed period). `dErr` is supplied by the caller, usually a
//! measured rate rather than a differenced error.

use serde::{Deserialize, Serialize};

/// PID gains, limits and integral state
///
/// A zero limit disables the corresponding clamp.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServoParameters {
    /// Proportional gain
    pub p: f64,
    /// Integral gain
    pub i: f64,
    /// Derivative gain
    pub d: f64,
    /// Output clamp, also the peak voltage in `Style::Voltage`
    pub max_out: f64,
    /// Accumulate only while `|err| < i_zone`, otherwise reset
    pub i_zone: f64,
    /// Clamp on the integral accumulator
    pub i_max: f64,

    #[serde(skip)]
    i_accum: f64,
}

impl ServoParameters {
    pub fn new(p: f64, i: f64, d: f64) -> Self {
        Self {
            p,
            i,
            d,
            ..Default::default()
        }
    }

    pub fn with_max_out(mut self, max_out: f64) -> Self {
        self.max_out = max_out;
        self
    }

    pub fn with_i_zone(mut self, i_zone: f64) -> Self {
        self.i_zone = i_zone;
        self
    }

    pub fn with_i_max(mut self, i_max: f64) -> Self {
        self.i_max = i_max;
        self
    }

    /// False when every gain is zero, the PID then always returns zero
    pub fn gains_are_set(&self) -> bool {
        self.p != 0.0 || self.i != 0.0 || self.d != 0.0
    }

    pub fn i_accum(&self) -> f64 {
        self.i_accum
    }

    pub fn reset_i_accum(&mut self) {
        self.i_accum = 0.0;
    }

    /// Called when the owning loop starts
    pub fn on_start(&mut self) {
        self.reset_i_accum();
    }

    /// Run one PID update
    pub fn pid(&mut self, err: f64, d_err: f64) -> f64 {
        if self.i_zone == 0.0 || err.abs() < self.i_zone {
            self.i_accum += err;
        } else {
            self.i_accum = 0.0;
        }
        if self.i_max != 0.0 {
            self.i_accum = self.i_accum.clamp(-self.i_max, self.i_max);
        }

        let output = err * self.p + self.i_accum * self.i + d_err * self.d;

        if self.max_out != 0.0 {
            output.clamp(-self.max_out, self.max_out)
        } else {
            output
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_gains() {
        let params = ServoParameters::default();
        assert!(!params.gains_are_set());
        assert_eq!(params.i_accum(), 0.0);
    }

    #[test]
    fn test_proportional_and_derivative() {
        let mut params = ServoParameters::new(2.0, 0.0, 0.5);
        assert!(params.gains_are_set());
        assert_eq!(params.pid(3.0, 4.0), 2.0 * 3.0 + 0.5 * 4.0);
    }

    #[test]
    fn test_integral_accumulates_per_tick() {
        let mut params = ServoParameters::new(0.0, 1.0, 0.0);
        assert_eq!(params.pid(1.0, 0.0), 1.0);
        assert_eq!(params.pid(1.0, 0.0), 2.0);
        assert_eq!(params.pid(-0.5, 0.0), 1.5);
        assert_eq!(params.i_accum(), 1.5);
    }

    #[test]
    fn test_i_zone_resets_accumulator() {
        let mut params = ServoParameters::new(0.0, 1.0, 0.0).with_i_zone(5.0);
        params.pid(2.0, 0.0);
        params.pid(2.0, 0.0);
        assert_eq!(params.i_accum(), 4.0);

        // outside the zone
        assert_eq!(params.pid(10.0, 0.0), 0.0);
        assert_eq!(params.i_accum(), 0.0);
    }

    #[test]
    fn test_i_max_clamps_accumulator() {
        let mut params = ServoParameters::new(0.0, 1.0, 0.0).with_i_max(3.0);
        for _ in 0..10 {
            params.pid(1.0, 0.0);
        }
        assert_eq!(params.i_accum(), 3.0);
        for _ in 0..10 {
            params.pid(-1.0, 0.0);
        }
        assert_eq!(params.i_accum(), -3.0);
    }

    #[test]
    fn test_max_out_clamps_output() {
        let mut params = ServoParameters::new(10.0, 0.0, 0.0).with_max_out(0.5);
        assert_eq!(params.pid(1.0, 0.0), 0.5);
        assert_eq!(params.pid(-1.0, 0.0), -0.5);
        assert_eq!(params.pid(0.03125, 0.0), 0.3125);
    }

    #[test]
    fn test_on_start_resets_accumulator() {
        let mut params = ServoParameters::new(0.0, 1.0, 0.0);
        params.pid(5.0, 0.0);
        params.on_start();
        assert_eq!(params.i_accum(), 0.0);
    }

    #[test]
    fn test_zero_gains_output_zero() {
        let mut params = ServoParameters::default();
        assert_eq!(params.pid(45.0, 10.0), 0.0);
    }
}
