//! Loop Runner
//!
//! Host-side fixed-rate driver for [`Loopable`] routines.
//!
//! # Behaviour
//!
//! - ticks are anchored to absolute deadlines (`next_tick += period`), so a
//!   slow tick does not shift every following one
//! - `spin_sleep` keeps wake-up jitter low
//! - an overrun (tick finished past the next deadline) is logged and the
//!   schedule is re-anchored to now
//! - a frequency whose period cannot be represented as a `Duration` is
//!   rejected up front
//!
//! # Example
//!
//! ```rust
//! use phoenix_motion::{Loopable, LoopConfig, run_loopable};
//!
//! #[derive(Default)]
//! struct Countdown { left: u32, stopped: bool }
//! impl Loopable for Countdown {
//!     fn on_start(&mut self) { self.left = 3; }
//!     fn on_loop(&mut self) { self.left -= 1; }
//!     fn is_done(&self) -> bool { self.left == 0 }
//!     fn on_stop(&mut self) { self.stopped = true; }
//! }
//!
//! let mut routine = Countdown::default();
//! let config = LoopConfig { frequency_hz: 1000.0, max_iterations: None };
//! let stats = run_loopable(&mut routine, &config).unwrap();
//! assert_eq!(stats.iterations, 3);
//! assert!(routine.stopped);
//! ```

use crate::error::MotionError;
use crate::loopable::Loopable;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Control loop configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    /// Tick rate in Hz
    ///
    /// For example 50.0 means one `on_loop` every 20 ms. Must be finite,
    /// positive and large enough for `1 / frequency_hz` seconds to fit in a
    /// `Duration`.
    pub frequency_hz: f64,

    /// Maximum number of ticks (`None` runs until `is_done`)
    ///
    /// Useful for tests and timed runs. The routine is still stopped
    /// through `on_stop` when the limit is hit.
    pub max_iterations: Option<usize>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        LoopConfig {
            frequency_hz: 50.0,
            max_iterations: None,
        }
    }
}

impl LoopConfig {
    /// Tick period, or an error for a frequency that has none
    pub fn period(&self) -> Result<Duration, MotionError> {
        if !self.frequency_hz.is_finite() || self.frequency_hz <= 0.0 {
            return Err(MotionError::InvalidLoopConfig(format!(
                "Invalid frequency_hz: {} (must be > 0)",
                self.frequency_hz
            )));
        }
        Duration::try_from_secs_f64(1.0 / self.frequency_hz).map_err(|e| {
            MotionError::InvalidLoopConfig(format!(
                "Invalid frequency_hz: {} (period out of range: {e})",
                self.frequency_hz
            ))
        })
    }

    pub fn validate(&self) -> Result<(), MotionError> {
        self.period()?;
        if self.frequency_hz > 10_000.0 {
            warn!(
                "Very high loop frequency: {} Hz. This may cause performance issues.",
                self.frequency_hz
            );
        }
        Ok(())
    }
}

/// Counters reported when a run finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopStats {
    /// Number of `on_loop` calls
    pub iterations: usize,
    /// Ticks that finished after the next deadline
    pub overruns: usize,
}

/// Run `routine` until it reports done or `max_iterations` is reached
///
/// Calls `on_start` once, `on_loop` once per period, then `on_stop`.
/// Returns an error only for an invalid configuration, in which case no
/// routine callback is invoked.
pub fn run_loopable<L: Loopable + ?Sized>(
    routine: &mut L,
    config: &LoopConfig,
) -> Result<LoopStats, MotionError> {
    config.validate()?;

    let period = config.period()?;
    let mut stats = LoopStats::default();

    info!(
        frequency_hz = config.frequency_hz,
        max_iterations = ?config.max_iterations,
        "loop started"
    );
    routine.on_start();

    let mut next_tick = Instant::now();
    loop {
        if routine.is_done() {
            break;
        }
        if let Some(max) = config.max_iterations
            && stats.iterations >= max
        {
            debug!(max, "iteration limit reached");
            break;
        }

        routine.on_loop();
        stats.iterations += 1;

        next_tick += period;
        let now = Instant::now();
        if now < next_tick {
            spin_sleep::sleep(next_tick - now);
        } else {
            stats.overruns += 1;
            warn!(
                iteration = stats.iterations,
                late_us = (now - next_tick).as_micros() as u64,
                "loop overrun"
            );
            next_tick = now;
        }
    }

    routine.on_stop();
    info!(
        iterations = stats.iterations,
        overruns = stats.overruns,
        "loop stopped"
    );
    Ok(stats)
}
