//! In-memory backends
//!
//! Each mock keeps its state behind `Arc<Mutex<_>>`. Clone the backend before
//! handing it to a device wrapper and keep the clone as a view of the
//! firmware: outputs written through the wrapper show up on the clone, inputs
//! set on the clone are read back by the wrapper.
//!
//! ```rust
//! use phoenix_hal::mock::MockCanifierBackend;
//! use phoenix_hal::{Canifier, GeneralPin, LedChannel};
//!
//! let backend = MockCanifierBackend::new();
//! let firmware = backend.clone();
//!
//! let mut canifier = Canifier::new(backend, 3);
//! canifier.set_led_output(0.5, LedChannel::B);
//! assert_eq!(firmware.led_output(LedChannel::B), 511);
//!
//! firmware.set_input(GeneralPin::LimR, true);
//! assert!(canifier.general_input(GeneralPin::LimR));
//! ```

mod canifier;
mod pigeon;

pub use canifier::{MockCanifierBackend, MockCanifierState};
pub use pigeon::{MockPigeonBackend, MockPigeonState};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// A panicking test thread must not hide the state from the others
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
