//! Error-code reporting
//!
//! Non-zero codes are emitted as `tracing` warnings under the
//! `phoenix::logger` target with the code, its name and the origin that
//! reported it. The code is returned unchanged so a call can be chained:
//!
//! ```rust
//! use phoenix_motion::logger;
//! use phoenix_protocol::ErrorCode;
//!
//! let code = logger::log(ErrorCode::Okay, "Drivetrain");
//! assert!(code.is_ok());
//! ```

use phoenix_protocol::ErrorCode;
use tracing::warn;

pub fn log(code: ErrorCode, origin: &str) -> ErrorCode {
    if !code.is_ok() {
        warn!(
            target: "phoenix::logger",
            code = code.value(),
            origin,
            "{:?}: {}",
            code,
            code.description()
        );
    }
    code
}
