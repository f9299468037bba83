//! Subcommands

pub mod error_code;
pub mod simulate;

pub use error_code::ErrorCodeCommand;
pub use simulate::SimulateCommand;
