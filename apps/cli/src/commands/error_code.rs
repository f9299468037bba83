//! Error code lookup

use anyhow::Result;
use clap::Args;
use phoenix_sdk::ErrorCode;

#[derive(Args, Debug)]
pub struct ErrorCodeCommand {
    /// Integer codes to look up
    #[arg(required = true, allow_negative_numbers = true)]
    pub codes: Vec<i32>,

    /// Also print the description of each code
    #[arg(short, long)]
    pub verbose: bool,
}

impl ErrorCodeCommand {
    pub fn execute(&self) -> Result<()> {
        for &code in &self.codes {
            println!("{}", describe(code));
            if self.verbose {
                println!("    {}", ErrorCode::from(code).description());
            }
        }
        Ok(())
    }
}

fn kind(code: ErrorCode) -> &'static str {
    if code.is_ok() {
        "ok"
    } else if code.is_warning() {
        "warning"
    } else {
        "error"
    }
}

/// `N -> Name (kind)`, unknown values resolve to `GeneralError`
pub fn describe(raw: i32) -> String {
    let code = ErrorCode::from(raw);
    format!("{raw} -> {code:?} ({})", kind(code))
}
