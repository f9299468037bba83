//! # Phoenix CLI
//!
//! Command-line tools for Phoenix devices.
//!
//! ```bash
//! # Look up error codes
//! phoenix-cli error-code -503 0 101
//!
//! # Run the go-straight servo against a simulated robot
//! phoenix-cli simulate --config servo.toml --initial 30 --ticks 200
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{ErrorCodeCommand, SimulateCommand};

/// Phoenix CLI
#[derive(Parser, Debug)]
#[command(name = "phoenix-cli")]
#[command(about = "Command-line interface for Phoenix devices", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Describe one or more error codes
    ErrorCode {
        #[command(flatten)]
        args: ErrorCodeCommand,
    },

    /// Run the go-straight servo against a simulated robot
    Simulate {
        #[command(flatten)]
        args: SimulateCommand,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("phoenix_cli=info".parse()?)
                .add_directive("phoenix::logger=warn".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ErrorCode { args } => args.execute(),
        Commands::Simulate { args } => args.execute(),
    }
}
