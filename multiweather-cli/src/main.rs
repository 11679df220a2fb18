// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! multiweather CLI - pull weather-station readings from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Last 24 hours (2 hour window) for one vendor, written to ./out/davis.json
//! multiweather fetch davis ./out
//!
//! # Every vendor with credentials in the environment or config file
//! multiweather fetch all ./out
//!
//! # Explicit station-local range
//! multiweather fetch zentra ./out --start "2022-02-16 00:00:00" --end "2022-02-16 02:00:00" --tz CT
//!
//! # Normalize a payload saved earlier, without calling the vendor
//! multiweather fetch campbell ./out --json-file saved/campbell.json
//!
//! # List vendors
//! multiweather vendors --format json --pretty
//! ```

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use multiweather_core::WeatherError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{fetch, vendors};

// ============================================================================
// CLI Definition
// ============================================================================

/// multiweather CLI - weather-station vendor readings.
#[derive(Parser)]
#[command(name = "multiweather")]
#[command(about = "Weather-station vendor client")]
#[command(long_about = r#"
multiweather fetches readings from weather-station cloud APIs and writes
them as normalized JSON envelopes.

Supported vendors:
  • METER ZENTRA Cloud (zentra)
  • Spectrum SpecConnect (spectrum)
  • Onset HOBOlink (onset)
  • Davis WeatherLink (davis)
  • Rainwise (rainwise)
  • Campbell Cloud (campbell)

Credentials are read from environment variables named after the vendor
(ZENTRA, DAVIS, ...), each holding a JSON object of parameters. A .env
file in the working directory is loaded automatically.

Examples:
  multiweather fetch davis ./out           # Last 24 hours, 2 hour window
  multiweather fetch all ./out             # Every configured vendor
  multiweather fetch davis ./out --json-file saved.json   # Offline
  multiweather vendors                     # List vendors
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Env file with vendor credential bundles (default: ./.env).
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Config file (default: <config dir>/multiweather/config.json).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch readings and write one envelope per vendor.
    #[command(visible_alias = "f")]
    Fetch(fetch::FetchArgs),

    /// List supported vendors.
    #[command(visible_alias = "v")]
    Vendors,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Bad parameters, credentials or time zone.
    UsageError = 2,
    /// At least one vendor returned an ERROR envelope.
    VendorError = 3,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<WeatherError>() {
            Some(
                WeatherError::Parameter(_) | WeatherError::Auth(_) | WeatherError::UnknownZone(_),
            ) => Self::UsageError,
            _ => Self::Error,
        }
    }

    /// Rank used when several vendors fail: usage > error > vendor > success.
    fn severity(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::VendorError => 1,
            Self::Error => 2,
            Self::UsageError => 3,
        }
    }

    /// Returns the more severe of the two codes.
    #[must_use]
    pub fn worst(self, other: Self) -> Self {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("multiweather=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("multiweather=warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = run(&cli).await;

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            ExitCode::for_error(&e)
        }
    };

    std::process::exit(code as i32);
}

async fn run(cli: &Cli) -> Result<ExitCode> {
    config::load_env_file(cli.env_file.as_deref())?;

    match &cli.command {
        Commands::Fetch(args) => fetch::run(args, cli).await,
        Commands::Vendors => vendors::run(cli).map(|()| ExitCode::Success),
    }
}

// ============================================================================
// Tests
// ============================================================================
