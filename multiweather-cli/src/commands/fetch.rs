//! Fetch command - pull readings and write one envelope file per vendor.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::Args;
use futures::future::join_all;
use multiweather_core::{DATETIME_FORMAT, ResponseEnvelope, StationTimezone, Vendor};
use multiweather_fetch::FetchContext;
use multiweather_vendors::{ReadingParams, VendorRegistry, WeatherClient, parse_vendor};
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::output::{FetchSummary, JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Default look-back when no range is given.
const DEFAULT_LOOKBACK_HOURS: i64 = 24;

/// Default window length when no range is given.
const DEFAULT_WINDOW_HOURS: i64 = 2;

/// Arguments for the fetch command.
#[derive(Args, Debug, Default)]
pub struct FetchArgs {
    /// Vendor to query, or "all" for every configured vendor.
    pub vendor: String,

    /// Existing directory receiving `<vendor>.json`.
    pub out_dir: PathBuf,

    /// Range start, station-local `YYYY-MM-DD HH:MM:SS`.
    #[arg(long, requires = "end")]
    pub start: Option<String>,

    /// Range end, station-local `YYYY-MM-DD HH:MM:SS`.
    #[arg(long, requires = "start")]
    pub end: Option<String>,

    /// Station zone (HT, AT, PT, MT, CT, ET); overrides the credential bundle.
    #[arg(long)]
    pub tz: Option<String>,

    /// HTTP timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Normalize a saved vendor payload instead of calling the vendor.
    #[arg(long, value_name = "PATH")]
    pub json_file: Option<PathBuf>,
}

/// Runs the fetch command.
pub async fn run(args: &FetchArgs, cli: &Cli) -> Result<ExitCode> {
    if !args.out_dir.is_dir() {
        bail!("output directory {} does not exist", args.out_dir.display());
    }

    let config = Config::load(cli.config.as_deref())?;
    let vendors = select_vendors(&args.vendor, &config)?;
    if args.json_file.is_some() && vendors.len() != 1 {
        bail!("--json-file needs a single vendor, not \"{}\"", args.vendor);
    }

    let timeout = args
        .timeout
        .map_or_else(|| config.timeout(), Duration::from_secs);
    let ctx = FetchContext::builder()
        .allowed_domains(VendorRegistry::hosts())
        .timeout(timeout)
        .build()?;
    let client = WeatherClient::with_context(ctx);
    let now = client.context().clock.now();

    info!(count = vendors.len(), "Fetching readings");

    let futures = vendors.iter().map(|&vendor| {
        let client = &client;
        let config = &config;
        async move {
            let outcome = fetch_one(client, vendor, config, args, now).await;
            (vendor, outcome)
        }
    });
    let outcomes = join_all(futures).await;

    let (summaries, exit) = record_outcomes(&args.out_dir, outcomes);

    if !cli.quiet {
        match cli.format {
            OutputFormat::Text => {
                let formatter = TextFormatter::new(!cli.no_color);
                for summary in &summaries {
                    println!("{}", formatter.format_fetch(summary));
                }
            }
            OutputFormat::Json => {
                let formatter = JsonFormatter::new(cli.pretty);
                println!("{}", formatter.format(&summaries)?);
            }
        }
    }

    Ok(exit)
}

/// Writes each envelope and summarizes every vendor.
///
/// A failed write is recorded in that vendor's summary and the loop moves
/// on. The exit code is the most severe one seen.
fn record_outcomes(
    out_dir: &Path,
    outcomes: Vec<(Vendor, Result<ResponseEnvelope>)>,
) -> (Vec<FetchSummary>, ExitCode) {
    let mut summaries = Vec::with_capacity(outcomes.len());
    let mut exit = ExitCode::Success;
    for (vendor, outcome) in outcomes {
        let summary = match outcome {
            Ok(envelope) => {
                if !envelope.is_good() {
                    exit = exit.worst(ExitCode::VendorError);
                }
                match write_envelope(out_dir, vendor, &envelope) {
                    Ok(path) => FetchSummary::from_envelope(&envelope, &path),
                    Err(e) => {
                        warn!(%vendor, error = %e, "Envelope not written");
                        exit = exit.worst(ExitCode::Error);
                        FetchSummary::unwritten(&envelope, &e)
                    }
                }
            }
            Err(e) => {
                warn!(%vendor, error = %e, "Fetch failed");
                exit = exit.worst(ExitCode::for_error(&e));
                FetchSummary::failed(vendor, &e)
            }
        };
        summaries.push(summary);
    }
    (summaries, exit)
}

/// Resolves the vendor argument.
fn select_vendors(name: &str, config: &Config) -> Result<Vec<Vendor>> {
    if name.trim().eq_ignore_ascii_case("all") {
        let vendors = config.configured_vendors();
        if vendors.is_empty() {
            bail!("no vendor parameters found in the environment or config file");
        }
        return Ok(vendors);
    }
    Ok(vec![parse_vendor(name)?])
}

/// Assembles the parameter bag and runs one facade call.
#[instrument(skip_all, fields(vendor = %vendor))]
async fn fetch_one(
    client: &WeatherClient,
    vendor: Vendor,
    config: &Config,
    args: &FetchArgs,
    now: DateTime<Utc>,
) -> Result<ResponseEnvelope> {
    let mut params = config.vendor_params(vendor)?.with_context(|| {
        format!(
            "no parameters for {vendor}; set {} to a JSON object of parameters",
            vendor.env_var()
        )
    })?;

    let zone_name = args
        .tz
        .clone()
        .or_else(|| params.timezone())
        .unwrap_or_else(|| config.general.default_timezone.clone());
    let zone: StationTimezone = zone_name.parse()?;

    let (start, end) = resolve_range(args.start.as_deref(), args.end.as_deref(), zone, now)?;
    debug!(%start, %end, %zone, "Resolved range");

    apply_range(&mut params, zone, start, end);
    if let Some(path) = &args.json_file {
        let request = params.into_request(vendor)?;
        return Ok(client.normalize_file(&request, path)?);
    }
    Ok(client.get_reading_with_params(vendor.cli_name(), params).await?)
}

/// Writes the range and zone into the bag, replacing any values it held.
fn apply_range(
    params: &mut ReadingParams,
    zone: StationTimezone,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) {
    params.insert("tz", zone.code());
    params.insert("start_datetime", start.format(DATETIME_FORMAT).to_string());
    params.insert("end_datetime", end.format(DATETIME_FORMAT).to_string());
}

/// Converts the optional station-local range to UTC.
///
/// Without a range, the window is `now - 24h` to `now - 22h`.
pub fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
    zone: StationTimezone,
    now: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let (start, end) = match (start, end) {
        (None, None) => {
            let start = now - chrono::Duration::hours(DEFAULT_LOOKBACK_HOURS);
            (start, start + chrono::Duration::hours(DEFAULT_WINDOW_HOURS))
        }
        (Some(start), Some(end)) => (
            zone.to_utc(parse_local(start)?),
            zone.to_utc(parse_local(end)?),
        ),
        _ => bail!("--start and --end must be given together"),
    };

    if start >= end {
        bail!("start ({start}) must precede end ({end})");
    }
    Ok((start, end))
}

fn parse_local(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), DATETIME_FORMAT)
        .with_context(|| format!("invalid datetime '{value}', expected YYYY-MM-DD HH:MM:SS"))
}

/// Writes the pretty-printed envelope to `<out_dir>/<vendor>.json`.
fn write_envelope(out_dir: &Path, vendor: Vendor, envelope: &ResponseEnvelope) -> Result<PathBuf> {
    let path = out_dir.join(format!("{}.json", vendor.cli_name()));
    let json = JsonFormatter::new(true).format(envelope)?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "Envelope written");
    Ok(path)
}

// ============================================================================
// Tests
// ============================================================================
