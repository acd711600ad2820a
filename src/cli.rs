use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Headgate water-right time-series synthesis.
#[derive(Parser)]
#[command(
    name = "headgate",
    version,
    about = "Water-right decree time-series synthesis"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Synthesize decree series for every group of rights.
    Synthesize(SynthesizeArgs),
    /// Estimate a daily series for one location.
    Daily(DailyArgs),
    /// Compare a location's decree series against a supplied series.
    Compare(CompareArgs),
}

/// Arguments for the `synthesize` subcommand.
#[derive(clap::Args)]
pub struct SynthesizeArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "headgate.toml")]
    pub config: PathBuf,

    /// Output JSON path (stdout when omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Append the total of all synthesized series.
    #[arg(long)]
    pub total: bool,
}

/// Arguments for the `daily` subcommand.
#[derive(clap::Args)]
pub struct DailyArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "headgate.toml")]
    pub config: PathBuf,

    /// Location id to estimate.
    #[arg(long)]
    pub id: String,

    /// Daily flag: "0" for flat, the location id for its own daily series,
    /// or the id of a template series.
    #[arg(long = "daily-flag")]
    pub daily_flag: String,

    /// Return the template unscaled instead of fitting it to monthly values.
    #[arg(long = "template-only")]
    pub template_only: bool,

    /// Output JSON path (stdout when omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `compare` subcommand.
#[derive(clap::Args)]
pub struct CompareArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "headgate.toml")]
    pub config: PathBuf,

    /// Location id whose decree series is compared.
    #[arg(long)]
    pub id: String,

    /// Id of the supplied series to compare against.
    #[arg(long)]
    pub against: String,

    /// Report the difference as a percentage of the decree total.
    #[arg(long)]
    pub percent: bool,
}
