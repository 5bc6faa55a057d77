//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// enviro-uplink - Environmental sensor batch uploader
#[derive(Parser, Debug)]
#[command(
    name = "enviro-uplink",
    author,
    version,
    about = "Environmental sensor batch uploader",
    long_about = "Samples an environmental sensor attached to a single-board station,\n\
                  batches the readings, and uploads each batch to a signed ingestion\n\
                  endpoint. One process drives one device."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "ENVIRO_UPLINK_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "ENVIRO_UPLINK_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the sample-batch-upload pipeline
    Run(RunArgs),

    /// Validate a station file without running
    Validate(ValidateArgs),

    /// Display station configuration information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to station file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "station.toml",
        env = "ENVIRO_UPLINK_CONFIG"
    )]
    pub config: PathBuf,

    /// Override ingestion endpoint from configuration
    #[arg(long, env = "ENVIRO_UPLINK_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Override samples per batch from configuration
    #[arg(long, env = "ENVIRO_UPLINK_BATCH_SIZE")]
    pub batch_size: Option<usize>,

    /// Override inter-read delay in seconds from configuration
    #[arg(long, env = "ENVIRO_UPLINK_READ_INTERVAL_SECS")]
    pub read_interval_secs: Option<f64>,

    /// Maximum collect/upload cycles to run (0 = unlimited)
    #[arg(long, default_value = "0", env = "ENVIRO_UPLINK_MAX_CYCLES")]
    pub max_cycles: u64,

    /// Validate configuration and exit without running the pipeline
    #[arg(long)]
    pub dry_run: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "ENVIRO_UPLINK_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to station file to validate
    #[arg(short, long, default_value = "station.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to station file
    #[arg(short, long, default_value = "station.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
