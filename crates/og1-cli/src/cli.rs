//! CLI argument definitions for the OG1 vocabulary checker.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

/// Upper bound for `--cache-ttl-days` (one hundred years).
pub const MAX_CACHE_TTL_DAYS: u64 = 36_500;

#[derive(Parser)]
#[command(
    name = "og1-vocab",
    version,
    about = "Validate OG1 sensor and variable metadata against the NERC Vocabulary Server",
    long_about = "Validate draft OG1 sensor and variable metadata against the NERC \
                  Vocabulary Server (NVS).\n\n\
                  Draft YAML records are checked against the L22/L05/L35 device \
                  vocabularies and the P01/P02/OG1/P06/P07 parameter vocabularies. \
                  Corrected records are written to the validated YAML documents; \
                  rejections and linkage requests are logged."
)]
pub struct Cli {
    /// Record classes to check (default: all).
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding the draft YAML documents.
    #[arg(long = "draft-dir", value_name = "DIR", default_value = "yaml/draft_yaml", global = true)]
    pub draft_dir: PathBuf,

    /// Directory receiving the validated YAML documents.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "yaml/validated_yaml", global = true)]
    pub output_dir: PathBuf,

    /// Directory for cached NVS responses.
    #[arg(
        long = "cache-dir",
        value_name = "DIR",
        env = "OG1_NVS_CACHE_DIR",
        default_value = "nvs_cache",
        global = true
    )]
    pub cache_dir: PathBuf,

    /// Days before a cached NVS response is fetched again.
    #[arg(
        long = "cache-ttl-days",
        value_name = "DAYS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(0..=MAX_CACHE_TTL_DAYS),
        global = true
    )]
    pub cache_ttl_days: u64,

    /// Ignore cached NVS responses and fetch every collection again.
    #[arg(long = "refresh", global = true)]
    pub refresh: bool,

    /// Read collections from `<DIR>/<CODE>.json` instead of the network.
    #[arg(long = "offline-dir", value_name = "DIR", global = true)]
    pub offline_dir: Option<PathBuf>,

    /// Log an error when declared units do not match the NVS units.
    #[arg(long = "check-units", global = true)]
    pub check_units: bool,

    /// Derive a missing long_name from the standard name instead of the NVS label.
    #[arg(long = "long-name-from-standard-name", global = true)]
    pub long_name_from_standard_name: bool,

    /// Write a JSON triage report of rejections and issues.
    #[arg(long = "report", value_name = "PATH", global = true)]
    pub report: Option<PathBuf>,

    /// Reconcile and report without writing validated documents.
    #[arg(long = "dry-run", global = true)]
    pub dry_run: bool,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Log file, truncated at the start of each run.
    #[arg(long = "log-file", value_name = "PATH", default_value = "vocab.log", global = true)]
    pub log_file: PathBuf,

    /// Log to the console only.
    #[arg(long = "no-log-file", global = true)]
    pub no_log_file: bool,
}

#[derive(Clone, Copy, Subcommand)]
pub enum Command {
    /// Check sensors only.
    Sensors,
    /// Check variables and coordinates only.
    Variables,
    /// Check sensors and variables.
    All,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
