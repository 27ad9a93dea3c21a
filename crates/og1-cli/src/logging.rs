//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! Every run logs to standard output and, unless disabled, to a plain-text
//! log file that is truncated at startup. The file is the triage record of
//! a run: every rejection, correction and linkage request ends up there.
//!
//! # Log Levels
//!
//! - `error`: rejected records, units mismatches (when reported)
//! - `warn`: missing linkages, scheme membership, long_name mismatches
//! - `info`: corrections, run progress and counts
//! - `debug`: defaults applied, cache hits, skipped graph entries

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Log file written next to the working directory by default.
pub const DEFAULT_LOG_FILE: &str = "vocab.log";

/// Crates whose events pass the default filter at the configured level.
const OWN_CRATES: [&str; 4] = ["og1_cli", "og1_model", "og1_validate", "og1_vocab"];

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level applied to this workspace's crates.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` replace the default filter.
    pub use_env_filter: bool,
    /// Whether to include timestamps in console output.
    pub with_timestamps: bool,
    /// Whether to include target (module path) in log output.
    pub with_target: bool,
    /// Whether to use ANSI colors on the console.
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Log file, truncated at startup. `None` logs to the console only.
    pub log_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::INFO,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_ansi: io::stdout().is_terminal(),
            format: LogFormat::default(),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or a global subscriber
/// is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let mut layers: Vec<BoxedLayer> = vec![console_layer(config, io::stdout)];
    if let Some(path) = &config.log_file {
        let file = File::create(path)?;
        layers.push(file_layer(config, SharedFileWriter::new(file)));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(build_env_filter(config))
        .try_init()
        .map_err(io::Error::other)
}

fn console_layer<W>(config: &LogConfig, writer: W) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(config.with_target)
            .boxed(),
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target);
            if config.with_timestamps {
                layer.boxed()
            } else {
                layer.without_time().boxed()
            }
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target);
            if config.with_timestamps {
                layer.boxed()
            } else {
                layer.without_time().boxed()
            }
        }
    }
}

/// The file always carries timestamps and never ANSI escapes.
fn file_layer<W>(config: &LogConfig, writer: W) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(config.with_target)
            .boxed(),
        LogFormat::Compact | LogFormat::Pretty => fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(config.with_target)
            .boxed(),
    }
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<File>>,
}

impl SharedFileWriter {
    fn new(file: File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<File>>,
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    let mut directives = vec!["warn".to_string()];
    directives.extend(OWN_CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}

/// Build the filter. `RUST_LOG` wins when allowed and set.
fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(config.level_filter));
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_cover_workspace_crates() {
        assert_eq!(
            default_directives(LevelFilter::DEBUG),
            "warn,og1_cli=debug,og1_model=debug,og1_validate=debug,og1_vocab=debug"
        );
    }

    #[test]
    fn default_config_logs_to_vocab_log() {
        let config = LogConfig::default();
        assert_eq!(config.log_file, Some(PathBuf::from(DEFAULT_LOG_FILE)));
        assert_eq!(config.level_filter, LevelFilter::INFO);
    }
}
