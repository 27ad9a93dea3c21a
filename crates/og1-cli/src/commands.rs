use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use og1_cli::pipeline::{RunConfig, run};
use og1_cli::types::RunResult;
use og1_validate::{LongNameSource, ReconcileOptions, UnitsCheck};
use og1_vocab::{CacheConfig, DirectorySource, NvsClient, Scope};

use crate::cli::{Cli, Command};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

pub fn run_check(cli: &Cli) -> Result<RunResult> {
    let config = run_config_from_cli(cli);
    match &cli.offline_dir {
        Some(dir) => {
            info!("reading NVS collections from {}", dir.display());
            run(&config, &DirectorySource::new(dir))
        }
        None => {
            let client = NvsClient::new(cache_config_from_cli(cli)).context("create NVS client")?;
            run(&config, &client)
        }
    }
}

fn run_config_from_cli(cli: &Cli) -> RunConfig {
    let scope = match cli.command {
        None | Some(Command::All) => Scope::All,
        Some(Command::Sensors) => Scope::Sensors,
        Some(Command::Variables) => Scope::Variables,
    };
    let options = ReconcileOptions::new()
        .with_units_check(if cli.check_units {
            UnitsCheck::Report
        } else {
            UnitsCheck::Skip
        })
        .with_long_name(if cli.long_name_from_standard_name {
            LongNameSource::StandardName
        } else {
            LongNameSource::ConceptLabel
        });
    RunConfig::default()
        .with_draft_dir(&cli.draft_dir)
        .with_output_dir(&cli.output_dir)
        .with_scope(scope)
        .with_options(options)
        .with_dry_run(cli.dry_run)
        .with_report_path(cli.report.clone())
}

fn cache_config_from_cli(cli: &Cli) -> CacheConfig {
    CacheConfig::default()
        .with_dir(&cli.cache_dir)
        .with_ttl(ttl_from_days(cli.cache_ttl_days))
        .with_refresh(cli.refresh)
}

fn ttl_from_days(days: u64) -> Duration {
    Duration::from_secs(days.saturating_mul(SECONDS_PER_DAY))
}
