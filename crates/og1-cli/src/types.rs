use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use og1_model::{ClassReport, RecordClass};

/// Outcome of one run.
#[derive(Debug)]
pub struct RunResult {
    pub reports: Vec<ClassReport>,
    /// Validated documents written (empty on a dry run).
    pub outputs: Vec<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub elapsed: Duration,
    pub dry_run: bool,
}

impl RunResult {
    pub fn report(&self, class: RecordClass) -> Option<&ClassReport> {
        self.reports.iter().find(|report| report.class == class)
    }

    pub fn rejected_count(&self) -> usize {
        self.reports.iter().map(|report| report.rejected.len()).sum()
    }
}

/// JSON triage report written with `--report`.
#[derive(Debug, Serialize)]
pub struct TriageReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub vocabulary_server: &'static str,
    pub dry_run: bool,
    pub classes: &'a [ClassReport],
}
