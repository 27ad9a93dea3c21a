//! Batch runner: load drafts, reconcile, write validated documents.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info, info_span, warn};

use og1_model::{ClassReport, FieldValue, RecordClass, RecordSet, ReconcileError, Rejection};
use og1_validate::{ReconcileOptions, reconcile_sensor, reconcile_variable};
use og1_vocab::{
    CollectionSource, NVS_BASE_URL, Scope, SensorVocabulary, VariableVocabulary,
    VocabularyContext,
};

use crate::storage::{read_records, write_records};
use crate::types::{RunResult, TriageReport};

pub const DEFAULT_DRAFT_DIR: &str = "yaml/draft_yaml";
pub const DEFAULT_OUTPUT_DIR: &str = "yaml/validated_yaml";

pub const SENSOR_DRAFTS: [&str; 1] = ["voto_sensors.yaml"];
pub const SENSOR_OUTPUT: &str = "og1_sensors.yaml";

/// Variable drafts in load order. A valid later copy replaces an earlier one.
pub const VARIABLE_DRAFTS: [&str; 2] = ["voto_variables.yaml", "og1_coordinates.yaml"];
pub const VARIABLE_OUTPUT: &str = "og1_variables.yaml";

/// Where to read and write, and how to reconcile.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub draft_dir: PathBuf,
    pub output_dir: PathBuf,
    pub scope: Scope,
    pub options: ReconcileOptions,
    /// Reconcile and report without writing validated documents.
    pub dry_run: bool,
    /// Optional JSON triage report.
    pub report_path: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            draft_dir: PathBuf::from(DEFAULT_DRAFT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            scope: Scope::default(),
            options: ReconcileOptions::default(),
            dry_run: false,
            report_path: None,
        }
    }
}

impl RunConfig {
    #[must_use]
    pub fn with_draft_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.draft_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ReconcileOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn with_report_path(mut self, path: Option<PathBuf>) -> Self {
        self.report_path = path;
        self
    }
}

/// Run every class in `config.scope` against vocabularies from `source`.
///
/// Rejected records are reported, not returned as errors. Errors are fatal:
/// a collection that cannot be fetched, an unreadable draft or an unwritable
/// output.
pub fn run(config: &RunConfig, source: &dyn CollectionSource) -> Result<RunResult> {
    let start = Instant::now();
    let span = info_span!("run", scope = ?config.scope, dry_run = config.dry_run);
    let _guard = span.enter();

    let context = VocabularyContext::load(source, config.scope).context("load NVS vocabularies")?;
    let mut result = RunResult {
        reports: Vec::new(),
        outputs: Vec::new(),
        report_path: None,
        elapsed: start.elapsed(),
        dry_run: config.dry_run,
    };

    if let Some(vocab) = &context.sensors {
        let drafts: RecordSet =
            load_documents(&config.draft_dir, &SENSOR_DRAFTS, RecordClass::Sensor)?
                .into_iter()
                .flatten()
                .collect();
        let (report, validated) = reconcile_sensors(vocab, drafts);
        info!(
            "COMPLETE check all sensors. Read {}, wrote {} sensors",
            report.read, report.written
        );
        persist(config, SENSOR_OUTPUT, &validated, &mut result)?;
        result.reports.push(report);
    }

    if let Some(vocab) = &context.variables {
        let documents =
            load_documents(&config.draft_dir, &VARIABLE_DRAFTS, RecordClass::Variable)?;
        let (report, validated) = reconcile_variables(vocab, &config.options, documents);
        info!(
            "COMPLETE check all variables, read {} unique variables, wrote {} variables",
            report.read, report.written
        );
        persist(config, VARIABLE_OUTPUT, &validated, &mut result)?;
        result.reports.push(report);
    }

    if let Some(path) = &config.report_path {
        write_triage_report(path, &result)?;
        result.report_path = Some(path.clone());
    }

    result.elapsed = start.elapsed();
    info!("COMPLETE in {:?}", result.elapsed);
    Ok(result)
}

/// Reconcile sensors. Validated sensors are keyed by their resolved model name.
pub fn reconcile_sensors(vocab: &SensorVocabulary, drafts: RecordSet) -> (ClassReport, RecordSet) {
    let mut report = ClassReport::new(RecordClass::Sensor);
    let mut validated = RecordSet::new();
    report.read = drafts.len();

    for (name, draft) in drafts {
        debug!("Validate {name}");
        match reconcile_sensor(vocab, &name, draft) {
            Ok(reconciled) => {
                let key = reconciled
                    .record
                    .get("sensor_model")
                    .and_then(FieldValue::as_text)
                    .map_or_else(|| name.clone(), str::to_string);
                if validated.contains_key(&key) {
                    warn!(record = %name, "sensor model {key} already validated, keeping {name}");
                }
                report.issues.extend(reconciled.issues);
                validated.insert(key, reconciled.record);
            }
            Err(error) => report.rejected.push(rejection(&error)),
        }
    }

    report.written = validated.len();
    (report, validated)
}

/// Reconcile variable documents in load order. Validated variables keep
/// their draft name.
///
/// A name seen again in a later document is reconciled again. Only a valid
/// copy replaces the validated record; a rejected copy leaves it in place.
pub fn reconcile_variables(
    vocab: &VariableVocabulary,
    options: &ReconcileOptions,
    documents: Vec<RecordSet>,
) -> (ClassReport, RecordSet) {
    let mut report = ClassReport::new(RecordClass::Variable);
    let mut validated = RecordSet::new();
    let mut names = BTreeSet::new();

    for drafts in documents {
        for (name, draft) in drafts {
            debug!("Validate {name}");
            names.insert(name.clone());
            match reconcile_variable(vocab, options, &name, draft) {
                Ok(reconciled) => {
                    report.issues.extend(reconciled.issues);
                    if validated.insert(name.clone(), reconciled.record).is_some() {
                        debug!("{name} replaced by a later draft document");
                    }
                }
                Err(error) => {
                    if validated.contains_key(&name) {
                        warn!(record = %name, "later copy rejected, keeping validated {name}");
                    }
                    report.rejected.push(rejection(&error));
                }
            }
        }
    }

    report.read = names.len();
    report.written = validated.len();
    (report, validated)
}

fn rejection(error: &ReconcileError) -> Rejection {
    Rejection {
        record: error.record().to_string(),
        category: error.category().to_string(),
        reason: error.to_string(),
    }
}

/// Read the draft documents of one class in order.
fn load_documents(dir: &Path, files: &[&str], class: RecordClass) -> Result<Vec<RecordSet>> {
    files
        .iter()
        .map(|file| {
            let records = read_records(&dir.join(file))?;
            info!("START check {} {class}", records.len());
            Ok(records)
        })
        .collect()
}

fn persist(
    config: &RunConfig,
    file: &str,
    validated: &RecordSet,
    result: &mut RunResult,
) -> Result<()> {
    let path = config.output_dir.join(file);
    if config.dry_run {
        info!("dry run, not writing {}", path.display());
        return Ok(());
    }
    write_records(&path, validated)?;
    result.outputs.push(path);
    Ok(())
}

fn write_triage_report(path: &Path, result: &RunResult) -> Result<()> {
    let report = TriageReport {
        generated_at: Utc::now(),
        vocabulary_server: NVS_BASE_URL,
        dry_run: result.dry_run,
        classes: &result.reports,
    };
    let json = serde_json::to_string_pretty(&report).context("serialize triage report")?;
    fs::write(path, json).with_context(|| format!("write triage report to {}", path.display()))
}
