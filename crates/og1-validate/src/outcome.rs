use tracing::{debug, error, info, warn};

use og1_model::{DraftRecord, FieldValue, IssueKind, IssueSeverity, ReconcileError, ReconcileIssue};

/// A record that passed reconciliation, with the notes raised on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub record: DraftRecord,
    pub issues: Vec<ReconcileIssue>,
}

impl Reconciled {
    pub fn corrections(&self) -> impl Iterator<Item = &ReconcileIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::Correction)
    }

    pub fn has_issue(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|issue| issue.kind == kind)
    }
}

/// Collects notes for one record and mirrors each one to the log.
pub(crate) struct IssueLog<'a> {
    record: &'a str,
    issues: Vec<ReconcileIssue>,
}

impl<'a> IssueLog<'a> {
    pub(crate) fn new(record: &'a str) -> Self {
        Self {
            record,
            issues: Vec::new(),
        }
    }

    pub(crate) fn issue(
        &self,
        kind: IssueKind,
        severity: IssueSeverity,
        message: impl Into<String>,
    ) -> ReconcileIssue {
        ReconcileIssue::new(self.record, kind, severity, message)
    }

    pub(crate) fn push(&mut self, issue: ReconcileIssue) {
        let field = issue.field.as_deref().unwrap_or("-");
        if issue.kind == IssueKind::DefaultApplied {
            debug!(record = %issue.record, field, kind = ?issue.kind, "{}", issue.message);
        } else {
            match issue.severity {
                IssueSeverity::Error => {
                    error!(record = %issue.record, field, kind = ?issue.kind, "{}", issue.message);
                }
                IssueSeverity::Warning => {
                    warn!(record = %issue.record, field, kind = ?issue.kind, "{}", issue.message);
                }
                IssueSeverity::Info => {
                    info!(record = %issue.record, field, kind = ?issue.kind, "{}", issue.message);
                }
            }
        }
        self.issues.push(issue);
    }

    pub(crate) fn finish(self, record: DraftRecord) -> Reconciled {
        Reconciled {
            record,
            issues: self.issues,
        }
    }
}

/// Log a rejection and hand it back for `?`.
pub(crate) fn reject(error: ReconcileError) -> ReconcileError {
    error!(record = error.record(), category = error.category(), "{error}");
    error
}

/// Borrow a mandatory text attribute.
pub(crate) fn text_field<'r>(
    record_name: &str,
    record: &'r DraftRecord,
    field: &str,
) -> Result<&'r str, ReconcileError> {
    match record.get(field).map(FieldValue::as_text) {
        Some(Some(value)) => Ok(value),
        Some(None) => Err(reject(ReconcileError::NotText {
            record: record_name.to_string(),
            field: field.to_string(),
        })),
        None => Err(reject(ReconcileError::Schema {
            record: record_name.to_string(),
            unexpected: Vec::new(),
            missing: vec![field.to_string()],
        })),
    }
}
