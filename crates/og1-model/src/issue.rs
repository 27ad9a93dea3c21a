use serde::{Deserialize, Serialize};

use crate::record::RecordClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
    Info,
}

/// What a reconciliation note is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A draft value was replaced with the registry value.
    Correction,
    /// A vocabulary field has no counterpart link in the registry.
    MissingLinkage,
    /// The concept is not a member of the expected governing scheme.
    SchemeMembership,
    /// `long_name` differs from the concept label (informational only).
    LongNameMismatch,
    /// Declared units are not among the accepted unit labels.
    UnitsMismatch,
    /// A link points at a URI absent from the linked collection.
    UnresolvedLink,
    /// The resolved concept is deprecated in the registry.
    DeprecatedConcept,
    /// The vocabulary URI was rewritten to its canonical form.
    UriNormalized,
    /// A missing attribute was filled with its default.
    DefaultApplied,
}

/// A non-fatal note produced while reconciling one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileIssue {
    /// Name of the record the note belongs to.
    pub record: String,
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    /// Attribute the note refers to (if applicable).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Registry value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Draft value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    pub message: String,
}

impl ReconcileIssue {
    pub fn new(
        record: impl Into<String>,
        kind: IssueKind,
        severity: IssueSeverity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            record: record.into(),
            kind,
            severity,
            field: None,
            expected: None,
            actual: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_values(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }
}

/// A record that was excluded from the validated output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub record: String,
    /// `schema` or `unresolved-reference`.
    pub category: String,
    pub reason: String,
}

/// Outcome of reconciling every record of one class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassReport {
    pub class: RecordClass,
    /// Number of unique draft records read.
    pub read: usize,
    /// Number of records written to the validated document.
    pub written: usize,
    pub rejected: Vec<Rejection>,
    pub issues: Vec<ReconcileIssue>,
}

impl ClassReport {
    pub fn new(class: RecordClass) -> Self {
        Self {
            class,
            read: 0,
            written: 0,
            rejected: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Rejections plus error-level notes.
    pub fn error_count(&self) -> usize {
        self.rejected.len() + self.count_severity(IssueSeverity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count_severity(IssueSeverity::Warning)
    }

    pub fn correction_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::Correction)
            .count()
    }

    fn count_severity(&self, severity: IssueSeverity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }
}
