//! Shared types for OG1 metadata reconciliation.

pub mod error;
pub mod issue;
pub mod record;

pub use error::{ReconcileError, Result};
pub use issue::{ClassReport, IssueKind, IssueSeverity, ReconcileIssue, Rejection};
pub use record::{DraftRecord, FieldValue, RecordClass, RecordSet, text_record};
