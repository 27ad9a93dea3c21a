use thiserror::Error;

/// Why a record was rejected.
///
/// A rejection is local to one record; the batch keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error(
        "{record}: unexpected keys [{}], missing keys [{}]",
        unexpected.join(", "),
        missing.join(", ")
    )]
    Schema {
        record: String,
        unexpected: Vec<String>,
        missing: Vec<String>,
    },

    #[error("{record}: attribute {field} must be text")]
    NotText { record: String, field: String },

    #[error("{record}: {field} {value} not found in {target}. Check URI or log request to add")]
    UnresolvedReference {
        record: String,
        field: String,
        value: String,
        target: String,
    },
}

impl ReconcileError {
    /// Name of the rejected record.
    pub fn record(&self) -> &str {
        match self {
            Self::Schema { record, .. }
            | Self::NotText { record, .. }
            | Self::UnresolvedReference { record, .. } => record,
        }
    }

    /// Stable category label used in reports.
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Schema { .. } | Self::NotText { .. } => "schema",
            Self::UnresolvedReference { .. } => "unresolved-reference",
        }
    }
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
