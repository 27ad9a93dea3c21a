//! Configuration for the variable reconciler.

use serde::{Deserialize, Serialize};

/// What to do when declared units are not among the accepted labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitsCheck {
    /// Compare quietly (debug log only).
    #[default]
    Skip,
    /// Log an error-level note. The record is still accepted.
    Report,
}

/// Source of `long_name` when a draft variable has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongNameSource {
    /// Preferred label of the resolved parameter concept. Falls back to the
    /// standard name when the label is empty.
    #[default]
    ConceptLabel,
    /// The standard name with underscores replaced by spaces.
    StandardName,
}

/// Options controlling variable reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconcileOptions {
    pub units_check: UnitsCheck,
    pub long_name: LongNameSource,
}

impl ReconcileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_units_check(mut self, units_check: UnitsCheck) -> Self {
        self.units_check = units_check;
        self
    }

    #[must_use]
    pub fn with_long_name(mut self, long_name: LongNameSource) -> Self {
        self.long_name = long_name;
        self
    }
}
