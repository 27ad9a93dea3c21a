//! Reconciliation of draft OG1 records against NVS vocabularies.
//!
//! Each reconciler takes ownership of one draft record and either returns the
//! corrected record together with its notes, or a [`ReconcileError`]
//! explaining why the record cannot be published.
//!
//! [`ReconcileError`]: og1_model::ReconcileError

#![deny(unsafe_code)]

pub mod options;
pub mod outcome;
pub mod sensor;
pub mod variable;

pub use crate::options::{LongNameSource, ReconcileOptions, UnitsCheck};
pub use crate::outcome::Reconciled;
pub use crate::sensor::{SENSOR_KEYS, reconcile_sensor};
pub use crate::variable::{
    COORDINATE_NAMES, COORDINATES, FILL_VALUE_NAN, VARIABLE_KEYS, normalize_vocabulary_uri,
    reconcile_variable,
};
