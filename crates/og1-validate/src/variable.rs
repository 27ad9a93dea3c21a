//! Variable reconciliation against P01/P02/OG1, P06 and the P07 standard names.

use tracing::{debug, info_span};

use og1_model::{DraftRecord, FieldValue, IssueKind, IssueSeverity, ReconcileError};
use og1_vocab::VariableVocabulary;

use crate::options::{LongNameSource, ReconcileOptions, UnitsCheck};
use crate::outcome::{IssueLog, Reconciled, reject, text_field};

/// Variables that are themselves coordinates and carry no `coordinates` attribute.
pub const COORDINATE_NAMES: [&str; 4] = ["TIME", "LONGITUDE", "LATITUDE", "DEPTH"];

/// Value of `coordinates` on every non-coordinate variable.
pub const COORDINATES: &str = "TIME, LONGITUDE, LATITUDE, DEPTH";

/// `_FillValue` written when the draft has none.
pub const FILL_VALUE_NAN: &str = "NaNf";

/// Attributes every variable must declare.
pub const VARIABLE_KEYS: [&str; 3] = ["standard_name", "units", "vocabulary"];

/// Canonical form of a vocabulary URI: plain `http:` and one trailing `/`.
pub fn normalize_vocabulary_uri(uri: &str) -> String {
    let uri = match uri.strip_prefix("https:") {
        Some(rest) => format!("http:{rest}"),
        None => uri.to_string(),
    };
    format!("{}/", uri.trim_end_matches('/'))
}

/// Validate and correct one variable record.
///
/// Fails when a mandatory attribute is missing, when `vocabulary` does not
/// resolve in the parameter collections, or when `standard_name` is not a
/// CF standard name. Everything else is corrected or reported in place.
pub fn reconcile_variable(
    vocab: &VariableVocabulary,
    options: &ReconcileOptions,
    name: &str,
    mut record: DraftRecord,
) -> Result<Reconciled, ReconcileError> {
    let span = info_span!("variable", record = name);
    let _guard = span.enter();

    let mut log = IssueLog::new(name);

    if !COORDINATE_NAMES.contains(&name) {
        match record.get("coordinates") {
            Some(value) if value.is_text(COORDINATES) => {}
            Some(value) => {
                log.push(
                    log.issue(
                        IssueKind::Correction,
                        IssueSeverity::Info,
                        format!("{name} coordinates '{value}' replaced with '{COORDINATES}'"),
                    )
                    .with_field("coordinates")
                    .with_values(COORDINATES, value.to_string()),
                );
                record.insert("coordinates".to_string(), FieldValue::from(COORDINATES));
            }
            None => {
                log.push(
                    log.issue(
                        IssueKind::DefaultApplied,
                        IssueSeverity::Info,
                        format!("{name} coordinates set to '{COORDINATES}'"),
                    )
                    .with_field("coordinates"),
                );
                record.insert("coordinates".to_string(), FieldValue::from(COORDINATES));
            }
        }
    }

    if !record.contains_key("_FillValue") {
        log.push(
            log.issue(
                IssueKind::DefaultApplied,
                IssueSeverity::Info,
                format!("{name} _FillValue set to {FILL_VALUE_NAN}"),
            )
            .with_field("_FillValue"),
        );
        record.insert("_FillValue".to_string(), FieldValue::from(FILL_VALUE_NAN));
    }

    let missing: Vec<String> = VARIABLE_KEYS
        .iter()
        .filter(|key| !record.contains_key(**key))
        .map(|key| (*key).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(reject(ReconcileError::Schema {
            record: name.to_string(),
            unexpected: Vec::new(),
            missing,
        }));
    }

    let draft_uri = text_field(name, &record, "vocabulary")?;
    let uri = normalize_vocabulary_uri(draft_uri);
    if uri != draft_uri {
        log.push(
            log.issue(
                IssueKind::UriNormalized,
                IssueSeverity::Info,
                format!("{name} vocabulary {draft_uri} rewritten as {uri}"),
            )
            .with_field("vocabulary")
            .with_values(uri.as_str(), draft_uri),
        );
        record.insert("vocabulary".to_string(), FieldValue::from(uri.as_str()));
    }

    let Some(concept) = vocab.parameters.get(&uri) else {
        return Err(reject(ReconcileError::UnresolvedReference {
            record: name.to_string(),
            field: "vocabulary".to_string(),
            value: uri,
            target: parameter_collections(),
        }));
    };

    let standard_name = text_field(name, &record, "standard_name")?.to_string();
    let Some(row) = vocab.standard_names.get(&standard_name) else {
        return Err(reject(ReconcileError::UnresolvedReference {
            record: name.to_string(),
            field: "standard_name".to_string(),
            value: standard_name,
            target: VariableVocabulary::STANDARD_NAMES.to_string(),
        }));
    };

    if concept.deprecated {
        log.push(
            log.issue(
                IssueKind::DeprecatedConcept,
                IssueSeverity::Warning,
                format!("{name} vocabulary {} is deprecated", concept.uri),
            )
            .with_field("vocabulary"),
        );
    }

    let label = concept.preferred_label.as_str();
    match record.get("long_name") {
        Some(long_name) => {
            if !long_name.is_text(label) {
                log.push(
                    log.issue(
                        IssueKind::LongNameMismatch,
                        IssueSeverity::Warning,
                        format!(
                            "{name} long_name '{long_name}' does not match expected value from NVS '{label}'"
                        ),
                    )
                    .with_field("long_name")
                    .with_values(label, long_name.to_string()),
                );
            }
        }
        None => {
            let long_name = match options.long_name {
                LongNameSource::ConceptLabel if !label.is_empty() => label.to_string(),
                LongNameSource::ConceptLabel | LongNameSource::StandardName => {
                    standard_name.replace('_', " ")
                }
            };
            log.push(
                log.issue(
                    IssueKind::DefaultApplied,
                    IssueSeverity::Info,
                    format!("{name} long_name set to '{long_name}'"),
                )
                .with_field("long_name"),
            );
            record.insert("long_name".to_string(), FieldValue::from(long_name));
        }
    }

    let units_uri = concept
        .first_related_in(VariableVocabulary::UNITS)
        .or(row.units_uri.as_deref());
    let declared = record
        .get("units")
        .map(FieldValue::to_string)
        .unwrap_or_default();

    match units_uri.map(|uri| (uri, vocab.units.get(uri))) {
        None => log.push(
            log.issue(
                IssueKind::MissingLinkage,
                IssueSeverity::Warning,
                format!(
                    "{name} has no units linkage in NVS for {} or standard name {standard_name}",
                    concept.uri
                ),
            )
            .with_field("units"),
        ),
        Some((units_uri, None)) => log.push(
            log.issue(
                IssueKind::UnresolvedLink,
                IssueSeverity::Warning,
                format!(
                    "{name} units {units_uri} not found in {}",
                    VariableVocabulary::UNITS
                ),
            )
            .with_field("units"),
        ),
        Some((units_uri, Some(units))) => {
            let accepted = units.accepted_labels();
            if !accepted.contains(&declared.as_str()) {
                let message = format!(
                    "{name} unit {declared} not in expected units {accepted:?} from {units_uri}"
                );
                match options.units_check {
                    UnitsCheck::Skip => debug!(record = name, "{message}"),
                    UnitsCheck::Report => log.push(
                        log.issue(IssueKind::UnitsMismatch, IssueSeverity::Error, message)
                            .with_field("units")
                            .with_values(accepted.join(", "), declared.as_str()),
                    ),
                }
            }
        }
    }

    Ok(log.finish(record))
}

fn parameter_collections() -> String {
    VariableVocabulary::PARAMETERS
        .iter()
        .map(|id| id.code())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_scheme_is_downgraded() {
        assert_eq!(
            normalize_vocabulary_uri("https://vocab.nerc.ac.uk/collection/P01/current/TEMPPR01"),
            "http://vocab.nerc.ac.uk/collection/P01/current/TEMPPR01/"
        );
    }

    #[test]
    fn trailing_separator_is_single() {
        assert_eq!(
            normalize_vocabulary_uri("http://vocab.nerc.ac.uk/collection/OG1/current/PSAL//"),
            "http://vocab.nerc.ac.uk/collection/OG1/current/PSAL/"
        );
        let canonical = "http://vocab.nerc.ac.uk/collection/P02/current/TEMP/";
        assert_eq!(normalize_vocabulary_uri(canonical), canonical);
    }

    #[test]
    fn only_leading_scheme_is_rewritten() {
        assert_eq!(normalize_vocabulary_uri("urn:https:x"), "urn:https:x/");
    }

    #[test]
    fn parameter_collections_are_listed_in_merge_order() {
        assert_eq!(parameter_collections(), "P01/P02/OG1");
    }
}
