//! Sensor reconciliation against L22 (models), L05 (types) and L35 (makers).
//!
//! A sensor record names its model by L22 URI. Everything else in the record
//! is derivable from the model concept: the model label, its L05 device type
//! (first `broader` link into L05) and its L35 manufacturer (first `related`
//! link into L35). Draft values that disagree with the registry are replaced.

use std::collections::BTreeMap;

use tracing::info_span;

use og1_model::{DraftRecord, FieldValue, IssueKind, IssueSeverity, ReconcileError};
use og1_vocab::{Scheme, SensorVocabulary};

use crate::outcome::{IssueLog, Reconciled, reject, text_field};

/// The exact attribute set of a sensor record.
pub const SENSOR_KEYS: [&str; 7] = [
    "long_name",
    "sensor_maker",
    "sensor_maker_vocabulary",
    "sensor_model",
    "sensor_model_vocabulary",
    "sensor_type",
    "sensor_type_vocabulary",
];

/// Validate and correct one sensor record.
///
/// Rejects records whose key set differs from [`SENSOR_KEYS`] and records
/// whose `sensor_model_vocabulary` is not an L22 URI. Missing type/maker
/// links and scheme membership problems are warnings only.
pub fn reconcile_sensor(
    vocab: &SensorVocabulary,
    name: &str,
    mut record: DraftRecord,
) -> Result<Reconciled, ReconcileError> {
    let span = info_span!("sensor", record = name);
    let _guard = span.enter();

    check_sensor_keys(name, &record)?;

    let model_uri = text_field(name, &record, "sensor_model_vocabulary")?;
    let Some(model) = vocab.models.get(model_uri) else {
        return Err(reject(ReconcileError::UnresolvedReference {
            record: name.to_string(),
            field: "sensor_model_vocabulary".to_string(),
            value: model_uri.to_string(),
            target: SensorVocabulary::MODELS.to_string(),
        }));
    };

    let mut log = IssueLog::new(name);
    let model_name = model.preferred_label.as_str();

    let mut derived: BTreeMap<&'static str, String> = BTreeMap::new();
    derived.insert("sensor_model_vocabulary", model.uri.clone());
    derived.insert("sensor_model", model_name.to_string());
    derived.insert("long_name", model_name.to_string());

    if model.deprecated {
        log.push(
            log.issue(
                IssueKind::DeprecatedConcept,
                IssueSeverity::Warning,
                format!("{model_name} {} is deprecated in {}", model.uri, SensorVocabulary::MODELS),
            )
            .with_field("sensor_model_vocabulary"),
        );
    }

    if !model.in_scheme(Scheme::OgSensors) {
        log.push(log.issue(
            IssueKind::SchemeMembership,
            IssueSeverity::Warning,
            format!("{model_name} {} not in {}", model.uri, Scheme::OgSensors.uri()),
        ));
    }

    if let Some(type_uri) = model.first_broader_in(SensorVocabulary::TYPES) {
        match vocab.types.get(type_uri) {
            Some(sensor_type) => {
                derived.insert("sensor_type_vocabulary", sensor_type.uri.clone());
                derived.insert("sensor_type", sensor_type.preferred_label.clone());
            }
            None => log.push(
                log.issue(
                    IssueKind::UnresolvedLink,
                    IssueSeverity::Warning,
                    format!(
                        "{model_name} links to sensor type {type_uri} which is not in {}",
                        SensorVocabulary::TYPES
                    ),
                )
                .with_field("sensor_type_vocabulary"),
            ),
        }
    }

    if let Some(maker_uri) = model.first_related_in(SensorVocabulary::MAKERS) {
        match vocab.makers.get(maker_uri) {
            Some(maker) => {
                derived.insert("sensor_maker_vocabulary", maker.uri.clone());
                derived.insert("sensor_maker", maker.preferred_label.clone());
            }
            None => log.push(
                log.issue(
                    IssueKind::UnresolvedLink,
                    IssueSeverity::Warning,
                    format!(
                        "{model_name} links to sensor maker {maker_uri} which is not in {}",
                        SensorVocabulary::MAKERS
                    ),
                )
                .with_field("sensor_maker_vocabulary"),
            ),
        }
    }

    let draft = record.clone();
    for (key, value) in &draft {
        let Some(expected) = derived.get(key.as_str()) else {
            if key.contains("vocabulary") {
                let companion = key.replace("_vocabulary", "");
                let related = draft
                    .get(&companion)
                    .map(FieldValue::to_string)
                    .unwrap_or_default();
                log.push(
                    log.issue(
                        IssueKind::MissingLinkage,
                        IssueSeverity::Warning,
                        format!(
                            "Missing linkage in NVS. Request link: {model_name} {} Related: {related} {value}",
                            model.uri
                        ),
                    )
                    .with_field(key.as_str()),
                );
            }
            continue;
        };
        if !value.is_text(expected) {
            log.push(
                log.issue(
                    IssueKind::Correction,
                    IssueSeverity::Info,
                    format!(
                        "Incorrect entry in {model_name}: {key}: {value} != NVS value: {expected}. Replacing it"
                    ),
                )
                .with_field(key.as_str())
                .with_values(expected.as_str(), value.to_string()),
            );
            record.insert(key.clone(), FieldValue::from(expected.as_str()));
        }
    }

    Ok(log.finish(record))
}

fn check_sensor_keys(name: &str, record: &DraftRecord) -> Result<(), ReconcileError> {
    let unexpected: Vec<String> = record
        .keys()
        .filter(|key| !SENSOR_KEYS.contains(&key.as_str()))
        .cloned()
        .collect();
    let missing: Vec<String> = SENSOR_KEYS
        .iter()
        .filter(|key| !record.contains_key(**key))
        .map(|key| (*key).to_string())
        .collect();

    if unexpected.is_empty() && missing.is_empty() {
        return Ok(());
    }
    Err(reject(ReconcileError::Schema {
        record: name.to_string(),
        unexpected,
        missing,
    }))
}
