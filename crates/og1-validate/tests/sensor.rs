mod common;

use common::{LEGACY_URI, SBE37_URI, sensor_draft, sensor_vocabulary};
use og1_model::{FieldValue, IssueKind, IssueSeverity, ReconcileError};
use og1_validate::reconcile_sensor;

#[test]
fn placeholder_sensor_is_filled_from_registry() {
    let result = reconcile_sensor(&sensor_vocabulary(), "SBE37", sensor_draft(SBE37_URI)).unwrap();

    insta::assert_json_snapshot!(result.record, @r#"
    {
      "long_name": "SBE37",
      "sensor_maker": "Seabird",
      "sensor_maker_vocabulary": "http://vocab.nerc.ac.uk/collection/L35/current/MAN0013/",
      "sensor_model": "SBE37",
      "sensor_model_vocabulary": "http://vocab.nerc.ac.uk/collection/L22/current/TOOL1457/",
      "sensor_type": "CTD",
      "sensor_type_vocabulary": "http://vocab.nerc.ac.uk/collection/L05/current/130/"
    }
    "#);

    // Every placeholder except the model URI is replaced.
    assert_eq!(result.corrections().count(), 6);
    assert!(result.issues.iter().all(|issue| issue.severity == IssueSeverity::Info));
}

#[test]
fn correction_records_expected_and_actual() {
    let mut draft = sensor_draft(SBE37_URI);
    draft.insert("sensor_model".to_string(), FieldValue::from("SBE 37"));
    let result = reconcile_sensor(&sensor_vocabulary(), "SBE37", draft).unwrap();

    let correction = result
        .corrections()
        .find(|issue| issue.field.as_deref() == Some("sensor_model"))
        .unwrap();
    assert_eq!(correction.expected.as_deref(), Some("SBE37"));
    assert_eq!(correction.actual.as_deref(), Some("SBE 37"));
    assert_eq!(
        correction.message,
        "Incorrect entry in SBE37: sensor_model: SBE 37 != NVS value: SBE37. Replacing it"
    );
}

#[test]
fn validated_sensor_is_stable() {
    let vocab = sensor_vocabulary();
    let first = reconcile_sensor(&vocab, "SBE37", sensor_draft(SBE37_URI)).unwrap();
    let second = reconcile_sensor(&vocab, "SBE37", first.record.clone()).unwrap();

    assert_eq!(second.record, first.record);
    assert!(second.issues.is_empty());
}

#[test]
fn model_outside_scheme_warns_and_requests_links() {
    let result = reconcile_sensor(&sensor_vocabulary(), "logger", sensor_draft(LEGACY_URI)).unwrap();

    assert!(result.has_issue(IssueKind::SchemeMembership));
    let requests: Vec<&str> = result
        .issues
        .iter()
        .filter(|issue| issue.kind == IssueKind::MissingLinkage)
        .map(|issue| issue.message.as_str())
        .collect();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].contains(&format!("Request link: Legacy logger {LEGACY_URI}")));
    assert!(requests[0].ends_with("Related: x x"));

    assert_eq!(result.record["sensor_model"], FieldValue::from("Legacy logger"));
    assert_eq!(result.record["sensor_maker"], FieldValue::from("x"));
}

#[test]
fn unknown_model_is_rejected() {
    let uri = "http://vocab.nerc.ac.uk/collection/L22/current/TOOL9999/";
    let error = reconcile_sensor(&sensor_vocabulary(), "mystery", sensor_draft(uri)).unwrap_err();

    assert_eq!(error.category(), "unresolved-reference");
    assert_eq!(
        error.to_string(),
        format!(
            "mystery: sensor_model_vocabulary {uri} not found in L22. Check URI or log request to add"
        )
    );
}

#[test]
fn extra_attribute_is_rejected_even_when_model_resolves() {
    let mut draft = sensor_draft(SBE37_URI);
    draft.insert("serial_number".to_string(), FieldValue::Integer(1234));
    let error = reconcile_sensor(&sensor_vocabulary(), "SBE37", draft).unwrap_err();

    assert!(matches!(error, ReconcileError::Schema { ref unexpected, .. } if unexpected == &["serial_number"]));
    assert_eq!(
        error.to_string(),
        "SBE37: unexpected keys [serial_number], missing keys []"
    );
}
