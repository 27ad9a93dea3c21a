mod common;

use common::{
    DEGC_URI, DOXY_URI, PSAL_URI, TEMP_URI, UMKG_URI, temperature_draft, variable_vocabulary,
};
use og1_model::{FieldValue, IssueKind, IssueSeverity, ReconcileError, text_record};
use og1_validate::{
    COORDINATES, FILL_VALUE_NAN, LongNameSource, ReconcileOptions, UnitsCheck, reconcile_variable,
};

#[test]
fn minimal_variable_gets_defaults() {
    let result = reconcile_variable(
        &variable_vocabulary(),
        &ReconcileOptions::default(),
        "TEMP",
        temperature_draft(),
    )
    .unwrap();

    insta::assert_json_snapshot!(result.record, @r#"
    {
      "_FillValue": "NaNf",
      "coordinates": "TIME, LONGITUDE, LATITUDE, DEPTH",
      "long_name": "Temperature of the water body",
      "standard_name": "sea_water_temperature",
      "units": "degC",
      "vocabulary": "http://vocab.nerc.ac.uk/collection/OG1/current/TEMP/"
    }
    "#);
    assert!(
        result
            .issues
            .iter()
            .all(|issue| issue.kind == IssueKind::DefaultApplied)
    );
}

#[test]
fn unresolvable_vocabulary_is_rejected() {
    let draft = text_record([
        ("standard_name", "sea_water_temperature"),
        ("vocabulary", "http://vocab.nerc.ac.uk/collection/OG1/current/NOT_A_TERM"),
        ("units", "degC"),
    ]);
    let error =
        reconcile_variable(&variable_vocabulary(), &ReconcileOptions::default(), "TEMP", draft)
            .unwrap_err();

    assert_eq!(
        error,
        ReconcileError::UnresolvedReference {
            record: "TEMP".to_string(),
            field: "vocabulary".to_string(),
            value: "http://vocab.nerc.ac.uk/collection/OG1/current/NOT_A_TERM/".to_string(),
            target: "P01/P02/OG1".to_string(),
        }
    );
}

#[test]
fn unknown_standard_name_is_rejected() {
    let mut draft = temperature_draft();
    draft.insert(
        "standard_name".to_string(),
        FieldValue::from("sea_water_warmth"),
    );
    let error =
        reconcile_variable(&variable_vocabulary(), &ReconcileOptions::default(), "TEMP", draft)
            .unwrap_err();

    assert!(matches!(
        error,
        ReconcileError::UnresolvedReference { ref field, ref target, .. }
            if field == "standard_name" && target == "P07"
    ));
}

#[test]
fn missing_mandatory_attribute_is_rejected() {
    let mut draft = temperature_draft();
    draft.remove("units");
    let error =
        reconcile_variable(&variable_vocabulary(), &ReconcileOptions::default(), "TEMP", draft)
            .unwrap_err();

    assert_eq!(error.to_string(), "TEMP: unexpected keys [], missing keys [units]");
}

#[test]
fn secure_uri_is_normalized_in_output() {
    let mut draft = temperature_draft();
    draft.insert(
        "vocabulary".to_string(),
        FieldValue::from("https://vocab.nerc.ac.uk/collection/OG1/current/TEMP"),
    );
    let result =
        reconcile_variable(&variable_vocabulary(), &ReconcileOptions::default(), "TEMP", draft)
            .unwrap();

    assert_eq!(result.record["vocabulary"], FieldValue::from(TEMP_URI));
    let note = result
        .issues
        .iter()
        .find(|issue| issue.kind == IssueKind::UriNormalized)
        .unwrap();
    assert_eq!(
        note.actual.as_deref(),
        Some("https://vocab.nerc.ac.uk/collection/OG1/current/TEMP")
    );
}

#[test]
fn divergent_long_name_is_kept_with_warning() {
    let mut draft = temperature_draft();
    draft.insert("long_name".to_string(), FieldValue::from("Water temperature"));
    let result =
        reconcile_variable(&variable_vocabulary(), &ReconcileOptions::default(), "TEMP", draft)
            .unwrap();

    assert_eq!(result.record["long_name"], FieldValue::from("Water temperature"));
    let warning = result
        .issues
        .iter()
        .find(|issue| issue.kind == IssueKind::LongNameMismatch)
        .unwrap();
    assert_eq!(warning.severity, IssueSeverity::Warning);
    assert_eq!(
        warning.message,
        "TEMP long_name 'Water temperature' does not match expected value from NVS 'Temperature of the water body'"
    );
}

#[test]
fn long_name_from_standard_name() {
    let options = ReconcileOptions::new().with_long_name(LongNameSource::StandardName);
    let result =
        reconcile_variable(&variable_vocabulary(), &options, "TEMP", temperature_draft()).unwrap();

    assert_eq!(
        result.record["long_name"],
        FieldValue::from("sea water temperature")
    );
}

#[test]
fn coordinates_are_forced_except_on_coordinates() {
    let vocab = variable_vocabulary();
    let options = ReconcileOptions::default();

    let mut draft = temperature_draft();
    draft.insert("coordinates".to_string(), FieldValue::from("TIME"));
    let result = reconcile_variable(&vocab, &options, "TEMP", draft).unwrap();
    assert_eq!(result.record["coordinates"], FieldValue::from(COORDINATES));
    assert_eq!(result.corrections().count(), 1);

    let result = reconcile_variable(&vocab, &options, "DEPTH", temperature_draft()).unwrap();
    assert!(!result.record.contains_key("coordinates"));
}

#[test]
fn existing_fill_value_is_untouched() {
    let mut draft = temperature_draft();
    draft.insert("_FillValue".to_string(), FieldValue::Integer(-999));
    let result =
        reconcile_variable(&variable_vocabulary(), &ReconcileOptions::default(), "TEMP", draft)
            .unwrap();
    assert_eq!(result.record["_FillValue"], FieldValue::Integer(-999));

    let result = reconcile_variable(
        &variable_vocabulary(),
        &ReconcileOptions::default(),
        "TEMP",
        temperature_draft(),
    )
    .unwrap();
    assert_eq!(result.record["_FillValue"], FieldValue::from(FILL_VALUE_NAN));
}

#[test]
fn units_mismatch_follows_units_check() {
    let vocab = variable_vocabulary();
    let mut draft = temperature_draft();
    draft.insert("units".to_string(), FieldValue::from("K"));

    let skipped = reconcile_variable(&vocab, &ReconcileOptions::default(), "TEMP", draft.clone())
        .unwrap();
    assert!(!skipped.has_issue(IssueKind::UnitsMismatch));

    let options = ReconcileOptions::new().with_units_check(UnitsCheck::Report);
    let reported = reconcile_variable(&vocab, &options, "TEMP", draft).unwrap();
    let mismatch = reported
        .issues
        .iter()
        .find(|issue| issue.kind == IssueKind::UnitsMismatch)
        .unwrap();
    assert_eq!(mismatch.severity, IssueSeverity::Error);
    assert_eq!(mismatch.expected.as_deref(), Some("Degrees Celsius, degC"));
    assert_eq!(mismatch.actual.as_deref(), Some("K"));
    assert!(mismatch.message.ends_with(DEGC_URI));
    // Reported, not rejected.
    assert_eq!(reported.record["units"], FieldValue::from("K"));
}

#[test]
fn units_fall_back_to_standard_name_table() {
    let draft = text_record([
        ("standard_name", "sea_water_practical_salinity"),
        ("vocabulary", PSAL_URI),
        ("units", "1"),
    ]);
    let options = ReconcileOptions::new().with_units_check(UnitsCheck::Report);
    let result = reconcile_variable(&variable_vocabulary(), &options, "PSAL", draft).unwrap();

    assert!(!result.has_issue(IssueKind::UnitsMismatch));
    assert!(!result.has_issue(IssueKind::MissingLinkage));
}

#[test]
fn unit_link_outside_units_store_is_reported() {
    let draft = text_record([
        ("standard_name", "moles_of_oxygen_per_unit_mass_in_sea_water"),
        ("vocabulary", DOXY_URI),
        ("units", "micromol/kg"),
    ]);
    let options = ReconcileOptions::new().with_units_check(UnitsCheck::Report);
    let result = reconcile_variable(&variable_vocabulary(), &options, "DOXY", draft).unwrap();

    let link = result
        .issues
        .iter()
        .find(|issue| issue.kind == IssueKind::UnresolvedLink)
        .unwrap();
    assert!(link.message.contains(UMKG_URI));
    assert!(!result.has_issue(IssueKind::UnitsMismatch));
}

#[test]
fn no_units_linkage_is_a_warning() {
    let draft = text_record([
        ("standard_name", "moles_of_oxygen_per_unit_mass_in_sea_water"),
        ("vocabulary", PSAL_URI),
        ("units", "micromol/kg"),
    ]);
    let result =
        reconcile_variable(&variable_vocabulary(), &ReconcileOptions::default(), "X", draft)
            .unwrap();

    let warning = result
        .issues
        .iter()
        .find(|issue| issue.kind == IssueKind::MissingLinkage)
        .unwrap();
    assert_eq!(warning.field.as_deref(), Some("units"));
}
