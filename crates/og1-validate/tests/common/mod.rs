//! Small in-memory vocabularies shared by the reconciler tests.

#![allow(dead_code)]

use og1_model::{DraftRecord, text_record};
use og1_vocab::{
    Concept, ConceptStore, Scheme, SensorVocabulary, StandardNameRow, StandardNameTable,
    VariableVocabulary,
};

pub const SBE37_URI: &str = "http://vocab.nerc.ac.uk/collection/L22/current/TOOL1457/";
pub const CTD_URI: &str = "http://vocab.nerc.ac.uk/collection/L05/current/130/";
pub const SEABIRD_URI: &str = "http://vocab.nerc.ac.uk/collection/L35/current/MAN0013/";
/// A model outside the OG_SENSORS scheme with no type or maker links.
pub const LEGACY_URI: &str = "http://vocab.nerc.ac.uk/collection/L22/current/TOOL0001/";

pub const TEMP_URI: &str = "http://vocab.nerc.ac.uk/collection/OG1/current/TEMP/";
pub const PSAL_URI: &str = "http://vocab.nerc.ac.uk/collection/P01/current/PSALST01/";
pub const DOXY_URI: &str = "http://vocab.nerc.ac.uk/collection/OG1/current/DOXY/";
pub const DEGC_URI: &str = "http://vocab.nerc.ac.uk/collection/P06/current/UPAA/";
pub const DIMENSIONLESS_URI: &str = "http://vocab.nerc.ac.uk/collection/P06/current/UUUU/";
/// Linked from DOXY but absent from the units store.
pub const UMKG_URI: &str = "http://vocab.nerc.ac.uk/collection/P06/current/KGUM/";

pub fn sensor_vocabulary() -> SensorVocabulary {
    SensorVocabulary {
        models: [
            Concept::new(SBE37_URI, "SBE37")
                .with_broader("http://vocab.nerc.ac.uk/collection/B76/current/B7600024/")
                .with_broader(CTD_URI)
                .with_related(SEABIRD_URI)
                .with_scheme(Scheme::OgSensors.uri()),
            Concept::new(LEGACY_URI, "Legacy logger"),
        ]
        .into_iter()
        .collect(),
        types: [Concept::new(CTD_URI, "CTD")].into_iter().collect(),
        makers: [Concept::new(SEABIRD_URI, "Seabird")].into_iter().collect(),
    }
}

pub fn sensor_draft(model_uri: &str) -> DraftRecord {
    text_record([
        ("long_name", "x"),
        ("sensor_maker", "x"),
        ("sensor_maker_vocabulary", "x"),
        ("sensor_model", "x"),
        ("sensor_model_vocabulary", model_uri),
        ("sensor_type", "x"),
        ("sensor_type_vocabulary", "x"),
    ])
}

pub fn variable_vocabulary() -> VariableVocabulary {
    let parameters: ConceptStore = [
        Concept::new(TEMP_URI, "Temperature of the water body").with_related(DEGC_URI),
        Concept::new(PSAL_URI, "Practical salinity of the water body"),
        Concept::new(DOXY_URI, "Dissolved oxygen").with_related(UMKG_URI),
    ]
    .into_iter()
    .collect();
    let units: ConceptStore = [
        Concept::new(DEGC_URI, "Degrees Celsius").with_alt_label("degC"),
        Concept::new(DIMENSIONLESS_URI, "Dimensionless").with_alt_label("1"),
    ]
    .into_iter()
    .collect();

    let mut standard_names = StandardNameTable::default();
    standard_names.push(row("CFSN0335", "sea_water_temperature", Some(DEGC_URI)));
    standard_names.push(row(
        "CFSN0331",
        "sea_water_practical_salinity",
        Some(DIMENSIONLESS_URI),
    ));
    standard_names.push(row(
        "CFSN0494",
        "moles_of_oxygen_per_unit_mass_in_sea_water",
        None,
    ));

    VariableVocabulary {
        parameters,
        units,
        standard_names,
    }
}

fn row(id: &str, name: &str, units_uri: Option<&str>) -> StandardNameRow {
    StandardNameRow {
        uri: format!("http://vocab.nerc.ac.uk/collection/P07/current/{id}/"),
        definition: format!("Definition of {name}."),
        name: Some(name.to_string()),
        units_uri: units_uri.map(str::to_string),
    }
}

pub fn temperature_draft() -> DraftRecord {
    text_record([
        ("standard_name", "sea_water_temperature"),
        ("vocabulary", TEMP_URI),
        ("units", "degC"),
    ])
}
