//! The vocabulary snapshot used for one run.
//!
//! Every collection is fetched once at startup and passed by reference into
//! the reconcilers. Nothing here is global, so tests can build a context from
//! fixtures and independent runs never share state.

use tracing::info;

use crate::collection::CollectionId;
use crate::error::Result;
use crate::source::{CollectionSource, fetch_collection};
use crate::standard_names::StandardNameTable;
use crate::store::ConceptStore;

/// Collections needed to reconcile sensors.
#[derive(Debug, Clone, Default)]
pub struct SensorVocabulary {
    /// Sensor models (L22).
    pub models: ConceptStore,
    /// Sensor types (L05).
    pub types: ConceptStore,
    /// Sensor makers (L35).
    pub makers: ConceptStore,
}

impl SensorVocabulary {
    pub const MODELS: CollectionId = CollectionId::L22;
    pub const TYPES: CollectionId = CollectionId::L05;
    pub const MAKERS: CollectionId = CollectionId::L35;

    pub fn load(source: &dyn CollectionSource) -> Result<Self> {
        Ok(Self {
            models: load_store(source, &[Self::MODELS])?,
            types: load_store(source, &[Self::TYPES])?,
            makers: load_store(source, &[Self::MAKERS])?,
        })
    }
}

/// Collections needed to reconcile variables.
#[derive(Debug, Clone, Default)]
pub struct VariableVocabulary {
    /// P01, P02 and OG1 merged; later collections win on collision.
    pub parameters: ConceptStore,
    /// Units (P06).
    pub units: ConceptStore,
    /// CF standard names (P07).
    pub standard_names: StandardNameTable,
}

impl VariableVocabulary {
    /// Merge order of the parameter collections.
    pub const PARAMETERS: [CollectionId; 3] = [CollectionId::P01, CollectionId::P02, CollectionId::Og1];
    pub const UNITS: CollectionId = CollectionId::P06;
    pub const STANDARD_NAMES: CollectionId = CollectionId::P07;

    pub fn load(source: &dyn CollectionSource) -> Result<Self> {
        let parameters = load_store(source, &Self::PARAMETERS)?;
        let units = load_store(source, &[Self::UNITS])?;
        let names = fetch_collection(source, Self::STANDARD_NAMES)?;
        let standard_names = StandardNameTable::from_collection(&names, Self::UNITS);
        info!(
            collection = %Self::STANDARD_NAMES,
            rows = standard_names.len(),
            "standard name table ready"
        );
        Ok(Self {
            parameters,
            units,
            standard_names,
        })
    }
}

/// Which record classes a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    All,
    Sensors,
    Variables,
}

impl Scope {
    pub const fn includes_sensors(&self) -> bool {
        matches!(self, Self::All | Self::Sensors)
    }

    pub const fn includes_variables(&self) -> bool {
        matches!(self, Self::All | Self::Variables)
    }
}

/// All vocabulary needed for a run.
#[derive(Debug, Clone, Default)]
pub struct VocabularyContext {
    pub sensors: Option<SensorVocabulary>,
    pub variables: Option<VariableVocabulary>,
}

impl VocabularyContext {
    /// Fetch the collections `scope` needs. Any fetch failure aborts.
    pub fn load(source: &dyn CollectionSource, scope: Scope) -> Result<Self> {
        let sensors = if scope.includes_sensors() {
            Some(SensorVocabulary::load(source)?)
        } else {
            None
        };
        let variables = if scope.includes_variables() {
            Some(VariableVocabulary::load(source)?)
        } else {
            None
        };
        Ok(Self { sensors, variables })
    }
}

fn load_store(source: &dyn CollectionSource, ids: &[CollectionId]) -> Result<ConceptStore> {
    let mut store = ConceptStore::new();
    for &id in ids {
        let collection = fetch_collection(source, id)?;
        info!(
            collection = %id,
            concepts = collection.len(),
            version = collection.version.as_deref().unwrap_or("unknown"),
            "collection loaded"
        );
        store.add_collection(collection);
    }
    Ok(store)
}
