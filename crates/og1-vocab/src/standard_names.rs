//! Tabular view over the CF standard names collection (P07).
//!
//! Variables are matched against P07 by name rather than URI, and each
//! standard name carries a `related` link to its canonical unit in P06.

use std::collections::HashMap;

use tracing::debug;

use crate::collection::CollectionId;
use crate::graph::ConceptCollection;

/// One standard name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardNameRow {
    pub uri: String,
    pub definition: String,
    /// The standard name itself (the concept's preferred label).
    pub name: Option<String>,
    /// Last related URI pointing into the units collection.
    pub units_uri: Option<String>,
}

/// Standard names indexed by name.
#[derive(Debug, Clone, Default)]
pub struct StandardNameTable {
    rows: Vec<StandardNameRow>,
    by_name: HashMap<String, usize>,
}

impl StandardNameTable {
    /// Project a collection into rows.
    ///
    /// Concepts without a definition are skipped. `units` selects which
    /// `related` link supplies the units URI.
    pub fn from_collection(collection: &ConceptCollection, units: CollectionId) -> Self {
        let mut table = Self::default();
        for concept in &collection.concepts {
            let Some(definition) = concept.definition.clone() else {
                debug!(uri = %concept.uri, "standard name has no definition, skipping");
                continue;
            };
            let name = (!concept.preferred_label.is_empty()).then(|| concept.preferred_label.clone());
            let units_uri = concept.last_related_in(units).map(str::to_string);
            table.push(StandardNameRow {
                uri: concept.uri.clone(),
                definition,
                name,
                units_uri,
            });
        }
        table
    }

    /// Append a row. The first row for a given name stays authoritative.
    pub fn push(&mut self, row: StandardNameRow) {
        if let Some(name) = &row.name {
            self.by_name.entry(name.clone()).or_insert(self.rows.len());
        }
        self.rows.push(row);
    }

    pub fn get(&self, name: &str) -> Option<&StandardNameRow> {
        self.by_name.get(name).map(|&index| &self.rows[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StandardNameRow> {
        self.rows.iter()
    }
}
