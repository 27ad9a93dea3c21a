//! In-memory concept index.

use std::collections::HashMap;

use crate::concept::Concept;
use crate::graph::ConceptCollection;

/// URI-keyed index over one or more merged collections.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ConceptStore {
    concepts: HashMap<String, Concept>,
}

impl ConceptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge collections in order. On a URI collision the later collection wins.
    pub fn from_collections(collections: impl IntoIterator<Item = ConceptCollection>) -> Self {
        let mut store = Self::new();
        for collection in collections {
            store.add_collection(collection);
        }
        store
    }

    pub fn add_collection(&mut self, collection: ConceptCollection) {
        for concept in collection.concepts {
            self.insert(concept);
        }
    }

    /// Insert a concept, replacing any concept with the same URI.
    pub fn insert(&mut self, concept: Concept) {
        self.concepts.insert(concept.uri.clone(), concept);
    }

    /// Look up a concept by exact URI.
    pub fn get(&self, uri: &str) -> Option<&Concept> {
        self.concepts.get(uri)
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.concepts.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }
}

impl FromIterator<Concept> for ConceptStore {
    fn from_iter<T: IntoIterator<Item = Concept>>(iter: T) -> Self {
        let mut store = Self::new();
        for concept in iter {
            store.insert(concept);
        }
        store
    }
}
