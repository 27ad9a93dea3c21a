//! Where collection documents come from.

use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::collection::{CollectionId, VocabKind};
use crate::error::{FetchError, Result};
use crate::graph::ConceptCollection;

/// Gateway to the vocabulary service.
///
/// Returns the raw linked-data document for a collection. Implementations
/// decide about transport and caching; decoding happens in
/// [`fetch_collection`].
pub trait CollectionSource {
    fn fetch(&self, id: CollectionId, kind: VocabKind) -> Result<Value>;
}

impl<S: CollectionSource + ?Sized> CollectionSource for &S {
    fn fetch(&self, id: CollectionId, kind: VocabKind) -> Result<Value> {
        (**self).fetch(id, kind)
    }
}

/// Fetch and decode the current version of a collection.
pub fn fetch_collection(
    source: &dyn CollectionSource,
    id: CollectionId,
) -> Result<ConceptCollection> {
    let document = source.fetch(id, VocabKind::Collection)?;
    let collection = ConceptCollection::from_document(id, document)?;
    debug!(collection = %id, concepts = collection.len(), "collection decoded");
    Ok(collection)
}

// =============================================================================
// In-memory fixtures
// =============================================================================

/// Serves documents registered up front. Used by tests.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    documents: HashMap<CollectionId, Value>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_document(mut self, id: CollectionId, document: Value) -> Self {
        self.documents.insert(id, document);
        self
    }
}

impl CollectionSource for FixtureSource {
    fn fetch(&self, id: CollectionId, _kind: VocabKind) -> Result<Value> {
        self.documents
            .get(&id)
            .cloned()
            .ok_or(FetchError::Missing { collection: id })
    }
}

// =============================================================================
// Offline directory
// =============================================================================

/// Reads `<dir>/<CODE>.json` documents saved from the vocabulary server.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, id: CollectionId) -> PathBuf {
        self.dir.join(format!("{}.json", id.code()))
    }
}

impl CollectionSource for DirectorySource {
    fn fetch(&self, id: CollectionId, _kind: VocabKind) -> Result<Value> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(FetchError::Missing { collection: id });
        }
        let text = std::fs::read_to_string(&path).map_err(|e| FetchError::io(&path, e))?;
        serde_json::from_str(&text).map_err(|e| FetchError::decode(path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fixture_source_missing_collection() {
        let source = FixtureSource::new();
        let error = fetch_collection(&source, CollectionId::L22).unwrap_err();
        assert!(matches!(
            error,
            FetchError::Missing {
                collection: CollectionId::L22
            }
        ));
    }

    #[test]
    fn directory_source_reads_code_named_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("L35.json"),
            json!({"@graph": [{"@id": "m1", "skos:prefLabel": "Sea-Bird Scientific"}, {"@id": "L35"}]})
                .to_string(),
        )
        .unwrap();

        let source = DirectorySource::new(dir.path());
        let collection = fetch_collection(&source, CollectionId::L35).unwrap();
        assert_eq!(collection.len(), 1);
        assert!(fetch_collection(&source, CollectionId::L05).is_err());
    }

    #[test]
    fn directory_source_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("P06.json"), "{not json").unwrap();
        let error = DirectorySource::new(dir.path())
            .fetch(CollectionId::P06, VocabKind::Collection)
            .unwrap_err();
        assert!(matches!(error, FetchError::Decode { .. }));
    }
}
