//! Decoding of a fetched collection document.

use serde_json::Value;
use tracing::debug;

use crate::collection::CollectionId;
use crate::concept::{Concept, LangString, OneOrMany, pick_label};
use crate::error::{FetchError, Result};

/// The concepts of one collection, as published in its current version.
#[derive(Debug, Clone)]
pub struct ConceptCollection {
    pub id: CollectionId,
    /// Collection title from the trailing descriptor.
    pub title: Option<String>,
    /// Collection version from the trailing descriptor.
    pub version: Option<String>,
    /// Concepts in graph order.
    pub concepts: Vec<Concept>,
}

impl ConceptCollection {
    pub fn new(id: CollectionId, concepts: Vec<Concept>) -> Self {
        Self {
            id,
            title: None,
            version: None,
            concepts,
        }
    }

    /// Decode a JSON-LD document.
    ///
    /// The last `@graph` element describes the collection itself and is never
    /// treated as a concept. Elements that are not records, or that have no
    /// `@id`, are skipped.
    pub fn from_document(id: CollectionId, document: Value) -> Result<Self> {
        let Value::Object(mut root) = document else {
            return Err(FetchError::MalformedGraph { collection: id });
        };
        let Some(Value::Array(mut graph)) = root.remove("@graph") else {
            return Err(FetchError::MalformedGraph { collection: id });
        };

        let descriptor = graph.pop();
        let mut collection = Self::new(id, Vec::with_capacity(graph.len()));
        if let Some(Value::Object(mut descriptor)) = descriptor {
            collection.title = descriptor_text(&mut descriptor, &["dc:title", "skos:prefLabel"]);
            collection.version =
                descriptor_text(&mut descriptor, &["owl:versionInfo", "pav:version"]);
        }

        for node in graph {
            if !node.is_object() {
                debug!(collection = %id, node = %node, "failed to parse graph element, skipping");
                continue;
            }
            match Concept::from_node(node) {
                Ok(concept) => collection.concepts.push(concept),
                Err(error) => {
                    debug!(collection = %id, %error, "failed to parse concept, skipping");
                }
            }
        }

        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

fn descriptor_text(
    descriptor: &mut serde_json::Map<String, Value>,
    keys: &[&str],
) -> Option<String> {
    keys.iter().find_map(|key| {
        let value = descriptor.remove(*key)?;
        let parsed: OneOrMany<LangString> = serde_json::from_value(value).ok()?;
        pick_label(Some(parsed))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trailing_descriptor_is_not_a_concept() {
        let document = json!({
            "@graph": [
                {"@id": "http://vocab.nerc.ac.uk/collection/L05/current/134/", "skos:prefLabel": "water temperature sensor"},
                "garbage",
                {"skos:prefLabel": "no id"},
                {"@id": "http://vocab.nerc.ac.uk/collection/L05/current/", "dc:title": "SeaDataNet device categories", "owl:versionInfo": "31"}
            ]
        });

        let collection = ConceptCollection::from_document(CollectionId::L05, document).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.title.as_deref(), Some("SeaDataNet device categories"));
        assert_eq!(collection.version.as_deref(), Some("31"));
        assert_eq!(collection.concepts[0].preferred_label, "water temperature sensor");
    }

    #[test]
    fn missing_graph_is_malformed() {
        let error = ConceptCollection::from_document(CollectionId::P01, json!({"@context": {}}))
            .unwrap_err();
        assert!(matches!(
            error,
            FetchError::MalformedGraph {
                collection: CollectionId::P01
            }
        ));
    }

    #[test]
    fn empty_graph_yields_empty_collection() {
        let collection =
            ConceptCollection::from_document(CollectionId::P06, json!({"@graph": []})).unwrap();
        assert!(collection.is_empty());
    }
}
