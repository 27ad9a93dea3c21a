//! SKOS concepts as published by the NERC Vocabulary Server.
//!
//! NVS serves each collection as a JSON-LD `@graph`. Individual properties are
//! loosely shaped: a label may be a bare string, a `{"@value": ..}` object or
//! a list of either, and a link may be a single `{"@id": ..}` node or a list
//! of nodes. Everything is normalised here, once, into plain `Vec`s so that
//! the reconcilers never deal with the single/list distinction.

use serde::Deserialize;
use serde_json::Value;

use crate::collection::{CollectionId, Scheme};

/// A link from one concept to another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConceptRef {
    pub uri: String,
}

impl ConceptRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// Whether the link targets a concept in `collection`.
    pub fn points_into(&self, collection: CollectionId) -> bool {
        collection.owns(&self.uri)
    }
}

/// One vocabulary term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    /// Stable identifier (`@id`).
    pub uri: String,
    /// `skos:prefLabel`; empty when the registry omits it.
    pub preferred_label: String,
    /// `skos:altLabel` values in source order.
    pub alt_labels: Vec<String>,
    pub definition: Option<String>,
    /// `skos:notation`, e.g. `SDN:L22::TOOL1457`.
    pub notation: Option<String>,
    /// Parent concepts (`skos:broader`), in source order.
    pub broader: Vec<ConceptRef>,
    /// Associated concepts in other collections (`skos:related`), in source order.
    pub related: Vec<ConceptRef>,
    /// Scheme memberships (`skos:inScheme`).
    pub in_scheme: Vec<ConceptRef>,
    /// `owl:deprecated`.
    pub deprecated: bool,
}

impl Concept {
    pub fn new(uri: impl Into<String>, preferred_label: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            preferred_label: preferred_label.into(),
            alt_labels: Vec::new(),
            definition: None,
            notation: None,
            broader: Vec::new(),
            related: Vec::new(),
            in_scheme: Vec::new(),
            deprecated: false,
        }
    }

    #[must_use]
    pub fn with_alt_label(mut self, label: impl Into<String>) -> Self {
        self.alt_labels.push(label.into());
        self
    }

    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    #[must_use]
    pub fn with_broader(mut self, uri: impl Into<String>) -> Self {
        self.broader.push(ConceptRef::new(uri));
        self
    }

    #[must_use]
    pub fn with_related(mut self, uri: impl Into<String>) -> Self {
        self.related.push(ConceptRef::new(uri));
        self
    }

    #[must_use]
    pub fn with_scheme(mut self, uri: impl Into<String>) -> Self {
        self.in_scheme.push(ConceptRef::new(uri));
        self
    }

    #[must_use]
    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Parse one `@graph` element.
    pub fn from_node(node: Value) -> Result<Self, serde_json::Error> {
        let raw: RawConcept = serde_json::from_value(node)?;
        Ok(raw.into())
    }

    /// First alternate label, if any.
    pub fn alt_label(&self) -> Option<&str> {
        self.alt_labels.first().map(String::as_str)
    }

    /// Preferred label followed by every alternate label.
    pub fn accepted_labels(&self) -> Vec<&str> {
        std::iter::once(self.preferred_label.as_str())
            .chain(self.alt_labels.iter().map(String::as_str))
            .collect()
    }

    /// URI of the first broader concept inside `collection`.
    pub fn first_broader_in(&self, collection: CollectionId) -> Option<&str> {
        first_link(&self.broader, collection)
    }

    /// URI of the first related concept inside `collection`.
    pub fn first_related_in(&self, collection: CollectionId) -> Option<&str> {
        first_link(&self.related, collection)
    }

    /// URI of the last related concept inside `collection`.
    pub fn last_related_in(&self, collection: CollectionId) -> Option<&str> {
        self.related
            .iter()
            .rev()
            .find(|link| link.points_into(collection))
            .map(|link| link.uri.as_str())
    }

    pub fn in_scheme(&self, scheme: Scheme) -> bool {
        self.in_scheme.iter().any(|link| scheme.owns(&link.uri))
    }
}

fn first_link(links: &[ConceptRef], collection: CollectionId) -> Option<&str> {
    links
        .iter()
        .find(|link| link.points_into(collection))
        .map(|link| link.uri.as_str())
}

// =============================================================================
// JSON-LD shapes
// =============================================================================

#[derive(Debug, Deserialize)]
struct RawConcept {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "skos:prefLabel", default)]
    pref_label: Option<OneOrMany<LangString>>,
    #[serde(rename = "skos:altLabel", default)]
    alt_label: Option<OneOrMany<LangString>>,
    #[serde(rename = "skos:definition", default)]
    definition: Option<OneOrMany<LangString>>,
    #[serde(rename = "skos:notation", default)]
    notation: Option<OneOrMany<LangString>>,
    #[serde(rename = "skos:broader", default)]
    broader: Option<OneOrMany<NodeRef>>,
    #[serde(rename = "skos:related", default)]
    related: Option<OneOrMany<NodeRef>>,
    #[serde(rename = "skos:inScheme", default)]
    in_scheme: Option<OneOrMany<NodeRef>>,
    #[serde(rename = "owl:deprecated", default)]
    deprecated: Option<Flag>,
}

impl From<RawConcept> for Concept {
    fn from(raw: RawConcept) -> Self {
        Self {
            uri: raw.id,
            preferred_label: pick_label(raw.pref_label).unwrap_or_default(),
            alt_labels: texts(raw.alt_label),
            definition: pick_label(raw.definition),
            notation: pick_label(raw.notation),
            broader: refs(raw.broader),
            related: refs(raw.related),
            in_scheme: refs(raw.in_scheme),
            deprecated: raw.deprecated.is_some_and(|flag| flag.is_set()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LangString {
    Tagged {
        #[serde(rename = "@value")]
        value: String,
        #[serde(rename = "@language", default)]
        language: Option<String>,
    },
    Plain(String),
}

impl LangString {
    fn is_english(&self) -> bool {
        matches!(self, Self::Tagged { language: Some(lang), .. } if lang.eq_ignore_ascii_case("en"))
    }

    fn into_text(self) -> String {
        match self {
            Self::Tagged { value, .. } | Self::Plain(value) => value,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodeRef {
    Node {
        #[serde(rename = "@id")]
        id: String,
    },
    Iri(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    fn is_set(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Text(value) => value.trim().eq_ignore_ascii_case("true"),
        }
    }
}

/// Choose one label: the English one when tagged, otherwise the first.
pub(crate) fn pick_label(value: Option<OneOrMany<LangString>>) -> Option<String> {
    let mut labels = value.map(OneOrMany::into_vec).unwrap_or_default();
    let index = labels.iter().position(LangString::is_english).unwrap_or(0);
    if labels.is_empty() {
        return None;
    }
    Some(labels.swap_remove(index).into_text())
}

fn texts(value: Option<OneOrMany<LangString>>) -> Vec<String> {
    value
        .map(OneOrMany::into_vec)
        .unwrap_or_default()
        .into_iter()
        .map(LangString::into_text)
        .collect()
}

fn refs(value: Option<OneOrMany<NodeRef>>) -> Vec<ConceptRef> {
    value
        .map(OneOrMany::into_vec)
        .unwrap_or_default()
        .into_iter()
        .map(|node| match node {
            NodeRef::Node { id } | NodeRef::Iri(id) => ConceptRef::new(id),
        })
        .collect()
}
