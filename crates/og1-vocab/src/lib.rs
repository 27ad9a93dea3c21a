//! NERC Vocabulary Server (NVS) collections for OG1 reconciliation.
//!
//! Collections are fetched through a [`CollectionSource`], decoded into
//! [`Concept`]s and indexed in a [`ConceptStore`]. The CF standard names
//! collection is additionally projected into a [`StandardNameTable`].

#![deny(unsafe_code)]

pub mod cache;
pub mod client;
pub mod collection;
pub mod concept;
pub mod context;
pub mod error;
pub mod graph;
pub mod source;
pub mod standard_names;
pub mod store;

pub use crate::cache::{CacheConfig, ResponseCache};
pub use crate::client::NvsClient;
pub use crate::collection::{CollectionId, NVS_BASE_URL, Scheme, VocabKind};
pub use crate::concept::{Concept, ConceptRef};
pub use crate::context::{Scope, SensorVocabulary, VariableVocabulary, VocabularyContext};
pub use crate::error::FetchError;
pub use crate::graph::ConceptCollection;
pub use crate::source::{CollectionSource, DirectorySource, FixtureSource, fetch_collection};
pub use crate::standard_names::{StandardNameRow, StandardNameTable};
pub use crate::store::ConceptStore;
