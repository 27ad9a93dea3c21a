use std::path::PathBuf;

use crate::collection::CollectionId;

/// Failure to obtain a collection from the vocabulary service.
///
/// The reconcilers cannot run against a partial vocabulary, so every variant
/// aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("vocabulary server returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("failed to decode linked-data document from {origin}: {source}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("document for collection {collection} has no @graph array")]
    MalformedGraph { collection: CollectionId },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no document available for collection {collection}")]
    Missing { collection: CollectionId },
}

impl FetchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn decode(origin: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            origin: origin.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
