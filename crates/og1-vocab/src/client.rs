//! HTTP gateway to the NERC Vocabulary Server.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;
use tracing::info;

use crate::cache::{CacheConfig, ResponseCache};
use crate::collection::{CollectionId, VocabKind};
use crate::error::{FetchError, Result};
use crate::source::CollectionSource;

/// HTTP request timeout. Some collections (P01) are tens of megabytes.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const LINKED_DATA_MEDIA_TYPE: &str = "application/ld+json";

/// Blocking NVS client backed by a disk cache.
///
/// Holds no documents in memory. Callers fetch each collection once per run.
pub struct NvsClient {
    client: Client,
    cache: ResponseCache,
}

impl NvsClient {
    pub fn new(cache: CacheConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| FetchError::Http {
                url: crate::collection::NVS_BASE_URL.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            cache: ResponseCache::new(cache),
        })
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    fn download(&self, url: &str) -> Result<Value> {
        info!(url, "downloading collection from NVS");

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, format!("og1-vocab/{}", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, LINKED_DATA_MEDIA_TYPE)
            .send()
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let text = response.text().map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|e| FetchError::decode(url, e))
    }
}

impl CollectionSource for NvsClient {
    fn fetch(&self, id: CollectionId, kind: VocabKind) -> Result<Value> {
        let url = id.url(kind);
        if let Some(document) = self.cache.get(&url) {
            info!(collection = %id, "using cached collection");
            return Ok(document);
        }
        let document = self.download(&url)?;
        self.cache.put_or_warn(&url, &document);
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_creation() {
        let dir = tempfile::tempdir().unwrap();
        let client = NvsClient::new(CacheConfig::default().with_dir(dir.path()));
        assert!(client.is_ok());
    }

    #[test]
    fn serves_from_disk_cache_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let client = NvsClient::new(CacheConfig::default().with_dir(dir.path())).unwrap();
        let url = CollectionId::L05.url(VocabKind::Collection);
        let document = json!({"@graph": [{"@id": "x", "skos:prefLabel": "CTD"}, {"@id": "L05"}]});
        client.cache().put(&url, &document).unwrap();

        let fetched = client.fetch(CollectionId::L05, VocabKind::Collection).unwrap();
        assert_eq!(fetched, document);
    }

    #[test]
    fn cached_entry_is_served_on_every_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let client = NvsClient::new(CacheConfig::default().with_dir(dir.path())).unwrap();
        let url = CollectionId::P06.url(VocabKind::Collection);
        client.cache().put(&url, &json!({"@graph": []})).unwrap();

        let first = client.fetch(CollectionId::P06, VocabKind::Collection).unwrap();
        let updated = json!({"@graph": [{"@id": "u", "skos:prefLabel": "Seconds"}, {"@id": "P06"}]});
        client.cache().put(&url, &updated).unwrap();
        let second = client.fetch(CollectionId::P06, VocabKind::Collection).unwrap();

        assert_eq!(first, json!({"@graph": []}));
        assert_eq!(second, updated);
    }
}
