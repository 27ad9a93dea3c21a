//! On-disk cache for vocabulary server responses.
//!
//! NVS is updated daily but the collections are large, so responses are kept
//! for weeks. Each entry is a JSON envelope named after the SHA-256 of its URL.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{FetchError, Result};

/// Default cache directory, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = "nvs_cache";

/// Default time-to-live (30 days).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Cache settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub dir: PathBuf,
    pub ttl: Duration,
    /// Ignore existing entries (they are still rewritten after a fetch).
    pub refresh: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_CACHE_DIR),
            ttl: DEFAULT_CACHE_TTL,
            refresh: false,
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    fetched_at: DateTime<Utc>,
    body: Value,
}

/// Disk-backed response cache.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    config: CacheConfig,
}

impl ResponseCache {
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Path of the entry for `url`.
    pub fn entry_path(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        self.config.dir.join(format!("{}.json", hex::encode(digest)))
    }

    /// Return a fresh cached body for `url`.
    ///
    /// Missing, expired and unreadable entries all yield `None`.
    pub fn get(&self, url: &str) -> Option<Value> {
        self.get_at(url, Utc::now())
    }

    fn get_at(&self, url: &str, now: DateTime<Utc>) -> Option<Value> {
        if self.config.refresh {
            return None;
        }
        let path = self.entry_path(url);
        let text = std::fs::read_to_string(&path).ok()?;
        let entry: CacheEntry = match serde_json::from_str(&text) {
            Ok(entry) => entry,
            Err(error) => {
                debug!(path = %path.display(), %error, "discarding unreadable cache entry");
                return None;
            }
        };
        if entry.url != url {
            debug!(path = %path.display(), "cache entry belongs to another URL");
            return None;
        }
        let age = now.signed_duration_since(entry.fetched_at).to_std().ok()?;
        if age > self.config.ttl {
            debug!(url, age_secs = age.as_secs(), "cache entry expired");
            return None;
        }
        debug!(url, age_secs = age.as_secs(), "using cached response");
        Some(entry.body)
    }

    /// Store `body` for `url`.
    pub fn put(&self, url: &str, body: &Value) -> Result<()> {
        self.put_at(url, body, Utc::now())
    }

    fn put_at(&self, url: &str, body: &Value, fetched_at: DateTime<Utc>) -> Result<()> {
        let dir = &self.config.dir;
        std::fs::create_dir_all(dir).map_err(|e| FetchError::io(dir, e))?;
        let path = self.entry_path(url);
        let entry = CacheEntry {
            url: url.to_string(),
            fetched_at,
            body: body.clone(),
        };
        let text = serde_json::to_string(&entry)
            .map_err(|e| FetchError::decode(path.display().to_string(), e))?;
        std::fs::write(&path, text).map_err(|e| FetchError::io(&path, e))
    }

    /// Store `body`, logging instead of failing. The response is still usable
    /// when the cache directory is read-only.
    pub fn put_or_warn(&self, url: &str, body: &Value) {
        if let Err(error) = self.put(url, body) {
            warn!(url, %error, "failed to write vocabulary cache entry");
        }
    }
}
