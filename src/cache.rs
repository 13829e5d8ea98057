//! On-disk HTTP response cache.
//!
//! One JSON file per cached response, keyed by the SHA-256 digest of the
//! request signature (endpoint path plus sorted query pairs; the API token
//! is never part of the signature). Entries record the URL, the original
//! retrieval timestamp, and the raw body, so replays report when the data
//! was actually fetched.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;

/// A cached response body with its provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The URL the response came from (token excluded).
    pub url: String,
    /// When the response was fetched from the network.
    pub retrieved: DateTime<Utc>,
    /// The raw response body.
    pub body: String,
}

/// File-per-entry response cache rooted at a directory.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    max_age: Option<Duration>,
}

impl ResponseCache {
    /// Open (creating if needed) a cache rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, max_age: None })
    }

    /// Open a cache in the platform cache directory (`<cache_dir>/ncei`).
    pub fn open_default() -> Result<Self> {
        let base = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
        Self::open(base.join("ncei"))
    }

    /// Treat entries older than `max_age` as misses.
    #[must_use]
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// The directory backing this cache.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Compute the cache key for a request signature.
    pub fn key(endpoint_path: &str, params: &[(String, String)]) -> String {
        let mut sorted: Vec<&(String, String)> = params.iter().collect();
        sorted.sort();

        let mut hasher = Sha256::new();
        hasher.update(endpoint_path.as_bytes());
        for (name, value) in sorted {
            hasher.update(b"&");
            hasher.update(name.as_bytes());
            hasher.update(b"=");
            hasher.update(value.as_bytes());
        }
        hex::encode(hasher.finalize())
    }

    /// Look up an entry, honoring `max_age`.
    pub fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path)?;
        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            // Unreadable entries are discarded, not fatal
            Err(_) => {
                let _ = fs::remove_file(&path);
                return Ok(None);
            }
        };

        if let Some(max_age) = self.max_age {
            let age = Utc::now().signed_duration_since(entry.retrieved);
            let limit = chrono::Duration::from_std(max_age).unwrap_or(chrono::Duration::MAX);
            if age > limit {
                let _ = fs::remove_file(&path);
                return Ok(None);
            }
        }

        Ok(Some(entry))
    }

    /// Store an entry under `key`.
    pub fn put(&self, key: &str, entry: &CacheEntry) -> Result<()> {
        let path = self.entry_path(key);
        let json = serde_json::to_string(entry)?;
        fs::write(&path, json)?;
        Ok(())
    }

    /// Remove every cached entry.
    pub fn clear(&self) -> Result<()> {
        for dirent in fs::read_dir(&self.dir)? {
            let path = dirent?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_key_ignores_param_order() {
        let a = ResponseCache::key("stations", &pairs(&[("limit", "10"), ("datasetid", "GHCND")]));
        let b = ResponseCache::key("stations", &pairs(&[("datasetid", "GHCND"), ("limit", "10")]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_varies_with_params_and_path() {
        let base = ResponseCache::key("stations", &pairs(&[("limit", "10")]));
        assert_ne!(
            base,
            ResponseCache::key("stations", &pairs(&[("limit", "25")]))
        );
        assert_ne!(
            base,
            ResponseCache::key("locations", &pairs(&[("limit", "10")]))
        );
    }

    #[test]
    fn test_put_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::open(dir.path()).unwrap();

        let key = ResponseCache::key("datasets/GHCND", &[]);
        assert!(cache.get(&key).unwrap().is_none());

        let entry = CacheEntry {
            url: "https://www.ncdc.noaa.gov/cdo-web/api/v2/datasets/GHCND".to_string(),
            retrieved: Utc::now(),
            body: r#"{"id":"GHCND"}"#.to_string(),
        };
        cache.put(&key, &entry).unwrap();

        let got = cache.get(&key).unwrap().unwrap();
        assert_eq!(got.url, entry.url);
        assert_eq!(got.body, entry.body);
    }

    #[test]
    fn test_expired_entries_are_misses() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::open(dir.path())
            .unwrap()
            .with_max_age(Duration::from_secs(3600));

        let key = ResponseCache::key("datasets", &[]);
        let stale = CacheEntry {
            url: "https://example.invalid/datasets".to_string(),
            retrieved: Utc::now() - chrono::Duration::hours(2),
            body: "{}".to_string(),
        };
        cache.put(&key, &stale).unwrap();
        assert!(cache.get(&key).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_entries_are_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::open(dir.path()).unwrap();

        let key = ResponseCache::key("datasets", &[]);
        fs::write(dir.path().join(format!("{key}.json")), "not json").unwrap();
        assert!(cache.get(&key).unwrap().is_none());
    }

    #[test]
    fn test_clear_removes_entries() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::open(dir.path()).unwrap();

        let key = ResponseCache::key("datasets", &[]);
        let entry = CacheEntry {
            url: "https://example.invalid/datasets".to_string(),
            retrieved: Utc::now(),
            body: "{}".to_string(),
        };
        cache.put(&key, &entry).unwrap();
        cache.clear().unwrap();
        assert!(cache.get(&key).unwrap().is_none());
    }
}
