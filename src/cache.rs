//! Persistent disk cache for fetched catalogs
//!
//! Stores raw catalog bodies keyed by their source URL, enabling fast
//! repeat lookups and offline access to previously fetched catalogs.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Cache file version for future migration support
const CACHE_VERSION: u32 = 1;

/// Lookup/store interface over whatever cache backing is available.
///
/// Keys are the full URL of the cached resource. Writes are best-effort:
/// implementations must not surface failures to callers.
pub trait CacheStore: Send {
    fn lookup(&self, key: &str) -> Option<String>;
    fn store(&mut self, key: &str, body: &str);
}

/// A cache store with no backing at all: every lookup misses and every
/// write succeeds silently. Substituted when no config directory exists.
pub struct NoopCache;

impl CacheStore for NoopCache {
    fn lookup(&self, _key: &str) -> Option<String> {
        None
    }

    fn store(&mut self, _key: &str, _body: &str) {}
}

/// The root cache structure stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    entries: HashMap<String, String>,
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: CACHE_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// URL-keyed cache persisted as a single JSON file under the platform
/// config directory.
pub struct DiskCache {
    path: PathBuf,
    file: CacheFile,
}

impl DiskCache {
    /// Open the named cache, loading any existing entries. Returns `None`
    /// when the config directory cannot be determined.
    pub fn open(name: &str) -> Option<Self> {
        let path = dirs::config_dir().map(|p| p.join("uaswitch").join(format!("{name}.json")))?;
        let file = Self::try_load(&path).unwrap_or_default();
        Some(Self { path, file })
    }

    fn try_load(path: &Path) -> Result<CacheFile> {
        if !path.exists() {
            return Ok(CacheFile::default());
        }

        let contents = fs::read_to_string(path)?;
        let file: CacheFile = serde_json::from_str(&contents)?;

        if file.version != CACHE_VERSION {
            return Ok(CacheFile::default());
        }

        Ok(file)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string(&self.file)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    #[cfg(test)]
    fn open_at(path: PathBuf) -> Self {
        let file = Self::try_load(&path).unwrap_or_default();
        Self { path, file }
    }
}

impl CacheStore for DiskCache {
    fn lookup(&self, key: &str) -> Option<String> {
        self.file.entries.get(key).cloned()
    }

    fn store(&mut self, key: &str, body: &str) {
        self.file.entries.insert(key.to_string(), body.to_string());
        if let Err(err) = self.save() {
            warn!(path = %self.path.display(), "failed to persist cache: {err}");
        }
    }
}

/// Acquire the named cache store, falling back to a no-op store when disk
/// caching is unavailable.
pub fn open_store(name: &str) -> Box<dyn CacheStore> {
    match DiskCache::open(name) {
        Some(cache) => Box::new(cache),
        None => Box::new(NoopCache),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_cache_always_misses() {
        let mut cache = NoopCache;
        cache.store("https://example.com/a.json", "[]");
        assert_eq!(cache.lookup("https://example.com/a.json"), None);
    }

    #[test]
    fn test_disk_cache_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("agents.json");

        let mut cache = DiskCache::open_at(path.clone());
        assert_eq!(cache.lookup("key"), None);
        cache.store("key", r#"[{"ua":"x"}]"#);
        assert_eq!(cache.lookup("key").as_deref(), Some(r#"[{"ua":"x"}]"#));

        // A fresh handle over the same file sees the persisted entry
        let reopened = DiskCache::open_at(path);
        assert_eq!(reopened.lookup("key").as_deref(), Some(r#"[{"ua":"x"}]"#));
    }

    #[test]
    fn test_corrupt_cache_file_treated_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("agents.json");
        fs::write(&path, "not json at all").expect("write");

        let cache = DiskCache::open_at(path);
        assert_eq!(cache.lookup("anything"), None);
    }

    #[test]
    fn test_version_mismatch_treated_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("agents.json");
        let stale = serde_json::json!({
            "version": CACHE_VERSION + 1,
            "entries": { "key": "old body" }
        });
        fs::write(&path, stale.to_string()).expect("write");

        let cache = DiskCache::open_at(path);
        assert_eq!(cache.lookup("key"), None);
    }
}
