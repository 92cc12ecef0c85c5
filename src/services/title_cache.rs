//! Persistent id → title cache
//!
//! Loaded once at startup and rewritten wholesale whenever a lookup succeeds
//! and on save. Entries are never invalidated during a session.

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Shared handle used by the control thread and the lookup workers
pub type SharedTitleCache = Arc<Mutex<TitleCache>>;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to read title cache: {0}")]
    Read(#[source] io::Error),
    #[error("title cache is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to serialize title cache: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write title cache: {0}")]
    Write(#[source] io::Error),
}

#[derive(Debug, Default)]
pub struct TitleCache {
    titles: BTreeMap<String, String>,
    /// Where to persist; `None` keeps the cache in memory only
    path: Option<PathBuf>,
}

impl TitleCache {
    /// An in-memory cache that is never written to disk
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the cache file. A missing file is an empty cache; a broken one is
    /// logged and treated as empty too.
    pub fn load(path: &Path) -> Self {
        let titles = match Self::read_titles(path) {
            Ok(titles) => titles,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable title cache");
                BTreeMap::new()
            }
        };
        debug!(path = %path.display(), count = titles.len(), "title cache loaded");
        Self {
            titles,
            path: Some(path.to_path_buf()),
        }
    }

    fn read_titles(path: &Path) -> Result<BTreeMap<String, String>, CacheError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(path).map_err(CacheError::Read)?;
        serde_json::from_str(&contents).map_err(CacheError::Parse)
    }

    pub fn into_shared(self) -> SharedTitleCache {
        Arc::new(Mutex::new(self))
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.titles.get(id).map(String::as_str)
    }

    #[cfg(test)]
    pub fn contains(&self, id: &str) -> bool {
        self.titles.contains_key(id)
    }

    pub fn insert(&mut self, id: impl Into<String>, title: impl Into<String>) {
        self.titles.insert(id.into(), title.into());
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Overwrite the cache file with the current contents
    pub fn save(&self) -> Result<(), CacheError> {
        let Some(ref path) = self.path else {
            return Ok(());
        };

        // Four-space indentation, same as the files this tool has always written
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.titles
            .serialize(&mut serializer)
            .map_err(CacheError::Serialize)?;

        fs::write(path, buf).map_err(CacheError::Write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TitleCache::load(&dir.path().join("mod_cache.json"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mod_cache.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(TitleCache::load(&path).is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mod_cache.json");

        let mut cache = TitleCache::load(&path);
        cache.insert("111", "Better Bots");
        cache.insert("222", "Map \"Pack\"");
        cache.save().unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n    \"111\": \"Better Bots\""));

        let reloaded = TitleCache::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get("222"), Some("Map \"Pack\""));
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let mut cache = TitleCache::in_memory();
        cache.insert("1", "One");
        assert!(cache.save().is_ok());
        assert!(cache.contains("1"));
    }
}
