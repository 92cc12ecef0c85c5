//! Title resolution: cache first, network second
//!
//! Failures are never cached, so the next attempt for the same id retries.

use super::title_cache::SharedTitleCache;
use super::title_lookup::TitleLookup;
use tracing::{debug, warn};

/// Shown when a title could not be looked up
pub const UNKNOWN_TITLE: &str = "Unknown Title";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Served from the cache without touching the network
    Cached(String),
    /// Looked up and inserted into the cache
    Fetched(String),
    /// Lookup failed; nothing was cached
    Unknown,
}

impl Resolution {
    pub fn title(&self) -> &str {
        match self {
            Resolution::Cached(title) | Resolution::Fetched(title) => title,
            Resolution::Unknown => UNKNOWN_TITLE,
        }
    }

    /// Whether the cache gained an entry and should be persisted
    pub fn mutated_cache(&self) -> bool {
        matches!(self, Resolution::Fetched(_))
    }
}

/// Resolve a title for `id`. The cache lock is not held during the lookup.
pub fn resolve(id: &str, cache: &SharedTitleCache, lookup: &dyn TitleLookup) -> Resolution {
    if let Some(title) = cache.lock().get(id) {
        return Resolution::Cached(title.to_string());
    }

    match lookup.fetch_title(id) {
        Ok(title) => {
            debug!(id, %title, "resolved title");
            cache.lock().insert(id, title.clone());
            Resolution::Fetched(title)
        }
        Err(e) => {
            warn!(id, error = %e, "title lookup failed");
            Resolution::Unknown
        }
    }
}
