//! Single-entry parse cache keyed on document fingerprint.
//!
//! The cache is an ordinary value owned by the caller. A parse is reused only
//! while the document's [`Fingerprint`] is unchanged; any edit (content or
//! modification time) replaces the entry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::source::{Fingerprint, LoadedDocument};

/// Hit/miss counters for a [`CatalogCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups answered from the cached parse.
    pub hits: u64,
    /// Lookups that required a parse.
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups that hit, `0.0` before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }

    /// Total lookups recorded.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }
}

/// Whether a lookup was served from the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheLookup {
    /// The fingerprint matched the cached entry.
    Hit,
    /// The document was parsed.
    Miss,
}

#[derive(Debug)]
struct CacheEntry {
    fingerprint: Fingerprint,
    catalog: Arc<Catalog>,
}

/// Caller-owned cache holding the most recent parse.
#[derive(Debug)]
pub struct CatalogCache {
    entry: Option<CacheEntry>,
    stats: CacheStats,
    enabled: bool,
}

impl CatalogCache {
    /// Create an empty, enabled cache.
    pub fn new() -> Self {
        Self {
            entry: None,
            stats: CacheStats::default(),
            enabled: true,
        }
    }

    /// A cache that never stores anything; every lookup misses.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Re-enable caching; the next lookup still misses.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Disable caching and drop the current entry.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.entry = None;
    }

    /// Counters since creation or the last [`reset_stats`](Self::reset_stats).
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Fingerprint of the cached parse, if any.
    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.entry.as_ref().map(|e| &e.fingerprint)
    }

    /// Look up the parse for `fingerprint`, counting a hit or a miss.
    pub fn get(&mut self, fingerprint: &Fingerprint) -> Option<Arc<Catalog>> {
        let cached = self
            .entry
            .as_ref()
            .filter(|e| self.enabled && e.fingerprint == *fingerprint)
            .map(|e| Arc::clone(&e.catalog));

        if cached.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        cached
    }

    /// Store `catalog` as the parse of `fingerprint`, replacing any entry.
    pub fn insert(&mut self, fingerprint: Fingerprint, catalog: Arc<Catalog>) {
        if !self.enabled {
            return;
        }
        self.entry = Some(CacheEntry {
            fingerprint,
            catalog,
        });
    }

    /// Return the cached parse of `document`, parsing and storing it on a miss.
    pub fn get_or_parse(&mut self, document: &LoadedDocument) -> (Arc<Catalog>, CacheLookup) {
        if let Some(catalog) = self.get(document.fingerprint()) {
            tracing::debug!(
                hash = document.fingerprint().content_hash(),
                "catalog cache hit"
            );
            return (catalog, CacheLookup::Hit);
        }

        tracing::debug!(
            hash = document.fingerprint().content_hash(),
            "catalog cache miss, parsing document"
        );
        let catalog = Arc::new(Catalog::parse(document.content()));
        self.insert(document.fingerprint().clone(), Arc::clone(&catalog));
        (catalog, CacheLookup::Miss)
    }

    /// Drop the cached parse, keeping the counters.
    pub fn clear(&mut self) {
        self.entry = None;
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    const DOC: &str = "## Aligners\n- [ToolA](http://a.example) - Fast\n";

    #[test]
    fn test_hit_on_unchanged_document() {
        let mut cache = CatalogCache::new();
        let doc = LoadedDocument::new(DOC.to_string(), None);

        let (first, lookup) = cache.get_or_parse(&doc);
        assert_eq!(lookup, CacheLookup::Miss);

        let (second, lookup) = cache.get_or_parse(&doc);
        assert_eq!(lookup, CacheLookup::Hit);
        assert!(Arc::ptr_eq(&first, &second));

        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
        assert!((cache.stats().hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_content_change_invalidates() {
        let mut cache = CatalogCache::new();
        cache.get_or_parse(&LoadedDocument::new(DOC.to_string(), None));

        let edited = format!("{}- [ToolB](http://b.example)\n", DOC);
        let (catalog, lookup) = cache.get_or_parse(&LoadedDocument::new(edited, None));
        assert_eq!(lookup, CacheLookup::Miss);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_mtime_change_invalidates() {
        let mut cache = CatalogCache::new();
        let t0 = SystemTime::UNIX_EPOCH;
        let t1 = t0 + Duration::from_secs(1);

        cache.get_or_parse(&LoadedDocument::new(DOC.to_string(), Some(t0)));
        let (_, lookup) = cache.get_or_parse(&LoadedDocument::new(DOC.to_string(), Some(t1)));
        assert_eq!(lookup, CacheLookup::Miss);
        assert_eq!(cache.fingerprint().and_then(|f| f.modified()), Some(t1));
    }

    #[test]
    fn test_disabled_cache_always_misses() {
        let mut cache = CatalogCache::disabled();
        let doc = LoadedDocument::new(DOC.to_string(), None);

        cache.get_or_parse(&doc);
        let (_, lookup) = cache.get_or_parse(&doc);
        assert_eq!(lookup, CacheLookup::Miss);
        assert!(cache.fingerprint().is_none());
        assert_eq!(cache.stats().hit_rate(), 0.0);
    }

    #[test]
    fn test_clear_and_reset() {
        let mut cache = CatalogCache::new();
        let doc = LoadedDocument::new(DOC.to_string(), None);
        cache.get_or_parse(&doc);
        cache.clear();
        assert!(cache.fingerprint().is_none());

        cache.reset_stats();
        assert_eq!(cache.stats().lookups(), 0);
    }
}
