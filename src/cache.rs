//! Registry match caching.
//!
//! [`MatchCache`] remembers which [`ViewRegistry`](crate::ViewRegistry)
//! entry an address path matched, together with the captured
//! [`RouteParams`], so repeated navigation to the same address (including
//! back/forward replays) skips pattern matching. Misses are cached too.
//! It is gated behind the `cache` feature and uses the [`lru`] crate.
//!
//! The registry clears the cache whenever an entry is registered.
//!
//! # Examples
//!
//! ```
//! use region_navigator::cache::{CachedMatch, MatchCache};
//! use region_navigator::RouteParams;
//!
//! let mut cache = MatchCache::new();
//! cache.insert("app:customers".to_string(), Some(CachedMatch { entry: 0, params: RouteParams::new() }));
//!
//! assert_eq!(cache.get("app:customers").unwrap().unwrap().entry, 0);
//! assert_eq!(cache.stats().hits, 1);
//! ```

use crate::{debug_log, trace_log, RouteParams};
use lru::LruCache;
use std::num::NonZeroUsize;

/// A remembered match: index of the registry entry and its captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedMatch {
    pub entry: usize,
    pub params: RouteParams,
}

/// Counters tracking cache effectiveness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    /// Number of full invalidations (via [`MatchCache::clear`]).
    pub invalidations: usize,
}

impl CacheStats {
    /// Hit rate in `0.0..=1.0`; `0.0` before any lookup.
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache from `scheme:path` keys to registry matches.
#[derive(Debug)]
pub struct MatchCache {
    entries: LruCache<String, Option<CachedMatch>>,
    stats: CacheStats,
}

impl MatchCache {
    const DEFAULT_CAPACITY: usize = 256;

    /// Create a cache with the default capacity (256 entries).
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a cache with a custom capacity. Zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    /// Look up a key.
    ///
    /// The outer `Option` is the cache answer; the inner one is the cached
    /// match result (`None` for a remembered miss).
    pub fn get(&mut self, key: &str) -> Option<Option<CachedMatch>> {
        if let Some(entry) = self.entries.get(key) {
            self.stats.hits += 1;
            trace_log!("Match cache hit for '{}'", key);
            Some(entry.clone())
        } else {
            self.stats.misses += 1;
            trace_log!("Match cache miss for '{}'", key);
            None
        }
    }

    pub fn insert(&mut self, key: String, value: Option<CachedMatch>) {
        self.entries.push(key, value);
    }

    /// Drop every entry and count an invalidation.
    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.stats.invalidations += 1;
        debug_log!(
            "Match cache cleared: {} entries removed ({} total invalidations, hit rate: {:.1}%)",
            removed,
            self.stats.invalidations,
            self.stats.hit_rate() * 100.0
        );
    }

    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MatchCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(entry: usize) -> Option<CachedMatch> {
        Some(CachedMatch {
            entry,
            params: RouteParams::new(),
        })
    }

    #[test]
    fn test_miss_then_hit() {
        let mut cache = MatchCache::new();
        assert!(cache.get("app:customers").is_none());
        assert_eq!(cache.stats().misses, 1);

        cache.insert("app:customers".to_string(), hit(2));
        assert_eq!(cache.get("app:customers"), Some(hit(2)));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_remembered_miss() {
        let mut cache = MatchCache::new();
        cache.insert("app:bogus".to_string(), None);
        assert_eq!(cache.get("app:bogus"), Some(None));
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = MatchCache::with_capacity(2);
        cache.insert("a".to_string(), hit(0));
        cache.insert("b".to_string(), hit(1));
        cache.get("a");
        cache.insert("c".to_string(), hit(2));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
    }

    #[test]
    fn test_clear_counts_invalidation() {
        let mut cache = MatchCache::new();
        cache.insert("a".to_string(), hit(0));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn test_hit_rate_calculation() {
        let mut cache = MatchCache::new();
        cache.get("a");
        cache.get("b");
        cache.get("c");
        cache.insert("a".to_string(), hit(0));
        cache.insert("b".to_string(), hit(1));
        cache.get("a");
        cache.get("b");

        assert_eq!(cache.stats().hits, 2);
        assert_eq!(cache.stats().misses, 3);
        assert!((cache.stats().hit_rate() - 0.4).abs() < 0.001);
    }
}
