//! Bounded reuse cache for parsed JIDs.
//!
//! The same senders and recipients show up over and over in a message
//! stream. The cache maps raw input strings to the JIDs parsed from them so
//! repeated inputs skip IDNA processing, and hands out the same instance for
//! the same input while it stays cached.

use std::sync::atomic::{AtomicU64, Ordering};

use hashlink::LruCache;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::JidError;
use crate::jid::Jid;

/// Default maximum number of cached JIDs.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Configuration for the JID cache.
#[derive(Debug, Clone)]
pub struct JidCacheConfig {
    /// Maximum number of entries. Values below 1 are treated as 1.
    pub capacity: usize,
}

impl Default for JidCacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Cache statistics.
#[derive(Debug, Default)]
pub struct CacheStats {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub evictions: AtomicU64,
}

/// Point-in-time copy of [`CacheStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct CacheStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Least-recently-used cache from raw JID strings to parsed JIDs.
///
/// Only successful parses are stored. Evicting an entry never affects JIDs
/// already handed out.
pub struct JidCache {
    entries: Mutex<LruCache<String, Jid>>,
    stats: CacheStats,
}

impl JidCache {
    /// Create a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_config(JidCacheConfig::default())
    }

    /// Create a cache from configuration.
    pub fn with_config(config: JidCacheConfig) -> Self {
        Self::with_capacity(config.capacity)
    }

    /// Create a cache holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity.max(1))),
            stats: CacheStats::default(),
        }
    }

    /// Returns the cached JID for `raw`, parsing and caching it on a miss.
    ///
    /// Lookup and insert happen under one lock, so concurrent callers asking
    /// for the same input get the same instance.
    pub fn get_or_parse(&self, raw: &str) -> Result<Jid, JidError> {
        let mut entries = self.entries.lock();

        if let Some(jid) = entries.get(raw) {
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
            trace!(jid = %jid, "JID cache hit");
            return Ok(jid.clone());
        }

        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        let jid = Jid::parse(raw)?;

        if entries.len() >= entries.capacity() {
            if let Some((evicted, _)) = entries.remove_lru() {
                self.stats.evictions.fetch_add(1, Ordering::Relaxed);
                debug!(raw = %evicted, "Evicted JID from cache");
            }
        }
        entries.insert(raw.to_string(), jid.clone());
        trace!(jid = %jid, cached = entries.len(), "JID cache miss");

        Ok(jid)
    }

    /// Returns true if `raw` is currently cached.
    pub fn contains(&self, raw: &str) -> bool {
        self.entries.lock().contains_key(raw)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Maximum number of cached entries.
    pub fn capacity(&self) -> usize {
        self.entries.lock().capacity()
    }

    /// Drop every entry. Statistics are kept.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Get a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.stats.hits.load(Ordering::Relaxed),
            misses: self.stats.misses.load(Ordering::Relaxed),
            evictions: self.stats.evictions.load(Ordering::Relaxed),
        }
    }
}

impl Default for JidCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for JidCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JidCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_returns_same_instance() {
        let cache = JidCache::new();
        let first = cache.get_or_parse("alice@example.com").unwrap();
        let second = cache.get_or_parse("alice@example.com").unwrap();
        assert!(Jid::ptr_eq(&first, &second));
        assert_eq!(
            cache.stats(),
            CacheStatsSnapshot {
                hits: 1,
                misses: 1,
                evictions: 0,
            }
        );
    }

    #[test]
    fn test_distinct_raw_strings_are_distinct_entries() {
        let cache = JidCache::new();
        let upper = cache.get_or_parse("alice@Example.com").unwrap();
        let lower = cache.get_or_parse("alice@example.com").unwrap();
        assert_eq!(upper, lower);
        assert!(!Jid::ptr_eq(&upper, &lower));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_failures_not_cached() {
        let cache = JidCache::new();
        assert!(cache.get_or_parse("@example.com").is_err());
        assert!(cache.get_or_parse("@example.com").is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_default_capacity() {
        let cache = JidCache::default();
        assert_eq!(cache.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let cache = JidCache::with_config(JidCacheConfig { capacity: 0 });
        assert_eq!(cache.capacity(), 1);
        cache.get_or_parse("a@example.com").unwrap();
        assert!(cache.contains("a@example.com"));
    }

    #[test]
    fn test_evicts_least_recently_inserted() {
        let cache = JidCache::new();
        for i in 0..=DEFAULT_CAPACITY {
            cache.get_or_parse(&format!("user{i}@example.com")).unwrap();
        }
        assert_eq!(cache.len(), DEFAULT_CAPACITY);
        assert!(!cache.contains("user0@example.com"));
        assert!(cache.contains("user1@example.com"));
        assert!(cache.contains(&format!("user{DEFAULT_CAPACITY}@example.com")));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_access_refreshes_recency() {
        let cache = JidCache::with_capacity(3);
        let a = cache.get_or_parse("a@example.com").unwrap();
        cache.get_or_parse("b@example.com").unwrap();
        cache.get_or_parse("c@example.com").unwrap();

        // Touch "a" so "b" becomes the oldest.
        let a_again = cache.get_or_parse("a@example.com").unwrap();
        assert!(Jid::ptr_eq(&a, &a_again));

        cache.get_or_parse("d@example.com").unwrap();
        assert!(cache.contains("a@example.com"));
        assert!(!cache.contains("b@example.com"));
        assert!(cache.contains("c@example.com"));
        assert!(cache.contains("d@example.com"));
    }

    #[test]
    fn test_evicted_jid_stays_usable() {
        let cache = JidCache::with_capacity(1);
        let a = cache.get_or_parse("a@example.com/r").unwrap();
        cache.get_or_parse("b@example.com").unwrap();
        assert!(!cache.contains("a@example.com/r"));
        assert_eq!(a.as_str(), "a@example.com/r");

        let reparsed = cache.get_or_parse("a@example.com/r").unwrap();
        assert_eq!(a, reparsed);
        assert!(!Jid::ptr_eq(&a, &reparsed));
    }

    #[test]
    fn test_contains_does_not_insert() {
        let cache = JidCache::with_capacity(2);
        cache.get_or_parse("a@example.com").unwrap();
        assert!(cache.contains("a@example.com"));
        assert!(!cache.contains("b@example.com"));
        assert!(!cache.contains("@example.com"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_clear() {
        let cache = JidCache::new();
        cache.get_or_parse("a@example.com").unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_concurrent_lookups_share_instances() {
        let cache = JidCache::with_capacity(16);
        let results: Vec<Jid> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| cache.get_or_parse("alice@example.com/phone").unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(results.windows(2).all(|w| Jid::ptr_eq(&w[0], &w[1])));
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 7);
    }
}
