//! Route resolution caching.
//!
//! [`ResolveCache`] is an LRU keyed by normalized path that stores the
//! [`Resolution`] the route table produced for it. The table is immutable
//! once built, so entries never go stale; the cache is only cleared when
//! the router swaps tables. Gated behind the `cache` feature.
//!
//! ```
//! use folio_navigator::cache::ResolveCache;
//! use folio_navigator::resolve::Resolution;
//!
//! let mut cache = ResolveCache::new();
//! assert!(cache.get("/nfts").is_none());
//! cache.insert("/nfts", Resolution::NotFound);
//! assert!(cache.get("/nfts").is_some());
//! assert_eq!(cache.stats().hits, 1);
//! assert_eq!(cache.stats().misses, 1);
//! ```

use crate::resolve::Resolution;
use crate::trace_log;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Default number of cached resolutions.
pub const DEFAULT_CAPACITY: usize = 256;

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    /// Number of full clears.
    pub invalidations: usize,
}

impl CacheStats {
    /// Hit rate in `0.0..=1.0`, `0.0` before any lookup.
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

/// LRU of path -> resolution.
#[derive(Debug)]
pub struct ResolveCache {
    entries: LruCache<String, Resolution>,
    stats: CacheStats,
}

impl ResolveCache {
    pub fn new() -> Self {
        Self::with_capacity(NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    pub fn get(&mut self, path: &str) -> Option<&Resolution> {
        if let Some(resolution) = self.entries.get(path) {
            self.stats.hits += 1;
            trace_log!("Resolve cache hit for '{}'", path);
            Some(resolution)
        } else {
            self.stats.misses += 1;
            None
        }
    }

    pub fn insert(&mut self, path: impl Into<String>, resolution: Resolution) {
        self.entries.put(path.into(), resolution);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.invalidations += 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for ResolveCache {
    fn default() -> Self {
        Self::new()
    }
}
