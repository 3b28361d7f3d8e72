//! Process-local memo of normalized translation units.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::FxHasher;
use tracing::debug;

use perm_ir::{DeclId, SharedUnit};

use crate::error::NormalizeError;
use crate::traits::Normalizer;

/// Handle to a cached normalization result.
///
/// Cloning shares the unit by reference; the target function node lives at
/// `fn_index` inside it.
#[derive(Debug, Clone)]
pub struct CachedUnit {
    /// The canonical unit, shared with every candidate built from it.
    pub unit: SharedUnit,
    /// Slot of the target function within the unit.
    pub fn_index: DeclId,
}

/// Hit/miss counters for cache effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered without re-parsing.
    pub hits: u64,
    /// Lookups that invoked the normalizer.
    pub misses: u64,
}

struct Entry {
    key_hash: u64,
    fn_name: String,
    source: String,
    cached: CachedUnit,
}

/// Bounded memo of normalizer output keyed by (source text, function name).
///
/// Process-local: each worker owns one instance, so repeated candidate
/// construction from identical source re-parses nothing and there is no
/// cross-worker consistency to maintain. Entries are kept
/// most-recently-used first and the least recently used entry is evicted at
/// capacity. Keys are hashed to bound key size; an exact-text comparison on
/// hash match rules out collision false hits.
///
/// Parse failures propagate to the caller and are never cached.
pub struct SharedTreeCache<N> {
    normalizer: N,
    entries: Vec<Entry>,
    capacity: usize,
    stats: CacheStats,
}

impl<N: Normalizer> SharedTreeCache<N> {
    /// Default entry bound, enough for a search loop cycling through a
    /// handful of base sources.
    pub const DEFAULT_CAPACITY: usize = 16;

    /// Cache with the default capacity.
    pub fn new(normalizer: N) -> Self {
        Self::with_capacity(normalizer, Self::DEFAULT_CAPACITY)
    }

    /// Cache bounded to `capacity` entries (at least one).
    pub fn with_capacity(normalizer: N, capacity: usize) -> Self {
        SharedTreeCache {
            normalizer,
            entries: Vec::new(),
            capacity: capacity.max(1),
            stats: CacheStats::default(),
        }
    }

    /// Fetch the normalized unit for `(source, fn_name)`, parsing on a miss.
    ///
    /// On a hit the stored unit is returned without invoking the
    /// normalizer. Normalizer failures (malformed source, function not
    /// found) propagate untouched.
    pub fn get_or_build(
        &mut self,
        source: &str,
        fn_name: &str,
    ) -> Result<CachedUnit, NormalizeError> {
        let key_hash = key_hash(source, fn_name);

        let hit = self.entries.iter().position(|entry| {
            entry.key_hash == key_hash && entry.fn_name == fn_name && entry.source == source
        });
        if let Some(pos) = hit {
            self.stats.hits += 1;
            debug!(fn_name, "shared-tree cache hit");
            let entry = self.entries.remove(pos);
            let cached = entry.cached.clone();
            self.entries.insert(0, entry);
            return Ok(cached);
        }

        self.stats.misses += 1;
        debug!(fn_name, "shared-tree cache miss");
        let normalized = self.normalizer.parse_and_extract(source, fn_name)?;
        let cached = CachedUnit {
            unit: Arc::new(normalized.unit),
            fn_index: normalized.fn_index,
        };
        self.entries.insert(
            0,
            Entry {
                key_hash,
                fn_name: fn_name.to_owned(),
                source: source.to_owned(),
                cached: cached.clone(),
            },
        );
        self.entries.truncate(self.capacity);
        Ok(cached)
    }

    /// Hit/miss counters so far.
    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn key_hash(source: &str, fn_name: &str) -> u64 {
    let mut hasher = FxHasher::default();
    source.hash(&mut hasher);
    fn_name.hash(&mut hasher);
    hasher.finish()
}
