//! Result caching for repeated evaluations.
//!
//! An opt-in cache keyed on the exact expression text. Entries are stamped
//! with the environment generation at the time they were stored; any
//! binding change bumps the generation, so a stale entry is detected on
//! lookup instead of being served. Only final values are stored, never
//! parse trees.

use std::collections::HashMap;

use crate::value::Value;

/// A cached result and the environment generation it was computed under.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    generation: u64,
}

/// Cache performance counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to evaluate.
    pub misses: u64,
    /// Entries found but invalidated by an environment change. Also
    /// counted as misses.
    pub stale: u64,
}

/// Expression-text to result cache.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `text` against the current environment generation.
    pub fn get(&mut self, text: &str, generation: u64) -> Option<Value> {
        match self.entries.get(text) {
            Some(entry) if entry.generation == generation => {
                self.stats.hits += 1;
                Some(entry.value.clone())
            }
            Some(_) => {
                self.stats.stale += 1;
                self.stats.misses += 1;
                None
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Store a result, replacing any entry for the same text.
    pub fn insert(&mut self, text: impl Into<String>, value: Value, generation: u64) {
        self.entries.insert(
            text.into(),
            CacheEntry { value, generation },
        );
    }

    /// Drop every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
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

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Hit rate as a percentage of all lookups.
    pub fn hit_rate(&self) -> f64 {
        let total = self.stats.hits + self.stats.misses;
        if total == 0 {
            0.0
        } else {
            (self.stats.hits as f64 / total as f64) * 100.0
        }
    }
}
