//! Session-wide hyphenation cache.

use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::hyphen::{HyphenEntry, PatternId};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    language: String,
    word: String,
    version: String,
}

impl CacheKey {
    fn new(patterns: &PatternId, word: &str) -> Self {
        CacheKey {
            language: patterns.language.clone(),
            word: word.to_lowercase(),
            version: patterns.version.clone(),
        }
    }
}

/// Hyphenation results keyed by (language, word, pattern version).
///
/// Entries live as long as the cache; there is no eviction. Concurrent
/// readers share the lock, inserts never replace an existing entry unless
/// [`overwrite`](Self::overwrite) is used for corrections.
#[derive(Debug, Default)]
pub struct HyphenationCache {
    entries: RwLock<AHashMap<CacheKey, HyphenEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl HyphenationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look `word` up, counting a hit or a miss.
    pub fn get(&self, patterns: &PatternId, word: &str) -> Option<HyphenEntry> {
        let found = self.peek(patterns, word);
        self.record_lookup(found.is_some());
        found
    }

    /// Look `word` up without touching the hit and miss counters.
    pub fn peek(&self, patterns: &PatternId, word: &str) -> Option<HyphenEntry> {
        self.entries.read().get(&CacheKey::new(patterns, word)).cloned()
    }

    pub(crate) fn record_lookup(&self, hit: bool) {
        let counter = if hit { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Insert `entry` unless the word is already cached. Returns whether it
    /// was inserted.
    pub fn insert_if_absent(&self, patterns: &PatternId, entry: HyphenEntry) -> bool {
        let key = CacheKey::new(patterns, &entry.word);
        let mut entries = self.entries.write();
        if entries.contains_key(&key) {
            return false;
        }
        entries.insert(key, entry);
        true
    }

    /// Replace the cached entry for a word, e.g. after a manual correction.
    pub fn overwrite(&self, patterns: &PatternId, entry: HyphenEntry) {
        let key = CacheKey::new(patterns, &entry.word);
        tracing::debug!(word = entry.word.as_str(), "overwriting cached hyphenation");
        self.entries.write().insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}
