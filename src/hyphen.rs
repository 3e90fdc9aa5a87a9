//! Hyphenation boundary.
//!
//! Syllable hyphenation is done by an external collaborator implementing
//! [`Hyphenator`]. The core decides which rows are eligible
//! ([`eligible_words`]), asks the hyphenator only for words missing from
//! the session-wide [`HyphenationCache`], and merges the answers back by
//! row position into a [`Hyphenation`]. Corrections supplied later replace
//! the hyphenation of a word and recompute its syllable count.

pub mod cache;
pub mod liang;

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::table::TokenTable;
use crate::config::HyphenationConfig;
use crate::error::{Result, TagstatError};

pub use cache::HyphenationCache;
pub use liang::{HyphenPatterns, LiangHyphenator};

/// Identity of a pattern set: its language and version.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternId {
    pub language: String,
    pub version: String,
}

impl PatternId {
    pub fn new<L: Into<String>, V: Into<String>>(language: L, version: V) -> Self {
        PatternId {
            language: language.into(),
            version: version.into(),
        }
    }
}

/// Hyphenation of one word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyphenEntry {
    pub word: String,
    pub syllables: usize,
    pub hyphenated: String,
}

impl HyphenEntry {
    /// Build an entry from a hyphenated form, counting its syllables.
    pub fn from_hyphenated<W: Into<String>, H: Into<String>>(word: W, hyphenated: H) -> Self {
        let hyphenated = hyphenated.into();
        HyphenEntry {
            word: word.into(),
            syllables: count_syllables(&hyphenated),
            hyphenated,
        }
    }
}

/// Number of non-empty hyphen-separated parts, at least 1 for non-empty input.
pub fn count_syllables(hyphenated: &str) -> usize {
    hyphenated.split('-').filter(|part| !part.is_empty()).count()
}

/// External syllable hyphenation routine.
pub trait Hyphenator: Send + Sync {
    /// Language and version of the patterns in use; part of the cache key.
    fn patterns(&self) -> &PatternId;

    /// Hyphenate `words`, returning one entry per word in the same order.
    fn hyphenate(&self, words: &[String]) -> anyhow::Result<Vec<HyphenEntry>>;
}

/// Rows eligible for hyphenation with the normalised word to hyphenate.
///
/// A row qualifies if it is a word, is not a stopword when
/// `skip_stopwords` is set, and has at least `min_length` characters after
/// optional hyphen stripping. Words are lower-cased.
pub fn eligible_words(tokens: &TokenTable, config: &HyphenationConfig) -> Vec<(usize, String)> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, row)| row.is_word() && !(config.skip_stopwords && row.stopword))
        .filter_map(|(position, row)| {
            let word: String = if config.strip_hyphens {
                row.token.chars().filter(|&c| c != '-').collect()
            } else {
                row.token.clone()
            };
            let word = word.to_lowercase();
            (word.chars().count() >= config.min_length).then_some((position, word))
        })
        .collect()
}

/// Hyphenate the eligible rows of `tokens`, consulting and filling `cache`.
pub fn hyphenate_table(
    tokens: &TokenTable,
    hyphenator: &dyn Hyphenator,
    cache: &HyphenationCache,
    config: &HyphenationConfig,
) -> Result<Hyphenation> {
    config.validate()?;
    let patterns = hyphenator.patterns().clone();
    if patterns.language != tokens.language() {
        return Err(TagstatError::invalid_argument(format!(
            "hyphenation patterns for '{}' cannot hyphenate a '{}' document",
            patterns.language,
            tokens.language()
        )));
    }

    let eligible = eligible_words(tokens, config);

    // One lookup per row; a word repeated within the table is a miss once.
    let mut entries: Vec<Option<HyphenEntry>> = vec![None; tokens.len()];
    let mut missing: Vec<String> = Vec::new();
    let mut pending: Vec<(usize, usize)> = Vec::new();
    for (position, word) in &eligible {
        if let Some(entry) = cache.peek(&patterns, word) {
            cache.record_lookup(true);
            entries[*position] = Some(entry);
            continue;
        }
        let slot = match missing.iter().position(|w| w == word) {
            Some(slot) => {
                cache.record_lookup(true);
                slot
            }
            None => {
                cache.record_lookup(false);
                missing.push(word.clone());
                missing.len() - 1
            }
        };
        pending.push((*position, slot));
    }

    if !missing.is_empty() {
        let results = hyphenator.hyphenate(&missing)?;
        if results.len() != missing.len() {
            return Err(TagstatError::analysis(format!(
                "hyphenator returned {} entries for {} words",
                results.len(),
                missing.len()
            )));
        }
        if let Some((word, entry)) = missing.iter().zip(&results).find(|(w, e)| &e.word != *w) {
            return Err(TagstatError::analysis(format!(
                "hyphenator answered '{}' for requested word '{word}'",
                entry.word
            )));
        }

        let mut fetched: Vec<HyphenEntry> = Vec::with_capacity(results.len());
        for entry in results {
            cache.insert_if_absent(&patterns, entry.clone());
            // a concurrent insert may have landed first
            fetched.push(cache.peek(&patterns, &entry.word).unwrap_or(entry));
        }
        for (position, slot) in pending {
            entries[position] = fetched.get(slot).cloned();
        }
    }

    tracing::debug!(
        doc_id = tokens.doc_id(),
        requested = missing.len(),
        cached = cache.len(),
        "hyphenated document"
    );

    Ok(Hyphenation { patterns, entries })
}

/// Hyphenation results aligned with the rows of one table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hyphenation {
    patterns: PatternId,
    entries: Vec<Option<HyphenEntry>>,
}

impl Hyphenation {
    pub fn patterns(&self) -> &PatternId {
        &self.patterns
    }

    /// Number of rows covered (hyphenated or not).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&HyphenEntry> {
        self.entries.get(position).and_then(Option::as_ref)
    }

    pub fn syllables(&self, position: usize) -> Option<usize> {
        self.get(position).map(|e| e.syllables)
    }

    /// Number of hyphenated rows.
    pub fn word_count(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    pub fn total_syllables(&self) -> usize {
        self.entries.iter().flatten().map(|e| e.syllables).sum()
    }

    /// Syllable count -> number of hyphenated rows with that count.
    pub fn syllable_distribution(&self) -> BTreeMap<usize, usize> {
        let mut distribution = BTreeMap::new();
        for entry in self.entries.iter().flatten() {
            *distribution.entry(entry.syllables).or_insert(0) += 1;
        }
        distribution
    }

    /// Replace the hyphenation of corrected words and recount syllables.
    ///
    /// Each correction is `(word, hyphenated form)`; removing the hyphens
    /// from the form must give back the word. A correction for a word that
    /// occurs in no row is reported as not found.
    pub fn correct(&self, corrections: &[(&str, &str)]) -> Result<Hyphenation> {
        let mut fixes: AHashMap<String, HyphenEntry> = AHashMap::new();
        for &(word, hyphenated) in corrections {
            let word = word.to_lowercase();
            let joined: String = hyphenated.chars().filter(|&c| c != '-').collect();
            if joined.to_lowercase() != word {
                return Err(TagstatError::invalid_argument(format!(
                    "corrected form '{hyphenated}' does not spell '{word}'"
                )));
            }
            if !self.entries.iter().flatten().any(|e| e.word == word) {
                return Err(TagstatError::not_found(format!(
                    "no hyphenated row for word '{word}'"
                )));
            }
            let entry = HyphenEntry::from_hyphenated(word.clone(), hyphenated);
            fixes.insert(word, entry);
        }

        let entries = self
            .entries
            .iter()
            .map(|entry| {
                entry
                    .as_ref()
                    .map(|e| fixes.get(&e.word).cloned().unwrap_or_else(|| e.clone()))
            })
            .collect();

        Ok(Hyphenation {
            patterns: self.patterns.clone(),
            entries,
        })
    }

    /// Corrected entries, for feeding back into a cache.
    pub(crate) fn entries(&self) -> impl Iterator<Item = &HyphenEntry> {
        self.entries.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Splits words after every second character.
    struct PairHyphenator {
        id: PatternId,
        calls: AtomicUsize,
    }

    impl PairHyphenator {
        fn new() -> Self {
            PairHyphenator {
                id: PatternId::new("en", "pairs-1"),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Hyphenator for PairHyphenator {
        fn patterns(&self) -> &PatternId {
            &self.id
        }

        fn hyphenate(&self, words: &[String]) -> anyhow::Result<Vec<HyphenEntry>> {
            self.calls.fetch_add(words.len(), Ordering::SeqCst);
            Ok(words
                .iter()
                .map(|w| {
                    let chars: Vec<char> = w.chars().collect();
                    let parts: Vec<String> =
                        chars.chunks(2).map(|c| c.iter().collect()).collect();
                    HyphenEntry::from_hyphenated(w.clone(), parts.join("-"))
                })
                .collect())
        }
    }

    fn table() -> TokenTable {
        let session = Session::with_english(SessionConfig::default()).unwrap();
        session
            .ingest(
                vec![
                    ("The", "DT", "the"),
                    ("well-known", "JJ", "well-known"),
                    ("banana", "NN", "banana"),
                    ("and", "CC", "and"),
                    ("Banana", "NN", "banana"),
                    (".", "SENT", "."),
                ],
                "en",
                Some("d"),
            )
            .unwrap()
            .tokens()
            .clone()
    }

    #[test]
    fn test_count_syllables() {
        assert_eq!(count_syllables("ba-na-na"), 3);
        assert_eq!(count_syllables("dog"), 1);
        assert_eq!(count_syllables("-a--b-"), 2);
        assert_eq!(count_syllables(""), 0);
    }

    #[test]
    fn test_eligible_words() {
        let config = HyphenationConfig::default();
        let words = eligible_words(&table(), &config);
        assert_eq!(
            words,
            vec![
                (1, "wellknown".to_string()),
                (2, "banana".to_string()),
                (4, "banana".to_string()),
            ]
        );

        let config = HyphenationConfig {
            min_length: 3,
            strip_hyphens: false,
            ..HyphenationConfig::default()
        };
        let words: Vec<String> = eligible_words(&table(), &config)
            .into_iter()
            .map(|(_, w)| w)
            .collect();
        assert_eq!(words, vec!["the", "well-known", "banana", "and", "banana"]);
    }

    #[test]
    fn test_eligible_words_skip_stopwords() {
        let tokens = crate::transform::annotate::annotate_stopwords(&table(), &StopWordList::english());
        let config = HyphenationConfig {
            min_length: 1,
            skip_stopwords: true,
            ..HyphenationConfig::default()
        };
        let positions: Vec<usize> = eligible_words(&tokens, &config)
            .into_iter()
            .map(|(p, _)| p)
            .collect();
        assert_eq!(positions, vec![1, 2, 4]);
    }

    #[test]
    fn test_hyphenate_table_uses_cache() {
        let hyphenator = PairHyphenator::new();
        let cache = HyphenationCache::new();
        let config = HyphenationConfig::default();

        let h = hyphenate_table(&table(), &hyphenator, &cache, &config).unwrap();
        assert_eq!(h.len(), 6);
        assert_eq!(h.get(2).unwrap().hyphenated, "ba-na-na");
        assert_eq!(h.syllables(4), Some(3));
        assert_eq!(h.syllables(1), Some(5));
        assert_eq!(h.syllables(0), None);
        assert_eq!(h.word_count(), 3);
        assert_eq!(h.total_syllables(), 11);
        // "banana" requested once despite two rows
        assert_eq!(hyphenator.calls.load(Ordering::SeqCst), 2);

        hyphenate_table(&table(), &hyphenator, &cache, &config).unwrap();
        assert_eq!(hyphenator.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_hyphenate_table_counts_one_lookup_per_row() {
        let session = Session::with_english(SessionConfig::default()).unwrap();
        let tokens = session
            .ingest(
                vec![
                    ("banana", "NN", "banana"),
                    ("apple", "NN", "apple"),
                    ("banana", "NN", "banana"),
                    ("cherry", "NN", "cherry"),
                ],
                "en",
                None,
            )
            .unwrap()
            .tokens()
            .clone();
        let hyphenator = PairHyphenator::new();
        let cache = HyphenationCache::new();
        let config = HyphenationConfig::default();

        hyphenate_table(&tokens, &hyphenator, &cache, &config).unwrap();
        assert_eq!(hyphenator.calls.load(Ordering::SeqCst), 3);
        assert_eq!(cache.misses(), 3);
        assert_eq!(cache.hits(), 1);

        hyphenate_table(&tokens, &hyphenator, &cache, &config).unwrap();
        assert_eq!(cache.misses(), 3);
        assert_eq!(cache.hits(), 5);
    }

    #[test]
    fn test_wrong_answer_caches_nothing() {
        /// Answers correctly for the first word only.
        struct Drifting(PatternId);
        impl Hyphenator for Drifting {
            fn patterns(&self) -> &PatternId {
                &self.0
            }
            fn hyphenate(&self, words: &[String]) -> anyhow::Result<Vec<HyphenEntry>> {
                Ok(words
                    .iter()
                    .enumerate()
                    .map(|(i, w)| {
                        let word = if i == 0 { w.clone() } else { format!("{w}x") };
                        HyphenEntry::from_hyphenated(word.clone(), word)
                    })
                    .collect())
            }
        }
        let cache = HyphenationCache::new();
        let result = hyphenate_table(
            &table(),
            &Drifting(PatternId::new("en", "1")),
            &cache,
            &HyphenationConfig::default(),
        );
        assert!(matches!(result, Err(TagstatError::Analysis(_))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_language_mismatch() {
        struct German(PatternId);
        impl Hyphenator for German {
            fn patterns(&self) -> &PatternId {
                &self.0
            }
            fn hyphenate(&self, _: &[String]) -> anyhow::Result<Vec<HyphenEntry>> {
                Ok(Vec::new())
            }
        }
        let result = hyphenate_table(
            &table(),
            &German(PatternId::new("de", "1")),
            &HyphenationCache::new(),
            &HyphenationConfig::default(),
        );
        assert!(matches!(result, Err(TagstatError::InvalidArgument(_))));
    }

    #[test]
    fn test_short_answer_is_analysis_error() {
        struct Lazy(PatternId);
        impl Hyphenator for Lazy {
            fn patterns(&self) -> &PatternId {
                &self.0
            }
            fn hyphenate(&self, _: &[String]) -> anyhow::Result<Vec<HyphenEntry>> {
                Ok(Vec::new())
            }
        }
        let result = hyphenate_table(
            &table(),
            &Lazy(PatternId::new("en", "1")),
            &HyphenationCache::new(),
            &HyphenationConfig::default(),
        );
        assert!(matches!(result, Err(TagstatError::Analysis(_))));
    }

    #[test]
    fn test_collaborator_failure_propagates() {
        struct Broken(PatternId);
        impl Hyphenator for Broken {
            fn patterns(&self) -> &PatternId {
                &self.0
            }
            fn hyphenate(&self, _: &[String]) -> anyhow::Result<Vec<HyphenEntry>> {
                anyhow::bail!("pattern file unreadable")
            }
        }
        let result = hyphenate_table(
            &table(),
            &Broken(PatternId::new("en", "1")),
            &HyphenationCache::new(),
            &HyphenationConfig::default(),
        );
        assert!(matches!(result, Err(TagstatError::Collaborator(_))));
    }

    #[test]
    fn test_correct_recomputes_syllables() {
        let h = hyphenate_table(
            &table(),
            &PairHyphenator::new(),
            &HyphenationCache::new(),
            &HyphenationConfig::default(),
        )
        .unwrap();

        let fixed = h.correct(&[("wellknown", "well-known")]).unwrap();
        assert_eq!(fixed.syllables(1), Some(2));
        assert_eq!(fixed.syllables(2), Some(3));
        assert_eq!(h.syllables(1), Some(5));
        assert_eq!(fixed.syllable_distribution(), BTreeMap::from([(2, 1), (3, 2)]));

        assert!(matches!(
            h.correct(&[("banana", "ba-na-nas")]),
            Err(TagstatError::InvalidArgument(_))
        ));
        assert!(matches!(
            h.correct(&[("cherry", "cher-ry")]),
            Err(TagstatError::NotFound(_))
        ));
    }
}
