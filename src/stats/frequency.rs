//! Corpus frequencies and document-term statistics.
//!
//! [`CorpusFrequency`] is the read-only lookup a reference corpus offers.
//! [`DocumentTermMatrix`] implements it over a set of ingested tables and
//! adds document frequency and idf for tf-idf weighting.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::table::TokenTable;
use crate::diff::percentage;
use crate::error::{Result, TagstatError};

/// Frequency of one word in a reference corpus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub frequency: usize,
    /// Share of all corpus words, in percent.
    pub pct: f64,
    pub per_million: f64,
    /// 1 for the most frequent word; ties share a rank.
    pub rank: usize,
}

/// Read-only word frequency lookup.
pub trait CorpusFrequency: Send + Sync {
    /// Frequency of `word`, or `None` if the corpus never saw it. When
    /// `case_sensitive` is false, all case variants are counted together.
    fn lookup(&self, word: &str, case_sensitive: bool) -> Option<FrequencyEntry>;

    /// Total number of words in the corpus.
    fn total_words(&self) -> usize;
}

#[derive(Clone, Debug, Default)]
struct TermCounts {
    frequencies: AHashMap<String, usize>,
    document_frequencies: AHashMap<String, usize>,
    per_document: Vec<AHashMap<String, usize>>,
    // descending, for rank lookups
    ranked: Vec<usize>,
}

impl TermCounts {
    fn build<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut counts = TermCounts::default();
        for terms in documents {
            let mut document: AHashMap<String, usize> = AHashMap::new();
            for term in terms {
                *document.entry(term).or_insert(0) += 1;
            }
            for (term, n) in &document {
                *counts.frequencies.entry(term.clone()).or_insert(0) += n;
                *counts.document_frequencies.entry(term.clone()).or_insert(0) += 1;
            }
            counts.per_document.push(document);
        }
        counts.ranked = counts.frequencies.values().copied().collect();
        counts.ranked.sort_unstable_by(|a, b| b.cmp(a));
        counts
    }

    fn rank(&self, frequency: usize) -> usize {
        self.ranked.partition_point(|&f| f > frequency) + 1
    }
}

/// Term counts over a collection of token tables.
///
/// Only word rows are counted. Terms are the token text, or the lemma when
/// built with `use_lemma`.
#[derive(Clone, Debug)]
pub struct DocumentTermMatrix {
    doc_ids: Vec<String>,
    document_lengths: Vec<usize>,
    total_words: usize,
    exact: TermCounts,
    folded: TermCounts,
}

impl DocumentTermMatrix {
    pub fn from_tables(tables: &[TokenTable], use_lemma: bool) -> Self {
        let documents: Vec<Vec<String>> = tables
            .iter()
            .map(|table| {
                table
                    .iter()
                    .filter(|r| r.is_word())
                    .map(|r| if use_lemma { r.lemma.clone() } else { r.token.clone() })
                    .collect()
            })
            .collect();

        let document_lengths: Vec<usize> = documents.iter().map(Vec::len).collect();
        let folded = TermCounts::build(
            documents
                .iter()
                .map(|terms| terms.iter().map(|t| t.to_lowercase()).collect()),
        );
        let exact = TermCounts::build(documents);

        tracing::debug!(
            documents = tables.len(),
            terms = exact.frequencies.len(),
            "built document-term matrix"
        );

        DocumentTermMatrix {
            doc_ids: tables.iter().map(|t| t.doc_id().to_string()).collect(),
            total_words: document_lengths.iter().sum(),
            document_lengths,
            exact,
            folded,
        }
    }

    fn counts(&self, case_sensitive: bool) -> &TermCounts {
        if case_sensitive { &self.exact } else { &self.folded }
    }

    fn key(word: &str, case_sensitive: bool) -> String {
        if case_sensitive {
            word.to_string()
        } else {
            word.to_lowercase()
        }
    }

    pub fn doc_ids(&self) -> &[String] {
        &self.doc_ids
    }

    pub fn document_count(&self) -> usize {
        self.doc_ids.len()
    }

    pub fn vocabulary_size(&self, case_sensitive: bool) -> usize {
        self.counts(case_sensitive).frequencies.len()
    }

    /// Occurrences of `word` in document `doc`.
    pub fn term_frequency(&self, doc: usize, word: &str, case_sensitive: bool) -> Result<usize> {
        let document = self
            .counts(case_sensitive)
            .per_document
            .get(doc)
            .ok_or_else(|| TagstatError::not_found(format!("document index {doc}")))?;
        Ok(document
            .get(&Self::key(word, case_sensitive))
            .copied()
            .unwrap_or(0))
    }

    /// Number of documents containing `word`.
    pub fn document_frequency(&self, word: &str, case_sensitive: bool) -> usize {
        self.counts(case_sensitive)
            .document_frequencies
            .get(&Self::key(word, case_sensitive))
            .copied()
            .unwrap_or(0)
    }

    /// `ln(N / df)`, or `None` for a word no document contains.
    pub fn idf(&self, word: &str, case_sensitive: bool) -> Option<f64> {
        let df = self.document_frequency(word, case_sensitive);
        (df > 0).then(|| (self.document_count() as f64 / df as f64).ln())
    }

    /// Length-normalised term frequency times idf.
    pub fn tf_idf(&self, doc: usize, word: &str, case_sensitive: bool) -> Result<f64> {
        let tf = self.term_frequency(doc, word, case_sensitive)?;
        let length = self.document_lengths.get(doc).copied().unwrap_or(0);
        if tf == 0 || length == 0 {
            return Ok(0.0);
        }
        let idf = self.idf(word, case_sensitive).unwrap_or(0.0);
        Ok(tf as f64 / length as f64 * idf)
    }
}

impl CorpusFrequency for DocumentTermMatrix {
    fn lookup(&self, word: &str, case_sensitive: bool) -> Option<FrequencyEntry> {
        let counts = self.counts(case_sensitive);
        let frequency = *counts.frequencies.get(&Self::key(word, case_sensitive))?;
        Some(FrequencyEntry {
            frequency,
            pct: percentage(frequency, self.total_words),
            per_million: frequency as f64 / self.total_words as f64 * 1_000_000.0,
            rank: counts.rank(frequency),
        })
    }

    fn total_words(&self) -> usize {
        self.total_words
    }
}

/// Corpus frequency of one word row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub position: usize,
    pub word: String,
    pub entry: Option<FrequencyEntry>,
}

/// Corpus frequencies of the word rows of a table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrequencyProfile {
    pub rows: Vec<ProfileRow>,
    /// Word rows the corpus knows.
    pub found: usize,
    /// `found` as a percentage of word rows.
    pub coverage: f64,
    /// Mean per-million frequency over the found rows.
    pub mean_per_million: f64,
}

/// Look every word row of `tokens` up in `corpus`.
pub fn frequency_profile(
    tokens: &TokenTable,
    corpus: &dyn CorpusFrequency,
    case_sensitive: bool,
) -> FrequencyProfile {
    let rows: Vec<ProfileRow> = tokens
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_word())
        .map(|(position, r)| ProfileRow {
            position,
            word: r.token.clone(),
            entry: corpus.lookup(&r.token, case_sensitive),
        })
        .collect();

    let found: Vec<f64> = rows
        .iter()
        .filter_map(|r| r.entry.as_ref().map(|e| e.per_million))
        .collect();
    let mean_per_million = if found.is_empty() {
        0.0
    } else {
        found.iter().sum::<f64>() / found.len() as f64
    };

    FrequencyProfile {
        coverage: percentage(found.len(), rows.len()),
        found: found.len(),
        mean_per_million,
        rows,
    }
}
