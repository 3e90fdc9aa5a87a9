//! Descriptive counts of a token table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::table::TokenTable;
use crate::analysis::token::count_digits;
use crate::error::{Result, TagstatError};
use crate::hyphen::Hyphenation;
use crate::language::TagKind;

/// Word, sentence and character counts of one table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Descriptives {
    pub tokens: usize,
    pub words: usize,
    pub sentences: usize,
    /// Alphabetic characters over all rows.
    pub letters: usize,
    /// Characters of all word rows.
    pub characters: usize,
    pub punctuation: usize,
    pub digits: usize,
    pub avg_sentence_length: f64,
    pub avg_word_length: f64,
    /// Word length in characters -> number of words.
    pub word_lengths: BTreeMap<usize, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syllables: Option<SyllableCounts>,
}

/// Syllable totals, available once a document has been hyphenated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SyllableCounts {
    pub total: usize,
    pub hyphenated_words: usize,
    /// Words with three or more syllables.
    pub polysyllables: usize,
    pub avg_per_word: f64,
    pub distribution: BTreeMap<usize, usize>,
}

/// Count what `tokens` contains.
///
/// `hyphenation`, if given, must cover the same rows as `tokens`.
pub fn describe(tokens: &TokenTable, hyphenation: Option<&Hyphenation>) -> Result<Descriptives> {
    let mut word_lengths = BTreeMap::new();
    let mut characters = 0;
    for row in tokens.iter().filter(|r| r.is_word()) {
        let len = row.char_len();
        characters += len;
        *word_lengths.entry(len).or_insert(0) += 1;
    }

    let words = tokens.word_count();
    let sentences = tokens.sentence_count();
    let punctuation = tokens
        .iter()
        .filter(|r| matches!(r.kind, TagKind::Punctuation | TagKind::SentenceEnd))
        .count();

    let syllables = match hyphenation {
        Some(h) if h.len() != tokens.len() => {
            return Err(TagstatError::invalid_argument(format!(
                "hyphenation covers {} rows, table has {}",
                h.len(),
                tokens.len()
            )));
        }
        Some(h) => {
            let distribution = h.syllable_distribution();
            let polysyllables = distribution.range(3..).map(|(_, n)| n).sum();
            Some(SyllableCounts {
                total: h.total_syllables(),
                hyphenated_words: h.word_count(),
                polysyllables,
                avg_per_word: ratio(h.total_syllables(), h.word_count()),
                distribution,
            })
        }
        None => None,
    };

    Ok(Descriptives {
        tokens: tokens.len(),
        words,
        sentences,
        letters: tokens.total_letters(),
        characters,
        punctuation,
        digits: tokens.iter().map(|r| count_digits(&r.token)).sum(),
        avg_sentence_length: ratio(words, sentences),
        avg_word_length: ratio(characters, words),
        word_lengths,
        syllables,
    })
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
