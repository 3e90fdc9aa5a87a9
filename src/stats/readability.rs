//! Pluggable readability measures.
//!
//! A measure scores the [`Descriptives`] of a table. Only the Flesch
//! formulas ship here; others implement [`Readability`] themselves.

use crate::error::{Result, TagstatError};
use crate::stats::descriptive::Descriptives;

/// A readability formula.
pub trait Readability: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(&self, stats: &Descriptives) -> Result<f64>;
}

/// Words per sentence and syllables per word.
///
/// Words too short to be hyphenated count as one syllable each.
fn ratios(stats: &Descriptives) -> Result<(f64, f64)> {
    let syllables = stats.syllables.as_ref().ok_or_else(|| {
        TagstatError::invalid_argument("readability needs syllable counts; hyphenate first")
    })?;
    if stats.words == 0 || stats.sentences == 0 {
        return Err(TagstatError::invalid_argument(
            "readability needs at least one word and one sentence",
        ));
    }
    let unhyphenated = stats.words.saturating_sub(syllables.hyphenated_words);
    let total = (syllables.total + unhyphenated) as f64;
    Ok((
        stats.words as f64 / stats.sentences as f64,
        total / stats.words as f64,
    ))
}

/// Flesch Reading Ease: `206.835 - 1.015 * ASL - 84.6 * ASW`.
///
/// Higher is easier.
#[derive(Clone, Copy, Debug, Default)]
pub struct FleschReadingEase;

impl Readability for FleschReadingEase {
    fn name(&self) -> &'static str {
        "flesch_reading_ease"
    }

    fn score(&self, stats: &Descriptives) -> Result<f64> {
        let (asl, asw) = ratios(stats)?;
        Ok(206.835 - 1.015 * asl - 84.6 * asw)
    }
}

/// Flesch-Kincaid grade level: `0.39 * ASL + 11.8 * ASW - 15.59`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FleschKincaidGrade;

impl Readability for FleschKincaidGrade {
    fn name(&self) -> &'static str {
        "flesch_kincaid_grade"
    }

    fn score(&self, stats: &Descriptives) -> Result<f64> {
        let (asl, asw) = ratios(stats)?;
        Ok(0.39f64.mul_add(asl, 11.8 * asw) - 15.59)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::descriptive::SyllableCounts;
    use std::collections::BTreeMap;

    fn stats(syllables: Option<SyllableCounts>) -> Descriptives {
        Descriptives {
            tokens: 12,
            words: 10,
            sentences: 2,
            letters: 40,
            characters: 40,
            punctuation: 2,
            digits: 0,
            avg_sentence_length: 5.0,
            avg_word_length: 4.0,
            word_lengths: BTreeMap::new(),
            syllables,
        }
    }

    fn syllables() -> SyllableCounts {
        // 8 hyphenated words with 12 syllables, 2 short words
        SyllableCounts {
            total: 12,
            hyphenated_words: 8,
            polysyllables: 1,
            avg_per_word: 1.5,
            distribution: BTreeMap::new(),
        }
    }

    #[test]
    fn test_flesch_reading_ease() {
        let score = FleschReadingEase.score(&stats(Some(syllables()))).unwrap();
        let expected = 206.835 - 1.015 * 5.0 - 84.6 * 1.4;
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_flesch_kincaid_grade() {
        let score = FleschKincaidGrade.score(&stats(Some(syllables()))).unwrap();
        let expected = 0.39 * 5.0 + 11.8 * 1.4 - 15.59;
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_requires_syllables() {
        assert!(matches!(
            FleschReadingEase.score(&stats(None)),
            Err(TagstatError::InvalidArgument(_))
        ));
    }
}
