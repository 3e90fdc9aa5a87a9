//! Statistics over token tables and their diffs.
//!
//! - [`summary`]: word-class distribution, optionally against a selection
//! - [`descriptive`]: word, sentence, letter and syllable counts
//! - [`frequency`]: corpus frequency lookups and document-term statistics
//! - [`lexdiv`]: lexical diversity indices
//! - [`readability`]: pluggable readability formulas
//!
//! Change statistics (how much of a text a transformation altered) live in
//! [`crate::diff`].

pub mod descriptive;
pub mod frequency;
pub mod lexdiv;
pub mod readability;
pub mod summary;

pub use descriptive::{Descriptives, SyllableCounts, describe};
pub use frequency::{
    CorpusFrequency, DocumentTermMatrix, FrequencyEntry, FrequencyProfile, ProfileRow,
    frequency_profile,
};
pub use lexdiv::{LexicalDiversity, lexical_diversity};
pub use readability::{FleschKincaidGrade, FleschReadingEase, Readability};
pub use summary::{WordClassRow, WordClassSummary, summarize, summarize_document};
