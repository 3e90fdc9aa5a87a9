//! Token records: one row of a tagged document.
//!
//! A [`RawToken`] is what an external tagger hands over (token, tag,
//! lemma). Ingestion turns each raw token into a [`TokenRecord`] that also
//! carries the derived word class, description, letter count and sentence
//! position. Records are immutable once produced except for the `token`
//! text, which transformations replace, and the `stopword`/`stem`
//! annotations.
//!
//! # Examples
//!
//! ```
//! use tagstat::analysis::token::{count_letters, RawToken};
//!
//! let raw = RawToken::new("Über", "NN", "über");
//! assert_eq!(raw.token, "Über");
//! assert_eq!(count_letters("don't!"), 4);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::language::TagKind;

/// A (token, tag, lemma) triple as produced by a tagger.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawToken {
    pub token: String,
    pub tag: String,
    pub lemma: String,
}

impl RawToken {
    pub fn new<T, G, L>(token: T, tag: G, lemma: L) -> Self
    where
        T: Into<String>,
        G: Into<String>,
        L: Into<String>,
    {
        RawToken {
            token: token.into(),
            tag: tag.into(),
            lemma: lemma.into(),
        }
    }
}

impl<T, G, L> From<(T, G, L)> for RawToken
where
    T: Into<String>,
    G: Into<String>,
    L: Into<String>,
{
    fn from((token, tag, lemma): (T, G, L)) -> Self {
        RawToken::new(token, tag, lemma)
    }
}

/// One row of a [`TokenTable`](crate::analysis::table::TokenTable).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Token text; the only field transformations rewrite.
    pub token: String,

    /// POS tag assigned by the tagger.
    pub tag: String,

    /// Lemma assigned by the tagger.
    pub lemma: String,

    /// Word class looked up from the tag.
    pub wclass: String,

    /// Human readable tag description.
    pub description: String,

    /// Role of the tag (word, punctuation, sentence end, unknown).
    pub kind: TagKind,

    /// Number of alphabetic grapheme clusters in the original token.
    pub letters: usize,

    /// 1-based sentence number; never decreases along the table.
    pub sentence: usize,

    /// Identifier of the document this row belongs to.
    pub doc_id: String,

    /// Whether the tag is a sentence-ending tag.
    pub sentence_end: bool,

    /// Set by stopword annotation.
    pub stopword: bool,

    /// Set by stem annotation.
    pub stem: Option<String>,
}

impl TokenRecord {
    /// Whether this row is a real word (eligible for cloze deletion etc.).
    pub fn is_word(&self) -> bool {
        self.kind.is_word()
    }

    /// Number of characters (grapheme clusters) of the current token text.
    pub fn char_len(&self) -> usize {
        self.token.graphemes(true).count()
    }

    /// Clone this record with different token text.
    pub fn with_token<S: Into<String>>(&self, token: S) -> Self {
        let mut record = self.clone();
        record.token = token.into();
        record
    }
}

impl fmt::Display for TokenRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token, self.tag)
    }
}

/// Count alphabetic grapheme clusters, so combining marks and wide
/// characters count once regardless of their byte length.
pub fn count_letters(text: &str) -> usize {
    text.graphemes(true)
        .filter(|g| g.chars().next().is_some_and(char::is_alphabetic))
        .count()
}

/// Count grapheme clusters that start with a decimal digit.
pub fn count_digits(text: &str) -> usize {
    text.graphemes(true)
        .filter(|g| g.chars().next().is_some_and(|c| c.is_ascii_digit()))
        .count()
}
