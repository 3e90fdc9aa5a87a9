//! Language-specific tag classification.
//!
//! A [`ClassificationIndex`] maps every POS tag of one language to a
//! [`TagEntry`] carrying the word class, a human readable description and
//! the tag's [`TagKind`]. The kind decides which rows count as "real words"
//! for cloze deletion, hyphenation and statistics.
//!
//! Indices are built from three tag tables (words, punctuation and
//! sentence enders) and handed out by the [`registry::LanguageRegistry`]
//! as shared, read-only `Arc`s.
//!
//! # Examples
//!
//! ```
//! use tagstat::language::{ClassificationIndex, TagInfo, TagKind};
//!
//! let index = ClassificationIndex::new(
//!     "en",
//!     vec![("NN", TagInfo::new("noun", "Noun, singular"))],
//!     vec![(",", TagInfo::new("comma", "Comma"))],
//!     vec![("SENT", TagInfo::new("fullstop", "Sentence ending punctuation"))],
//! )
//! .unwrap();
//!
//! assert!(index.is_word_tag("NN"));
//! assert_eq!(index.lookup("SENT").unwrap().kind, TagKind::SentenceEnd);
//! ```

pub mod english;
pub mod registry;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TagstatError};

pub use english::EnglishPack;
pub use registry::LanguageRegistry;

/// Word class assigned to tags that are missing from the index.
pub const UNKNOWN_WCLASS: &str = "unknown";

/// Coarse role of a tag within the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    /// A real word; eligible for cloze deletion and hyphenation.
    Word,
    /// Punctuation that does not end a sentence.
    Punctuation,
    /// Sentence-ending punctuation.
    SentenceEnd,
    /// Tag not present in the language's index.
    Unknown,
}

impl TagKind {
    /// Whether rows of this kind count as words.
    pub fn is_word(self) -> bool {
        matches!(self, TagKind::Word)
    }
}

/// Word class and description of one tag, as supplied at registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    pub wclass: String,
    pub description: String,
}

impl TagInfo {
    pub fn new<W: Into<String>, D: Into<String>>(wclass: W, description: D) -> Self {
        TagInfo {
            wclass: wclass.into(),
            description: description.into(),
        }
    }
}

/// A resolved tag: its kind plus word class and description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    pub kind: TagKind,
    pub wclass: String,
    pub description: String,
}

/// Mapping from tag to [`TagEntry`] for a single language.
#[derive(Clone, Debug)]
pub struct ClassificationIndex {
    language: String,
    entries: AHashMap<String, TagEntry>,
}

impl ClassificationIndex {
    /// Build an index from word, punctuation and sentence-ending tag tables.
    ///
    /// Fails with a configuration error when the word or sentence-ending
    /// table is empty, or when one tag appears in more than one table.
    pub fn new<S, W, P, E>(language: &str, words: W, punctuation: P, sentence_end: E) -> Result<Self>
    where
        S: Into<String>,
        W: IntoIterator<Item = (S, TagInfo)>,
        P: IntoIterator<Item = (S, TagInfo)>,
        E: IntoIterator<Item = (S, TagInfo)>,
    {
        if language.trim().is_empty() {
            return Err(TagstatError::configuration("language code must not be empty"));
        }

        let mut index = ClassificationIndex {
            language: language.to_string(),
            entries: AHashMap::new(),
        };

        let word_count = index.insert_table(TagKind::Word, words)?;
        if word_count == 0 {
            return Err(TagstatError::configuration(format!(
                "language '{language}' has an empty word tag table"
            )));
        }
        index.insert_table(TagKind::Punctuation, punctuation)?;
        let end_count = index.insert_table(TagKind::SentenceEnd, sentence_end)?;
        if end_count == 0 {
            return Err(TagstatError::configuration(format!(
                "language '{language}' has no sentence-ending tag"
            )));
        }

        Ok(index)
    }

    fn insert_table<S, T>(&mut self, kind: TagKind, table: T) -> Result<usize>
    where
        S: Into<String>,
        T: IntoIterator<Item = (S, TagInfo)>,
    {
        let mut inserted = 0;
        for (tag, info) in table {
            let tag = tag.into();
            if let Some(existing) = self.entries.get(&tag) {
                return Err(TagstatError::configuration(format!(
                    "tag '{tag}' of language '{}' is listed as both {:?} and {:?}",
                    self.language, existing.kind, kind
                )));
            }
            self.entries.insert(
                tag,
                TagEntry {
                    kind,
                    wclass: info.wclass,
                    description: info.description,
                },
            );
            inserted += 1;
        }
        Ok(inserted)
    }

    /// The language code this index belongs to.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Look up a tag.
    pub fn lookup(&self, tag: &str) -> Option<&TagEntry> {
        self.entries.get(tag)
    }

    /// Kind of a tag, `Unknown` if it is not indexed.
    pub fn kind_of(&self, tag: &str) -> TagKind {
        self.lookup(tag).map_or(TagKind::Unknown, |entry| entry.kind)
    }

    pub fn is_word_tag(&self, tag: &str) -> bool {
        self.kind_of(tag).is_word()
    }

    pub fn is_sentence_end(&self, tag: &str) -> bool {
        self.kind_of(tag) == TagKind::SentenceEnd
    }

    /// All tags of the given kind, sorted.
    pub fn tags_of_kind(&self, kind: TagKind) -> Vec<&str> {
        let mut tags: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.kind == kind)
            .map(|(tag, _)| tag.as_str())
            .collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A lazily built language: the registry calls [`LanguagePack::build`]
/// the first time the language is requested.
pub trait LanguagePack: Send + Sync {
    /// Language code, e.g. `"en"`.
    fn code(&self) -> &str;

    /// Build the classification index for this language.
    fn build(&self) -> Result<ClassificationIndex>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_index() -> ClassificationIndex {
        ClassificationIndex::new(
            "xx",
            vec![
                ("N", TagInfo::new("noun", "Noun")),
                ("V", TagInfo::new("verb", "Verb")),
            ],
            vec![(",", TagInfo::new("comma", "Comma"))],
            vec![(".", TagInfo::new("fullstop", "Full stop"))],
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_and_kinds() {
        let index = tiny_index();
        assert_eq!(index.language(), "xx");
        assert_eq!(index.len(), 4);
        assert_eq!(index.lookup("N").unwrap().wclass, "noun");
        assert_eq!(index.kind_of(","), TagKind::Punctuation);
        assert_eq!(index.kind_of("."), TagKind::SentenceEnd);
        assert_eq!(index.kind_of("??"), TagKind::Unknown);
        assert!(index.is_word_tag("V"));
        assert!(!index.is_word_tag(","));
        assert!(index.is_sentence_end("."));
        assert_eq!(index.tags_of_kind(TagKind::Word), vec!["N", "V"]);
    }

    #[test]
    fn test_empty_word_table_is_configuration_error() {
        let result = ClassificationIndex::new(
            "xx",
            Vec::<(&str, TagInfo)>::new(),
            vec![],
            vec![(".", TagInfo::new("fullstop", ""))],
        );
        assert!(matches!(result, Err(TagstatError::Configuration(_))));
    }

    #[test]
    fn test_missing_sentence_end_is_configuration_error() {
        let result = ClassificationIndex::new(
            "xx",
            vec![("N", TagInfo::new("noun", ""))],
            vec![],
            vec![],
        );
        assert!(matches!(result, Err(TagstatError::Configuration(_))));
    }

    #[test]
    fn test_conflicting_tag_is_rejected() {
        let result = ClassificationIndex::new(
            "xx",
            vec![("N", TagInfo::new("noun", ""))],
            vec![("N", TagInfo::new("punctuation", ""))],
            vec![(".", TagInfo::new("fullstop", ""))],
        );
        assert!(matches!(result, Err(TagstatError::Configuration(_))));
    }
}
