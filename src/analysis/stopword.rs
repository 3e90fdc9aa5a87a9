//! Stopword lists.
//!
//! Stopwords are matched case-insensitively. The default list is a
//! conventional English one; custom lists can be built from any iterator
//! of words.
//!
//! # Examples
//!
//! ```
//! use tagstat::analysis::stopword::StopWordList;
//!
//! let list = StopWordList::english();
//! assert!(list.is_stop_word("The"));
//! assert!(!list.is_stop_word("fox"));
//!
//! let custom = StopWordList::from_words(vec!["foo", "bar"]);
//! assert_eq!(custom.len(), 2);
//! ```

use std::sync::{Arc, LazyLock};

use ahash::AHashSet;

const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "me",
    "more", "most", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or",
    "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should", "so",
    "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "would", "you", "your", "yours", "yourself", "yourselves",
];

static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<Arc<AHashSet<String>>> = LazyLock::new(|| {
    Arc::new(
        DEFAULT_ENGLISH_STOP_WORDS
            .iter()
            .map(|&s| s.to_string())
            .collect(),
    )
});

/// A case-insensitive set of stopwords.
#[derive(Clone, Debug)]
pub struct StopWordList {
    words: Arc<AHashSet<String>>,
}

impl StopWordList {
    /// The default English list.
    pub fn english() -> Self {
        StopWordList {
            words: Arc::clone(&DEFAULT_ENGLISH_STOP_WORDS_SET),
        }
    }

    /// Build a list from arbitrary words; they are lower-cased on insert.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        StopWordList {
            words: Arc::new(words.into_iter().map(|w| w.as_ref().to_lowercase()).collect()),
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWordList {
    fn default() -> Self {
        Self::english()
    }
}
