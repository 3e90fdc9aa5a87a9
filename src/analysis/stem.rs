//! Stemmers used by stem annotation.

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

/// Stemmer that returns words lower-cased but otherwise unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl IdentityStemmer {
    pub fn new() -> Self {
        IdentityStemmer
    }
}

impl Stemmer for IdentityStemmer {
    fn stem(&self, word: &str) -> String {
        word.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

const ENGLISH_SUFFIXES: &[&str] = &[
    "ational", "fulness", "iveness", "ations", "ation", "ingly", "ities", "ments", "ness", "ment",
    "able", "ible", "tion", "sion", "ings", "ful", "ing", "ies", "ied", "est", "ity", "ed", "er",
    "ly", "es", "s",
];

/// Suffix-stripping stemmer: removes the longest matching suffix as long as
/// at least `min_stem` characters remain.
#[derive(Debug, Clone)]
pub struct SimpleStemmer {
    /// Longest first.
    suffixes: Vec<String>,
    min_stem: usize,
}

impl SimpleStemmer {
    /// English suffix list, keeping stems of at least three characters.
    pub fn new() -> Self {
        Self::with_suffixes(ENGLISH_SUFFIXES.iter().copied(), 3)
    }

    /// Custom suffix list.
    pub fn with_suffixes<I, S>(suffixes: I, min_stem: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut suffixes: Vec<String> = suffixes.into_iter().map(Into::into).collect();
        suffixes.sort_by_key(|s| std::cmp::Reverse(s.chars().count()));
        SimpleStemmer { suffixes, min_stem }
    }
}

impl Default for SimpleStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for SimpleStemmer {
    fn stem(&self, word: &str) -> String {
        let word = word.to_lowercase();
        let length = word.chars().count();

        self.suffixes
            .iter()
            .find(|suffix| word.ends_with(suffix.as_str()) && length - suffix.chars().count() >= self.min_stem)
            .map(|suffix| word[..word.len() - suffix.len()].to_string())
            .unwrap_or(word)
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_stemmer() {
        let stemmer = IdentityStemmer::new();
        assert_eq!(stemmer.stem("Running"), "running");
        assert_eq!(stemmer.name(), "identity");
    }

    #[test]
    fn test_simple_stemmer() {
        let stemmer = SimpleStemmer::new();

        assert_eq!(stemmer.stem("jumps"), "jump");
        assert_eq!(stemmer.stem("Running"), "runn");
        assert_eq!(stemmer.stem("happiness"), "happi");
        assert_eq!(stemmer.stem("agreement"), "agree");
        assert_eq!(stemmer.stem("sensational"), "sens");
        // Too short to strip anything.
        assert_eq!(stemmer.stem("is"), "is");
        assert_eq!(stemmer.stem("bed"), "bed");
    }

    #[test]
    fn test_custom_suffixes() {
        let stemmer = SimpleStemmer::with_suffixes(vec!["en", "ungen"], 2);
        assert_eq!(stemmer.stem("Wohnungen"), "wohn");
        assert_eq!(stemmer.stem("laufen"), "lauf");
    }
}
