//! Configuration for tagstat sessions and transformations.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TagstatError};

/// Configuration shared by everything running in one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Default parameters for cloze deletion.
    pub cloze: ClozeConfig,

    /// Eligibility rules for hyphenation.
    pub hyphenation: HyphenationConfig,

    /// Type counting rules for lexical diversity measures.
    pub diversity: DiversityConfig,

    /// What happens when a transformation name is reused on a document.
    pub duplicate_transforms: DuplicatePolicy,
}

impl SessionConfig {
    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Validate every nested section.
    pub fn validate(&self) -> Result<()> {
        self.cloze.validate()?;
        self.hyphenation.validate()?;
        self.diversity.validate()
    }
}

/// Which tokens a cloze deletion masks and what the blanks look like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClozeConfig {
    /// Every `period`-th eligible word is masked.
    pub period: usize,

    /// Eligible words skipped before counting starts, or `all`.
    pub offset: ClozeOffset,

    /// Character repeated to build a blank.
    pub blank_char: char,

    /// Fixed blank width; 0 means "as long as the masked word".
    pub blank_width: usize,
}

impl Default for ClozeConfig {
    fn default() -> Self {
        Self {
            period: 5,
            offset: ClozeOffset::Fixed(0),
            blank_char: '_',
            blank_width: 0,
        }
    }
}

impl ClozeConfig {
    /// Create a configuration with the given period and offset and default blanks.
    pub fn new(period: usize, offset: ClozeOffset) -> Self {
        Self {
            period,
            offset,
            ..Self::default()
        }
    }

    /// Set the blank character.
    pub fn with_blank_char(mut self, blank_char: char) -> Self {
        self.blank_char = blank_char;
        self
    }

    /// Set the blank width (0 keeps the masked word's length).
    pub fn with_blank_width(mut self, blank_width: usize) -> Self {
        self.blank_width = blank_width;
        self
    }

    /// Check `period >= 1` and `offset < period`.
    pub fn validate(&self) -> Result<()> {
        if self.period < 1 {
            return Err(TagstatError::invalid_argument(format!(
                "cloze period must be at least 1, got {}",
                self.period
            )));
        }
        if let ClozeOffset::Fixed(offset) = self.offset
            && offset >= self.period
        {
            return Err(TagstatError::invalid_argument(format!(
                "cloze offset {offset} must be smaller than period {}",
                self.period
            )));
        }
        Ok(())
    }
}

/// Offset of a cloze deletion: a single value, or every value in `0..period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "OffsetRepr", into = "OffsetRepr")]
pub enum ClozeOffset {
    Fixed(usize),
    All,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum OffsetRepr {
    Number(usize),
    Text(String),
}

impl TryFrom<OffsetRepr> for ClozeOffset {
    type Error = TagstatError;

    fn try_from(repr: OffsetRepr) -> Result<Self> {
        match repr {
            OffsetRepr::Number(n) => Ok(ClozeOffset::Fixed(n)),
            OffsetRepr::Text(s) => s.parse(),
        }
    }
}

impl From<ClozeOffset> for OffsetRepr {
    fn from(offset: ClozeOffset) -> Self {
        match offset {
            ClozeOffset::Fixed(n) => OffsetRepr::Number(n),
            ClozeOffset::All => OffsetRepr::Text("all".to_string()),
        }
    }
}

impl FromStr for ClozeOffset {
    type Err = TagstatError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(ClozeOffset::All);
        }
        trimmed
            .parse::<usize>()
            .map(ClozeOffset::Fixed)
            .map_err(|_| {
                TagstatError::invalid_argument(format!(
                    "cloze offset must be a non-negative integer or \"all\", got {s:?}"
                ))
            })
    }
}

impl fmt::Display for ClozeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClozeOffset::Fixed(n) => write!(f, "{n}"),
            ClozeOffset::All => write!(f, "all"),
        }
    }
}

/// Rules for picking the tokens handed to a hyphenator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HyphenationConfig {
    /// Minimum length in characters (after hyphen stripping).
    pub min_length: usize,

    /// Remove embedded hyphens before hyphenating ("self-aware" -> "selfaware").
    pub strip_hyphens: bool,

    /// Leave stopword rows out of the word list.
    pub skip_stopwords: bool,
}

impl Default for HyphenationConfig {
    fn default() -> Self {
        Self {
            min_length: 4,
            strip_hyphens: true,
            skip_stopwords: false,
        }
    }
}

impl HyphenationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_length < 1 {
            return Err(TagstatError::invalid_argument(
                "hyphenation min_length must be at least 1",
            ));
        }
        Ok(())
    }
}

/// How types are counted for lexical diversity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiversityConfig {
    /// Treat "The" and "the" as different types.
    pub case_sensitive: bool,

    /// Count lemmas instead of token forms.
    pub use_lemma: bool,

    /// Segment size for the mean segmental type-token ratio.
    pub segment: usize,
}

impl Default for DiversityConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            use_lemma: false,
            segment: 100,
        }
    }
}

impl DiversityConfig {
    pub fn validate(&self) -> Result<()> {
        if self.segment < 1 {
            return Err(TagstatError::invalid_argument(
                "diversity segment size must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Behaviour when a transformation is recorded under an existing name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep both records; lookups resolve to the most recent one.
    #[default]
    Append,

    /// Drop the earlier record with the same name.
    Replace,
}
