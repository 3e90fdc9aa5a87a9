//! Liang-style pattern hyphenation.
//!
//! Patterns use the TeX notation: letters interleaved with digits, where a
//! digit is the priority of a break between its neighbouring letters and
//! `.` anchors a pattern at a word boundary (`"1ba"`, `".ex5am"`). For a
//! word, every matching pattern contributes its priorities and the maximum
//! wins; odd priorities allow a break, even ones forbid it.

use ahash::AHashMap;

use crate::error::{Result, TagstatError};
use crate::hyphen::{HyphenEntry, Hyphenator, PatternId};

/// A compiled pattern set with its minimum fragment lengths.
#[derive(Clone, Debug)]
pub struct HyphenPatterns {
    patterns: AHashMap<String, Vec<u8>>,
    exceptions: AHashMap<String, String>,
    max_len: usize,
    left_min: usize,
    right_min: usize,
}

impl HyphenPatterns {
    /// Compile `patterns`. No break is placed within `left_min` characters
    /// of the word start or `right_min` of its end.
    pub fn new<'a, I>(patterns: I, left_min: usize, right_min: usize) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if left_min == 0 || right_min == 0 {
            return Err(TagstatError::configuration(
                "hyphenation minimums must be at least 1",
            ));
        }

        let mut compiled = AHashMap::new();
        let mut max_len = 0;
        for pattern in patterns {
            let (letters, values) = parse_pattern(pattern)?;
            max_len = max_len.max(letters.chars().count());
            compiled.insert(letters, values);
        }

        Ok(HyphenPatterns {
            patterns: compiled,
            exceptions: AHashMap::new(),
            max_len,
            left_min,
            right_min,
        })
    }

    /// Add an exception word given in its hyphenated form, e.g. `"ta-ble"`.
    pub fn with_exception(mut self, hyphenated: &str) -> Self {
        let word: String = hyphenated.chars().filter(|&c| c != '-').map(fold).collect();
        self.exceptions
            .insert(word, hyphenated.chars().map(fold).collect());
        self
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Positions in `word.chars()` before which a break is allowed.
    pub fn break_points(&self, word: &str) -> Vec<usize> {
        let lower: Vec<char> = word.chars().map(fold).collect();
        let n = lower.len();
        if n < self.left_min + self.right_min {
            return Vec::new();
        }

        let key: String = lower.iter().collect();
        if let Some(exception) = self.exceptions.get(&key) {
            let mut breaks = Vec::new();
            let mut position = 0;
            for c in exception.chars() {
                if c == '-' {
                    breaks.push(position);
                } else {
                    position += 1;
                }
            }
            return breaks;
        }

        let mut padded = Vec::with_capacity(n + 2);
        padded.push('.');
        padded.extend_from_slice(&lower);
        padded.push('.');

        let mut points = vec![0u8; padded.len() + 1];
        for start in 0..padded.len() {
            let longest = self.max_len.min(padded.len() - start);
            for len in 1..=longest {
                let fragment: String = padded[start..start + len].iter().collect();
                if let Some(values) = self.patterns.get(&fragment) {
                    for (offset, &value) in values.iter().enumerate() {
                        let slot = &mut points[start + offset];
                        *slot = (*slot).max(value);
                    }
                }
            }
        }

        // points[p + 1] sits between word characters p - 1 and p
        (self.left_min..=n - self.right_min)
            .filter(|&p| points[p + 1] % 2 == 1)
            .collect()
    }

    /// Hyphenate a single word, keeping its original case.
    pub fn hyphenate_word(&self, word: &str) -> String {
        let breaks = self.break_points(word);
        let mut out = String::with_capacity(word.len() + breaks.len());
        let mut next = breaks.iter().peekable();
        for (i, c) in word.chars().enumerate() {
            if next.peek() == Some(&&i) {
                out.push('-');
                next.next();
            }
            out.push(c);
        }
        out
    }
}

/// Lower-case `c` when that yields a single character, so folded words
/// keep one character per input character.
fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn parse_pattern(pattern: &str) -> Result<(String, Vec<u8>)> {
    let mut letters = String::new();
    let mut values = Vec::new();
    let mut pending = 0u8;
    for c in pattern.trim().chars() {
        match c.to_digit(10) {
            Some(digit) => pending = digit as u8,
            None => {
                values.push(pending);
                pending = 0;
                letters.extend(c.to_lowercase());
            }
        }
    }
    values.push(pending);

    if letters.is_empty() {
        return Err(TagstatError::configuration(format!(
            "hyphenation pattern '{pattern}' has no letters"
        )));
    }
    Ok((letters, values))
}

/// [`Hyphenator`] backed by a compiled pattern set.
#[derive(Clone, Debug)]
pub struct LiangHyphenator {
    id: PatternId,
    patterns: HyphenPatterns,
}

impl LiangHyphenator {
    pub fn new(id: PatternId, patterns: HyphenPatterns) -> Self {
        LiangHyphenator { id, patterns }
    }

    pub fn hyphen_patterns(&self) -> &HyphenPatterns {
        &self.patterns
    }
}

impl Hyphenator for LiangHyphenator {
    fn patterns(&self) -> &PatternId {
        &self.id
    }

    fn hyphenate(&self, words: &[String]) -> anyhow::Result<Vec<HyphenEntry>> {
        Ok(words
            .iter()
            .map(|word| HyphenEntry::from_hyphenated(word.clone(), self.patterns.hyphenate_word(word)))
            .collect())
    }
}
