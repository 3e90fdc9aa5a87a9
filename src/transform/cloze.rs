//! Cloze deletion.
//!
//! Among the rows whose tag is a word tag, the first `offset` are skipped;
//! counting the remaining ones from 1, every row whose ordinal is a
//! multiple of `period` gets its token replaced by a blank. With `n`
//! eligible rows exactly `floor((n - offset) / period)` rows are masked.
//!
//! The blank repeats `blank_char` either `blank_width` times or, when the
//! width is 0, as many times as the masked token has characters.
//!
//! [`cloze_report`] covers the `offset = all` mode: it runs the deletion for
//! every offset in `0..period` and hands one [`ClozeVariantReport`] per
//! offset to a [`ClozeReporter`] without producing a document.
//!
//! # Examples
//!
//! ```
//! use tagstat::prelude::*;
//!
//! let session = Session::with_english(SessionConfig::default()).unwrap();
//! let doc = session
//!     .ingest(
//!         vec![("a", "DT", "a"), ("red", "JJ", "red"), ("fox", "NN", "fox")],
//!         "en",
//!         None,
//!     )
//!     .unwrap();
//!
//! let cloze = ClozeDeletion::new(2, 0).unwrap().with_blank_char('#');
//! let doc = doc.transform(&cloze).unwrap();
//! assert_eq!(doc.tokens().tokens(), vec!["a", "###", "fox"]);
//! ```

use serde::Serialize;

use crate::analysis::table::TokenTable;
use crate::config::{ClozeConfig, ClozeOffset};
use crate::diff::{self, percentage};
use crate::error::{Result, TagstatError};
use crate::stats::summary::{WordClassSummary, summarize};
use crate::transform::Transform;

/// Name under which cloze deletions are recorded.
pub const CLOZE_DELETE: &str = "clozeDelete";

/// Periodic masking of eligible words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClozeDeletion {
    period: usize,
    offset: usize,
    blank_char: char,
    blank_width: usize,
}

impl ClozeDeletion {
    /// Create a deletion masking every `period`-th word after skipping `offset`.
    ///
    /// Fails with an invalid argument unless `period >= 1` and `offset < period`.
    pub fn new(period: usize, offset: usize) -> Result<Self> {
        let deletion = ClozeDeletion {
            period,
            offset,
            blank_char: '_',
            blank_width: 0,
        };
        deletion.validate()?;
        Ok(deletion)
    }

    /// Create a deletion from a configuration with a fixed offset.
    ///
    /// `offset = all` is a reporting mode, not a single transformation; use
    /// [`cloze_report`] for it.
    pub fn from_config(config: &ClozeConfig) -> Result<Self> {
        config.validate()?;
        match config.offset {
            ClozeOffset::Fixed(offset) => Ok(ClozeDeletion::new(config.period, offset)?
                .with_blank_char(config.blank_char)
                .with_blank_width(config.blank_width)),
            ClozeOffset::All => Err(TagstatError::invalid_argument(
                "cloze offset \"all\" produces reports only, use cloze_report",
            )),
        }
    }

    pub fn with_blank_char(mut self, blank_char: char) -> Self {
        self.blank_char = blank_char;
        self
    }

    pub fn with_blank_width(mut self, blank_width: usize) -> Self {
        self.blank_width = blank_width;
        self
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    fn validate(&self) -> Result<()> {
        ClozeConfig::new(self.period, ClozeOffset::Fixed(self.offset)).validate()
    }

    /// Row positions this deletion masks in `tokens`.
    pub fn masked_positions(&self, tokens: &TokenTable) -> Vec<usize> {
        tokens
            .word_positions()
            .into_iter()
            .skip(self.offset)
            .enumerate()
            .filter(|(ordinal, _)| (ordinal + 1) % self.period == 0)
            .map(|(_, position)| position)
            .collect()
    }

    fn blank_for(&self, token_chars: usize) -> String {
        let width = if self.blank_width == 0 {
            token_chars
        } else {
            self.blank_width
        };
        std::iter::repeat_n(self.blank_char, width).collect()
    }
}

impl Transform for ClozeDeletion {
    fn apply(&self, tokens: &TokenTable) -> Result<TokenTable> {
        self.validate()?;
        let replacements: Vec<(usize, String)> = self
            .masked_positions(tokens)
            .into_iter()
            .filter_map(|position| {
                tokens
                    .get(position)
                    .map(|row| (position, self.blank_for(row.char_len())))
            })
            .collect();
        tokens.replace_tokens(replacements)
    }

    fn name(&self) -> &'static str {
        CLOZE_DELETE
    }
}

/// What one offset of a cloze deletion removes from a text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClozeVariantReport {
    pub period: usize,
    pub offset: usize,
    pub masked_tokens: usize,
    pub letters_removed: usize,
    pub total_letters: usize,
    pub pct_letters_removed: f64,
    /// Word-class distribution with the masked rows as selection.
    pub summary: WordClassSummary,
}

/// Receiver of cloze variant reports.
pub trait ClozeReporter {
    fn report(&mut self, report: &ClozeVariantReport);
}

impl<F> ClozeReporter for F
where
    F: FnMut(&ClozeVariantReport),
{
    fn report(&mut self, report: &ClozeVariantReport) {
        self(report)
    }
}

/// Reporter that writes every variant to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ClozeReporter for LogReporter {
    fn report(&mut self, report: &ClozeVariantReport) {
        tracing::info!(
            period = report.period,
            offset = report.offset,
            masked_tokens = report.masked_tokens,
            letters_removed = report.letters_removed,
            pct_letters_removed = report.pct_letters_removed,
            "cloze variant"
        );
        for row in report.summary.rows() {
            tracing::info!(
                offset = report.offset,
                wclass = row.wclass.as_str(),
                count = row.count,
                masked = row.selected.unwrap_or(0),
                pct_masked_of_class = row.pct_selected_of_class,
                "cloze variant word class"
            );
        }
    }
}

/// Report the effect of cloze deletion for the configured offset, or for
/// every offset in `0..period` when the offset is `all`.
///
/// Nothing is returned; results only reach the reporter.
pub fn cloze_report(
    tokens: &TokenTable,
    config: &ClozeConfig,
    reporter: &mut dyn ClozeReporter,
) -> Result<()> {
    config.validate()?;
    let offsets: Vec<usize> = match config.offset {
        ClozeOffset::Fixed(offset) => vec![offset],
        ClozeOffset::All => (0..config.period).collect(),
    };

    let total_letters = tokens.total_letters();
    for offset in offsets {
        let deletion = ClozeDeletion::new(config.period, offset)?
            .with_blank_char(config.blank_char)
            .with_blank_width(config.blank_width);
        let masked = deletion.apply(tokens)?;
        let record = diff::compare(CLOZE_DELETE, tokens, &masked)?;
        let changed: Vec<bool> = record.equality_mask().iter().map(|eq| !eq).collect();

        let letters_removed = tokens
            .iter()
            .zip(&changed)
            .filter(|(_, c)| **c)
            .map(|(row, _)| row.letters)
            .sum();

        let report = ClozeVariantReport {
            period: config.period,
            offset,
            masked_tokens: record.changed_count(),
            letters_removed,
            total_letters,
            pct_letters_removed: percentage(letters_removed, total_letters),
            summary: summarize(tokens, Some(&changed))?,
        };
        reporter.report(&report);
    }
    Ok(())
}
