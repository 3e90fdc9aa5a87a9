//! Diff tracking between an original token sequence and its transformations.
//!
//! Every transformation leaves a [`TransformRecord`]: its name plus an
//! equality mask with one entry per row, `true` where the token text is the
//! same as before the transformation. Because transformations never add or
//! remove rows, masks of all records of a document line up positionally.
//!
//! [`diff`] resolves a [`DiffSelector`] to an equality mask, [`changed_rows`]
//! gives its negation (the rows a transformation touched) and
//! [`diff_stats`] summarises how much of the text was altered.
//!
//! # Examples
//!
//! ```
//! use tagstat::diff::{self, DiffSelector};
//! use tagstat::prelude::*;
//!
//! let session = Session::with_english(SessionConfig::default()).unwrap();
//! let doc = session
//!     .ingest(vec![("one", "CD", "one"), ("dog", "NN", "dog")], "en", Some("d"))
//!     .unwrap();
//! let doc = doc
//!     .transform(&ClozeDeletion::new(2, 0).unwrap())
//!     .unwrap();
//!
//! assert_eq!(diff::diff(&doc, DiffSelector::Active).unwrap(), vec![true, false]);
//! assert_eq!(diff::changed_rows(&doc, DiffSelector::Active).unwrap(), vec![false, true]);
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::document::TaggedDocument;
use crate::analysis::table::TokenTable;
use crate::error::{Result, TagstatError};

/// Name and equality mask of one applied transformation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformRecord {
    name: String,
    equality: Vec<bool>,
}

impl TransformRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` where the token is unchanged by this transformation.
    pub fn equality_mask(&self) -> &[bool] {
        &self.equality
    }

    pub fn len(&self) -> usize {
        self.equality.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equality.is_empty()
    }

    pub fn changed_count(&self) -> usize {
        self.equality.iter().filter(|&&eq| !eq).count()
    }

    pub fn changed_positions(&self) -> Vec<usize> {
        self.equality
            .iter()
            .enumerate()
            .filter(|(_, eq)| !**eq)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Compare two aligned tables and record which token texts differ.
///
/// Fails with an analysis error when the tables differ in length or belong
/// to different documents.
pub fn compare(name: &str, before: &TokenTable, after: &TokenTable) -> Result<TransformRecord> {
    if name.is_empty() {
        return Err(TagstatError::invalid_argument("transformation name must not be empty"));
    }
    if before.len() != after.len() {
        return Err(TagstatError::analysis(format!(
            "transformation '{name}' changed the row count from {} to {}",
            before.len(),
            after.len()
        )));
    }
    if before.doc_id() != after.doc_id() {
        return Err(TagstatError::analysis(format!(
            "transformation '{name}' compared document '{}' with '{}'",
            before.doc_id(),
            after.doc_id()
        )));
    }

    let equality = before
        .iter()
        .zip(after.iter())
        .map(|(b, a)| b.token == a.token)
        .collect();

    Ok(TransformRecord {
        name: name.to_string(),
        equality,
    })
}

/// Which equality mask to use for a diff query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiffSelector<'a> {
    /// The most recently applied transformation.
    #[default]
    Active,
    /// The original table against the current one, all transformations combined.
    AllChanged,
    /// The most recent transformation with this name.
    Named(&'a str),
    /// A caller supplied equality mask, used as-is after a length check.
    Mask(&'a [bool]),
}

/// Resolve a selector to an equality mask (`true` = unchanged).
pub fn diff(document: &TaggedDocument, selector: DiffSelector<'_>) -> Result<Vec<bool>> {
    match selector {
        DiffSelector::Active => document
            .active_transform()
            .map(|r| r.equality_mask().to_vec())
            .ok_or_else(|| {
                TagstatError::not_found(format!(
                    "document '{}' has no transformations",
                    document.doc_id()
                ))
            }),
        DiffSelector::AllChanged => {
            Ok(compare("all", document.original(), document.tokens())?.equality)
        }
        DiffSelector::Named(name) => Ok(document.transform_record(name)?.equality_mask().to_vec()),
        DiffSelector::Mask(mask) => {
            check_mask_len(mask, document.len())?;
            Ok(mask.to_vec())
        }
    }
}

/// Rows changed under the selector: the negation of [`diff`].
pub fn changed_rows(document: &TaggedDocument, selector: DiffSelector<'_>) -> Result<Vec<bool>> {
    Ok(diff(document, selector)?.into_iter().map(|eq| !eq).collect())
}

pub(crate) fn check_mask_len(mask: &[bool], rows: usize) -> Result<()> {
    if mask.len() != rows {
        return Err(TagstatError::invalid_argument(format!(
            "mask has {} entries but the table has {rows} rows",
            mask.len()
        )));
    }
    Ok(())
}

/// How much of a text a transformation altered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiffStats {
    pub tokens: usize,
    pub changed_tokens: usize,
    pub pct_changed_tokens: f64,
    pub letters: usize,
    pub changed_letters: usize,
    pub pct_changed_letters: f64,
}

/// Token and letter totals of the rows changed under the selector.
pub fn diff_stats(document: &TaggedDocument, selector: DiffSelector<'_>) -> Result<DiffStats> {
    let changed = changed_rows(document, selector)?;
    let table = document.original();

    let tokens = table.len();
    let letters = table.total_letters();
    let changed_tokens = changed.iter().filter(|&&c| c).count();
    let changed_letters = table
        .iter()
        .zip(&changed)
        .filter(|(_, c)| **c)
        .map(|(r, _)| r.letters)
        .sum();

    Ok(DiffStats {
        tokens,
        changed_tokens,
        pct_changed_tokens: percentage(changed_tokens, tokens),
        letters,
        changed_letters,
        pct_changed_letters: percentage(changed_letters, letters),
    })
}

/// `part / whole * 100`, or 0 when `whole` is 0.
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
