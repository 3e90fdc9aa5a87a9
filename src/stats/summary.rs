//! Word-class distribution of a table, optionally against a selection.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::document::TaggedDocument;
use crate::analysis::table::TokenTable;
use crate::diff::{self, DiffSelector, check_mask_len, percentage};
use crate::error::Result;

/// One word class of a [`WordClassSummary`].
///
/// Percentages are `None` for non-word classes (punctuation, sentence ends,
/// unknown tags). Selection columns are `None` when no selection was given.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordClassRow {
    pub wclass: String,
    pub is_word: bool,
    pub count: usize,
    /// Share of this class among all word rows.
    pub pct: Option<f64>,
    pub selected: Option<usize>,
    /// Selected rows of this class relative to all word rows.
    pub pct_selected_of_all: Option<f64>,
    /// Selected rows of this class relative to the class itself.
    pub pct_selected_of_class: Option<f64>,
}

/// Word classes ordered by descending count, followed by non-word classes
/// in order of first appearance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordClassSummary {
    rows: Vec<WordClassRow>,
    total_tokens: usize,
    word_tokens: usize,
    selected_tokens: Option<usize>,
}

impl WordClassSummary {
    pub fn rows(&self) -> &[WordClassRow] {
        &self.rows
    }

    pub fn row(&self, wclass: &str) -> Option<&WordClassRow> {
        self.rows.iter().find(|r| r.wclass == wclass)
    }

    pub fn total_tokens(&self) -> usize {
        self.total_tokens
    }

    pub fn word_tokens(&self) -> usize {
        self.word_tokens
    }

    /// Number of selected rows of any class, if a selection was given.
    pub fn selected_tokens(&self) -> Option<usize> {
        self.selected_tokens
    }

    /// Selected rows as a percentage of all rows.
    pub fn pct_selected(&self) -> Option<f64> {
        self.selected_tokens
            .map(|selected| percentage(selected, self.total_tokens))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Default)]
struct Tally {
    first_seen: usize,
    is_word: bool,
    count: usize,
    selected: usize,
}

/// Summarise word classes, with `selection[i] == true` marking selected rows.
pub fn summarize(tokens: &TokenTable, selection: Option<&[bool]>) -> Result<WordClassSummary> {
    if let Some(mask) = selection {
        check_mask_len(mask, tokens.len())?;
    }

    let mut tallies: AHashMap<&str, Tally> = AHashMap::new();
    for (position, row) in tokens.iter().enumerate() {
        let next = tallies.len();
        let tally = tallies.entry(row.wclass.as_str()).or_insert_with(|| Tally {
            first_seen: next,
            is_word: row.is_word(),
            ..Tally::default()
        });
        tally.count += 1;
        if selection.is_some_and(|mask| mask[position]) {
            tally.selected += 1;
        }
    }

    let word_tokens = tokens.word_count();
    let mut tallies: Vec<(&str, Tally)> = tallies.into_iter().collect();
    tallies.sort_by_key(|(_, t)| t.first_seen);
    let (mut words, others): (Vec<_>, Vec<_>) = tallies.into_iter().partition(|(_, t)| t.is_word);
    // stable, so equal counts keep appearance order
    words.sort_by(|a, b| b.1.count.cmp(&a.1.count));

    let has_selection = selection.is_some();
    let rows = words
        .into_iter()
        .chain(others)
        .map(|(wclass, t)| {
            let selected = has_selection.then_some(t.selected);
            let word_pct = |value: f64| (t.is_word).then_some(value);
            WordClassRow {
                wclass: wclass.to_string(),
                is_word: t.is_word,
                count: t.count,
                pct: word_pct(percentage(t.count, word_tokens)),
                selected,
                pct_selected_of_all: selected
                    .and_then(|s| word_pct(percentage(s, word_tokens))),
                pct_selected_of_class: selected
                    .and_then(|s| word_pct(percentage(s, t.count))),
            }
        })
        .collect();

    Ok(WordClassSummary {
        rows,
        total_tokens: tokens.len(),
        word_tokens,
        selected_tokens: selection.map(|mask| mask.iter().filter(|&&s| s).count()),
    })
}

/// Summarise the original table of a document with the rows changed under
/// `selector` as selection.
pub fn summarize_document(
    document: &TaggedDocument,
    selector: DiffSelector<'_>,
) -> Result<WordClassSummary> {
    let changed = diff::changed_rows(document, selector)?;
    summarize(document.original(), Some(&changed))
}
