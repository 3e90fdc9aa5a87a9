//! Token tables and ingestion.
//!
//! A [`TokenTable`] is the canonical form of a tagged document: an ordered
//! list of [`TokenRecord`]s in document order. Tables are produced by
//! [`ingest`] and never grow or shrink afterwards; transformations build a
//! new table of the same length with some token texts replaced.

use std::collections::BTreeSet;

use ahash::AHashSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::token::{RawToken, TokenRecord, count_letters};
use crate::error::{Result, TagstatError};
use crate::language::{ClassificationIndex, LanguageRegistry, TagKind, UNKNOWN_WCLASS};

/// Ordered, position-indexed rows of one tagged document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenTable {
    language: String,
    doc_id: String,
    rows: Vec<TokenRecord>,
}

impl TokenTable {
    /// Classify and index raw tagger output with an already resolved index.
    ///
    /// Tags missing from `index` are kept with word class `unknown`; each
    /// distinct missing tag is logged once.
    pub fn ingest<I, R>(raw: I, index: &ClassificationIndex, doc_id: &str) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RawToken>,
    {
        let mut sentence = 1;
        let mut unknown: BTreeSet<String> = BTreeSet::new();

        let rows: Vec<TokenRecord> = raw
            .into_iter()
            .map(|raw| {
                let RawToken { token, tag, lemma } = raw.into();
                let (kind, wclass, description) = match index.lookup(&tag) {
                    Some(entry) => (entry.kind, entry.wclass.clone(), entry.description.clone()),
                    None => {
                        unknown.insert(tag.clone());
                        (TagKind::Unknown, UNKNOWN_WCLASS.to_string(), String::new())
                    }
                };
                let sentence_end = kind == TagKind::SentenceEnd;
                let record = TokenRecord {
                    letters: count_letters(&token),
                    token,
                    tag,
                    lemma,
                    wclass,
                    description,
                    kind,
                    sentence,
                    doc_id: doc_id.to_string(),
                    sentence_end,
                    stopword: false,
                    stem: None,
                };
                if sentence_end {
                    sentence += 1;
                }
                record
            })
            .collect();

        for tag in &unknown {
            tracing::warn!(
                language = index.language(),
                doc_id,
                tag = tag.as_str(),
                "tag not found in classification index"
            );
        }
        tracing::debug!(
            language = index.language(),
            doc_id,
            rows = rows.len(),
            "ingested tagged document"
        );

        TokenTable {
            language: index.language().to_string(),
            doc_id: doc_id.to_string(),
            rows,
        }
    }

    /// Rebuild a table from rows, checking that sentence numbers never decrease.
    pub fn from_rows(language: &str, doc_id: &str, rows: Vec<TokenRecord>) -> Result<Self> {
        if let Some(window) = rows.windows(2).find(|w| w[1].sentence < w[0].sentence) {
            return Err(TagstatError::analysis(format!(
                "sentence index decreases from {} to {} at token {:?}",
                window[0].sentence, window[1].sentence, window[1].token
            )));
        }
        Ok(TokenTable {
            language: language.to_string(),
            doc_id: doc_id.to_string(),
            rows,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    pub fn rows(&self) -> &[TokenRecord] {
        &self.rows
    }

    pub fn get(&self, position: usize) -> Option<&TokenRecord> {
        self.rows.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TokenRecord> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Token texts in document order.
    pub fn tokens(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.token.as_str()).collect()
    }

    /// Positions of rows whose tag is a word tag.
    pub fn word_positions(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_word())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn word_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_word()).count()
    }

    /// Sum of `letters` over all rows.
    pub fn total_letters(&self) -> usize {
        self.rows.iter().map(|r| r.letters).sum()
    }

    /// Number of sentences touched by the table.
    pub fn sentence_count(&self) -> usize {
        let sentences: AHashSet<usize> = self.rows.iter().map(|r| r.sentence).collect();
        sentences.len()
    }

    /// Copy the table with the token text of some rows replaced.
    ///
    /// Row count and every other field are preserved; an out-of-range
    /// position is an invalid argument and nothing is replaced.
    pub fn replace_tokens<I>(&self, replacements: I) -> Result<TokenTable>
    where
        I: IntoIterator<Item = (usize, String)>,
    {
        let mut rows = self.rows.clone();
        for (position, token) in replacements {
            let row = rows.get_mut(position).ok_or_else(|| {
                TagstatError::invalid_argument(format!(
                    "position {position} is outside a table of {} rows",
                    self.rows.len()
                ))
            })?;
            row.token = token;
        }
        Ok(TokenTable {
            language: self.language.clone(),
            doc_id: self.doc_id.clone(),
            rows,
        })
    }

    /// Copy the table, letting `f` edit each row's annotations.
    ///
    /// `f` must not change the token text; use [`replace_tokens`](Self::replace_tokens)
    /// for that.
    pub(crate) fn annotate<F>(&self, mut f: F) -> TokenTable
    where
        F: FnMut(&mut TokenRecord),
    {
        let mut rows = self.rows.clone();
        for row in &mut rows {
            f(row);
        }
        TokenTable {
            language: self.language.clone(),
            doc_id: self.doc_id.clone(),
            rows,
        }
    }

    /// Serialize as a row-oriented JSON array.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.rows)?)
    }

    pub fn into_rows(self) -> Vec<TokenRecord> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a TokenTable {
    type Item = &'a TokenRecord;
    type IntoIter = std::slice::Iter<'a, TokenRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Generate a document id of the form `doc-<uuid>`.
pub fn generate_doc_id() -> String {
    format!("doc-{}", uuid::Uuid::new_v4())
}

/// Ingest raw tagger output for `language`.
///
/// Fails with a configuration error when the language has no registered
/// classification index. A missing or blank `doc_id` is replaced by a
/// generated one.
pub fn ingest<I, R>(
    registry: &LanguageRegistry,
    raw: I,
    language: &str,
    doc_id: Option<&str>,
) -> Result<TokenTable>
where
    I: IntoIterator<Item = R>,
    R: Into<RawToken>,
{
    let index = registry.get(language)?;
    let doc_id = match doc_id {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => generate_doc_id(),
    };
    Ok(TokenTable::ingest(raw, &index, &doc_id))
}

/// Ingest several independent documents of one language in parallel.
///
/// Results keep the order of `documents`.
pub fn ingest_batch(
    registry: &LanguageRegistry,
    documents: Vec<(Option<String>, Vec<RawToken>)>,
    language: &str,
) -> Result<Vec<TokenTable>> {
    let index = registry.get(language)?;
    let tables = documents
        .into_par_iter()
        .map(|(doc_id, raw)| {
            let doc_id = match doc_id {
                Some(id) if !id.trim().is_empty() => id,
                _ => generate_doc_id(),
            };
            TokenTable::ingest(raw, &index, &doc_id)
        })
        .collect();
    Ok(tables)
}
