//! Tagged documents and their transformation history.
//!
//! A [`TaggedDocument`] owns the pristine ingested [`TokenTable`], the
//! current table (after the latest transformation) and the ordered list of
//! [`TransformRecord`]s. Transformations consume the document and return a
//! new one, so a table is never mutated behind the back of someone holding
//! the previous version.

use std::sync::Arc;

use crate::analysis::stem::Stemmer;
use crate::analysis::stopword::StopWordList;
use crate::analysis::table::TokenTable;
use crate::analysis::token::TokenRecord;
use crate::config::DuplicatePolicy;
use crate::diff::{self, TransformRecord};
use crate::error::{Result, TagstatError};
use crate::hyphen::Hyphenation;
use crate::transform::{Transform, annotate};

/// A tagged document plus every transformation applied to it.
#[derive(Clone, Debug)]
pub struct TaggedDocument {
    original: Arc<TokenTable>,
    current: TokenTable,
    transforms: Vec<TransformRecord>,
    hyphenation: Option<Hyphenation>,
    duplicate_policy: DuplicatePolicy,
}

impl TaggedDocument {
    /// Wrap a freshly ingested table.
    pub fn new(table: TokenTable) -> Self {
        TaggedDocument {
            original: Arc::new(table.clone()),
            current: table,
            transforms: Vec::new(),
            hyphenation: None,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    /// Choose how reused transformation names are handled.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn doc_id(&self) -> &str {
        self.current.doc_id()
    }

    pub fn language(&self) -> &str {
        self.current.language()
    }

    /// The table as ingested, before any transformation.
    pub fn original(&self) -> &TokenTable {
        &self.original
    }

    /// The table after the latest transformation.
    pub fn tokens(&self) -> &TokenTable {
        &self.current
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// All transformation records, oldest first.
    pub fn transforms(&self) -> &[TransformRecord] {
        &self.transforms
    }

    /// The most recently recorded transformation.
    pub fn active_transform(&self) -> Option<&TransformRecord> {
        self.transforms.last()
    }

    /// Look up a transformation by name.
    ///
    /// When several records share the name the most recent one wins and a
    /// warning is logged.
    pub fn transform_record(&self, name: &str) -> Result<&TransformRecord> {
        let mut matches = self.transforms.iter().filter(|r| r.name() == name);
        let first = matches.next_back().ok_or_else(|| {
            TagstatError::not_found(format!(
                "transformation '{name}' on document '{}'",
                self.doc_id()
            ))
        })?;
        let others = matches.count();
        if others > 0 {
            tracing::warn!(
                doc_id = self.doc_id(),
                name,
                duplicates = others + 1,
                "several transformations share this name, using the most recent"
            );
        }
        Ok(first)
    }

    /// Apply a transformation to the current table and record the diff.
    pub fn transform(self, transform: &dyn Transform) -> Result<Self> {
        let next = transform.apply(&self.current)?;
        self.record(transform.name(), next)
    }

    /// Record `next` as the result of a transformation called `name`.
    pub(crate) fn record(mut self, name: &str, next: TokenTable) -> Result<Self> {
        let record = diff::compare(name, &self.current, &next)?;
        if self.duplicate_policy == DuplicatePolicy::Replace {
            self.transforms.retain(|r| r.name() != name);
        }
        tracing::debug!(
            doc_id = self.doc_id(),
            name,
            changed = record.changed_count(),
            "recorded transformation"
        );
        self.transforms.push(record);
        self.current = next;
        Ok(self)
    }

    /// Mark stopwords on word rows. Token text is untouched, so no
    /// transformation is recorded.
    pub fn annotate_stopwords(mut self, stopwords: &StopWordList) -> Self {
        self.current = annotate::annotate_stopwords(&self.current, stopwords);
        self
    }

    /// Attach stems to word rows. Token text is untouched, so no
    /// transformation is recorded.
    pub fn annotate_stems(mut self, stemmer: &dyn Stemmer) -> Self {
        self.current = annotate::annotate_stems(&self.current, stemmer);
        self
    }

    /// The ingested token text with the current annotations, so blanks and
    /// rewrites left by transformations never reach a hyphenator.
    pub(crate) fn annotated_original(&self) -> Result<TokenTable> {
        let rows = self
            .original
            .iter()
            .zip(self.current.iter())
            .map(|(original, current)| TokenRecord {
                stopword: current.stopword,
                stem: current.stem.clone(),
                ..original.clone()
            })
            .collect();
        TokenTable::from_rows(self.language(), self.doc_id(), rows)
    }

    pub fn hyphenation(&self) -> Option<&Hyphenation> {
        self.hyphenation.as_ref()
    }

    /// Attach hyphenation results; they must be aligned with the table.
    pub fn with_hyphenation(mut self, hyphenation: Hyphenation) -> Result<Self> {
        if hyphenation.len() != self.current.len() {
            return Err(TagstatError::invalid_argument(format!(
                "hyphenation covers {} rows but document '{}' has {}",
                hyphenation.len(),
                self.doc_id(),
                self.current.len()
            )));
        }
        self.hyphenation = Some(hyphenation);
        Ok(self)
    }
}
