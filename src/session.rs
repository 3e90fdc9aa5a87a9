//! Analysis session.
//!
//! A [`Session`] is the explicit owner of everything that outlives a single
//! document: the configuration, the language registry and the hyphenation
//! cache. Documents themselves are independent values; a session can be
//! shared between threads and used to process many documents concurrently.

use std::sync::Arc;

use crate::analysis::document::TaggedDocument;
use crate::analysis::table;
use crate::analysis::token::RawToken;
use crate::config::SessionConfig;
use crate::error::{Result, TagstatError};
use crate::hyphen::{self, HyphenationCache, Hyphenator};
use crate::language::{EnglishPack, LanguagePack, LanguageRegistry, TagInfo};
use crate::stats::descriptive::{self, Descriptives};
use crate::stats::lexdiv::{self, LexicalDiversity};
use crate::transform::cloze::{self, ClozeDeletion, ClozeReporter};

#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    registry: Arc<LanguageRegistry>,
    hyphen_cache: HyphenationCache,
}

impl Session {
    /// Create a session with an empty language registry.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::with_registry(config, Arc::new(LanguageRegistry::new()))
    }

    /// Create a session with the built-in English tag set registered.
    pub fn with_english(config: SessionConfig) -> Result<Self> {
        let session = Self::new(config)?;
        session.register_pack(Arc::new(EnglishPack::new()))?;
        Ok(session)
    }

    /// Create a session around an existing, possibly shared, registry.
    pub fn with_registry(config: SessionConfig, registry: Arc<LanguageRegistry>) -> Result<Self> {
        config.validate()?;
        Ok(Session {
            config,
            registry,
            hyphen_cache: HyphenationCache::new(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn hyphenation_cache(&self) -> &HyphenationCache {
        &self.hyphen_cache
    }

    /// Register the tag tables of a language.
    pub fn register_language<S, W, P, E>(
        &self,
        code: &str,
        words: W,
        punctuation: P,
        sentence_end: E,
    ) -> Result<()>
    where
        S: Into<String>,
        W: IntoIterator<Item = (S, TagInfo)>,
        P: IntoIterator<Item = (S, TagInfo)>,
        E: IntoIterator<Item = (S, TagInfo)>,
    {
        self.registry
            .register_language(code, words, punctuation, sentence_end)
            .map(|_| ())
    }

    /// Register a lazily built language pack.
    pub fn register_pack(&self, pack: Arc<dyn LanguagePack>) -> Result<()> {
        self.registry.register_pack(pack)
    }

    /// Ingest raw tagger output into a new document.
    pub fn ingest<I, R>(&self, raw: I, language: &str, doc_id: Option<&str>) -> Result<TaggedDocument>
    where
        I: IntoIterator<Item = R>,
        R: Into<RawToken>,
    {
        let table = table::ingest(&self.registry, raw, language, doc_id)?;
        Ok(TaggedDocument::new(table).with_duplicate_policy(self.config.duplicate_transforms))
    }

    /// Ingest several documents of one language in parallel.
    pub fn ingest_batch(
        &self,
        documents: Vec<(Option<String>, Vec<RawToken>)>,
        language: &str,
    ) -> Result<Vec<TaggedDocument>> {
        let policy = self.config.duplicate_transforms;
        Ok(table::ingest_batch(&self.registry, documents, language)?
            .into_iter()
            .map(|table| TaggedDocument::new(table).with_duplicate_policy(policy))
            .collect())
    }

    /// Apply cloze deletion with the configured parameters.
    ///
    /// An `all` offset is a reporting mode; use [`cloze_report`](Self::cloze_report).
    pub fn cloze(&self, document: TaggedDocument) -> Result<TaggedDocument> {
        let deletion = ClozeDeletion::from_config(&self.config.cloze)?;
        document.transform(&deletion)
    }

    /// Report cloze variants of the document's current table.
    pub fn cloze_report(
        &self,
        document: &TaggedDocument,
        reporter: &mut dyn ClozeReporter,
    ) -> Result<()> {
        cloze::cloze_report(document.tokens(), &self.config.cloze, reporter)
    }

    /// Hyphenate the eligible words of the ingested text, going through the
    /// session cache.
    ///
    /// Stopword flags come from the current table; token text always comes
    /// from the original, so cloze blanks are never hyphenated.
    pub fn hyphenate(
        &self,
        document: TaggedDocument,
        hyphenator: &dyn Hyphenator,
    ) -> Result<TaggedDocument> {
        let hyphenation = hyphen::hyphenate_table(
            &document.annotated_original()?,
            hyphenator,
            &self.hyphen_cache,
            &self.config.hyphenation,
        )?;
        document.with_hyphenation(hyphenation)
    }

    /// Replace the hyphenation of some words, in the document and in the
    /// cache so later documents pick the correction up.
    pub fn correct_hyphenation(
        &self,
        document: TaggedDocument,
        corrections: &[(&str, &str)],
    ) -> Result<TaggedDocument> {
        let current = document.hyphenation().ok_or_else(|| {
            TagstatError::not_found(format!(
                "document '{}' has not been hyphenated",
                document.doc_id()
            ))
        })?;
        let corrected = current.correct(corrections)?;
        for (word, _) in corrections {
            let word = word.to_lowercase();
            if let Some(entry) = corrected.entries().find(|e| e.word == word) {
                self.hyphen_cache
                    .overwrite(corrected.patterns(), entry.clone());
            }
        }
        document.with_hyphenation(corrected)
    }

    /// Descriptive counts of the ingested text, with syllables if hyphenated.
    pub fn describe(&self, document: &TaggedDocument) -> Result<Descriptives> {
        descriptive::describe(document.original(), document.hyphenation())
    }

    /// Lexical diversity of the ingested text with the configured options.
    pub fn lexical_diversity(&self, document: &TaggedDocument) -> Result<LexicalDiversity> {
        lexdiv::lexical_diversity(document.original(), &self.config.diversity)
    }
}
