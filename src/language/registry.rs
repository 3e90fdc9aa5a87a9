//! Session-wide registry of classification indices.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::error::{Result, TagstatError};
use crate::language::{ClassificationIndex, LanguagePack, TagInfo};

/// Registry of [`ClassificationIndex`]es keyed by language code.
///
/// Indices are either registered eagerly or built lazily from a
/// [`LanguagePack`] on first lookup. Once present an index is never
/// replaced or invalidated for the lifetime of the registry. Lookups take a
/// read lock only; the write lock is held just long enough to insert.
/// Registration locks `packs` before `indices`, and no other path holds
/// both at once.
#[derive(Default)]
pub struct LanguageRegistry {
    indices: RwLock<AHashMap<String, Arc<ClassificationIndex>>>,
    packs: RwLock<AHashMap<String, Arc<dyn LanguagePack>>>,
}

impl fmt::Debug for LanguageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loaded = self.indices.read().len();
        let packs = self.packs.read().len();
        f.debug_struct("LanguageRegistry")
            .field("loaded", &loaded)
            .field("packs", &packs)
            .finish()
    }
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and register an index from its three tag tables.
    pub fn register_language<S, W, P, E>(
        &self,
        code: &str,
        words: W,
        punctuation: P,
        sentence_end: E,
    ) -> Result<Arc<ClassificationIndex>>
    where
        S: Into<String>,
        W: IntoIterator<Item = (S, TagInfo)>,
        P: IntoIterator<Item = (S, TagInfo)>,
        E: IntoIterator<Item = (S, TagInfo)>,
    {
        let index = ClassificationIndex::new(code, words, punctuation, sentence_end)?;
        self.register_index(index)
    }

    /// Register an already built index.
    pub fn register_index(&self, index: ClassificationIndex) -> Result<Arc<ClassificationIndex>> {
        let code = index.language().to_string();
        let packs = self.packs.write();
        let mut indices = self.indices.write();
        if packs.contains_key(&code) || indices.contains_key(&code) {
            return Err(already_registered(&code));
        }
        let index = Arc::new(index);
        indices.insert(code, Arc::clone(&index));
        Ok(index)
    }

    /// Register a pack whose index is built on first use.
    pub fn register_pack(&self, pack: Arc<dyn LanguagePack>) -> Result<()> {
        let code = pack.code().to_string();
        let mut packs = self.packs.write();
        let indices = self.indices.write();
        if packs.contains_key(&code) || indices.contains_key(&code) {
            return Err(already_registered(&code));
        }
        packs.insert(code, pack);
        Ok(())
    }

    /// Fetch the index for `code`, building it from its pack if needed.
    ///
    /// Fails with a configuration error when the language is unknown.
    pub fn get(&self, code: &str) -> Result<Arc<ClassificationIndex>> {
        if let Some(index) = self.indices.read().get(code) {
            return Ok(Arc::clone(index));
        }

        let pack = self.packs.read().get(code).cloned().ok_or_else(|| {
            TagstatError::configuration(format!("no classification index registered for language '{code}'"))
        })?;

        let built = pack.build()?;
        if built.language() != code {
            return Err(TagstatError::configuration(format!(
                "language pack '{code}' built an index for '{}'",
                built.language()
            )));
        }
        tracing::debug!(language = code, tags = built.len(), "loaded language pack");

        // Another thread may have won the race; keep whichever landed first.
        let mut indices = self.indices.write();
        let index = indices
            .entry(code.to_string())
            .or_insert_with(|| Arc::new(built));
        Ok(Arc::clone(index))
    }

    /// Whether `code` is registered, loaded or not.
    pub fn is_registered(&self, code: &str) -> bool {
        let loaded = self.indices.read().contains_key(code);
        loaded || self.packs.read().contains_key(code)
    }

    /// Sorted list of registered language codes.
    pub fn languages(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.indices.read().keys().cloned().collect();
        let packs = self.packs.read();
        for code in packs.keys() {
            if !codes.contains(code) {
                codes.push(code.clone());
            }
        }
        codes.sort();
        codes
    }
}

fn already_registered(code: &str) -> TagstatError {
    TagstatError::configuration(format!("language '{code}' is already registered"))
}
