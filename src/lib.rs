//! # tagstat
//!
//! Corpus text analysis over POS-tagged token streams.
//!
//! ## Features
//!
//! - Ingestion of `(token, tag, lemma)` triples into position-indexed token tables
//! - Language-specific tag classification through a session registry
//! - Cloze deletion, case normalisation, stopword and stem annotation
//! - Diff tracking of every transformation against the ingested text
//! - Word-class summaries, descriptive counts, corpus frequencies,
//!   lexical diversity and readability
//! - A hyphenation boundary with a shared, concurrent cache
//!
//! ## Example
//!
//! ```
//! use tagstat::prelude::*;
//!
//! let session = Session::with_english(SessionConfig::default()).unwrap();
//! let doc = session
//!     .ingest(
//!         vec![
//!             ("The", "DT", "the"),
//!             ("quick", "JJ", "quick"),
//!             ("brown", "JJ", "brown"),
//!             ("fox", "NN", "fox"),
//!             ("jumps", "VVZ", "jump"),
//!             (".", "SENT", "."),
//!         ],
//!         "en",
//!         Some("fox"),
//!     )
//!     .unwrap()
//!     .transform(&ClozeDeletion::new(5, 0).unwrap())
//!     .unwrap();
//!
//! assert_eq!(doc.tokens().get(4).unwrap().token, "_____");
//! let changed = changed_rows(&doc, DiffSelector::Active).unwrap();
//! assert_eq!(changed, vec![false, false, false, false, true, false]);
//! ```

pub mod analysis;
pub mod config;
pub mod diff;
pub mod error;
pub mod hyphen;
pub mod language;
pub mod session;
pub mod stats;
pub mod transform;

pub mod prelude {
    pub use crate::analysis::{
        IdentityStemmer, RawToken, SimpleStemmer, Stemmer, StopWordList, TaggedDocument,
        TokenRecord, TokenTable,
    };
    pub use crate::config::{
        ClozeConfig, ClozeOffset, DiversityConfig, DuplicatePolicy, HyphenationConfig,
        SessionConfig,
    };
    pub use crate::diff::{
        DiffSelector, DiffStats, TransformRecord, changed_rows, diff, diff_stats,
    };
    pub use crate::error::{Result, TagstatError};
    pub use crate::hyphen::{HyphenEntry, Hyphenation, Hyphenator, PatternId};
    pub use crate::language::{ClassificationIndex, LanguagePack, LanguageRegistry, TagInfo, TagKind};
    pub use crate::session::Session;
    pub use crate::stats::{
        CorpusFrequency, DocumentTermMatrix, Readability, WordClassSummary, describe,
        lexical_diversity, summarize,
    };
    pub use crate::transform::{
        CaseScheme, CaseTransform, ClozeDeletion, ClozeReporter, ClozeVariantReport, Transform,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
