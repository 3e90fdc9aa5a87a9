//! Tagged text analysis.
//!
//! This module holds the token model, ingestion of tagger output into
//! [`TokenTable`]s, tagged documents with their transformation history,
//! and the stopword and stemming helpers used for annotation.

pub mod document;
pub mod stem;
pub mod stopword;
pub mod table;
pub mod token;

pub use document::TaggedDocument;
pub use stem::{IdentityStemmer, SimpleStemmer, Stemmer};
pub use stopword::StopWordList;
pub use table::{TokenTable, generate_doc_id, ingest, ingest_batch};
pub use token::{RawToken, TokenRecord, count_digits, count_letters};
