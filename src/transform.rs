//! Transformations over token tables.
//!
//! A transformation takes the current [`TokenTable`] of a document and
//! returns a new table of the same length with some token texts replaced.
//! [`TaggedDocument::transform`](crate::analysis::document::TaggedDocument::transform)
//! runs it and records the resulting diff under the transformation's name.
//!
//! # Available Transformations
//!
//! - [`cloze::ClozeDeletion`] - Masks every n-th eligible word (`clozeDelete`)
//! - [`case::CaseTransform`] - Lower/upper-cases or capitalises tokens (`normalize`)
//!
//! Stopword and stem annotation live in [`annotate`]; they only touch
//! annotation fields and therefore are not transformations in this sense.
//!
//! # Examples
//!
//! ```
//! use tagstat::prelude::*;
//!
//! let session = Session::with_english(SessionConfig::default()).unwrap();
//! let doc = session
//!     .ingest(vec![("Hello", "UH", "hello"), ("world", "NN", "world")], "en", None)
//!     .unwrap()
//!     .transform(&CaseTransform::new(CaseScheme::Upper))
//!     .unwrap();
//!
//! assert_eq!(doc.tokens().tokens(), vec!["HELLO", "WORLD"]);
//! ```

pub mod annotate;
pub mod case;
pub mod cloze;

use crate::analysis::table::TokenTable;
use crate::error::Result;

pub use case::{CaseScheme, CaseTransform, QueryField, RowQuery};
pub use cloze::{ClozeDeletion, ClozeReporter, ClozeVariantReport, LogReporter, cloze_report};

/// Trait for transformations of a token table.
///
/// Implementations must return a table with exactly as many rows as the
/// input and change nothing but token text; the document rejects
/// misaligned results.
pub trait Transform: Send + Sync {
    /// Apply this transformation to a table.
    fn apply(&self, tokens: &TokenTable) -> Result<TokenTable>;

    /// Name under which the diff is recorded.
    fn name(&self) -> &'static str;
}
