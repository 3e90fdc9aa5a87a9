//! Case normalisation of tokens.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::table::TokenTable;
use crate::analysis::token::TokenRecord;
use crate::error::Result;
use crate::transform::Transform;

/// How token case is rewritten.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseScheme {
    Lower,
    Upper,
    /// First character upper-case, the rest lower-case.
    Capitalize,
}

impl CaseScheme {
    fn apply(self, token: &str) -> String {
        match self {
            CaseScheme::Lower => token.to_lowercase(),
            CaseScheme::Upper => token.to_uppercase(),
            CaseScheme::Capitalize => {
                let mut chars = token.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.as_str().to_lowercase().chars())
                        .collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// Row field a [`RowQuery`] matches against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryField {
    Token,
    Tag,
    Wclass,
}

/// Regular expression over one field of a row.
#[derive(Clone, Debug)]
pub struct RowQuery {
    field: QueryField,
    pattern: Regex,
}

impl RowQuery {
    pub fn new(field: QueryField, pattern: &str) -> Result<Self> {
        Ok(RowQuery {
            field,
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn matches(&self, row: &TokenRecord) -> bool {
        let value = match self.field {
            QueryField::Token => &row.token,
            QueryField::Tag => &row.tag,
            QueryField::Wclass => &row.wclass,
        };
        self.pattern.is_match(value)
    }
}

/// Rewrites token case, optionally only on rows matching a query.
#[derive(Clone, Debug)]
pub struct CaseTransform {
    scheme: CaseScheme,
    query: Option<RowQuery>,
}

impl CaseTransform {
    pub fn new(scheme: CaseScheme) -> Self {
        CaseTransform {
            scheme,
            query: None,
        }
    }

    /// Restrict the transformation to rows matching `query`.
    pub fn with_query(mut self, query: RowQuery) -> Self {
        self.query = Some(query);
        self
    }
}

impl Transform for CaseTransform {
    fn apply(&self, tokens: &TokenTable) -> Result<TokenTable> {
        let replacements: Vec<(usize, String)> = tokens
            .iter()
            .enumerate()
            .filter(|(_, row)| self.query.as_ref().is_none_or(|q| q.matches(row)))
            .map(|(position, row)| (position, self.scheme.apply(&row.token)))
            .collect();
        tokens.replace_tokens(replacements)
    }

    fn name(&self) -> &'static str {
        "normalize"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TagstatError;
    use crate::prelude::*;

    fn document() -> TaggedDocument {
        let session = Session::with_english(SessionConfig::default()).unwrap();
        session
            .ingest(
                vec![
                    ("the", "DT", "the"),
                    ("LONDON", "NP", "London"),
                    ("Bridge", "NN", "bridge"),
                    (".", "SENT", "."),
                ],
                "en",
                Some("d"),
            )
            .unwrap()
    }

    #[test]
    fn test_schemes() {
        assert_eq!(CaseScheme::Lower.apply("HeLLo"), "hello");
        assert_eq!(CaseScheme::Upper.apply("straße"), "STRASSE");
        assert_eq!(CaseScheme::Capitalize.apply("éCOLE"), "École");
        assert_eq!(CaseScheme::Capitalize.apply(""), "");
    }

    #[test]
    fn test_lower_all_rows() {
        let doc = document()
            .transform(&CaseTransform::new(CaseScheme::Lower))
            .unwrap();
        assert_eq!(doc.tokens().tokens(), vec!["the", "london", "bridge", "."]);
        let record = doc.transform_record("normalize").unwrap();
        assert_eq!(record.equality_mask(), &[true, false, false, true]);
    }

    #[test]
    fn test_query_restricts_rows() {
        let query = RowQuery::new(QueryField::Wclass, "^name$").unwrap();
        let doc = document()
            .transform(&CaseTransform::new(CaseScheme::Capitalize).with_query(query))
            .unwrap();
        assert_eq!(doc.tokens().tokens(), vec!["the", "London", "Bridge", "."]);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            RowQuery::new(QueryField::Tag, "(unclosed"),
            Err(TagstatError::Pattern(_))
        ));
    }
}
