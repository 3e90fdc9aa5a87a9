//! Lexical diversity measures over the word rows of a table.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::analysis::table::TokenTable;
use crate::config::DiversityConfig;
use crate::error::{Result, TagstatError};

/// Type/token based diversity indices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LexicalDiversity {
    pub tokens: usize,
    pub types: usize,
    /// Type-token ratio `V / N`.
    pub ttr: f64,
    /// Herdan's C, `ln V / ln N`.
    pub herdan_c: f64,
    /// Guiraud's R, `V / sqrt(N)`.
    pub guiraud_r: f64,
    /// Maas' a², `(ln N - ln V) / (ln N)²`.
    pub maas_a2: f64,
    /// Mean TTR over consecutive full segments; `None` if the text is
    /// shorter than one segment.
    pub msttr: Option<f64>,
}

fn terms(tokens: &TokenTable, config: &DiversityConfig) -> Vec<String> {
    tokens
        .iter()
        .filter(|r| r.is_word())
        .map(|r| {
            let term = if config.use_lemma { &r.lemma } else { &r.token };
            if config.case_sensitive {
                term.clone()
            } else {
                term.to_lowercase()
            }
        })
        .collect()
}

fn type_count(terms: &[String]) -> usize {
    terms.iter().collect::<AHashSet<_>>().len()
}

/// Compute all diversity indices for `tokens`.
///
/// A table without word rows is rejected. With a single word, Herdan's C is
/// 1 and Maas' a² is 0.
pub fn lexical_diversity(tokens: &TokenTable, config: &DiversityConfig) -> Result<LexicalDiversity> {
    config.validate()?;
    let terms = terms(tokens, config);
    if terms.is_empty() {
        return Err(TagstatError::invalid_argument(format!(
            "document '{}' has no words to measure",
            tokens.doc_id()
        )));
    }

    let n = terms.len() as f64;
    let v = type_count(&terms) as f64;
    let (herdan_c, maas_a2) = if terms.len() == 1 {
        (1.0, 0.0)
    } else {
        (v.ln() / n.ln(), (n.ln() - v.ln()) / n.ln().powi(2))
    };

    let segments: Vec<f64> = terms
        .chunks_exact(config.segment)
        .map(|chunk| type_count(chunk) as f64 / chunk.len() as f64)
        .collect();
    let msttr = (!segments.is_empty()).then(|| segments.iter().sum::<f64>() / segments.len() as f64);

    Ok(LexicalDiversity {
        tokens: terms.len(),
        types: type_count(&terms),
        ttr: v / n,
        herdan_c,
        guiraud_r: v / n.sqrt(),
        maas_a2,
        msttr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    fn table() -> TokenTable {
        let session = Session::with_english(SessionConfig::default()).unwrap();
        session
            .ingest(
                vec![
                    ("The", "DT", "the"),
                    ("cat", "NN", "cat"),
                    ("saw", "VVD", "see"),
                    ("the", "DT", "the"),
                    ("dog", "NN", "dog"),
                    ("and", "CC", "and"),
                    ("the", "DT", "the"),
                    ("cats", "NNS", "cat"),
                    (".", "SENT", "."),
                ],
                "en",
                Some("d"),
            )
            .unwrap()
            .tokens()
            .clone()
    }

    fn config(segment: usize) -> DiversityConfig {
        DiversityConfig {
            segment,
            ..DiversityConfig::default()
        }
    }

    #[test]
    fn test_indices() {
        let d = lexical_diversity(&table(), &config(4)).unwrap();
        assert_eq!(d.tokens, 8);
        assert_eq!(d.types, 6);
        assert!((d.ttr - 0.75).abs() < 1e-12);
        assert!((d.herdan_c - 6f64.ln() / 8f64.ln()).abs() < 1e-12);
        assert!((d.guiraud_r - 6.0 / 8f64.sqrt()).abs() < 1e-12);
        assert!((d.maas_a2 - (8f64.ln() - 6f64.ln()) / 8f64.ln().powi(2)).abs() < 1e-12);
        // [the cat saw the] [dog and the cats]
        assert!((d.msttr.unwrap() - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_case_and_lemma() {
        let sensitive = DiversityConfig {
            case_sensitive: true,
            ..config(100)
        };
        assert_eq!(lexical_diversity(&table(), &sensitive).unwrap().types, 7);

        let lemma = DiversityConfig {
            use_lemma: true,
            ..config(100)
        };
        let d = lexical_diversity(&table(), &lemma).unwrap();
        assert_eq!(d.types, 5);
        assert_eq!(d.msttr, None);
    }

    #[test]
    fn test_no_words() {
        let empty = TokenTable::from_rows("en", "d", Vec::new()).unwrap();
        assert!(matches!(
            lexical_diversity(&empty, &DiversityConfig::default()),
            Err(TagstatError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_zero_segment_rejected() {
        assert!(lexical_diversity(&table(), &config(0)).is_err());
    }
}
