//! Stopword and stem annotation.
//!
//! Both passes only fill the `stopword`/`stem` fields of word rows; token
//! text is never changed. Non-word rows are reset to "not a stopword" and
//! "no stem".

use crate::analysis::stem::Stemmer;
use crate::analysis::stopword::StopWordList;
use crate::analysis::table::TokenTable;

/// Flag word rows whose token is in `stopwords`.
pub fn annotate_stopwords(tokens: &TokenTable, stopwords: &StopWordList) -> TokenTable {
    tokens.annotate(|row| {
        row.stopword = row.is_word() && stopwords.is_stop_word(&row.token);
    })
}

/// Attach the stem of each word row's token.
pub fn annotate_stems(tokens: &TokenTable, stemmer: &dyn Stemmer) -> TokenTable {
    tokens.annotate(|row| {
        row.stem = row.is_word().then(|| stemmer.stem(&row.token));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stem::{IdentityStemmer, SimpleStemmer};
    use crate::prelude::*;

    fn table() -> TokenTable {
        let session = Session::with_english(SessionConfig::default()).unwrap();
        session
            .ingest(
                vec![
                    ("The", "DT", "the"),
                    ("dogs", "NNS", "dog"),
                    ("were", "VBD", "be"),
                    ("barking", "VVG", "bark"),
                    (".", "SENT", "."),
                ],
                "en",
                Some("d"),
            )
            .unwrap()
            .tokens()
            .clone()
    }

    #[test]
    fn test_annotate_stopwords() {
        let annotated = annotate_stopwords(&table(), &StopWordList::english());
        let flags: Vec<bool> = annotated.iter().map(|r| r.stopword).collect();
        assert_eq!(flags, vec![true, false, true, false, false]);
        assert_eq!(annotated.tokens(), table().tokens());
    }

    #[test]
    fn test_annotate_stems() {
        let annotated = annotate_stems(&table(), &SimpleStemmer::new());
        let stems: Vec<Option<&str>> = annotated.iter().map(|r| r.stem.as_deref()).collect();
        assert_eq!(
            stems,
            vec![Some("the"), Some("dog"), Some("were"), Some("bark"), None]
        );

        let identity = annotate_stems(&table(), &IdentityStemmer::new());
        assert_eq!(identity.get(0).unwrap().stem.as_deref(), Some("the"));
    }
}
