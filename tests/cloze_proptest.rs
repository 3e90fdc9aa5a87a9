//! Property-based tests for ingestion, cloze deletion and diffing.
//!
//! Raw documents are random mixes of word tags, punctuation, sentence ends
//! and tags the English index does not know.

use proptest::prelude::*;
use tagstat::diff::{DiffSelector, diff};
use tagstat::prelude::*;

const TAGS: &[&str] = &["NN", "NNS", "VVZ", "DT", "JJ", "RB", ",", "(", "SENT", "XYZ"];

fn raw_token_strategy() -> impl Strategy<Value = (String, String)> {
    ("[a-zA-Z]{1,8}", prop::sample::select(TAGS)).prop_map(|(token, tag)| (token, tag.to_string()))
}

fn raw_document_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(raw_token_strategy(), 0..60)
}

/// `(period, offset)` with `0 <= offset < period`.
fn cloze_parameters_strategy() -> impl Strategy<Value = (usize, usize)> {
    (1usize..12).prop_flat_map(|period| (Just(period), 0..period))
}

fn ingest(session: &Session, raw: &[(String, String)]) -> TaggedDocument {
    let triples = raw
        .iter()
        .map(|(token, tag)| (token.clone(), tag.clone(), token.to_lowercase()));
    session.ingest(triples, "en", Some("prop")).unwrap()
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_masked_count_formula(
            raw in raw_document_strategy(),
            (period, offset) in cloze_parameters_strategy(),
        ) {
            let session = Session::with_english(SessionConfig::default()).unwrap();
            let doc = ingest(&session, &raw);
            let eligible = doc.tokens().word_count();

            let doc = doc.transform(&ClozeDeletion::new(period, offset).unwrap()).unwrap();
            let record = doc.active_transform().unwrap();

            prop_assert_eq!(record.changed_count(), eligible.saturating_sub(offset) / period);
            prop_assert_eq!(record.len(), doc.len());
        }

        #[test]
        fn test_only_word_rows_are_masked(
            raw in raw_document_strategy(),
            (period, offset) in cloze_parameters_strategy(),
        ) {
            let session = Session::with_english(SessionConfig::default()).unwrap();
            let doc = ingest(&session, &raw)
                .transform(&ClozeDeletion::new(period, offset).unwrap())
                .unwrap();

            for position in doc.active_transform().unwrap().changed_positions() {
                let row = doc.tokens().get(position).unwrap();
                prop_assert!(row.is_word());
                prop_assert!(row.token.chars().all(|c| c == '_'));
                prop_assert_eq!(row.char_len(), doc.original().get(position).unwrap().char_len());
            }
        }

        #[test]
        fn test_ingestion_is_idempotent(raw in raw_document_strategy()) {
            let session = Session::with_english(SessionConfig::default()).unwrap();
            let first = ingest(&session, &raw);
            let second = ingest(&session, &raw);
            prop_assert_eq!(first.tokens(), second.tokens());
        }

        #[test]
        fn test_sentence_index_never_decreases(raw in raw_document_strategy()) {
            let session = Session::with_english(SessionConfig::default()).unwrap();
            let doc = ingest(&session, &raw);
            let sentences: Vec<usize> = doc.tokens().iter().map(|r| r.sentence).collect();
            prop_assert!(sentences.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(sentences.first().is_none_or(|&s| s == 1));
        }

        #[test]
        fn test_diff_round_trip(
            raw in raw_document_strategy(),
            (period, offset) in cloze_parameters_strategy(),
        ) {
            let session = Session::with_english(SessionConfig::default()).unwrap();
            let doc = ingest(&session, &raw)
                .transform(&ClozeDeletion::new(period, offset).unwrap())
                .unwrap();
            let mask = diff(&doc, DiffSelector::Active).unwrap();
            prop_assert_eq!(mask.as_slice(), doc.active_transform().unwrap().equality_mask());
        }

        #[test]
        fn test_summary_has_no_nan(
            raw in raw_document_strategy(),
            selection_seed in prop::collection::vec(any::<bool>(), 60),
        ) {
            let session = Session::with_english(SessionConfig::default()).unwrap();
            let doc = ingest(&session, &raw);
            let selection: Vec<bool> = selection_seed.into_iter().take(doc.len()).collect();

            let summary = summarize(doc.tokens(), Some(&selection)).unwrap();
            for row in summary.rows() {
                for pct in [row.pct, row.pct_selected_of_all, row.pct_selected_of_class].into_iter().flatten() {
                    prop_assert!(pct.is_finite());
                }
            }
        }
    }
}
