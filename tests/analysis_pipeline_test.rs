use std::sync::Arc;

use tagstat::diff::{DiffSelector, changed_rows, diff};
use tagstat::language::english::EnglishPack;
use tagstat::prelude::*;
use tagstat::stats::summary::summarize_document;

fn session() -> Session {
    Session::with_english(SessionConfig::default()).unwrap()
}

/// noun:3, verb:2, determiner:2, punctuation:3
fn summary_document(session: &Session) -> TaggedDocument {
    session
        .ingest(
            vec![
                ("The", "DT", "the"),
                ("farmer", "NN", "farmer"),
                ("feeds", "VVZ", "feed"),
                ("(", "(", "("),
                ("the", "DT", "the"),
                ("goats", "NNS", "goat"),
                (")", ")", ")"),
                ("hay", "NN", "hay"),
                ("sleeps", "VVZ", "sleep"),
                (":", ":", ":"),
            ],
            "en",
            Some("farm"),
        )
        .unwrap()
}

fn approx(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("percentage should be set");
    assert!(
        (actual - expected).abs() < 0.005,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_summary_scenario() {
    let session = session();
    let doc = summary_document(&session);

    // farmer, goats (nouns) and feeds (verb)
    let mut selection = vec![false; doc.len()];
    selection[1] = true;
    selection[2] = true;
    selection[5] = true;

    let summary = summarize(doc.tokens(), Some(&selection)).unwrap();
    let order: Vec<&str> = summary.rows().iter().map(|r| r.wclass.as_str()).collect();
    assert_eq!(order, vec!["noun", "determiner", "verb", "punctuation"]);

    approx(summary.row("noun").unwrap().pct_selected_of_class, 66.67);
    approx(summary.row("verb").unwrap().pct_selected_of_class, 50.0);
    approx(summary.row("determiner").unwrap().pct_selected_of_class, 0.0);

    let punctuation = summary.row("punctuation").unwrap();
    assert_eq!(punctuation.count, 3);
    assert_eq!(punctuation.pct, None);
    assert_eq!(punctuation.pct_selected_of_all, None);
    assert_eq!(punctuation.pct_selected_of_class, None);
}

#[test]
fn test_summary_of_applied_transform() {
    let session = session();
    let doc = summary_document(&session)
        .transform(&ClozeDeletion::new(3, 0).unwrap())
        .unwrap();
    // words: The farmer feeds the goats hay sleeps -> feeds, hay
    let summary = summarize_document(&doc, DiffSelector::Active).unwrap();
    assert_eq!(summary.row("verb").unwrap().selected, Some(1));
    assert_eq!(summary.row("noun").unwrap().selected, Some(1));
    assert_eq!(summary.selected_tokens(), Some(2));
}

#[test]
fn test_layered_transforms_and_lookup() {
    let session = session();
    let doc = summary_document(&session)
        .transform(&CaseTransform::new(CaseScheme::Lower))
        .unwrap()
        .transform(&ClozeDeletion::new(7, 0).unwrap())
        .unwrap();

    assert_eq!(doc.transforms().len(), 2);
    assert_eq!(doc.active_transform().unwrap().name(), "clozeDelete");

    let lowered = diff(&doc, DiffSelector::Named("normalize")).unwrap();
    assert!(!lowered[0]);
    assert!(lowered[1..].iter().all(|&eq| eq));

    let changed = changed_rows(&doc, DiffSelector::AllChanged).unwrap();
    // "The" lowered, "sleeps" masked
    assert_eq!(
        changed,
        vec![true, false, false, false, false, false, false, false, true, false]
    );

    assert!(matches!(
        diff(&doc, DiffSelector::Named("stem")),
        Err(TagstatError::NotFound(_))
    ));
}

#[test]
fn test_duplicate_names_use_latest() {
    let session = session();
    let doc = summary_document(&session)
        .transform(&ClozeDeletion::new(2, 0).unwrap())
        .unwrap()
        .transform(&ClozeDeletion::new(7, 0).unwrap())
        .unwrap();

    assert_eq!(doc.transforms().len(), 2);
    let latest = diff(&doc, DiffSelector::Named("clozeDelete")).unwrap();
    assert_eq!(latest, doc.transforms()[1].equality_mask());
}

#[test]
fn test_ingest_requires_registered_language() {
    let session = session();
    assert!(matches!(
        session.ingest(vec![("Hallo", "NN", "hallo")], "de", None),
        Err(TagstatError::Configuration(_))
    ));
    assert!(matches!(
        session.register_pack(Arc::new(EnglishPack::new())),
        Err(TagstatError::Configuration(_))
    ));
}

#[test]
fn test_ingestion_is_deterministic() {
    let session = session();
    let first = summary_document(&session);
    let second = summary_document(&session);
    assert_eq!(first.tokens(), second.tokens());
    assert_eq!(first.tokens().to_json().unwrap(), second.tokens().to_json().unwrap());
}

#[test]
fn test_annotation_then_hyphenation() {
    use tagstat::hyphen::{HyphenPatterns, LiangHyphenator};

    let config = SessionConfig {
        hyphenation: HyphenationConfig {
            min_length: 1,
            skip_stopwords: true,
            ..HyphenationConfig::default()
        },
        ..SessionConfig::default()
    };
    let session = Session::with_english(config).unwrap();
    let doc = summary_document(&session)
        .annotate_stopwords(&StopWordList::english())
        .annotate_stems(&SimpleStemmer::new());
    assert!(doc.transforms().is_empty());
    assert_eq!(doc.tokens().get(5).unwrap().stem.as_deref(), Some("goat"));

    let patterns = HyphenPatterns::new(["1m", "e1e"], 1, 2).unwrap();
    let hyphenator = LiangHyphenator::new(PatternId::new("en", "test"), patterns);
    let doc = session.hyphenate(doc, &hyphenator).unwrap();
    let hyphenation = doc.hyphenation().unwrap();

    // stopwords skipped
    assert!(hyphenation.get(0).is_none());
    assert!(hyphenation.get(4).is_none());
    assert_eq!(hyphenation.get(1).unwrap().hyphenated, "far-mer");
    assert_eq!(hyphenation.get(8).unwrap().hyphenated, "sle-eps");

    let descriptives = session.describe(&doc).unwrap();
    let syllables = descriptives.syllables.unwrap();
    assert_eq!(syllables.hyphenated_words, 5);
}
