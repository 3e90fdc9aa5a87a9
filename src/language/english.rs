//! Built-in English tag set (Penn Treebank tags as emitted by TreeTagger).

use crate::error::Result;
use crate::language::{ClassificationIndex, LanguagePack, TagInfo};

const WORD_TAGS: &[(&str, &str, &str)] = &[
    ("CC", "conjunction", "Coordinating conjunction"),
    ("CD", "number", "Cardinal number"),
    ("DT", "determiner", "Determiner"),
    ("EX", "existential", "Existential there"),
    ("FW", "foreign", "Foreign word"),
    ("IN", "preposition", "Preposition or subordinating conjunction"),
    ("IN/that", "preposition", "Complementizer 'that'"),
    ("JJ", "adjective", "Adjective"),
    ("JJR", "adjective", "Adjective, comparative"),
    ("JJS", "adjective", "Adjective, superlative"),
    ("LS", "list", "List item marker"),
    ("MD", "modal", "Modal"),
    ("NN", "noun", "Noun, singular or mass"),
    ("NNS", "noun", "Noun, plural"),
    ("NP", "name", "Proper noun, singular"),
    ("NPS", "name", "Proper noun, plural"),
    ("NNP", "name", "Proper noun, singular"),
    ("NNPS", "name", "Proper noun, plural"),
    ("PDT", "predeterminer", "Predeterminer"),
    ("POS", "possessive", "Possessive ending"),
    ("PP", "pronoun", "Personal pronoun"),
    ("PP$", "pronoun", "Possessive pronoun"),
    ("PRP", "pronoun", "Personal pronoun"),
    ("PRP$", "pronoun", "Possessive pronoun"),
    ("RB", "adverb", "Adverb"),
    ("RBR", "adverb", "Adverb, comparative"),
    ("RBS", "adverb", "Adverb, superlative"),
    ("RP", "particle", "Particle"),
    ("SYM", "symbol", "Symbol"),
    ("TO", "to", "to"),
    ("UH", "interjection", "Interjection"),
    ("VB", "verb", "Verb be, base form"),
    ("VBD", "verb", "Verb be, past tense"),
    ("VBG", "verb", "Verb be, gerund or present participle"),
    ("VBN", "verb", "Verb be, past participle"),
    ("VBP", "verb", "Verb be, non-3rd person singular present"),
    ("VBZ", "verb", "Verb be, 3rd person singular present"),
    ("VH", "verb", "Verb have, base form"),
    ("VHD", "verb", "Verb have, past tense"),
    ("VHG", "verb", "Verb have, gerund or present participle"),
    ("VHN", "verb", "Verb have, past participle"),
    ("VHP", "verb", "Verb have, non-3rd person singular present"),
    ("VHZ", "verb", "Verb have, 3rd person singular present"),
    ("VV", "verb", "Verb, base form"),
    ("VVD", "verb", "Verb, past tense"),
    ("VVG", "verb", "Verb, gerund or present participle"),
    ("VVN", "verb", "Verb, past participle"),
    ("VVP", "verb", "Verb, non-3rd person singular present"),
    ("VVZ", "verb", "Verb, 3rd person singular present"),
    ("WDT", "determiner", "Wh-determiner"),
    ("WP", "pronoun", "Wh-pronoun"),
    ("WP$", "pronoun", "Possessive wh-pronoun"),
    ("WRB", "adverb", "Wh-adverb"),
];

const PUNCTUATION_TAGS: &[(&str, &str, &str)] = &[
    (",", "comma", "Comma"),
    (":", "punctuation", "General joiner"),
    ("(", "punctuation", "Opening bracket"),
    (")", "punctuation", "Closing bracket"),
    ("``", "punctuation", "Opening quotes"),
    ("''", "punctuation", "Closing quotes"),
    ("\"", "punctuation", "Quote"),
    ("#", "punctuation", "Pound sign"),
    ("$", "punctuation", "Currency symbol"),
];

const SENTENCE_END_TAGS: &[(&str, &str, &str)] = &[
    ("SENT", "fullstop", "Sentence ending punctuation"),
];

/// Language pack for English, registered under `"en"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishPack;

impl EnglishPack {
    pub fn new() -> Self {
        EnglishPack
    }
}

fn table(rows: &'static [(&'static str, &'static str, &'static str)]) -> impl Iterator<Item = (&'static str, TagInfo)> {
    rows.iter()
        .map(|&(tag, wclass, description)| (tag, TagInfo::new(wclass, description)))
}

impl LanguagePack for EnglishPack {
    fn code(&self) -> &str {
        "en"
    }

    fn build(&self) -> Result<ClassificationIndex> {
        ClassificationIndex::new(
            "en",
            table(WORD_TAGS),
            table(PUNCTUATION_TAGS),
            table(SENTENCE_END_TAGS),
        )
    }
}
