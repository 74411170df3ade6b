//! Gazetteer fallback for semantic tagging
//!
//! Used when no USAS lexicon could be loaded. Lemma lists are checked in
//! declaration order and the first hit wins; only when no list matches does
//! the part-of-speech decide the tag.

use crate::UNMATCHED_TAG;

pub const POSITIVE_EMOTION: &[&str] = &[
    "happy",
    "joy",
    "delighted",
    "pleased",
    "excited",
    "love",
    "wonderful",
];

pub const NEGATIVE_EMOTION: &[&str] = &[
    "sad",
    "angry",
    "fear",
    "hate",
    "anxious",
    "worried",
    "upset",
    "depressed",
];

pub const MOVEMENT_VERBS: &[&str] = &[
    "go", "come", "move", "walk", "run", "travel", "arrive", "leave", "enter", "exit",
];

pub const SPEECH_VERBS: &[&str] = &[
    "say",
    "tell",
    "speak",
    "talk",
    "communicate",
    "discuss",
    "mention",
    "ask",
    "answer",
];

pub const THOUGHT_VERBS: &[&str] = &[
    "think",
    "believe",
    "know",
    "understand",
    "consider",
    "realize",
    "remember",
    "forget",
];

pub const POSITIVE_ADJECTIVES: &[&str] = &[
    "good",
    "great",
    "excellent",
    "wonderful",
    "amazing",
    "beautiful",
    "perfect",
    "nice",
    "fine",
];

pub const NEGATIVE_ADJECTIVES: &[&str] = &[
    "bad", "poor", "terrible", "awful", "horrible", "ugly", "wrong", "worse", "worst",
];

pub const TIME_WORDS: &[&str] = &[
    "today",
    "tomorrow",
    "yesterday",
    "now",
    "then",
    "soon",
    "later",
    "before",
    "after",
];

pub const PLACE_WORDS: &[&str] = &[
    "here", "there", "where", "place", "location", "home", "school", "office",
];

/// Lemma gazetteers in priority order
pub const GAZETTEER: &[(&[&str], &str)] = &[
    (POSITIVE_EMOTION, "E1.1+"),
    (NEGATIVE_EMOTION, "E1.1-"),
    (MOVEMENT_VERBS, "M1"),
    (SPEECH_VERBS, "Q2.2"),
    (THOUGHT_VERBS, "X2.1"),
    (POSITIVE_ADJECTIVES, "A5.1+"),
    (NEGATIVE_ADJECTIVES, "A5.1-"),
    (TIME_WORDS, "T1"),
    (PLACE_WORDS, "M7"),
];

/// Classify a token from its lemma and coarse POS tag.
///
/// Total over all inputs: unknown POS tags map to `Z99`.
pub fn fallback_semantic_tag(lemma: &str, pos: &str) -> &'static str {
    let lemma = lemma.to_lowercase();

    for (words, tag) in GAZETTEER {
        if words.contains(&lemma.as_str()) {
            return *tag;
        }
    }

    pos_default_tag(pos)
}

fn pos_default_tag(pos: &str) -> &'static str {
    match pos {
        "NOUN" => "O2",
        "PROPN" => "Z3",
        "VERB" => "A3+",
        "ADJ" => "A5",
        "ADV" => "A13",
        "NUM" => "N1",
        "ADP" | "DET" => "Z5",
        "PRON" => "Z8",
        _ => UNMATCHED_TAG,
    }
}
