//! Part-of-speech tagging from word lists, suffixes and local context
//!
//! Each token first receives a lexical guess (closed-class lists, known
//! open-class words, capitalization, suffixes). A left-to-right pass then
//! repairs guesses using the neighbouring tokens.

use super::lemmatizer::{known_stem, Suffix};
use super::lexicon::*;
use super::tokenizer::normalize_apostrophe;
use crate::types::Upos;

/// How a guess was reached; context rules only override weak guesses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evidence {
    Closed,
    Known,
    Suffix,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosGuess {
    pub pos: Upos,
    pub tag: &'static str,
    pub evidence: Evidence,
}

impl PosGuess {
    fn new(pos: Upos, tag: &'static str, evidence: Evidence) -> Self {
        Self { pos, tag, evidence }
    }

    fn closed(pos: Upos, tag: &'static str) -> Self {
        Self::new(pos, tag, Evidence::Closed)
    }

    fn known(pos: Upos, tag: &'static str) -> Self {
        Self::new(pos, tag, Evidence::Known)
    }

    fn is_verbal(&self) -> bool {
        matches!(self.pos, Upos::Verb | Upos::Aux)
    }

    fn is_negation(&self) -> bool {
        self.pos == Upos::Part && self.tag == "RB"
    }
}

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "ical", "less", "ish"];

/// Tag one sentence
pub fn tag_sentence(words: &[&str]) -> Vec<PosGuess> {
    let lowers: Vec<String> = words
        .iter()
        .map(|w| normalize_apostrophe(w).to_lowercase())
        .collect();

    let mut guesses: Vec<PosGuess> = words
        .iter()
        .zip(&lowers)
        .enumerate()
        .map(|(i, (word, lower))| lexical_guess(word, lower, i == 0))
        .collect();

    for i in 0..guesses.len() {
        apply_context(&lowers, &mut guesses, i);
    }

    guesses
}

fn lexical_guess(word: &str, lower: &str, sentence_start: bool) -> PosGuess {
    if !word.chars().any(char::is_alphanumeric) {
        return punctuation_guess(word);
    }
    if word.chars().next().is_some_and(char::is_numeric) || NUMBER_WORDS.contains(&lower) {
        return PosGuess::closed(Upos::Num, "CD");
    }

    match lower {
        "n't" | "not" => return PosGuess::closed(Upos::Part, "RB"),
        "'s" => return PosGuess::closed(Upos::Part, "POS"),
        "'m" | "'re" | "'ve" => return PosGuess::closed(Upos::Aux, "VBP"),
        "'ll" | "'d" => return PosGuess::closed(Upos::Aux, "MD"),
        "which" | "what" | "whatever" => return PosGuess::closed(Upos::Det, "WDT"),
        "where" | "when" | "why" | "how" => return PosGuess::closed(Upos::Adv, "WRB"),
        _ => {}
    }

    if POSSESSIVE_PRONOUNS.contains(&lower) {
        return PosGuess::closed(Upos::Pron, "PRP$");
    }
    if PERSONAL_PRONOUNS.contains(&lower) {
        return PosGuess::closed(Upos::Pron, "PRP");
    }
    if WH_PRONOUNS.contains(&lower) {
        return PosGuess::closed(Upos::Pron, "WP");
    }
    if INDEFINITE_PRONOUNS.contains(&lower) {
        return PosGuess::closed(Upos::Pron, "NN");
    }
    if DETERMINERS.contains(&lower) {
        return PosGuess::closed(Upos::Det, "DT");
    }
    if let Some(tag) = lookup_pair(BE_FORMS, lower) {
        return PosGuess::closed(Upos::Aux, tag);
    }
    if MODALS.contains(&lower) {
        return PosGuess::closed(Upos::Aux, "MD");
    }
    if let Some(tag) = lookup_pair(HAVE_FORMS, lower).or_else(|| lookup_pair(DO_FORMS, lower)) {
        return PosGuess::closed(Upos::Verb, tag);
    }
    if COORDINATORS.contains(&lower) {
        return PosGuess::closed(Upos::Cconj, "CC");
    }
    if SUBORDINATORS.contains(&lower) {
        return PosGuess::closed(Upos::Sconj, "IN");
    }
    if PREPOSITIONS.contains(&lower) {
        return PosGuess::closed(Upos::Adp, "IN");
    }
    if INTERJECTIONS.contains(&lower) {
        return PosGuess::closed(Upos::Intj, "UH");
    }
    if ADVERBS.contains(&lower) {
        return PosGuess::closed(Upos::Adv, "RB");
    }

    if let Some((_, tag)) = lookup_triple(IRREGULAR_VERBS, lower) {
        return PosGuess::known(Upos::Verb, tag);
    }
    if let Some((_, tag)) = lookup_triple(IRREGULAR_ADJECTIVES, lower) {
        return PosGuess::known(Upos::Adj, tag);
    }
    if lookup_pair(IRREGULAR_NOUNS, lower).is_some() {
        return PosGuess::known(Upos::Noun, "NNS");
    }
    if ADJECTIVES.contains(&lower) {
        return PosGuess::known(Upos::Adj, "JJ");
    }
    if let Some(tag) = known_verb_form(lower) {
        return PosGuess::known(Upos::Verb, tag);
    }
    if known_stem(lower, Suffix::Er, ADJECTIVES).is_some() {
        return PosGuess::known(Upos::Adj, "JJR");
    }
    if known_stem(lower, Suffix::Est, ADJECTIVES).is_some() {
        return PosGuess::known(Upos::Adj, "JJS");
    }

    let capitalized = word.chars().next().is_some_and(char::is_uppercase);
    if capitalized && !sentence_start {
        return PosGuess::known(Upos::Propn, "NNP");
    }

    suffix_guess(lower)
}

fn known_verb_form(lower: &str) -> Option<&'static str> {
    if VERBS.contains(&lower) {
        return Some("VB");
    }
    [
        (Suffix::Ing, "VBG"),
        (Suffix::Ed, "VBD"),
        (Suffix::S, "VBZ"),
    ]
    .into_iter()
    .find(|(suffix, _)| known_stem(lower, *suffix, VERBS).is_some())
    .map(|(_, tag)| tag)
}

fn suffix_guess(lower: &str) -> PosGuess {
    let len = lower.chars().count();

    if lower.ends_with("ly") && len > 4 {
        return PosGuess::new(Upos::Adv, "RB", Evidence::Suffix);
    }
    if lower.ends_with("ing") && len > 5 {
        return PosGuess::new(Upos::Verb, "VBG", Evidence::Suffix);
    }
    if lower.ends_with("ed") && len > 4 {
        return PosGuess::new(Upos::Verb, "VBD", Evidence::Suffix);
    }
    if len > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return PosGuess::new(Upos::Adj, "JJ", Evidence::Suffix);
    }
    if lower.ends_with('s')
        && len > 3
        && !["ss", "us", "is"].iter().any(|s| lower.ends_with(s))
    {
        return PosGuess::new(Upos::Noun, "NNS", Evidence::Suffix);
    }

    PosGuess::new(Upos::Noun, "NN", Evidence::Default)
}

fn punctuation_guess(word: &str) -> PosGuess {
    let tag = match word {
        "," => ",",
        "." | "!" | "?" => ".",
        ":" | ";" | "-" | "--" | "—" | "–" => ":",
        "(" | "[" | "{" => "-LRB-",
        ")" | "]" | "}" => "-RRB-",
        "\"" | "“" | "”" | "'" | "‘" | "’" | "`" => "''",
        "$" | "€" | "£" | "¥" => "$",
        "%" | "+" | "=" | "<" | ">" | "^" | "|" | "~" | "*" | "&" | "#" | "@" | "/" => {
            return PosGuess::closed(Upos::Sym, "SYM");
        }
        w if w.chars().all(|c| c == '.') => ":",
        _ => "NFP",
    };

    if tag == "$" {
        PosGuess::closed(Upos::Sym, tag)
    } else {
        PosGuess::closed(Upos::Punct, tag)
    }
}

/// Index of the next token after `i` that is not an adverb or negation
fn next_content(guesses: &[PosGuess], i: usize) -> Option<usize> {
    (i + 1..guesses.len()).find(|&j| guesses[j].pos != Upos::Adv && !guesses[j].is_negation())
}

fn follows_pronoun(prev: Option<PosGuess>, prev_lower: Option<&str>, subjects: &[&str]) -> bool {
    prev.is_some_and(|p| p.pos == Upos::Pron) && prev_lower.is_some_and(|w| subjects.contains(&w))
}

fn apply_context(lowers: &[String], guesses: &mut [PosGuess], i: usize) {
    let lower = lowers[i].as_str();
    let prev = i.checked_sub(1).map(|p| guesses[p]);
    let prev_lower = i.checked_sub(1).map(|p| lowers[p].as_str());
    let next = guesses.get(i + 1).copied();

    let after_subject = |subjects: &[&'static str]| follows_pronoun(prev, prev_lower, subjects);

    match lower {
        // Infinitival "to" before a verb
        "to" if next.is_some_and(|n| n.is_verbal() && n.tag == "VB") => {
            guesses[i] = PosGuess::closed(Upos::Part, "TO");
            return;
        }
        "there" if next.is_some_and(|n| n.pos == Upos::Aux) => {
            guesses[i] = PosGuess::closed(Upos::Pron, "EX");
            return;
        }
        "'s" => {
            let pronoun_host = after_subject(THIRD_PERSON_SUBJECTS)
                || matches!(prev_lower, Some("there") | Some("here"));
            if pronoun_host {
                guesses[i] = PosGuess::closed(Upos::Aux, "VBZ");
            }
            return;
        }
        "like" if after_subject(NON_THIRD_PERSON_SUBJECTS) => {
            guesses[i] = PosGuess::closed(Upos::Verb, "VBP");
            return;
        }
        "that" if next.is_some_and(|n| n.is_verbal()) && i > 0 => {
            guesses[i] = PosGuess::closed(Upos::Pron, "WDT");
            return;
        }
        _ => {}
    }

    let current = guesses[i];

    // Verb slot after "to", a modal or do-support
    let verb_slot = prev.is_some_and(|p| {
        (p.pos == Upos::Part && p.tag == "TO")
            || (p.pos == Upos::Aux && p.tag == "MD")
            || (p.pos == Upos::Aux && prev_lower.is_some_and(|w| lookup_pair(DO_FORMS, w).is_some()))
            || p.is_negation()
    });
    if verb_slot {
        if current.pos == Upos::Verb && current.tag == "VB" {
            return;
        }
        if current.evidence == Evidence::Default
            || (current.pos == Upos::Verb && current.evidence == Evidence::Known && current.tag == "VBP")
        {
            guesses[i] = PosGuess::new(Upos::Verb, "VB", current.evidence);
            return;
        }
    }

    // have/do as auxiliaries when another verb follows
    if current.pos == Upos::Verb && current.evidence == Evidence::Closed {
        let is_have = lookup_pair(HAVE_FORMS, lower).is_some();
        let is_do = lookup_pair(DO_FORMS, lower).is_some();
        if let Some(j) = next_content(guesses, i) {
            let following = guesses[j];
            if is_have && following.pos == Upos::Verb && matches!(following.tag, "VBD" | "VBN") {
                guesses[i].pos = Upos::Aux;
                guesses[j].tag = "VBN";
            } else if is_do
                && (following.pos == Upos::Verb
                    || following.pos == Upos::Pron
                    || guesses.get(i + 1).is_some_and(PosGuess::is_negation))
            {
                guesses[i].pos = Upos::Aux;
            }
        }
        return;
    }

    // Passive participle after a form of "be"
    if current.pos == Upos::Aux && lookup_pair(BE_FORMS, lower).is_some() {
        if let Some(j) = next_content(guesses, i) {
            if guesses[j].pos == Upos::Verb && guesses[j].tag == "VBD" {
                guesses[j].tag = "VBN";
            }
        }
        return;
    }

    let after_determiner = prev.is_some_and(|p| {
        p.pos == Upos::Det || p.tag == "PRP$" || p.pos == Upos::Adj
    });

    if current.pos == Upos::Verb && current.evidence != Evidence::Closed {
        match current.tag {
            // "the walk", "a run"
            "VB" if after_determiner => {
                guesses[i] = PosGuess::new(Upos::Noun, "NN", Evidence::Known);
            }
            "VB" if i > 0 => guesses[i].tag = "VBP",
            // "the running", "good morning"
            "VBG" if after_determiner => {
                guesses[i] = PosGuess::new(Upos::Noun, "NN", current.evidence);
            }
            _ => {}
        }
        return;
    }

    // Unknown word right after a subject pronoun is most likely its verb
    if current.evidence == Evidence::Default && after_subject(NON_THIRD_PERSON_SUBJECTS) {
        guesses[i] = PosGuess::new(Upos::Verb, "VBP", Evidence::Default);
    } else if current.evidence == Evidence::Suffix
        && current.tag == "NNS"
        && after_subject(THIRD_PERSON_SUBJECTS)
    {
        guesses[i] = PosGuess::new(Upos::Verb, "VBZ", Evidence::Suffix);
    }
}
