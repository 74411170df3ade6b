//! Rule-based English lemmatizer
//!
//! Irregular forms come from fixed tables. Regular inflections are undone by
//! generating candidate stems and preferring one found in the known word
//! lists; unknown words fall back to orthographic heuristics (consonant
//! undoubling, silent-e restoration, `-ies` to `-y`).

use super::lexicon::{
    lookup_pair, lookup_triple, ADJECTIVES, BE_FORMS, CLITIC_LEMMAS, DO_FORMS, HAVE_FORMS,
    IRREGULAR_ADJECTIVES, IRREGULAR_NOUNS, IRREGULAR_VERBS, PRONOUN_LEMMAS, VERBS,
};
use super::tokenizer::normalize_apostrophe;
use crate::types::Upos;

/// Inflectional endings the lemmatizer knows how to strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suffix {
    Ing,
    Ed,
    S,
    Er,
    Est,
}

impl Suffix {
    fn as_str(&self) -> &'static str {
        match self {
            Suffix::Ing => "ing",
            Suffix::Ed => "ed",
            Suffix::S => "s",
            Suffix::Er => "er",
            Suffix::Est => "est",
        }
    }
}

pub fn lemmatize(word: &str, pos: Upos, tag: &str) -> String {
    let lower = normalize_apostrophe(word).to_lowercase();

    if let Some(lemma) = lookup_pair(CLITIC_LEMMAS, &lower) {
        return lemma.to_string();
    }
    if lower == "'s" {
        return if pos == Upos::Aux { "be" } else { "'s" }.to_string();
    }

    match pos {
        Upos::Propn => word.to_string(),
        Upos::Pron => {
            if lower == "her" && tag == "PRP" {
                return "she".to_string();
            }
            lookup_pair(PRONOUN_LEMMAS, &lower)
                .map(str::to_string)
                .unwrap_or(lower)
        }
        Upos::Verb | Upos::Aux => verb_lemma(&lower, tag),
        Upos::Noun => {
            if let Some(lemma) = lookup_pair(IRREGULAR_NOUNS, &lower) {
                return lemma.to_string();
            }
            if tag == "NNS" {
                stem(&lower, Suffix::S, &[])
            } else {
                lower
            }
        }
        Upos::Adj => {
            if let Some((lemma, _)) = lookup_triple(IRREGULAR_ADJECTIVES, &lower) {
                return lemma.to_string();
            }
            match tag {
                "JJR" => stem(&lower, Suffix::Er, ADJECTIVES),
                "JJS" => stem(&lower, Suffix::Est, ADJECTIVES),
                _ => lower,
            }
        }
        Upos::Num if word.chars().next().is_some_and(char::is_numeric) => word.to_string(),
        _ => lower,
    }
}

fn verb_lemma(lower: &str, tag: &str) -> String {
    if lookup_pair(BE_FORMS, lower).is_some() {
        return "be".to_string();
    }
    if lookup_pair(HAVE_FORMS, lower).is_some() {
        return "have".to_string();
    }
    if lookup_pair(DO_FORMS, lower).is_some() {
        return "do".to_string();
    }
    if let Some((lemma, _)) = lookup_triple(IRREGULAR_VERBS, lower) {
        return lemma.to_string();
    }

    match tag {
        "VBZ" => stem(lower, Suffix::S, VERBS),
        "VBG" => stem(lower, Suffix::Ing, VERBS),
        "VBD" | "VBN" => stem(lower, Suffix::Ed, VERBS),
        _ => lower.to_string(),
    }
}

/// Strip `suffix`, preferring a stem present in `known`
pub fn stem(word: &str, suffix: Suffix, known: &[&str]) -> String {
    known_stem(word, suffix, known).unwrap_or_else(|| heuristic_stem(word, suffix))
}

/// The first candidate stem found in `known`, if any
pub fn known_stem(word: &str, suffix: Suffix, known: &[&str]) -> Option<String> {
    candidates(word, suffix)
        .into_iter()
        .find(|candidate| known.contains(&candidate.as_str()))
}

fn candidates(word: &str, suffix: Suffix) -> Vec<String> {
    let ending = suffix.as_str();
    if !word.ends_with(ending) || word.len() <= ending.len() + 1 {
        return Vec::new();
    }
    let base = &word[..word.len() - ending.len()];
    let mut out = Vec::new();

    match suffix {
        Suffix::S => {
            if let Some(root) = word.strip_suffix("ies") {
                out.push(format!("{}y", root));
            }
            out.push(base.to_string());
            if let Some(root) = word.strip_suffix("es") {
                out.push(root.to_string());
            }
        }
        Suffix::Ing => {
            out.push(base.to_string());
            out.push(undouble(base));
            out.push(format!("{}e", base));
        }
        Suffix::Ed | Suffix::Er | Suffix::Est => {
            out.push(base.to_string());
            // loved -> love, nicer -> nice
            out.push(word[..word.len() - ending.len() + 1].to_string());
            out.push(undouble(base));
            if let Some(root) = base.strip_suffix('i') {
                out.push(format!("{}y", root));
            }
        }
    }

    out
}

fn heuristic_stem(word: &str, suffix: Suffix) -> String {
    let ending = suffix.as_str();
    if !word.ends_with(ending) || word.len() <= ending.len() + 1 {
        return word.to_string();
    }
    let base = &word[..word.len() - ending.len()];

    match suffix {
        Suffix::S => {
            if word.ends_with("ss") {
                word.to_string()
            } else if let Some(root) = word.strip_suffix("ies").filter(|r| r.len() > 1) {
                format!("{}y", root)
            } else if ["sses", "xes", "zes", "ches", "shes", "oes"]
                .iter()
                .any(|e| word.ends_with(e))
            {
                word[..word.len() - 2].to_string()
            } else {
                base.to_string()
            }
        }
        Suffix::Ing => restore_stem(base),
        Suffix::Ed | Suffix::Er | Suffix::Est => {
            if let Some(root) = base.strip_suffix('i') {
                format!("{}y", root)
            } else if base.ends_with('e') {
                // agreed -> agree
                word[..word.len() - ending.len() + 1].to_string()
            } else {
                restore_stem(base)
            }
        }
    }
}

fn restore_stem(base: &str) -> String {
    let undoubled = undouble(base);
    if undoubled.len() != base.len() {
        undoubled
    } else if needs_silent_e(base) {
        format!("{}e", base)
    } else {
        base.to_string()
    }
}

/// `runn` -> `run`; `call` and `pass` keep their double letter
fn undouble(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    match chars.as_slice() {
        [.., a, b] if a == b && !is_vowel(*b) && !matches!(*b, 'l' | 's' | 'z') => {
            chars[..chars.len() - 1].iter().collect()
        }
        _ => stem.to_string(),
    }
}

fn needs_silent_e(stem: &str) -> bool {
    let chars: Vec<char> = stem.chars().collect();
    let Some(&last) = chars.last() else {
        return false;
    };

    if matches!(last, 'v' | 'c' | 'z' | 'u') {
        return true;
    }

    // Short consonant-vowel-consonant stems: mak(e), com(e), us(e)
    let n = chars.len();
    if n > 3 || n < 2 || is_vowel(last) || matches!(last, 'w' | 'x' | 'y') {
        return false;
    }
    is_vowel(chars[n - 2]) && (n == 2 || !is_vowel(chars[n - 3]))
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}
