//! Regex tokenizer with English clitic splitting

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Words (with inner apostrophes), numbers (with separators), ellipses,
    /// then any other single non-space character
    static ref TOKEN_PATTERN: Regex = Regex::new(
        r"[\p{L}\p{M}]+(?:['’][\p{L}\p{M}]+)*|\p{N}+(?:[.,:]\p{N}+)*|\.{2,}|[^\s]"
    )
    .unwrap();
}

const CLITIC_SUFFIXES: &[&str] = &["'s", "'m", "'re", "'ve", "'ll", "'d"];

/// A token plus its byte offset in the source text
#[derive(Debug, Clone, PartialEq)]
pub struct RawToken {
    pub text: String,
    pub offset: usize,
}

pub fn tokenize(text: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();

    for m in TOKEN_PATTERN.find_iter(text) {
        for (start, piece) in split_clitic(m.as_str()) {
            tokens.push(RawToken {
                text: piece.to_string(),
                offset: m.start() + start,
            });
        }
    }

    tokens
}

/// Split `don't` into `do` + `n't` and `she's` into `she` + `'s`.
///
/// Returns (byte offset within word, piece) pairs.
fn split_clitic(word: &str) -> Vec<(usize, &str)> {
    let Some((apostrophe, _)) = word
        .char_indices()
        .filter(|(_, c)| *c == '\'' || *c == '’')
        .last()
    else {
        return vec![(0, word)];
    };

    let suffix = normalize_apostrophe(&word[apostrophe..]).to_lowercase();

    if suffix == "'t" {
        if let Some((n_pos, 'n' | 'N')) = word[..apostrophe].char_indices().next_back() {
            if n_pos > 0 {
                return vec![(0, &word[..n_pos]), (n_pos, &word[n_pos..])];
            }
        }
    }

    if apostrophe > 0 && CLITIC_SUFFIXES.contains(&suffix.as_str()) {
        return vec![(0, &word[..apostrophe]), (apostrophe, &word[apostrophe..])];
    }

    vec![(0, word)]
}

/// Typographic apostrophes compare equal to ASCII ones
pub fn normalize_apostrophe(text: &str) -> String {
    text.replace('’', "'")
}
