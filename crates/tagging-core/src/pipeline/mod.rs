//! Linguistic processing pipeline
//!
//! [`TaggingPipeline`] is the seam between the annotator and whatever
//! produces tokens with POS tags, lemmas and dependency arcs.
//! [`RulePipeline`] is the built-in implementation: tokenizer, tagger,
//! lemmatizer and parser running in sequence.

pub mod lemmatizer;
pub mod lexicon;
pub mod parser;
pub mod tagger;
pub mod tokenizer;

use std::collections::HashSet;
use std::ops::Range;

use lazy_static::lazy_static;

use crate::error::TaggingError;
use crate::types::{PipelineToken, Upos};
use lemmatizer::lemmatize;
use lexicon::STOP_WORDS;
use parser::attach;
use tagger::tag_sentence;
use tokenizer::{normalize_apostrophe, tokenize, RawToken};

lazy_static! {
    static ref STOP_SET: HashSet<&'static str> = STOP_WORDS.iter().copied().collect();
}

/// A component that turns raw text into annotated tokens
pub trait TaggingPipeline: Send + Sync {
    /// Component names in execution order, as reported by `/health`
    fn pipe_names(&self) -> Vec<String>;

    fn process(&self, text: &str) -> Result<Vec<PipelineToken>, TaggingError>;
}

#[derive(Debug, Clone, Default)]
pub struct RulePipeline;

impl RulePipeline {
    pub fn new() -> Self {
        Self
    }
}

impl TaggingPipeline for RulePipeline {
    fn pipe_names(&self) -> Vec<String> {
        ["tokenizer", "tagger", "lemmatizer", "parser"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn process(&self, text: &str) -> Result<Vec<PipelineToken>, TaggingError> {
        let raw = tokenize(text);
        let mut tokens = Vec::with_capacity(raw.len());

        for sentence in split_sentences(&raw) {
            let offset = sentence.start;
            let words: Vec<&str> = raw[sentence].iter().map(|t| t.text.as_str()).collect();
            let guesses = tag_sentence(&words);
            let arcs = attach(&guesses);

            for ((word, guess), (head, dep)) in words.iter().zip(&guesses).zip(arcs) {
                tokens.push(PipelineToken {
                    text: word.to_string(),
                    pos: guess.pos,
                    tag: guess.tag.to_string(),
                    dep: dep.to_string(),
                    head: offset + head,
                    lemma: lemmatize(word, guess.pos, guess.tag),
                    is_stop: is_stop_word(word),
                    is_punct: guess.pos == Upos::Punct,
                });
            }
        }

        Ok(tokens)
    }
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_SET.contains(normalize_apostrophe(word).to_lowercase().as_str())
}

/// Sentence spans: a sentence ends after `.`, `!`, `?` or an ellipsis
fn split_sentences(tokens: &[RawToken]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate() {
        let terminal = matches!(token.text.as_str(), "." | "!" | "?")
            || (token.text.len() > 1 && token.text.chars().all(|c| c == '.'));
        if terminal {
            spans.push(start..i + 1);
            start = i + 1;
        }
    }
    if start < tokens.len() {
        spans.push(start..tokens.len());
    }

    spans
}
