//! Token and analysis types shared by the pipeline, the taggers and the API

use serde::{Deserialize, Serialize};

/// Universal part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Upos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl Upos {
    pub fn as_str(&self) -> &'static str {
        match self {
            Upos::Adj => "ADJ",
            Upos::Adp => "ADP",
            Upos::Adv => "ADV",
            Upos::Aux => "AUX",
            Upos::Cconj => "CCONJ",
            Upos::Det => "DET",
            Upos::Intj => "INTJ",
            Upos::Noun => "NOUN",
            Upos::Num => "NUM",
            Upos::Part => "PART",
            Upos::Pron => "PRON",
            Upos::Propn => "PROPN",
            Upos::Punct => "PUNCT",
            Upos::Sconj => "SCONJ",
            Upos::Sym => "SYM",
            Upos::Verb => "VERB",
            Upos::X => "X",
        }
    }

    /// Nouns, proper nouns and pronouns
    pub fn is_nominal(&self) -> bool {
        matches!(self, Upos::Noun | Upos::Propn | Upos::Pron)
    }
}

impl std::fmt::Display for Upos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One token as produced by a [`crate::TaggingPipeline`]
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineToken {
    pub text: String,
    pub pos: Upos,
    /// Fine-grained (Penn Treebank) tag
    pub tag: String,
    pub dep: String,
    /// Index of the syntactic head within the same token sequence
    pub head: usize,
    pub lemma: String,
    pub is_stop: bool,
    pub is_punct: bool,
}

/// Per-token output of `/analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub word: String,
    pub pos: String,
    pub tag: String,
    pub semantic: String,
    pub dep: String,
    pub head: usize,
    pub lemma: String,
    pub is_stop: bool,
    pub is_punct: bool,
}

/// Full `/analyze` response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub tokens: Vec<TokenRecord>,
    pub num_tokens: usize,
    pub corpus_name: String,
    /// True when the lexicon tagger produced the semantic tags
    pub has_pymusas: bool,
}
