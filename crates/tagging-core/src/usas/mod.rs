//! USAS semantic tagging
//!
//! [`SemanticTagger`] returns ranked USAS candidates for every token of a
//! processed text. [`UsasTagger`] is a lexicon-rule tagger: multi-word
//! expressions are matched first (longest template wins), remaining tokens
//! are looked up in the single-word lexicon, POS-specific entries before
//! POS-agnostic ones.

pub mod lexicon;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, info};

use crate::error::TaggingError;
use crate::types::{PipelineToken, Upos};
pub use lexicon::{MweEntry, MweLexicon, TemplatePart, UsasLexicon};

/// Default tag for punctuation without a lexicon entry
pub const PUNCTUATION_TAG: &str = "PUNCT";
/// Default tag for numbers without a lexicon entry
pub const NUMBER_TAG: &str = "N1";

pub trait SemanticTagger: Send + Sync {
    /// Pipeline component name reported by `/health`
    fn name(&self) -> &str;

    /// Ranked candidates per token; an empty list means no match
    fn tag(&self, tokens: &[PipelineToken]) -> Result<Vec<Vec<String>>, TaggingError>;
}

/// Core USAS POS tag for a universal POS tag
pub fn usas_core_pos(pos: Upos) -> &'static str {
    match pos {
        Upos::Adj => "adj",
        Upos::Adp => "prep",
        Upos::Adv => "adv",
        Upos::Aux | Upos::Verb => "verb",
        Upos::Cconj | Upos::Sconj => "conj",
        Upos::Det => "det",
        Upos::Intj => "intj",
        Upos::Noun => "noun",
        Upos::Num => "num",
        Upos::Part => "part",
        Upos::Pron => "pron",
        Upos::Propn => "pnoun",
        Upos::Punct => "punc",
        Upos::Sym | Upos::X => "fo",
    }
}

#[derive(Debug, Clone, Default)]
pub struct UsasTagger {
    single: UsasLexicon,
    mwe: MweLexicon,
}

impl UsasTagger {
    pub fn new(single: UsasLexicon, mwe: MweLexicon) -> Self {
        Self { single, mwe }
    }

    /// Load lexicons from TSV files
    pub fn from_paths(single: &Path, mwe: Option<&Path>) -> Result<Self, TaggingError> {
        let single = UsasLexicon::from_tsv_reader(open_lexicon(single)?)
            .map_err(|e| with_path(e, single))?;
        let mwe = match mwe {
            Some(path) => {
                MweLexicon::from_tsv_reader(open_lexicon(path)?).map_err(|e| with_path(e, path))?
            }
            None => MweLexicon::default(),
        };

        info!(
            "Loaded USAS lexicon: {} single-word entries, {} MWE templates",
            single.len(),
            mwe.len()
        );

        Ok(Self::new(single, mwe))
    }

    fn single_word_tags(&self, token: &PipelineToken) -> Option<&[String]> {
        let core = usas_core_pos(token.pos);
        let upos = token.pos.as_str().to_lowercase();
        let lower_text = token.text.to_lowercase();
        let lower_lemma = token.lemma.to_lowercase();
        let words = [
            token.text.as_str(),
            token.lemma.as_str(),
            lower_text.as_str(),
            lower_lemma.as_str(),
        ];

        let with_pos = words.iter().find_map(|word| {
            self.single
                .get(word, Some(core))
                .or_else(|| self.single.get(word, Some(upos.as_str())))
        });

        with_pos.or_else(|| words.iter().find_map(|word| self.single.get(word, None)))
    }

    /// Longest MWE starting at `start`, as (length, tags)
    fn mwe_at(&self, tokens: &[PipelineToken], start: usize) -> Option<(usize, &[String])> {
        self.mwe.entries().iter().find_map(|entry| {
            let span = tokens.get(start..start + entry.template.len())?;
            let matched = entry.template.iter().zip(span).all(|(part, token)| {
                let pos_tags = [token.pos.as_str(), usas_core_pos(token.pos)];
                part.matches(&token.text, &pos_tags) || part.matches(&token.lemma, &pos_tags)
            });
            matched.then(|| (entry.template.len(), entry.tags.as_slice()))
        })
    }
}

impl SemanticTagger for UsasTagger {
    fn name(&self) -> &str {
        "usas_rule_based_tagger"
    }

    fn tag(&self, tokens: &[PipelineToken]) -> Result<Vec<Vec<String>>, TaggingError> {
        let mut tags: Vec<Option<Vec<String>>> = vec![None; tokens.len()];

        let mut i = 0;
        while i < tokens.len() {
            match self.mwe_at(tokens, i) {
                Some((len, mwe_tags)) => {
                    debug!("MWE match at token {} spanning {} tokens", i, len);
                    for slot in &mut tags[i..i + len] {
                        *slot = Some(mwe_tags.to_vec());
                    }
                    i += len;
                }
                None => i += 1,
            }
        }

        Ok(tokens
            .iter()
            .zip(tags)
            .map(|(token, mwe)| {
                mwe.or_else(|| self.single_word_tags(token).map(<[String]>::to_vec))
                    .unwrap_or_else(|| match token.pos {
                        Upos::Punct => vec![PUNCTUATION_TAG.to_string()],
                        Upos::Num => vec![NUMBER_TAG.to_string()],
                        _ => Vec::new(),
                    })
            })
            .collect())
    }
}

fn open_lexicon(path: &Path) -> Result<BufReader<File>, TaggingError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| TaggingError::Lexicon {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

fn with_path(err: TaggingError, path: &Path) -> TaggingError {
    match err {
        TaggingError::LexiconFormat { line, message } => TaggingError::Lexicon {
            path: path.display().to_string(),
            message: format!("line {}: {}", line, message),
        },
        other => other,
    }
}
