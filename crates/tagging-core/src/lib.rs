//! Linguistic tagging for CorBas
//!
//! This crate turns raw text into annotated tokens:
//!
//! - `pipeline`: tokenization, part-of-speech tagging, lemmatization and
//!   dependency attachment behind the [`TaggingPipeline`] trait
//! - `usas`: lexicon-rule USAS semantic tagging behind the [`SemanticTagger`] trait
//! - `fallback`: the gazetteer classifier used when no semantic tagger is loaded
//! - `annotator`: assembles the per-token records returned by the API

pub mod annotator;
pub mod error;
pub mod fallback;
pub mod pipeline;
pub mod types;
pub mod usas;

pub use annotator::{analyze, annotate};
pub use error::TaggingError;
pub use fallback::fallback_semantic_tag;
pub use pipeline::{RulePipeline, TaggingPipeline};
pub use types::{AnalysisResult, PipelineToken, TokenRecord, Upos};
pub use usas::{SemanticTagger, UsasLexicon, UsasTagger};

/// Tag reported when no semantic category applies
pub const UNMATCHED_TAG: &str = "Z99";
