//! Per-token records for `/analyze`

use tracing::debug;

use crate::error::TaggingError;
use crate::fallback::fallback_semantic_tag;
use crate::pipeline::TaggingPipeline;
use crate::types::{AnalysisResult, TokenRecord};
use crate::usas::SemanticTagger;
use crate::UNMATCHED_TAG;

/// Run the pipeline and attach one semantic tag per token.
///
/// With a semantic tagger the first ranked candidate is used (`Z99` when
/// there is none); without one the fallback classifier decides.
pub fn annotate(
    text: &str,
    pipeline: &dyn TaggingPipeline,
    semantic: Option<&dyn SemanticTagger>,
) -> Result<Vec<TokenRecord>, TaggingError> {
    let tokens = pipeline.process(text)?;

    let semantic_tags: Vec<String> = match semantic {
        Some(tagger) => {
            let candidates = tagger.tag(&tokens)?;
            if candidates.len() != tokens.len() {
                return Err(TaggingError::Pipeline(format!(
                    "{} returned {} tag lists for {} tokens",
                    tagger.name(),
                    candidates.len(),
                    tokens.len()
                )));
            }
            candidates
                .into_iter()
                .map(|ranked| {
                    ranked
                        .into_iter()
                        .next()
                        .unwrap_or_else(|| UNMATCHED_TAG.to_string())
                })
                .collect()
        }
        None => tokens
            .iter()
            .map(|t| fallback_semantic_tag(&t.lemma, t.pos.as_str()).to_string())
            .collect(),
    };

    debug!("Annotated {} tokens", tokens.len());

    Ok(tokens
        .into_iter()
        .zip(semantic_tags)
        .map(|(token, semantic)| TokenRecord {
            word: token.text,
            pos: token.pos.as_str().to_string(),
            tag: token.tag,
            semantic,
            dep: token.dep,
            head: token.head,
            lemma: token.lemma,
            is_stop: token.is_stop,
            is_punct: token.is_punct,
        })
        .collect())
}

pub fn analyze(
    text: &str,
    corpus_name: &str,
    pipeline: &dyn TaggingPipeline,
    semantic: Option<&dyn SemanticTagger>,
) -> Result<AnalysisResult, TaggingError> {
    let tokens = annotate(text, pipeline, semantic)?;

    Ok(AnalysisResult {
        num_tokens: tokens.len(),
        tokens,
        corpus_name: corpus_name.to_string(),
        has_pymusas: semantic.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::RulePipeline;
    use crate::types::PipelineToken;
    use pretty_assertions::assert_eq;

    /// Repeats a fixed candidate list for every token
    struct FixedTagger(Vec<Vec<String>>);

    impl SemanticTagger for FixedTagger {
        fn name(&self) -> &str {
            "fixed"
        }

        fn tag(&self, tokens: &[PipelineToken]) -> Result<Vec<Vec<String>>, TaggingError> {
            Ok(self.0.iter().cloned().cycle().take(tokens.len()).collect())
        }
    }

    /// Always fails
    struct BrokenTagger;

    impl SemanticTagger for BrokenTagger {
        fn name(&self) -> &str {
            "broken"
        }

        fn tag(&self, _tokens: &[PipelineToken]) -> Result<Vec<Vec<String>>, TaggingError> {
            Err(TaggingError::Pipeline("lexicon unavailable".into()))
        }
    }

    /// Returns one list fewer than there are tokens
    struct ShortTagger;

    impl SemanticTagger for ShortTagger {
        fn name(&self) -> &str {
            "short"
        }

        fn tag(&self, tokens: &[PipelineToken]) -> Result<Vec<Vec<String>>, TaggingError> {
            Ok(vec![vec!["A1".to_string()]; tokens.len().saturating_sub(1)])
        }
    }

    #[test]
    fn test_fallback_mode() {
        let result = analyze("I love London", "demo", &RulePipeline::new(), None).unwrap();
        assert_eq!(result.num_tokens, 3);
        assert_eq!(result.corpus_name, "demo");
        assert!(!result.has_pymusas);

        let semantic: Vec<&str> = result.tokens.iter().map(|t| t.semantic.as_str()).collect();
        assert_eq!(semantic, vec!["Z8", "E1.1+", "Z3"]);
    }

    #[test]
    fn test_tagger_mode_takes_first_candidate() {
        let tagger = FixedTagger(vec![vec!["A1".to_string(), "B2".to_string()]]);
        let result = analyze("Hello world", "x", &RulePipeline::new(), Some(&tagger)).unwrap();
        assert!(result.has_pymusas);
        assert!(result.tokens.iter().all(|t| t.semantic == "A1"));
    }

    #[test]
    fn test_tagger_mode_empty_candidates_is_unmatched() {
        let tagger = FixedTagger(vec![Vec::new()]);
        let tokens = annotate("love", &RulePipeline::new(), Some(&tagger)).unwrap();
        assert_eq!(tokens[0].semantic, UNMATCHED_TAG);
    }

    #[test]
    fn test_tagger_error_aborts_request() {
        let err = analyze("I love London", "x", &RulePipeline::new(), Some(&BrokenTagger))
            .unwrap_err();
        assert!(matches!(err, TaggingError::Pipeline(_)));
    }

    #[test]
    fn test_tagger_length_mismatch_aborts_request() {
        let err = annotate("I love London", &RulePipeline::new(), Some(&ShortTagger)).unwrap_err();
        assert!(err.to_string().contains("short returned 2 tag lists for 3 tokens"));
    }

    #[test]
    fn test_empty_text() {
        let result = analyze("", "unnamed", &RulePipeline::new(), None).unwrap();
        assert_eq!(result.num_tokens, 0);
        assert!(result.tokens.is_empty());
    }

    #[test]
    fn test_records_copy_pipeline_fields() {
        let tokens = annotate("Dogs barked.", &RulePipeline::new(), None).unwrap();
        assert_eq!(tokens[0].word, "Dogs");
        assert_eq!(tokens[2].pos, "PUNCT");
        assert!(tokens[2].is_punct);
        assert!(tokens.iter().all(|t| t.head < tokens.len()));
    }
}
