//! Tests for the CorBas server API
//!
//! - Property tests over the handler helpers and the analysis path
//! - HTTP endpoint tests against the full router using axum-test

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use tagging_core::{analyze, RulePipeline};

    use crate::api::highlighted_filename;

    proptest! {
        /// Property: the download name always ends in the suffix and is header safe
        #[test]
        fn download_name_is_header_safe(name in "\\PC{0,40}") {
            let out = highlighted_filename(&name);
            prop_assert!(out.ends_with("_highlighted.pdf"));
            prop_assert!(out.chars().all(|c| c.is_ascii() && c != '"' && c != '\\'));
        }

        /// Property: every head points into the same token list
        #[test]
        fn analysis_heads_stay_in_range(text in "[A-Za-z ,.!?']{0,80}") {
            let result = analyze(&text, "prop", &RulePipeline::new(), None).unwrap();
            prop_assert_eq!(result.num_tokens, result.tokens.len());
            for token in &result.tokens {
                prop_assert!(token.head < result.num_tokens);
            }
        }

        /// Property: fallback mode never leaves a token without a tag
        #[test]
        fn every_token_gets_a_semantic_tag(text in "[A-Za-z0-9 ]{1,60}") {
            let result = analyze(&text, "prop", &RulePipeline::new(), None).unwrap();
            prop_assert!(result.tokens.iter().all(|t| !t.semantic.is_empty()));
        }
    }
}

#[cfg(test)]
mod http_tests {
    //! HTTP endpoint integration tests using axum-test

    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use tagging_core::usas::MweLexicon;
    use tagging_core::{
        PipelineToken, SemanticTagger, TaggingError, TaggingPipeline, UsasLexicon, UsasTagger,
    };

    use crate::{build_router, AppState};

    const SINGLE_LEXICON: &str = "lemma\tsemantic_tags\n\
        happy\tE4.1+ X5.2+\n\
        book\tQ4.1 Q1.2\n";

    fn empty_static_dir() -> PathBuf {
        std::env::temp_dir().join("corbas-api-tests-no-such-dir")
    }

    /// Create a test server with the full router
    fn create_test_server(semantic: Option<Arc<dyn SemanticTagger>>, static_dir: PathBuf) -> TestServer {
        let state = AppState::new(semantic, static_dir);
        TestServer::new(build_router(state, 16 * 1024 * 1024)).unwrap()
    }

    /// Pipeline whose every run fails
    struct FailingPipeline;

    impl TaggingPipeline for FailingPipeline {
        fn pipe_names(&self) -> Vec<String> {
            vec!["failing".to_string()]
        }

        fn process(&self, _text: &str) -> Result<Vec<PipelineToken>, TaggingError> {
            Err(TaggingError::Pipeline("model not loaded".into()))
        }
    }

    fn fallback_server() -> TestServer {
        create_test_server(None, empty_static_dir())
    }

    fn lexicon_server() -> TestServer {
        let single = UsasLexicon::from_tsv_str(SINGLE_LEXICON).unwrap();
        let mwe = MweLexicon::from_tsv_str("").unwrap();
        let tagger: Arc<dyn SemanticTagger> = Arc::new(UsasTagger::new(single, mwe));
        create_test_server(Some(tagger), empty_static_dir())
    }

    /// Single-page PDF showing `text` in Helvetica
    fn create_test_pdf(text: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    fn pdf_part(bytes: Vec<u8>, filename: &str) -> Part {
        Part::bytes(bytes)
            .file_name(filename)
            .mime_type("application/pdf")
    }

    fn annotation_count(bytes: &[u8]) -> usize {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|page_id| {
                doc.get_dictionary(*page_id)
                    .unwrap()
                    .get(b"Annots")
                    .and_then(Object::as_array)
                    .map(|a| a.len())
                    .unwrap_or(0)
            })
            .sum()
    }

    // ---------------------------------------------------------------
    // Health
    // ---------------------------------------------------------------

    #[tokio::test]
    async fn test_health_in_fallback_mode() {
        let server = fallback_server();
        let response = server.get("/health").await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["message"], "CorBas backend is running");
        assert_eq!(json["spacy"], true);
        assert_eq!(json["pymusas"], false);
        assert_eq!(json["pymupdf"], true);
        assert_eq!(
            json["pipes"],
            json!(["tokenizer", "tagger", "lemmatizer", "parser"])
        );
    }

    #[tokio::test]
    async fn test_health_lists_semantic_tagger_when_loaded() {
        let server = lexicon_server();
        let json = server.get("/health").await.json::<serde_json::Value>();

        assert_eq!(json["pymusas"], true);
        let pipes = json["pipes"].as_array().unwrap();
        assert_eq!(pipes.last().unwrap(), "usas_rule_based_tagger");
    }

    // ---------------------------------------------------------------
    // Analyze
    // ---------------------------------------------------------------

    #[tokio::test]
    async fn test_analyze_empty_text() {
        let server = fallback_server();
        let response = server.post("/analyze").json(&json!({ "text": "" })).await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["num_tokens"], 0);
        assert_eq!(json["tokens"], json!([]));
        assert_eq!(json["corpus_name"], "unnamed");
        assert_eq!(json["has_pymusas"], false);
    }

    #[tokio::test]
    async fn test_analyze_fallback_tags() {
        let server = fallback_server();
        let response = server
            .post("/analyze")
            .json(&json!({ "text": "I love London", "corpus_name": "letters" }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["corpus_name"], "letters");
        assert_eq!(json["num_tokens"], 3);

        let semantic: Vec<&str> = json["tokens"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["semantic"].as_str().unwrap())
            .collect();
        assert_eq!(semantic, vec!["Z8", "E1.1+", "Z3"]);

        let love = &json["tokens"][1];
        assert_eq!(love["word"], "love");
        assert_eq!(love["pos"], "VERB");
        assert_eq!(love["lemma"], "love");
        assert_eq!(love["is_punct"], false);
    }

    #[tokio::test]
    async fn test_analyze_with_lexicon_tagger() {
        let server = lexicon_server();
        let response = server
            .post("/analyze")
            .json(&json!({ "text": "The happy zorblax ." }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["has_pymusas"], true);
        let tokens = json["tokens"].as_array().unwrap();
        assert_eq!(tokens[1]["semantic"], "E4.1+");
        // no lexicon entry
        assert_eq!(tokens[2]["semantic"], "Z99");
        assert_eq!(tokens[3]["semantic"], "PUNCT");
        assert_eq!(tokens[3]["is_punct"], true);
    }

    #[tokio::test]
    async fn test_analyze_rejects_missing_text() {
        let server = fallback_server();
        let response = server
            .post("/analyze")
            .json(&json!({ "corpus_name": "x" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"], "No text provided");
    }

    #[tokio::test]
    async fn test_analyze_pipeline_failure_is_internal_error() {
        let mut state = AppState::new(None, empty_static_dir());
        state.pipeline = Arc::new(FailingPipeline);
        let server = TestServer::new(build_router(state, 1024 * 1024)).unwrap();

        let response = server
            .post("/analyze")
            .json(&json!({ "text": "I love London" }))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"], "Tagging pipeline failed: model not loaded");
        assert!(json.get("tokens").is_none());
    }

    #[tokio::test]
    async fn test_analyze_rejects_non_json_body() {
        let server = fallback_server();
        let response = server.post("/analyze").text("text=hello").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let json = response.json::<serde_json::Value>();
        assert!(json["error"].is_string());
    }

    // ---------------------------------------------------------------
    // Highlight
    // ---------------------------------------------------------------

    #[tokio::test]
    async fn test_highlight_returns_annotated_attachment() {
        let server = fallback_server();
        let form = MultipartForm::new()
            .add_text("phrases", r#"["hello world"]"#)
            .add_text("color", "#00FF00")
            .add_part("file", pdf_part(create_test_pdf("Hello World"), "letter.pdf"));

        let response = server.post("/highlight_pdf").multipart(form).await;
        response.assert_status_ok();

        assert_eq!(response.header(header::CONTENT_TYPE), "application/pdf");
        let disposition = response.header(header::CONTENT_DISPOSITION);
        assert_eq!(
            disposition.to_str().unwrap(),
            "attachment; filename=\"letter_highlighted.pdf\""
        );

        // one annotation per search pass
        assert_eq!(annotation_count(response.as_bytes()), 2);
    }

    #[tokio::test]
    async fn test_highlight_absent_phrase_returns_valid_pdf() {
        let server = fallback_server();
        let form = MultipartForm::new()
            .add_text("phrases", r#"["not there"]"#)
            .add_part("file", pdf_part(create_test_pdf("Hello World"), "letter.pdf"));

        let response = server.post("/highlight_pdf").multipart(form).await;
        response.assert_status_ok();

        let doc = Document::load_mem(response.as_bytes()).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        assert_eq!(annotation_count(response.as_bytes()), 0);
    }

    #[tokio::test]
    async fn test_highlight_rejects_missing_file() {
        let server = fallback_server();
        let form = MultipartForm::new().add_text("phrases", r#"["x"]"#);

        let response = server.post("/highlight_pdf").multipart(form).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<serde_json::Value>()["error"], "No file provided");
    }

    #[tokio::test]
    async fn test_highlight_rejects_empty_file() {
        let server = fallback_server();
        let form = MultipartForm::new()
            .add_text("phrases", r#"["x"]"#)
            .add_part("file", pdf_part(Vec::new(), "empty.pdf"));

        let response = server.post("/highlight_pdf").multipart(form).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_highlight_rejects_empty_phrase_list() {
        let server = fallback_server();
        let form = MultipartForm::new()
            .add_text("phrases", "[]")
            .add_part("file", pdf_part(create_test_pdf("Hello"), "a.pdf"));

        let response = server.post("/highlight_pdf").multipart(form).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "No phrases to highlight"
        );
    }

    #[tokio::test]
    async fn test_highlight_missing_phrases_field_means_empty_list() {
        let server = fallback_server();
        let form =
            MultipartForm::new().add_part("file", pdf_part(create_test_pdf("Hello"), "a.pdf"));

        let response = server.post("/highlight_pdf").multipart(form).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_highlight_bad_color_is_internal_error() {
        let server = fallback_server();
        let form = MultipartForm::new()
            .add_text("phrases", r#"["Hello"]"#)
            .add_text("color", "#12")
            .add_part("file", pdf_part(create_test_pdf("Hello"), "a.pdf"));

        let response = server.post("/highlight_pdf").multipart(form).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.json::<serde_json::Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn test_highlight_unreadable_pdf_is_internal_error() {
        let server = fallback_server();
        let form = MultipartForm::new()
            .add_text("phrases", r#"["Hello"]"#)
            .add_part("file", pdf_part(b"definitely not a pdf".to_vec(), "a.pdf"));

        let response = server.post("/highlight_pdf").multipart(form).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    // ---------------------------------------------------------------
    // Companion page and middleware
    // ---------------------------------------------------------------

    #[tokio::test]
    async fn test_companion_page_fallback() {
        let server = fallback_server();
        let response = server.get("/corbas.html").await;
        response.assert_status_ok();
        assert!(response.text().contains("/health"));

        let root = server.get("/").await;
        root.assert_status_ok();
        assert_eq!(root.text(), response.text());
    }

    #[tokio::test]
    async fn test_companion_page_from_static_dir() {
        let dir = std::env::temp_dir().join(format!("corbas-api-static-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("corbas.html"), "<html>CorBas UI</html>").unwrap();

        let server = create_test_server(None, dir.clone());
        let response = server.get("/corbas.html").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "<html>CorBas UI</html>");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let server = fallback_server();
        let response = server
            .get("/health")
            .add_header(header::ORIGIN, HeaderValue::from_static("http://example.org"))
            .await;
        response.assert_status_ok();
        assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    }
}
