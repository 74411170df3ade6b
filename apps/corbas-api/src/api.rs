//! API handlers for the CorBas server
//!
//! Provides endpoints for:
//! - Health reporting
//! - Text analysis (POS, dependencies, semantic tags)
//! - PDF phrase highlighting
//! - The companion HTML page

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use highlight_core::RgbColor;
use tagging_core::{analyze, AnalysisResult};

use crate::error::ServerError;
use crate::AppState;

/// File served at `/corbas.html` and `/`
pub const COMPANION_PAGE: &str = "corbas.html";

const DEFAULT_CORPUS_NAME: &str = "unnamed";
const DEFAULT_HIGHLIGHT_COLOR: &str = "#FFFF00";

/// Health check response. Field names are what the frontend expects.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    /// Tagging pipeline available
    pub spacy: bool,
    /// Lexicon semantic tagger loaded
    pub pymusas: bool,
    /// PDF engine available
    pub pymupdf: bool,
    pub pipes: Vec<String>,
}

/// Handler: GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut pipes = state.pipeline.pipe_names();
    if let Some(tagger) = &state.semantic {
        pipes.push(tagger.name().to_string());
    }

    Json(HealthResponse {
        status: "ok",
        message: "CorBas backend is running",
        spacy: true,
        pymusas: state.semantic.is_some(),
        pymupdf: true,
        pipes,
    })
}

/// Analyze request body
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: Option<String>,
    pub corpus_name: Option<String>,
}

/// Handler: POST /analyze
///
/// The body is parsed by hand so that a missing or non-JSON body gets the
/// same 400 as a missing `text` field.
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalysisResult>, ServerError> {
    let req: AnalyzeRequest = serde_json::from_slice(&body)
        .map_err(|_| ServerError::InvalidRequest("No text provided".into()))?;
    let text = req
        .text
        .ok_or_else(|| ServerError::InvalidRequest("No text provided".into()))?;
    let corpus_name = req
        .corpus_name
        .unwrap_or_else(|| DEFAULT_CORPUS_NAME.to_string());

    info!(
        "Analyzing text for corpus: {} ({} chars)",
        corpus_name,
        text.chars().count()
    );

    let result = tokio::task::spawn_blocking(move || {
        analyze(
            &text,
            &corpus_name,
            state.pipeline.as_ref(),
            state.semantic.as_deref(),
        )
    })
    .await??;

    info!("Successfully analyzed {} tokens", result.num_tokens);
    Ok(Json(result))
}

/// Uploaded form after field extraction
#[derive(Debug, Default)]
struct HighlightForm {
    file: Option<(String, Vec<u8>)>,
    phrases: Option<String>,
    color: Option<String>,
}

async fn read_highlight_form(mut multipart: Multipart) -> Result<HighlightForm, ServerError> {
    let mut form = HighlightForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::InvalidRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::InvalidRequest(e.to_string()))?;
                form.file = Some((filename, bytes.to_vec()));
            }
            "phrases" | "color" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ServerError::InvalidRequest(e.to_string()))?;
                if name == "phrases" {
                    form.phrases = Some(value);
                } else {
                    form.color = Some(value);
                }
            }
            other => debug!("Ignoring form field '{}'", other),
        }
    }

    Ok(form)
}

/// Handler: POST /highlight_pdf
pub async fn handle_highlight_pdf(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ServerError> {
    // a body that is not multipart carries no file
    let multipart = multipart.map_err(|_| ServerError::InvalidRequest("No file provided".into()))?;
    let form = read_highlight_form(multipart).await?;

    let (filename, pdf_bytes) = form
        .file
        .ok_or_else(|| ServerError::InvalidRequest("No file provided".into()))?;
    if filename.is_empty() {
        return Err(ServerError::InvalidRequest("No file selected".into()));
    }
    if pdf_bytes.is_empty() {
        return Err(ServerError::InvalidRequest("Uploaded file is empty".into()));
    }

    let phrases: Vec<String> = serde_json::from_str(form.phrases.as_deref().unwrap_or("[]"))
        .map_err(|e| ServerError::Internal(format!("Invalid phrases list: {}", e)))?;
    if phrases.is_empty() {
        return Err(ServerError::InvalidRequest("No phrases to highlight".into()));
    }

    let color = RgbColor::from_hex(form.color.as_deref().unwrap_or(DEFAULT_HIGHLIGHT_COLOR))?;

    info!(
        "Highlighting {} phrases in PDF: {}",
        phrases.len(),
        filename
    );

    let engine = state.engine.clone();
    let outcome =
        tokio::task::spawn_blocking(move || engine.highlight(&pdf_bytes, &phrases, color))
            .await??;

    info!("Successfully highlighted {} occurrences", outcome.annotations);

    let disposition = format!(
        "attachment; filename=\"{}\"",
        highlighted_filename(&filename)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        outcome.bytes,
    )
        .into_response())
}

/// `<stem>_highlighted.pdf`, where the stem drops only the last extension.
/// Characters that cannot sit in a quoted header value become `_`.
pub fn highlighted_filename(original: &str) -> String {
    let stem = original
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(original);

    let safe: String = stem
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!("{}_highlighted.pdf", safe)
}

/// Handler: GET /corbas.html and GET /
pub async fn handle_companion_page(State(state): State<AppState>) -> Html<String> {
    let path = state.static_dir.join(COMPANION_PAGE);
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html),
        Err(e) => {
            warn!("Could not read {}: {}", path.display(), e);
            Html(missing_page_html())
        }
    }
}

fn missing_page_html() -> String {
    format!(
        r#"<html>
<body style="font-family: Arial; padding: 40px; text-align: center;">
    <h1>File Not Found</h1>
    <p>Please make sure <code>{page}</code> is in the server's static directory (<code>--static-dir</code>)</p>
    <p><a href="/health">Check Backend Health</a></p>
</body>
</html>
"#,
        page = COMPANION_PAGE
    )
}
