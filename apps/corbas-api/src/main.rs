//! CorBas backend server
//!
//! Serves the CorBas corpus tool with:
//!
//! - `GET /health`: component status
//! - `POST /analyze`: POS, dependency and USAS semantic tagging
//! - `POST /highlight_pdf`: phrase highlighting in uploaded PDFs
//! - `GET /corbas.html` and `GET /`: the companion page
//!
//! Semantic tagging uses a USAS lexicon when one is configured and loads;
//! otherwise every token goes through the built-in gazetteer classifier.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use highlight_core::{HighlightEngine, LopdfEngine};
use tagging_core::{RulePipeline, SemanticTagger, TaggingPipeline, UsasTagger};

mod api;
mod error;
#[cfg(test)]
mod tests;

use api::{handle_analyze, handle_companion_page, handle_health, handle_highlight_pdf};

/// Command-line arguments for the CorBas server
#[derive(Parser, Debug)]
#[command(name = "corbas-api")]
#[command(about = "CorBas backend for text analysis and PDF highlighting")]
struct Args {
    /// Host address to bind to
    #[arg(long, env = "CORBAS_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "CORBAS_PORT", default_value = "5000")]
    port: u16,

    /// Single-word USAS lexicon (TSV)
    #[arg(long, env = "CORBAS_LEXICON")]
    lexicon: Option<PathBuf>,

    /// Multi-word expression USAS lexicon (TSV)
    #[arg(long, env = "CORBAS_MWE_LEXICON")]
    mwe_lexicon: Option<PathBuf>,

    /// Directory holding corbas.html
    #[arg(long, env = "CORBAS_STATIC_DIR", default_value = ".")]
    static_dir: PathBuf,

    /// Largest accepted request body, in megabytes
    #[arg(long, default_value = "64")]
    max_upload_mb: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state, immutable after startup
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<dyn TaggingPipeline>,
    /// Present only when the lexicon tagger loaded
    pub semantic: Option<Arc<dyn SemanticTagger>>,
    pub engine: Arc<dyn HighlightEngine>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(semantic: Option<Arc<dyn SemanticTagger>>, static_dir: PathBuf) -> Self {
        Self {
            pipeline: Arc::new(RulePipeline::new()),
            semantic,
            engine: Arc::new(LopdfEngine::new()),
            static_dir,
        }
    }
}

/// Load the lexicon tagger; failure leaves the server on the fallback classifier
fn load_semantic_tagger(
    lexicon: Option<&Path>,
    mwe_lexicon: Option<&Path>,
) -> Option<Arc<dyn SemanticTagger>> {
    let Some(lexicon) = lexicon else {
        warn!("No USAS lexicon configured, using fallback semantic tagger");
        return None;
    };

    match UsasTagger::from_paths(lexicon, mwe_lexicon) {
        Ok(tagger) => {
            info!("USAS semantic tagger loaded");
            let tagger: Arc<dyn SemanticTagger> = Arc::new(tagger);
            Some(tagger)
        }
        Err(e) => {
            warn!("Could not load USAS lexicon: {}", e);
            warn!("Continuing with fallback semantic tagger");
            None
        }
    }
}

/// Build the router with all routes and middleware
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/analyze", post(handle_analyze))
        .route("/highlight_pdf", post(handle_highlight_pdf))
        .route("/corbas.html", get(handle_companion_page))
        .route("/", get(handle_companion_page))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CorBas backend on {}:{}", args.host, args.port);

    let semantic = load_semantic_tagger(args.lexicon.as_deref(), args.mwe_lexicon.as_deref());
    let state = AppState::new(semantic, args.static_dir.clone());

    let mut pipes = state.pipeline.pipe_names();
    if let Some(tagger) = &state.semantic {
        pipes.push(tagger.name().to_string());
    }
    info!("Pipelines loaded: {:?}", pipes);

    let app = build_router(state, args.max_upload_mb * 1024 * 1024);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Companion page: {}", args.static_dir.join(api::COMPANION_PAGE).display());

    axum::serve(listener, app).await?;

    Ok(())
}
