//! Error types for the CorBas server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use highlight_core::HighlightError;
use tagging_core::TaggingError;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    /// Bad client input, reported as 400 with the message as-is
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Tagging(#[from] TaggingError),

    #[error(transparent)]
    Highlight(#[from] HighlightError),

    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            // full source chain goes to the log, the top message to the client
            error!("Request failed: {:#}", anyhow::Error::from(self));
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
