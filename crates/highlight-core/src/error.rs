use thiserror::Error;

#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("Failed to parse PDF: {0}")]
    ParseError(String),

    #[error("Invalid highlight color: {0}")]
    InvalidColor(String),

    #[error("PDF operation failed: {0}")]
    OperationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}
