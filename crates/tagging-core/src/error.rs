use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaggingError {
    #[error("Failed to read lexicon {path}: {message}")]
    Lexicon { path: String, message: String },

    #[error("Malformed lexicon entry on line {line}: {message}")]
    LexiconFormat { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tagging pipeline failed: {0}")]
    Pipeline(String),
}
