//! PDF phrase highlighting
//!
//! Locates phrases in the text of each page and stamps a `/Highlight`
//! annotation over every occurrence, using lopdf throughout.
//!
//! - `text`: glyph positions from page content streams
//! - `search`: normalized phrase matching over located glyphs
//! - `annotate`: highlight annotation dictionaries and appearance streams
//! - `engine`: the document-level two-pass search-and-annotate loop

pub mod annotate;
pub mod color;
pub mod engine;
pub mod error;
pub mod search;
pub mod text;

pub use annotate::{HighlightStyle, ANNOTATION_AUTHOR, HIGHLIGHT_OPACITY};
pub use color::RgbColor;
pub use engine::{highlight_phrases, HighlightEngine, HighlightOutcome, LopdfEngine};
pub use error::HighlightError;

/// Parse PDF bytes and return page count
pub fn get_page_count(bytes: &[u8]) -> Result<u32, HighlightError> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| HighlightError::ParseError(e.to_string()))?;
    Ok(doc.get_pages().len() as u32)
}
