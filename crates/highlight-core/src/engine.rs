//! Search-and-annotate over a whole document

use lopdf::{Document, ObjectId};
use tracing::{debug, info, warn};

use crate::annotate::{add_highlight_annotation, HighlightStyle};
use crate::color::RgbColor;
use crate::error::HighlightError;
use crate::search::find_phrase;
use crate::text::page_glyphs;

/// Result of highlighting a document
#[derive(Debug, Clone)]
pub struct HighlightOutcome {
    /// Re-serialized document
    pub bytes: Vec<u8>,
    pub annotations: usize,
    pub pages: usize,
}

/// A PDF engine able to find phrases and stamp highlight annotations
pub trait HighlightEngine: Send + Sync {
    fn name(&self) -> &str;

    fn highlight(
        &self,
        pdf: &[u8],
        phrases: &[String],
        color: RgbColor,
    ) -> Result<HighlightOutcome, HighlightError>;
}

/// Engine built on `lopdf` and the in-crate text locator
#[derive(Debug, Clone, Default)]
pub struct LopdfEngine;

impl LopdfEngine {
    pub fn new() -> Self {
        Self
    }
}

impl HighlightEngine for LopdfEngine {
    fn name(&self) -> &str {
        "lopdf"
    }

    fn highlight(
        &self,
        pdf: &[u8],
        phrases: &[String],
        color: RgbColor,
    ) -> Result<HighlightOutcome, HighlightError> {
        highlight_phrases(pdf, phrases, color)
    }
}

/// The two queries run for every phrase: trimmed lower-case, then as given.
/// Both always run, so a phrase usually yields duplicate annotations.
pub fn search_passes(phrase: &str) -> [String; 2] {
    [phrase.to_lowercase().trim().to_string(), phrase.to_string()]
}

/// Highlight every occurrence of every phrase on every page
pub fn highlight_phrases(
    pdf_bytes: &[u8],
    phrases: &[String],
    color: RgbColor,
) -> Result<HighlightOutcome, HighlightError> {
    let mut doc =
        Document::load_mem(pdf_bytes).map_err(|e| HighlightError::ParseError(e.to_string()))?;

    let style = HighlightStyle::new(color);
    let pages: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();
    let mut total = 0;

    for (page_num, page_id) in &pages {
        let glyphs = match page_glyphs(&doc, *page_id) {
            Ok(glyphs) => glyphs,
            Err(e) => {
                warn!("Skipping unreadable text on page {}: {}", page_num, e);
                continue;
            }
        };

        let mut on_page = 0;
        for phrase in phrases {
            for query in search_passes(phrase) {
                for rect in find_phrase(&glyphs, &query) {
                    add_highlight_annotation(&mut doc, *page_id, &rect, phrase, &style)?;
                    on_page += 1;
                }
            }
        }

        debug!("Page {}: {} glyphs, {} highlights", page_num, glyphs.len(), on_page);
        total += on_page;
    }

    info!(
        "Added {} highlight annotations across {} pages",
        total,
        pages.len()
    );

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| HighlightError::SerializationError(e.to_string()))?;

    Ok(HighlightOutcome {
        bytes,
        annotations: total,
        pages: pages.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::get_page_count;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Dictionary, Object, Stream, StringFormat};
    use pretty_assertions::assert_eq;

    fn helvetica() -> Dictionary {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        }
    }

    /// Document with one page per entry; each page shows its lines 14pt apart
    fn build_pdf(font: Dictionary, pages: &[Vec<Vec<u8>>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let font_id = doc.add_object(font);
        let pages_id = doc.new_object_id();

        let mut kids = Vec::new();
        for lines in pages {
            let mut operations = vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("TL", vec![14.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
            ];
            for line in lines {
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(line.clone(), StringFormat::Literal)],
                ));
                operations.push(Operation::new("T*", vec![]));
            }
            operations.push(Operation::new("ET", vec![]));

            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => Object::Reference(content_id),
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => Object::Reference(font_id) },
                },
            });
            kids.push(Object::Reference(page_id));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => kids.len() as i64,
                "Kids" => kids,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    fn pdf_with_lines(lines: &[&str]) -> Vec<u8> {
        build_pdf(
            helvetica(),
            &[lines.iter().map(|l| l.as_bytes().to_vec()).collect()],
        )
    }

    fn phrases(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Annotation dictionaries on the first page
    fn first_page_annotations(bytes: &[u8]) -> Vec<Dictionary> {
        let doc = Document::load_mem(bytes).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let page = doc.get_dictionary(page_id).unwrap();
        match page.get(b"Annots") {
            Ok(Object::Array(refs)) => refs
                .iter()
                .map(|r| {
                    doc.get_dictionary(r.as_reference().unwrap())
                        .unwrap()
                        .clone()
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_finds_phrase_regardless_of_case() {
        let pdf = pdf_with_lines(&["Hello World from CorBas"]);
        let outcome = highlight_phrases(&pdf, &phrases(&["hello world"]), RgbColor::YELLOW).unwrap();

        // lower-case pass and as-given pass both match
        assert_eq!(outcome.annotations, 2);
        assert_eq!(first_page_annotations(&outcome.bytes).len(), 2);
        assert_eq!(get_page_count(&outcome.bytes).unwrap(), 1);
    }

    #[test]
    fn test_absent_phrase_leaves_valid_document() {
        let pdf = pdf_with_lines(&["Nothing to see here"]);
        let outcome = highlight_phrases(&pdf, &phrases(&["missing"]), RgbColor::YELLOW).unwrap();

        assert_eq!(outcome.annotations, 0);
        assert!(outcome.bytes.starts_with(b"%PDF-"));
        assert_eq!(get_page_count(&outcome.bytes).unwrap(), 1);
        assert!(first_page_annotations(&outcome.bytes).is_empty());
    }

    #[test]
    fn test_color_is_stored_normalized() {
        let pdf = pdf_with_lines(&["red alert"]);
        let color = RgbColor::from_hex("#FF0000").unwrap();
        let outcome = highlight_phrases(&pdf, &phrases(&["red"]), color).unwrap();

        for annot in first_page_annotations(&outcome.bytes) {
            let c: Vec<f32> = annot
                .get(b"C")
                .unwrap()
                .as_array()
                .unwrap()
                .iter()
                .map(|o| o.as_float().unwrap())
                .collect();
            assert!((c[0] - 1.0).abs() < 1e-3);
            assert!(c[1].abs() < 1e-3);
            assert!(c[2].abs() < 1e-3);
        }
    }

    #[test]
    fn test_contents_quote_the_original_phrase() {
        let pdf = pdf_with_lines(&["Hello World"]);
        let outcome = highlight_phrases(&pdf, &phrases(&["Hello World"]), RgbColor::YELLOW).unwrap();

        for annot in first_page_annotations(&outcome.bytes) {
            match annot.get(b"Contents").unwrap() {
                Object::String(bytes, _) => assert_eq!(bytes.as_slice(), b"\"Hello World\""),
                other => panic!("unexpected Contents {:?}", other),
            }
        }
    }

    #[test]
    fn test_phrase_split_across_lines() {
        let pdf = pdf_with_lines(&["the quick", "brown fox"]);
        let outcome = highlight_phrases(&pdf, &phrases(&["quick brown"]), RgbColor::YELLOW).unwrap();

        // two regions per pass
        assert_eq!(outcome.annotations, 4);
    }

    #[test]
    fn test_duplicate_phrases_are_not_merged() {
        let pdf = pdf_with_lines(&["cat and dog"]);
        let outcome =
            highlight_phrases(&pdf, &phrases(&["cat", "cat"]), RgbColor::YELLOW).unwrap();
        assert_eq!(outcome.annotations, 4);
    }

    #[test]
    fn test_every_page_is_searched() {
        let pdf = build_pdf(
            helvetica(),
            &[
                vec![b"first page corpus".to_vec()],
                vec![b"second page corpus".to_vec()],
            ],
        );
        let outcome = highlight_phrases(&pdf, &phrases(&["corpus"]), RgbColor::YELLOW).unwrap();
        assert_eq!(outcome.pages, 2);
        assert_eq!(outcome.annotations, 4);
    }

    #[test]
    fn test_ligature_glyph_matches_letters() {
        let mut font = helvetica();
        font.set(
            "Encoding",
            dictionary! {
                "Differences" => vec![Object::Integer(128), Object::Name(b"fi".to_vec())],
            },
        );
        // "\x80nd" renders as the fi ligature followed by "nd"
        let pdf = build_pdf(font, &[vec![vec![0x80, b'n', b'd']]]);
        let outcome = highlight_phrases(&pdf, &phrases(&["find"]), RgbColor::YELLOW).unwrap();
        assert_eq!(outcome.annotations, 2);
    }

    #[test]
    fn test_rejects_non_pdf_input() {
        let err = highlight_phrases(b"not a pdf", &phrases(&["x"]), RgbColor::YELLOW).unwrap_err();
        assert!(matches!(err, HighlightError::ParseError(_)));
    }

    #[test]
    fn test_engine_trait_delegates() {
        let engine = LopdfEngine::new();
        let pdf = pdf_with_lines(&["Hello World"]);
        let outcome = engine
            .highlight(&pdf, &phrases(&["world"]), RgbColor::YELLOW)
            .unwrap();
        assert_eq!(engine.name(), "lopdf");
        assert_eq!(outcome.annotations, 2);
    }

    #[test]
    fn test_search_passes() {
        assert_eq!(search_passes("  Hello World "), ["hello world".to_string(), "  Hello World ".to_string()]);
    }
}
