//! Highlight annotation writer

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::color::RgbColor;
use crate::error::HighlightError;
use crate::text::Rect;

/// Fixed opacity of every highlight
pub const HIGHLIGHT_OPACITY: f32 = 0.4;

/// Author recorded on every annotation
pub const ANNOTATION_AUTHOR: &str = "CorBas";

/// Annotation flag: print
const FLAG_PRINT: i64 = 4;

/// Metadata shared by the annotations of one request
#[derive(Debug, Clone)]
pub struct HighlightStyle {
    pub color: RgbColor,
    pub opacity: f32,
    pub author: String,
    /// PDF date string, `D:YYYYMMDDHHMMSS`
    pub created: String,
}

impl HighlightStyle {
    pub fn new(color: RgbColor) -> Self {
        Self {
            color,
            opacity: HIGHLIGHT_OPACITY,
            author: ANNOTATION_AUTHOR.to_string(),
            created: pdf_date_now(),
        }
    }
}

pub fn pdf_date_now() -> String {
    chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string()
}

/// PDF text string: literal for ASCII, UTF-16BE with BOM otherwise
pub fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Add a `/Highlight` annotation covering `rect`, labelled with the quoted phrase
pub fn add_highlight_annotation(
    doc: &mut Document,
    page_id: ObjectId,
    rect: &Rect,
    phrase: &str,
    style: &HighlightStyle,
) -> Result<ObjectId, HighlightError> {
    let appearance_id = doc.add_object(appearance_stream(rect, style));

    let mut annot = Dictionary::new();
    annot.set("Type", Object::Name(b"Annot".to_vec()));
    annot.set("Subtype", Object::Name(b"Highlight".to_vec()));
    annot.set(
        "Rect",
        Object::Array(vec![
            Object::Real(rect.x0),
            Object::Real(rect.y0),
            Object::Real(rect.x1),
            Object::Real(rect.y1),
        ]),
    );
    // QuadPoints order: upper-left, upper-right, lower-left, lower-right
    annot.set(
        "QuadPoints",
        Object::Array(vec![
            Object::Real(rect.x0),
            Object::Real(rect.y1),
            Object::Real(rect.x1),
            Object::Real(rect.y1),
            Object::Real(rect.x0),
            Object::Real(rect.y0),
            Object::Real(rect.x1),
            Object::Real(rect.y0),
        ]),
    );
    annot.set("C", style.color.to_object());
    annot.set("CA", Object::Real(style.opacity));
    annot.set("T", text_string(&style.author));
    annot.set("Contents", text_string(&format!("\"{}\"", phrase)));
    annot.set("CreationDate", text_string(&style.created));
    annot.set("M", text_string(&style.created));
    annot.set("F", Object::Integer(FLAG_PRINT));
    annot.set("P", Object::Reference(page_id));
    annot.set(
        "AP",
        Object::Dictionary(dictionary! { "N" => Object::Reference(appearance_id) }),
    );

    let annot_id = doc.add_object(Object::Dictionary(annot));
    add_annotation_to_page(doc, page_id, annot_id)?;
    Ok(annot_id)
}

/// Form XObject drawing the filled quad with multiply blending
fn appearance_stream(rect: &Rect, style: &HighlightStyle) -> Stream {
    let [r, g, b] = style.color.components();
    let content = format!(
        "/GS0 gs {} {} {} rg {} {} {} {} re f",
        r,
        g,
        b,
        rect.x0,
        rect.y0,
        rect.width(),
        rect.height()
    );

    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Form",
        "BBox" => vec![
            Object::Real(rect.x0),
            Object::Real(rect.y0),
            Object::Real(rect.x1),
            Object::Real(rect.y1),
        ],
        "Resources" => dictionary! {
            "ExtGState" => dictionary! {
                "GS0" => dictionary! {
                    "Type" => "ExtGState",
                    "BM" => "Multiply",
                    "CA" => Object::Real(style.opacity),
                    "ca" => Object::Real(style.opacity),
                },
            },
        },
    };

    Stream::new(dict, content.into_bytes())
}

/// Append to the page's `/Annots`, creating it when missing
fn add_annotation_to_page(
    doc: &mut Document,
    page_id: ObjectId,
    annot_id: ObjectId,
) -> Result<(), HighlightError> {
    let annots = doc
        .get_dictionary(page_id)
        .map_err(|e| HighlightError::OperationError(e.to_string()))?
        .get(b"Annots")
        .ok()
        .cloned();

    // /Annots may be a reference to the array object
    if let Some(Object::Reference(array_id)) = annots {
        if let Ok(Object::Array(ref mut arr)) = doc.get_object_mut(array_id) {
            arr.push(Object::Reference(annot_id));
            return Ok(());
        }
    }

    let page = doc
        .get_object_mut(page_id)
        .map_err(|e| HighlightError::OperationError(e.to_string()))?;

    if let Object::Dictionary(ref mut page_dict) = page {
        if let Ok(Object::Array(ref mut arr)) = page_dict.get_mut(b"Annots") {
            arr.push(Object::Reference(annot_id));
        } else {
            page_dict.set("Annots", Object::Array(vec![Object::Reference(annot_id)]));
        }
        Ok(())
    } else {
        Err(HighlightError::OperationError(format!(
            "Page {:?} is not a dictionary",
            page_id
        )))
    }
}
