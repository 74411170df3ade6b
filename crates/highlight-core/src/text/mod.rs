//! Glyph location
//!
//! Walks a page's content stream with a minimal text-state machine and
//! records every shown character with its bounding box in user space and
//! the text line it belongs to. Form XObjects are followed; images and
//! paths are ignored.

pub mod cmap;
pub mod font;

use std::collections::HashMap;

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::debug;

use crate::error::HighlightError;
use font::FontInfo;

/// Nested form XObjects deeper than this are skipped
const MAX_FORM_DEPTH: usize = 8;

/// Axis-aligned rectangle in PDF user space (origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// One shown character
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Decoded text; usually one char, ligatures and ToUnicode may give more
    pub text: String,
    pub rect: Rect,
    /// Index of the text line on the page
    pub line: usize,
}

/// PDF affine matrix `[a b c d e f]`
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix([f32; 6]);

impl Matrix {
    const IDENTITY: Matrix = Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    fn translate(tx: f32, ty: f32) -> Self {
        Matrix([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    /// `self × other`
    fn then(&self, other: &Matrix) -> Matrix {
        let [a1, b1, c1, d1, e1, f1] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Matrix([
            a1 * a2 + b1 * c2,
            a1 * b2 + b1 * d2,
            c1 * a2 + d1 * c2,
            c1 * b2 + d1 * d2,
            e1 * a2 + f1 * c2 + e2,
            e1 * b2 + f1 * d2 + f2,
        ])
    }

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, c, d, e, f] = self.0;
        (a * x + c * y + e, b * x + d * y + f)
    }

    fn from_operands(operands: &[Object]) -> Option<Matrix> {
        let values: Vec<f32> = operands.iter().filter_map(number).collect();
        let values: [f32; 6] = values.get(..6)?.try_into().ok()?;
        Some(Matrix(values))
    }
}

/// Follow indirect references
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    let mut current = obj;
    for _ in 0..MAX_FORM_DEPTH {
        match current {
            Object::Reference(id) => match doc.get_object(*id) {
                Ok(target) => current = target,
                Err(_) => break,
            },
            _ => break,
        }
    }
    current
}

pub(crate) fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// All glyphs on a page in content-stream order
pub fn page_glyphs(doc: &Document, page_id: ObjectId) -> Result<Vec<Glyph>, HighlightError> {
    let content = doc
        .get_page_content(page_id)
        .map_err(|e| HighlightError::ParseError(e.to_string()))?;
    let content =
        Content::decode(&content).map_err(|e| HighlightError::ParseError(e.to_string()))?;

    let resources = page_resources(doc, page_id);
    let mut walker = Walker::new(doc);
    walker.run(&content, resources, Matrix::IDENTITY, 0);

    debug!("Located {} glyphs on page {:?}", walker.glyphs.len(), page_id);
    Ok(walker.glyphs)
}

/// `/Resources` of a page, inherited from the page tree when absent
fn page_resources(doc: &Document, page_id: ObjectId) -> Option<&Dictionary> {
    let mut node = doc.get_dictionary(page_id).ok();
    for _ in 0..MAX_FORM_DEPTH {
        let dict = node?;
        if let Ok(res) = dict.get(b"Resources") {
            return resolve(doc, res).as_dict().ok();
        }
        node = dict
            .get(b"Parent")
            .ok()
            .map(|p| resolve(doc, p))
            .and_then(|p| p.as_dict().ok());
    }
    None
}

fn sub_dict<'a>(doc: &'a Document, dict: Option<&'a Dictionary>, key: &[u8]) -> Option<&'a Dictionary> {
    dict?
        .get(key)
        .ok()
        .map(|o| resolve(doc, o))
        .and_then(|o| o.as_dict().ok())
}

#[derive(Debug, Clone)]
struct TextState {
    font: Option<Vec<u8>>,
    size: f32,
    char_spacing: f32,
    word_spacing: f32,
    h_scale: f32,
    leading: f32,
    rise: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font: None,
            size: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            h_scale: 1.0,
            leading: 0.0,
            rise: 0.0,
        }
    }
}

struct Walker<'a> {
    doc: &'a Document,
    /// Indirect fonts by object id; direct font dictionaries are not cached
    fonts: HashMap<ObjectId, FontInfo>,
    glyphs: Vec<Glyph>,
    line: usize,
    /// Baseline y and right edge of the last glyph
    last: Option<(f32, f32)>,
}

impl<'a> Walker<'a> {
    fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            fonts: HashMap::new(),
            glyphs: Vec::new(),
            line: 0,
            last: None,
        }
    }

    fn run(&mut self, content: &Content, resources: Option<&'a Dictionary>, base: Matrix, depth: usize) {
        let font_dict = sub_dict(self.doc, resources, b"Font");

        let mut ctm = base;
        let mut stack: Vec<(Matrix, TextState)> = Vec::new();
        let mut state = TextState::default();
        let mut tm = Matrix::IDENTITY;
        let mut tlm = Matrix::IDENTITY;

        for op in &content.operations {
            let operands = &op.operands;
            let num = |i: usize| operands.get(i).and_then(number).unwrap_or(0.0);

            match op.operator.as_str() {
                "q" => stack.push((ctm, state.clone())),
                "Q" => {
                    if let Some((m, s)) = stack.pop() {
                        ctm = m;
                        state = s;
                    }
                }
                "cm" => {
                    if let Some(m) = Matrix::from_operands(operands) {
                        ctm = m.then(&ctm);
                    }
                }
                "BT" => {
                    tm = Matrix::IDENTITY;
                    tlm = Matrix::IDENTITY;
                }
                "Tf" => {
                    if let Some(Object::Name(name)) = operands.first() {
                        state.font = Some(name.clone());
                    }
                    state.size = num(1);
                }
                "Tc" => state.char_spacing = num(0),
                "Tw" => state.word_spacing = num(0),
                "Tz" => state.h_scale = num(0) / 100.0,
                "TL" => state.leading = num(0),
                "Ts" => state.rise = num(0),
                "Td" => {
                    tlm = Matrix::translate(num(0), num(1)).then(&tlm);
                    tm = tlm;
                }
                "TD" => {
                    state.leading = -num(1);
                    tlm = Matrix::translate(num(0), num(1)).then(&tlm);
                    tm = tlm;
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_operands(operands) {
                        tlm = m;
                        tm = m;
                    }
                }
                "T*" => {
                    tlm = Matrix::translate(0.0, -state.leading).then(&tlm);
                    tm = tlm;
                }
                "Tj" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        if op.operator == "\"" {
                            state.word_spacing = num(0);
                            state.char_spacing = num(1);
                        }
                        tlm = Matrix::translate(0.0, -state.leading).then(&tlm);
                        tm = tlm;
                    }
                    if let Some(Object::String(bytes, _)) = operands.last() {
                        let font = self.font(font_dict, &state);
                        self.show(bytes, &font, &state, &mut tm, &ctm);
                    }
                }
                "TJ" => {
                    let Some(Object::Array(items)) = operands.first() else {
                        continue;
                    };
                    let font = self.font(font_dict, &state);
                    for item in items {
                        match item {
                            Object::String(bytes, _) => {
                                self.show(bytes, &font, &state, &mut tm, &ctm)
                            }
                            other => {
                                if let Some(adjust) = number(other) {
                                    let tx = -adjust / 1000.0 * state.size * state.h_scale;
                                    tm = Matrix::translate(tx, 0.0).then(&tm);
                                }
                            }
                        }
                    }
                }
                "Do" if depth < MAX_FORM_DEPTH => {
                    if let Some(Object::Name(name)) = operands.first() {
                        self.form(resources, name, &ctm, depth);
                    }
                }
                _ => {}
            }
        }
    }

    fn font(&mut self, fonts: Option<&'a Dictionary>, state: &TextState) -> FontInfo {
        let doc = self.doc;
        let entry = state
            .font
            .as_ref()
            .and_then(|name| fonts?.get(name).ok());

        let load = |obj: &Object| {
            resolve(doc, obj)
                .as_dict()
                .map(|d| FontInfo::from_dict(doc, d))
                .unwrap_or_default()
        };

        match entry {
            Some(obj @ Object::Reference(id)) => {
                self.fonts.entry(*id).or_insert_with(|| load(obj)).clone()
            }
            Some(obj) => load(obj),
            None => FontInfo::default(),
        }
    }

    fn form(&mut self, resources: Option<&'a Dictionary>, name: &[u8], ctm: &Matrix, depth: usize) {
        let doc = self.doc;
        let Some(Object::Stream(stream)) = sub_dict(doc, resources, b"XObject")
            .and_then(|x| x.get(name).ok())
            .map(|o| resolve(doc, o))
        else {
            return;
        };

        let is_form = matches!(stream.dict.get(b"Subtype"), Ok(Object::Name(s)) if s == b"Form");
        if !is_form {
            return;
        }

        let bytes = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());
        let Ok(content) = Content::decode(&bytes) else {
            debug!("Skipping undecodable form XObject");
            return;
        };

        let matrix = stream
            .dict
            .get(b"Matrix")
            .ok()
            .and_then(|m| m.as_array().ok())
            .and_then(|m| Matrix::from_operands(m))
            .unwrap_or(Matrix::IDENTITY);
        let form_resources = stream
            .dict
            .get(b"Resources")
            .ok()
            .map(|o| resolve(doc, o))
            .and_then(|o| o.as_dict().ok())
            .or(resources);

        self.run(&content, form_resources, matrix.then(ctm), depth + 1);
    }

    fn show(&mut self, bytes: &[u8], font: &FontInfo, state: &TextState, tm: &mut Matrix, ctm: &Matrix) {
        let size = state.size;
        for code in font.codes(bytes) {
            let w0 = font.width(code) / 1000.0;
            let trm = Matrix([size * state.h_scale, 0.0, 0.0, size, 0.0, state.rise])
                .then(tm)
                .then(ctm);

            let ascent = font.ascent / 1000.0;
            let descent = font.descent / 1000.0;
            let corners = [
                trm.apply(0.0, descent),
                trm.apply(w0, descent),
                trm.apply(0.0, ascent),
                trm.apply(w0, ascent),
            ];
            let rect = corners[1..].iter().fold(
                Rect::new(corners[0].0, corners[0].1, corners[0].0, corners[0].1),
                |acc, (x, y)| acc.union(&Rect::new(*x, *y, *x, *y)),
            );

            let (origin_x, baseline) = trm.apply(0.0, 0.0);
            self.track_line(origin_x, baseline, rect.height());

            self.glyphs.push(Glyph {
                text: font.decode(code),
                rect,
                line: self.line,
            });
            self.last = Some((baseline, rect.x1));

            let word_spacing = if font.is_single_byte() && code == 32 {
                state.word_spacing
            } else {
                0.0
            };
            let tx = (w0 * size + state.char_spacing + word_spacing) * state.h_scale;
            *tm = Matrix::translate(tx, 0.0).then(tm);
        }
    }

    /// A glyph starts a new line when its baseline moves by more than half
    /// its height, or when it jumps back to the left
    fn track_line(&mut self, x: f32, baseline: f32, height: f32) {
        if let Some((last_baseline, last_x1)) = self.last {
            let moved_vertically = (baseline - last_baseline).abs() > height * 0.5;
            let moved_back = x + height < last_x1;
            if moved_vertically || moved_back {
                self.line += 1;
            }
        }
    }
}
