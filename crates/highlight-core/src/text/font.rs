//! Font metrics and character decoding for text location

use std::collections::HashMap;

use lopdf::{Dictionary, Document, Object};

use super::cmap::ToUnicode;
use super::{number, resolve};

/// Helvetica advance widths for codes 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // digits
    278, 278, 584, 584, 584, 556, 1015, // 58-64
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722,
    667, 611, 722, 667, 944, 667, 667, 611, // A-Z
    278, 278, 278, 469, 556, 333, // 91-96
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333,
    500, 278, 556, 500, 722, 500, 500, 500, // a-z
    334, 260, 334, 584, // 123-126
];

/// WinAnsiEncoding differs from Latin-1 in 0x80..=0x9F
const WIN_ANSI_HIGH: [char; 32] = [
    '€', '\u{FFFD}', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', '\u{FFFD}', 'Ž',
    '\u{FFFD}', '\u{FFFD}', '‘', '’', '“', '”', '•', '–', '—', '˜', '™', 'š', '›', 'œ',
    '\u{FFFD}', 'ž', 'Ÿ',
];

const DEFAULT_ASCENT: f32 = 800.0;
const DEFAULT_DESCENT: f32 = -200.0;

#[derive(Debug, Clone)]
enum Widths {
    /// Base-14 font without a Widths array
    Standard { monospace: bool },
    Simple {
        first_char: u32,
        widths: Vec<f32>,
        missing: f32,
    },
    Cid {
        widths: HashMap<u32, f32>,
        default: f32,
    },
}

/// What the locator needs to know about one font resource
#[derive(Debug, Clone)]
pub struct FontInfo {
    two_byte: bool,
    widths: Widths,
    /// Ascent and descent in glyph units (1/1000 em)
    pub ascent: f32,
    pub descent: f32,
    to_unicode: Option<ToUnicode>,
    differences: HashMap<u32, String>,
}

impl Default for FontInfo {
    /// Helvetica with WinAnsi encoding, used when a font cannot be resolved
    fn default() -> Self {
        Self {
            two_byte: false,
            widths: Widths::Standard { monospace: false },
            ascent: DEFAULT_ASCENT,
            descent: DEFAULT_DESCENT,
            to_unicode: None,
            differences: HashMap::new(),
        }
    }
}

impl FontInfo {
    pub fn from_dict(doc: &Document, font: &Dictionary) -> Self {
        let subtype = name_of(font.get(b"Subtype").ok());
        let base_font = name_of(font.get(b"BaseFont").ok()).unwrap_or_default();

        let to_unicode = font
            .get(b"ToUnicode")
            .ok()
            .map(|o| resolve(doc, o))
            .and_then(|o| match o {
                Object::Stream(stream) => Some(
                    stream
                        .decompressed_content()
                        .unwrap_or_else(|_| stream.content.clone()),
                ),
                _ => None,
            })
            .map(|bytes| ToUnicode::parse(&bytes));

        let mut info = FontInfo {
            to_unicode,
            differences: differences(doc, font),
            ..FontInfo::default()
        };

        if subtype.as_deref() == Some("Type0") {
            info.two_byte = true;
            let descendant = font
                .get(b"DescendantFonts")
                .ok()
                .map(|o| resolve(doc, o))
                .and_then(|o| o.as_array().ok())
                .and_then(|arr| arr.first())
                .map(|o| resolve(doc, o))
                .and_then(|o| o.as_dict().ok());

            if let Some(cid_font) = descendant {
                info.widths = cid_widths(doc, cid_font);
                info.apply_descriptor(doc, cid_font);
            } else {
                info.widths = Widths::Cid {
                    widths: HashMap::new(),
                    default: 1000.0,
                };
            }
            return info;
        }

        info.apply_descriptor(doc, font);

        let widths = font
            .get(b"Widths")
            .ok()
            .map(|o| resolve(doc, o))
            .and_then(|o| o.as_array().ok());
        info.widths = match widths {
            Some(widths) => Widths::Simple {
                first_char: font
                    .get(b"FirstChar")
                    .ok()
                    .and_then(|o| number(resolve(doc, o)))
                    .unwrap_or(0.0) as u32,
                widths: widths
                    .iter()
                    .map(|w| number(resolve(doc, w)).unwrap_or(0.0))
                    .collect(),
                missing: descriptor(doc, font)
                    .and_then(|d| d.get(b"MissingWidth").ok())
                    .and_then(|o| number(resolve(doc, o)))
                    .unwrap_or(0.0),
            },
            None => Widths::Standard {
                monospace: base_font.contains("Courier"),
            },
        };

        info
    }

    fn apply_descriptor(&mut self, doc: &Document, font: &Dictionary) {
        if let Some(desc) = descriptor(doc, font) {
            let metric = |key: &[u8]| desc.get(key).ok().and_then(|o| number(resolve(doc, o)));
            if let Some(ascent) = metric(b"Ascent").filter(|a| *a > 0.0) {
                self.ascent = ascent;
            }
            if let Some(descent) = metric(b"Descent").filter(|d| *d < 0.0) {
                self.descent = descent;
            }
        }
    }

    /// Split a shown string into character codes
    pub fn codes(&self, bytes: &[u8]) -> Vec<u32> {
        let len = if self.two_byte { 2 } else { 1 };
        bytes
            .chunks(len)
            .map(|chunk| chunk.iter().fold(0u32, |acc, b| acc << 8 | *b as u32))
            .collect()
    }

    pub fn is_single_byte(&self) -> bool {
        !self.two_byte
    }

    /// Advance width in glyph units (1/1000 em)
    pub fn width(&self, code: u32) -> f32 {
        match &self.widths {
            Widths::Standard { monospace: true } => 600.0,
            Widths::Standard { monospace: false } => code
                .checked_sub(32)
                .and_then(|i| HELVETICA_WIDTHS.get(i as usize))
                .map(|w| *w as f32)
                .unwrap_or(500.0),
            Widths::Simple {
                first_char,
                widths,
                missing,
            } => code
                .checked_sub(*first_char)
                .and_then(|i| widths.get(i as usize))
                .copied()
                .unwrap_or(*missing),
            Widths::Cid { widths, default } => widths.get(&code).copied().unwrap_or(*default),
        }
    }

    /// Unicode text for one character code
    pub fn decode(&self, code: u32) -> String {
        if let Some(text) = self.to_unicode.as_ref().and_then(|c| c.get(code)) {
            return text.to_string();
        }
        if let Some(text) = self.differences.get(&code) {
            return text.clone();
        }
        if self.two_byte {
            return char::from_u32(code).map(String::from).unwrap_or_default();
        }
        win_ansi(code as u8).to_string()
    }
}

fn win_ansi(byte: u8) -> char {
    match byte {
        0x80..=0x9F => WIN_ANSI_HIGH[(byte - 0x80) as usize],
        _ => byte as char,
    }
}

fn name_of(obj: Option<&Object>) -> Option<String> {
    match obj {
        Some(Object::Name(name)) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

fn descriptor<'a>(doc: &'a Document, font: &'a Dictionary) -> Option<&'a Dictionary> {
    font.get(b"FontDescriptor")
        .ok()
        .map(|o| resolve(doc, o))
        .and_then(|o| o.as_dict().ok())
}

/// `/Encoding << /Differences [code /name /name ...] >>`
fn differences(doc: &Document, font: &Dictionary) -> HashMap<u32, String> {
    let mut map = HashMap::new();

    let entries = font
        .get(b"Encoding")
        .ok()
        .map(|o| resolve(doc, o))
        .and_then(|o| o.as_dict().ok())
        .and_then(|enc| enc.get(b"Differences").ok())
        .map(|o| resolve(doc, o))
        .and_then(|o| o.as_array().ok());

    // None once the run leaves the u32 code space
    let mut code = Some(0u32);
    for entry in entries.into_iter().flatten() {
        match resolve(doc, entry) {
            Object::Integer(n) => code = u32::try_from(*n).ok(),
            Object::Name(name) => {
                let text = glyph_name_to_unicode(&String::from_utf8_lossy(name));
                if let (Some(code), Some(text)) = (code, text) {
                    map.insert(code, text);
                }
                code = code.and_then(|c| c.checked_add(1));
            }
            _ => {}
        }
    }

    map
}

/// CIDFont `/W` array: `c [w1 w2 ...]` or `c_first c_last w`
fn cid_widths(doc: &Document, cid_font: &Dictionary) -> Widths {
    let default = cid_font
        .get(b"DW")
        .ok()
        .and_then(|o| number(resolve(doc, o)))
        .unwrap_or(1000.0);
    let mut widths = HashMap::new();

    let items: Vec<&Object> = cid_font
        .get(b"W")
        .ok()
        .map(|o| resolve(doc, o))
        .and_then(|o| o.as_array().ok())
        .map(|arr| arr.iter().map(|o| resolve(doc, o)).collect())
        .unwrap_or_default();

    let mut i = 0;
    while i + 1 < items.len() {
        let Some(first) = number(items[i]).map(|n| n as u32) else {
            i += 1;
            continue;
        };
        match items[i + 1] {
            Object::Array(list) => {
                for (offset, w) in list.iter().enumerate() {
                    if let Some(w) = number(resolve(doc, w)) {
                        widths.insert(first + offset as u32, w);
                    }
                }
                i += 2;
            }
            last => {
                let (Some(last), Some(w)) = (number(last), items.get(i + 2).and_then(|o| number(o)))
                else {
                    break;
                };
                for code in first..=(last as u32).min(first + 0xFFFF) {
                    widths.insert(code, w);
                }
                i += 3;
            }
        }
    }

    Widths::Cid { widths, default }
}

/// Unicode for the glyph names found in `/Differences` arrays
pub fn glyph_name_to_unicode(name: &str) -> Option<String> {
    let mapped = match name {
        "space" => " ",
        "fi" => "\u{FB01}",
        "fl" => "\u{FB02}",
        "ff" => "\u{FB00}",
        "ffi" => "\u{FB03}",
        "ffl" => "\u{FB04}",
        "quoteright" => "’",
        "quoteleft" => "‘",
        "quotedblleft" => "“",
        "quotedblright" => "”",
        "quotesingle" => "'",
        "quotedbl" => "\"",
        "hyphen" | "minus" => "-",
        "endash" => "–",
        "emdash" => "—",
        "period" => ".",
        "comma" => ",",
        "colon" => ":",
        "semicolon" => ";",
        "exclam" => "!",
        "question" => "?",
        "parenleft" => "(",
        "parenright" => ")",
        "bullet" => "•",
        "ellipsis" => "…",
        "zero" => "0",
        "one" => "1",
        "two" => "2",
        "three" => "3",
        "four" => "4",
        "five" => "5",
        "six" => "6",
        "seven" => "7",
        "eight" => "8",
        "nine" => "9",
        _ => "",
    };
    if !mapped.is_empty() {
        return Some(mapped.to_string());
    }

    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphabetic() {
            return Some(c.to_string());
        }
    }

    // uniXXXX[XXXX...]
    let hex = name.strip_prefix("uni")?;
    if hex.is_empty() || hex.len() % 4 != 0 {
        return None;
    }
    let units = (0..hex.len())
        .step_by(4)
        .map(|i| u16::from_str_radix(hex.get(i..i + 4)?, 16).ok())
        .collect::<Option<Vec<u16>>>()?;
    Some(String::from_utf16_lossy(&units))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Stream};

    #[test]
    fn test_standard_font_widths() {
        let font = FontInfo::default();
        assert_eq!(font.width(b'H' as u32), 722.0);
        assert_eq!(font.width(b' ' as u32), 278.0);
        assert_eq!(font.width(0x05), 500.0);
        assert_eq!(font.decode(0x93), "“");
        assert_eq!(font.decode(b'e' as u32), "e");
    }

    #[test]
    fn test_simple_font_widths_and_differences() {
        let doc = Document::with_version("1.7");
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Custom",
            "FirstChar" => 65,
            "Widths" => vec![Object::Integer(700), Object::Real(650.5)],
            "Encoding" => dictionary! {
                "Differences" => vec![Object::Integer(128), Object::Name(b"fi".to_vec()), Object::Name(b"uni00E9".to_vec())],
            },
        };
        let info = FontInfo::from_dict(&doc, &font);
        assert_eq!(info.width(65), 700.0);
        assert_eq!(info.width(66), 650.5);
        assert_eq!(info.width(67), 0.0);
        assert_eq!(info.decode(128), "\u{FB01}");
        assert_eq!(info.decode(129), "é");
    }

    #[test]
    fn test_differences_past_code_space_are_dropped() {
        let doc = Document::with_version("1.7");
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Custom",
            "Encoding" => dictionary! {
                "Differences" => vec![
                    Object::Integer(u32::MAX as i64),
                    Object::Name(b"a".to_vec()),
                    Object::Name(b"b".to_vec()),
                    Object::Integer(-1),
                    Object::Name(b"c".to_vec()),
                    Object::Integer(66),
                    Object::Name(b"d".to_vec()),
                ],
            },
        };
        let info = FontInfo::from_dict(&doc, &font);
        assert_eq!(info.decode(u32::MAX), "a");
        assert_eq!(info.decode(0), "\0");
        assert_eq!(info.decode(66), "d");
        assert_eq!(info.decode(67), "C");
    }

    #[test]
    fn test_simple_font_keeps_single_byte_codes_with_wide_cmap() {
        let doc = Document::with_version("1.7");
        let cmap = b"1 begincodespacerange <0000> <FFFF> endcodespacerange
            1 beginbfchar <0041> <0062> endbfchar"
            .to_vec();
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "BaseFont" => "Custom",
            "ToUnicode" => Object::Stream(Stream::new(dictionary! {}, cmap)),
        };
        let info = FontInfo::from_dict(&doc, &font);
        assert!(info.is_single_byte());
        assert_eq!(info.codes(b"AA"), vec![0x41, 0x41]);
        assert_eq!(info.decode(0x41), "b");
    }

    #[test]
    fn test_courier_is_monospace() {
        let doc = Document::with_version("1.7");
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier-Bold",
        };
        let info = FontInfo::from_dict(&doc, &font);
        assert_eq!(info.width(b'i' as u32), 600.0);
        assert_eq!(info.width(b'W' as u32), 600.0);
    }

    #[test]
    fn test_type0_uses_two_byte_codes() {
        let doc = Document::with_version("1.7");
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => "Embedded",
            "DescendantFonts" => vec![Object::Dictionary(dictionary! {
                "DW" => 900,
                "W" => vec![
                    Object::Integer(1),
                    Object::Array(vec![Object::Integer(500), Object::Integer(510)]),
                    Object::Integer(10),
                    Object::Integer(12),
                    Object::Integer(250),
                ],
            })],
        };
        let info = FontInfo::from_dict(&doc, &font);
        assert!(!info.is_single_byte());
        assert_eq!(info.codes(&[0x00, 0x41, 0x00, 0x42]), vec![0x41, 0x42]);
        assert_eq!(info.width(2), 510.0);
        assert_eq!(info.width(11), 250.0);
        assert_eq!(info.width(99), 900.0);
        assert_eq!(info.decode(0x41), "A");
    }

    #[test]
    fn test_glyph_names() {
        assert_eq!(glyph_name_to_unicode("ffl").as_deref(), Some("\u{FB04}"));
        assert_eq!(glyph_name_to_unicode("Q").as_deref(), Some("Q"));
        assert_eq!(glyph_name_to_unicode("uni0041").as_deref(), Some("A"));
        assert_eq!(glyph_name_to_unicode("g123"), None);
    }
}
