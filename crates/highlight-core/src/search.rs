//! Phrase search over located glyphs
//!
//! Page text and phrase are normalized the same way before comparison:
//! ligatures expand to their letters, characters are lower-cased, and every
//! run of whitespace (including line breaks and visible gaps between glyphs)
//! becomes a single space. Matches are reported as one rectangle per text
//! line they cover.

use crate::text::{Glyph, Rect};

/// A horizontal gap wider than this fraction of the glyph height reads as a space
const GAP_RATIO: f32 = 0.15;

const LIGATURES: &[(char, &str)] = &[
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"),
    ('\u{FB06}', "st"),
];

/// Normalized page text, each char pointing back at its glyph
#[derive(Debug, Default)]
struct Haystack {
    chars: Vec<char>,
    glyphs: Vec<Option<usize>>,
}

impl Haystack {
    fn build(glyphs: &[Glyph]) -> Self {
        let mut hay = Haystack::default();

        for (i, glyph) in glyphs.iter().enumerate() {
            if let Some(prev) = i.checked_sub(1).map(|p| &glyphs[p]) {
                if prev.line != glyph.line || visible_gap(prev, glyph) {
                    hay.push_space();
                }
            }
            for c in expand(&glyph.text) {
                if c.is_whitespace() {
                    hay.push_space();
                } else {
                    hay.chars.push(c);
                    hay.glyphs.push(Some(i));
                }
            }
        }

        hay
    }

    fn push_space(&mut self) {
        if self.chars.last().is_some_and(|c| *c != ' ') {
            self.chars.push(' ');
            self.glyphs.push(None);
        }
    }
}

fn visible_gap(prev: &Glyph, next: &Glyph) -> bool {
    let height = prev.rect.height().min(next.rect.height());
    next.rect.x0 - prev.rect.x1 > height * GAP_RATIO
}

/// Lower-cased chars with ligatures expanded
fn expand(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(|c| {
        let letters = LIGATURES
            .iter()
            .find(|(lig, _)| *lig == c)
            .map(|(_, letters)| letters.chars().collect::<Vec<_>>())
            .unwrap_or_else(|| vec![c]);
        letters.into_iter().flat_map(char::to_lowercase)
    })
}

/// Phrase in the same normal form as page text
pub fn normalize(phrase: &str) -> Vec<char> {
    let mut out: Vec<char> = Vec::new();
    for c in expand(phrase) {
        if c.is_whitespace() {
            if out.last().is_some_and(|l| *l != ' ') {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    if out.last() == Some(&' ') {
        out.pop();
    }
    out
}

/// Regions covered by each non-overlapping occurrence of `phrase`, in page
/// order. Each occurrence yields one rectangle per line it spans.
pub fn find_phrase(glyphs: &[Glyph], phrase: &str) -> Vec<Rect> {
    let needle = normalize(phrase);
    if needle.is_empty() {
        return Vec::new();
    }

    let hay = Haystack::build(glyphs);
    let mut regions = Vec::new();
    let mut i = 0;

    while i + needle.len() <= hay.chars.len() {
        if hay.chars[i..i + needle.len()] == needle[..] {
            regions.extend(line_regions(glyphs, &hay.glyphs[i..i + needle.len()]));
            i += needle.len();
        } else {
            i += 1;
        }
    }

    regions
}

fn line_regions(glyphs: &[Glyph], matched: &[Option<usize>]) -> Vec<Rect> {
    let mut regions: Vec<(usize, Rect)> = Vec::new();

    for index in matched.iter().flatten() {
        let glyph = &glyphs[*index];
        match regions.last_mut() {
            Some((line, rect)) if *line == glyph.line => *rect = rect.union(&glyph.rect),
            _ => regions.push((glyph.line, glyph.rect)),
        }
    }

    regions.into_iter().map(|(_, rect)| rect).collect()
}
