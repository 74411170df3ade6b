//! USAS lexicon files
//!
//! Single-word lexicons are tab-separated `lemma [pos] semantic_tags` rows;
//! MWE lexicons are `mwe_template semantic_tags` rows where the template is a
//! space-separated list of `word_POS` parts and `*` matches anything. In both,
//! `semantic_tags` is a space-separated list ranked best first. An optional
//! header row naming `semantic_tags` is skipped, as are blank lines and
//! `#` comments.

use std::collections::HashMap;
use std::io::BufRead;

use crate::error::TaggingError;

const WILDCARD: &str = "*";

/// Single-word entries keyed by (word, optional POS)
#[derive(Debug, Clone, Default)]
pub struct UsasLexicon {
    entries: HashMap<(String, Option<String>), Vec<String>>,
}

impl UsasLexicon {
    pub fn from_tsv_reader<R: BufRead>(reader: R) -> Result<Self, TaggingError> {
        let mut entries = HashMap::new();

        for (line_no, fields) in data_rows(reader) {
            let fields = fields?;
            let (word, pos, tags) = match fields.as_slice() {
                [word, tags] => (word, None, tags),
                [word, pos, tags] => (word, Some(pos.to_lowercase()), tags),
                _ => {
                    return Err(TaggingError::LexiconFormat {
                        line: line_no,
                        message: format!("expected 2 or 3 columns, found {}", fields.len()),
                    })
                }
            };

            let tags = split_tags(tags, line_no)?;
            entries.entry((word.clone(), pos)).or_insert(tags);
        }

        Ok(Self { entries })
    }

    pub fn from_tsv_str(source: &str) -> Result<Self, TaggingError> {
        Self::from_tsv_reader(source.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tags for `word`, restricted to `pos` when given
    pub fn get(&self, word: &str, pos: Option<&str>) -> Option<&[String]> {
        self.entries
            .get(&(word.to_string(), pos.map(str::to_string)))
            .map(Vec::as_slice)
    }
}

/// One `word_POS` element of an MWE template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePart {
    pub word: String,
    pub pos: String,
}

impl TemplatePart {
    /// `word` is compared lowercased; `pos` against any of the given tags
    pub fn matches(&self, word: &str, pos_tags: &[&str]) -> bool {
        let word_ok = self.word == WILDCARD || self.word == word.to_lowercase();
        let pos_ok = self.pos == WILDCARD || pos_tags.iter().any(|p| p.eq_ignore_ascii_case(&self.pos));
        word_ok && pos_ok
    }
}

#[derive(Debug, Clone)]
pub struct MweEntry {
    pub template: Vec<TemplatePart>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MweLexicon {
    entries: Vec<MweEntry>,
}

impl MweLexicon {
    pub fn from_tsv_reader<R: BufRead>(reader: R) -> Result<Self, TaggingError> {
        let mut entries = Vec::new();

        for (line_no, fields) in data_rows(reader) {
            let fields = fields?;
            let [template, tags] = fields.as_slice() else {
                return Err(TaggingError::LexiconFormat {
                    line: line_no,
                    message: format!("expected 2 columns, found {}", fields.len()),
                });
            };

            let template = template
                .split_whitespace()
                .map(|part| parse_template_part(part, line_no))
                .collect::<Result<Vec<_>, _>>()?;
            if template.len() < 2 {
                return Err(TaggingError::LexiconFormat {
                    line: line_no,
                    message: "MWE template needs at least two parts".to_string(),
                });
            }

            entries.push(MweEntry {
                template,
                tags: split_tags(tags, line_no)?,
            });
        }

        // Longest templates first so the first match is the best one
        entries.sort_by(|a, b| b.template.len().cmp(&a.template.len()));

        Ok(Self { entries })
    }

    pub fn from_tsv_str(source: &str) -> Result<Self, TaggingError> {
        Self::from_tsv_reader(source.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MweEntry] {
        &self.entries
    }
}

fn parse_template_part(part: &str, line: usize) -> Result<TemplatePart, TaggingError> {
    match part.rsplit_once('_') {
        Some((word, pos)) if !word.is_empty() && !pos.is_empty() => Ok(TemplatePart {
            word: word.to_lowercase(),
            pos: pos.to_string(),
        }),
        _ => Err(TaggingError::LexiconFormat {
            line,
            message: format!("template part {:?} is not word_POS", part),
        }),
    }
}

fn split_tags(tags: &str, line: usize) -> Result<Vec<String>, TaggingError> {
    let tags: Vec<String> = tags.split_whitespace().map(str::to_string).collect();
    if tags.is_empty() {
        return Err(TaggingError::LexiconFormat {
            line,
            message: "no semantic tags".to_string(),
        });
    }
    Ok(tags)
}

/// Non-empty, non-comment rows split on tabs, with 1-based line numbers
fn data_rows<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = (usize, Result<Vec<String>, TaggingError>)> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line_no = i + 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some((line_no, Err(TaggingError::Io(e)))),
            };
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            let fields: Vec<String> = line
                .trim_end_matches('\r')
                .split('\t')
                .map(|f| f.trim().to_string())
                .collect();
            if line_no == 1 && fields.iter().any(|f| f == "semantic_tags") {
                return None;
            }
            Some((line_no, Ok(fields)))
        })
}
