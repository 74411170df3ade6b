//! ToUnicode CMap parsing (`bfchar` and `bfrange` sections)

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BFCHAR: Regex = Regex::new(r"(?s)beginbfchar(.*?)endbfchar").unwrap();
    static ref BFRANGE: Regex = Regex::new(r"(?s)beginbfrange(.*?)endbfrange").unwrap();
    static ref TOKEN: Regex = Regex::new(r"<([0-9A-Fa-f\s]*)>|\[|\]").unwrap();
}

/// Largest bfrange expanded; wider ranges are malformed in practice
const MAX_RANGE: u32 = 0xFFFF;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Hex(Vec<u8>),
    Open,
    Close,
}

#[derive(Debug, Clone, Default)]
pub struct ToUnicode {
    map: HashMap<u32, String>,
}

impl ToUnicode {
    pub fn parse(source: &[u8]) -> Self {
        let text = String::from_utf8_lossy(source);
        let mut map = HashMap::new();

        for block in BFCHAR.captures_iter(&text) {
            let tokens = tokenize(&block[1]);
            for pair in tokens.chunks_exact(2) {
                if let [Token::Hex(src), Token::Hex(dst)] = pair {
                    map.insert(code_of(src), utf16_be(dst));
                }
            }
        }

        for block in BFRANGE.captures_iter(&text) {
            let tokens = tokenize(&block[1]);
            let mut i = 0;
            while i + 2 < tokens.len() {
                let (Token::Hex(lo), Token::Hex(hi)) = (&tokens[i], &tokens[i + 1]) else {
                    i += 1;
                    continue;
                };
                let (lo, hi) = (code_of(lo), code_of(hi));
                if hi < lo || hi - lo > MAX_RANGE {
                    i += 3;
                    continue;
                }

                match &tokens[i + 2] {
                    Token::Hex(dst) => {
                        let mut units = utf16_units(dst);
                        for code in lo..=hi {
                            map.insert(code, String::from_utf16_lossy(&units));
                            if let Some(last) = units.last_mut() {
                                *last = last.wrapping_add(1);
                            }
                        }
                        i += 3;
                    }
                    Token::Open => {
                        let mut j = i + 3;
                        let mut codes = lo..=hi;
                        while let Some(Token::Hex(dst)) = tokens.get(j) {
                            // surplus destinations past `hi` are ignored
                            if let Some(code) = codes.next() {
                                map.insert(code, utf16_be(dst));
                            }
                            j += 1;
                        }
                        // skip the closing bracket
                        i = j + 1;
                    }
                    Token::Close => i += 3,
                }
            }
        }

        Self { map }
    }

    pub fn get(&self, code: u32) -> Option<&str> {
        self.map.get(&code).map(String::as_str)
    }
}

fn tokenize(body: &str) -> Vec<Token> {
    TOKEN
        .captures_iter(body)
        .map(|c| match c.get(1) {
            Some(hex) => Token::Hex(hex_bytes(hex.as_str())),
            None if &c[0] == "[" => Token::Open,
            None => Token::Close,
        })
        .collect()
}

fn hex_bytes(hex: &str) -> Vec<u8> {
    let digits: Vec<u8> = hex
        .chars()
        .filter_map(|c| c.to_digit(16))
        .map(|d| d as u8)
        .collect();
    digits
        .chunks(2)
        .map(|pair| match pair {
            [hi, lo] => hi << 4 | lo,
            [hi] => hi << 4,
            _ => 0,
        })
        .collect()
}

fn code_of(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |acc, b| acc << 8 | *b as u32)
}

fn utf16_units(bytes: &[u8]) -> Vec<u16> {
    if bytes.len() == 1 {
        return vec![bytes[0] as u16];
    }
    bytes
        .chunks(2)
        .map(|pair| match pair {
            [hi, lo] => u16::from_be_bytes([*hi, *lo]),
            [hi] => *hi as u16,
            _ => 0,
        })
        .collect()
}

fn utf16_be(bytes: &[u8]) -> String {
    String::from_utf16_lossy(&utf16_units(bytes))
}
