//! Version-3 source maps for rewritten chunk text.
//!
//! Placeholder substitution never adds or removes lines, so the emitted map
//! is an identity mapping over the rewritten text at word-boundary
//! granularity. That precision is enough to keep statement and expression
//! positions addressable after the rewrite.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SourceMap {
    pub version: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub sources: Vec<Option<String>>,
    #[serde(rename = "sourcesContent", skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<String>>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

const BASE64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

// Base64 VLQ as used by the source map format: 5-bit groups, continuation in
// bit 6, sign in the lowest bit of the first group.
fn encode_vlq(out: &mut String, value: i64) {
    let mut v = if value < 0 {
        (((-value) as u64) << 1) | 1
    } else {
        (value as u64) << 1
    };
    loop {
        let mut digit = (v & 0b11111) as usize;
        v >>= 5;
        if v != 0 {
            digit |= 0b100000;
        }
        out.push(BASE64[digit] as char);
        if v == 0 {
            break;
        }
    }
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Generate a boundary-precision map of `code` onto itself: one segment at
/// the start of each non-empty line plus one at every word/non-word
/// transition.
pub fn boundary_map(code: &str, source: Option<&str>) -> SourceMap {
    let mut mappings = String::new();
    let mut prev_src_line: i64 = 0;
    let mut prev_src_col: i64 = 0;

    for (line_idx, line) in code.split('\n').enumerate() {
        if line_idx > 0 {
            mappings.push(';');
        }
        let mut prev_dst_col: i64 = 0;
        let mut first_in_line = true;
        let mut prev_word: Option<bool> = None;
        for (col, ch) in line.chars().enumerate() {
            let word = is_word(ch);
            let boundary = prev_word.map_or(true, |prev| prev != word);
            prev_word = Some(word);
            if !boundary {
                continue;
            }
            if !first_in_line {
                mappings.push(',');
            }
            first_in_line = false;
            let col = col as i64;
            let line_idx = line_idx as i64;
            encode_vlq(&mut mappings, col - prev_dst_col);
            encode_vlq(&mut mappings, 0); // single source
            encode_vlq(&mut mappings, line_idx - prev_src_line);
            encode_vlq(&mut mappings, col - prev_src_col);
            prev_dst_col = col;
            prev_src_line = line_idx;
            prev_src_col = col;
        }
    }

    SourceMap {
        version: 3,
        file: None,
        sources: vec![source.map(str::to_string)],
        sources_content: None,
        names: Vec::new(),
        mappings,
    }
}
