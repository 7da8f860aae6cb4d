//! Hash Placeholder Engine - deferred filename resolution
//!
//! Preliminary chunk filenames carry `!~{...}~` tokens standing in for
//! content hashes that are not known until late in the render phase. This
//! crate scans text for those tokens and substitutes them once a resolution
//! has been registered.

use std::collections::HashMap;

pub const PLACEHOLDER_LEFT: &str = "!~{";
pub const PLACEHOLDER_RIGHT: &str = "}~";

/// Maximum token length, delimiters included. Wire-format contract with the
/// upstream hashing scheme that assigns preliminary filenames.
pub const MAX_PLACEHOLDER_LEN: usize = 22;

const OVERHEAD: usize = PLACEHOLDER_LEFT.len() + PLACEHOLDER_RIGHT.len();
const MAX_PAYLOAD_LEN: usize = MAX_PLACEHOLDER_LEN - OVERHEAD;

fn is_payload_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$'
}

/// Iterator over the byte ranges of placeholder tokens in a string, left to
/// right, non-overlapping. The payload alphabet excludes the delimiters, so
/// matches are unambiguous.
pub struct Placeholders<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Placeholders<'a> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();
        while self.pos < self.text.len() {
            let start = match self.text[self.pos..].find(PLACEHOLDER_LEFT) {
                Some(offset) => self.pos + offset,
                None => return None,
            };
            let payload_start = start + PLACEHOLDER_LEFT.len();
            let mut end = payload_start;
            while end < bytes.len() && is_payload_char(bytes[end]) {
                end += 1;
            }
            let payload_len = end - payload_start;
            if (1..=MAX_PAYLOAD_LEN).contains(&payload_len)
                && self.text[end..].starts_with(PLACEHOLDER_RIGHT)
            {
                let token_end = end + PLACEHOLDER_RIGHT.len();
                self.pos = token_end;
                return Some((start, token_end));
            }
            // Oversized or unterminated: ordinary literal text. Resume right
            // after the failed start so nested candidates are still found.
            self.pos = start + 1;
        }
        None
    }
}

/// Scan `text` for placeholder tokens.
pub fn find_placeholders(text: &str) -> Placeholders<'_> {
    Placeholders { text, pos: 0 }
}

/// First placeholder token in `text`, if any. A chunk filename carries at
/// most one.
pub fn first_placeholder(text: &str) -> Option<&str> {
    find_placeholders(text)
        .next()
        .map(|(start, end)| &text[start..end])
}

/// Late-binding map from placeholder token to resolved facade hash.
///
/// First-writer-wins: merged chunks may share a placeholder, and the first
/// render to observe it fixes the resolution for the rest of the build,
/// whatever order chunks render in.
#[derive(Debug, Default)]
pub struct HashRegistry {
    entries: HashMap<String, String>,
}

impl HashRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolution unless an established one exists. An existing
    /// empty value does not count as established and may be replaced.
    pub fn register(&mut self, token: &str, hash: String) {
        if matches!(self.entries.get(token), Some(existing) if !existing.is_empty()) {
            return;
        }
        tracing::debug!(token, hash = %hash, "registered placeholder");
        self.entries.insert(token.to_string(), hash);
    }

    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Substitute every registered placeholder in `text`; unregistered tokens
/// stay verbatim. Single linear scan, never re-scans replacement text.
/// Idempotent because resolved hashes cannot contain the delimiter pair.
pub fn rewrite(text: &str, registry: &HashRegistry) -> String {
    let mut out = String::new();
    let mut last = 0;
    for (start, end) in find_placeholders(text) {
        let token = &text[start..end];
        out.push_str(&text[last..start]);
        match registry.resolve(token) {
            Some(hash) => out.push_str(hash),
            None => out.push_str(token),
        }
        last = end;
    }
    if last == 0 {
        return text.to_string();
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_single_token() {
        let text = "import './app.!~{abc123}~.js';";
        let found: Vec<_> = find_placeholders(text)
            .map(|(s, e)| &text[s..e])
            .collect();
        assert_eq!(found, vec!["!~{abc123}~"]);
    }

    #[test]
    fn test_finds_tokens_left_to_right() {
        let text = "!~{aaa}~ and !~{bbb}~";
        let found: Vec<_> = find_placeholders(text)
            .map(|(s, e)| &text[s..e])
            .collect();
        assert_eq!(found, vec!["!~{aaa}~", "!~{bbb}~"]);
    }

    #[test]
    fn test_max_payload_is_recognized() {
        // 17 payload chars, 22 total with delimiters
        let token = format!("!~{{{}}}~", "a".repeat(17));
        assert_eq!(token.len(), MAX_PLACEHOLDER_LEN);
        assert_eq!(first_placeholder(&token), Some(token.as_str()));
    }

    #[test]
    fn test_oversized_payload_is_literal_text() {
        let text = format!("!~{{{}}}~", "a".repeat(18));
        assert_eq!(first_placeholder(&text), None);
    }

    #[test]
    fn test_empty_payload_is_literal_text() {
        assert_eq!(first_placeholder("!~{}~"), None);
    }

    #[test]
    fn test_unterminated_token_is_literal_text() {
        assert_eq!(first_placeholder("!~{abc"), None);
        assert_eq!(first_placeholder("!~{abc}"), None);
    }

    #[test]
    fn test_invalid_payload_char_rejects_match() {
        assert_eq!(first_placeholder("!~{ab cd}~"), None);
        // dollar and underscore are part of the alphabet
        assert_eq!(first_placeholder("!~{a$_1}~"), Some("!~{a$_1}~"));
    }

    #[test]
    fn test_failed_candidate_does_not_hide_later_token() {
        let text = "!~{!~{abc}~";
        assert_eq!(first_placeholder(text), Some("!~{abc}~"));
    }

    #[test]
    fn test_register_first_writer_wins() {
        let mut registry = HashRegistry::new();
        registry.register("!~{abc}~", "11111111".to_string());
        registry.register("!~{abc}~", "22222222".to_string());
        assert_eq!(registry.resolve("!~{abc}~"), Some("11111111"));
    }

    #[test]
    fn test_register_replaces_empty_value() {
        let mut registry = HashRegistry::new();
        registry.register("!~{abc}~", String::new());
        registry.register("!~{abc}~", "22222222".to_string());
        assert_eq!(registry.resolve("!~{abc}~"), Some("22222222"));
    }

    #[test]
    fn test_rewrite_substitutes_registered_tokens() {
        let mut registry = HashRegistry::new();
        registry.register("!~{abc}~", "deadbeef".to_string());
        let out = rewrite("app.!~{abc}~.js loads chunk.!~{xyz}~.js", &registry);
        assert_eq!(out, "app.deadbeef.js loads chunk.!~{xyz}~.js");
    }

    #[test]
    fn test_rewrite_without_matches_returns_input() {
        let registry = HashRegistry::new();
        assert_eq!(rewrite("plain code", &registry), "plain code");
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let mut registry = HashRegistry::new();
        registry.register("!~{abc}~", "deadbeef".to_string());
        registry.register("!~{def}~", "cafe0123".to_string());
        let input = "a.!~{abc}~.js b.!~{def}~.js c.!~{ghi}~.js";
        let once = rewrite(input, &registry);
        let twice = rewrite(&once, &registry);
        assert_eq!(once, twice);
    }
}
