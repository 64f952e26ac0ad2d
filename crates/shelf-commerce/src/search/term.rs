//! Search term sanitizing and validation.

use crate::i18n::Labels;
use crate::CommerceError;
use serde::Serialize;

/// Minimum number of characters a sanitized term must have.
pub const MIN_TERM_CHARS: usize = 2;

/// Clean free text from a query string.
///
/// Removes HTML tags and control characters, drops percent-encoded octets
/// left over from double encoding, collapses whitespace runs to a single
/// space and trims both ends. A `<` that does not open a tag is kept.
pub fn sanitize_text(raw: &str) -> String {
    let stripped = strip_octets(&strip_tags(raw));

    let mut out = String::with_capacity(stripped.len());
    let mut pending_space = false;
    for c in stripped.chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else if c.is_control() {
            continue;
        } else {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        }
    }
    out
}

fn strip_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let opens_tag = after
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'));

        match after.find('>') {
            Some(end) if opens_tag => rest = &after[end + 1..],
            // Unclosed tag: drop the remainder.
            None if opens_tag => return out,
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn strip_octets(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    // Only ASCII sequences were removed, so the rest is still valid UTF-8.
    String::from_utf8(out).unwrap_or_default()
}

/// A sanitized, validated search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchTerm {
    text: String,
    words: Vec<String>,
}

impl SearchTerm {
    /// Sanitize `raw` and reject it when fewer than `min_chars` characters remain.
    pub fn parse(raw: &str, min_chars: usize) -> Result<Self, CommerceError> {
        let text = sanitize_text(raw);
        if text.chars().count() < min_chars.max(1) {
            return Err(CommerceError::no_term(Labels::default().term_required));
        }

        let words = text.split(' ').map(str::to_lowercase).collect();
        Ok(Self { text, words })
    }

    /// The sanitized term.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lowercased words; every one must match.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
