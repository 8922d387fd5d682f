//! Character-offset access to a document.
//!
//! Every public span in this crate counts Unicode scalar values, not bytes.
//! Regex matching and substring search hand back byte offsets, so each
//! annotation pass wraps the input in a [`DocView`] once and converts through
//! its precomputed table instead of rescanning the string per match.

/// A borrowed document plus offset tables for byte-to-char conversion.
///
/// Construction is O(n) in the input length; every lookup afterwards is O(1).
/// For pure-ASCII input the table is skipped entirely and byte offsets are
/// used as char offsets directly.
#[derive(Debug)]
pub(crate) struct DocView<'a> {
    text: &'a str,
    chars: Vec<char>,
    /// Maps each byte index (0..=len) to the index of the char containing it.
    /// Empty when `text` is pure ASCII.
    byte_to_char: Vec<usize>,
    ascii: bool,
}

impl<'a> DocView<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let ascii = text.is_ascii();
        let chars: Vec<char> = text.chars().collect();
        let byte_to_char = if ascii {
            Vec::new()
        } else {
            build_byte_to_char(text)
        };
        DocView {
            text,
            chars,
            byte_to_char,
            ascii,
        }
    }

    pub(crate) fn text(&self) -> &'a str {
        self.text
    }

    pub(crate) fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Document length in chars.
    pub(crate) fn len(&self) -> usize {
        self.chars.len()
    }

    pub(crate) fn char_at(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    /// Converts a byte offset (as produced by `regex` or `match_indices`)
    /// into a char offset. Offsets past the end clamp to the char length.
    pub(crate) fn char_index(&self, byte: usize) -> usize {
        if self.ascii {
            return byte.min(self.chars.len());
        }
        match self.byte_to_char.get(byte) {
            Some(&c) => c,
            None => self.chars.len(),
        }
    }

    /// The document text between two char offsets, as an owned string.
    pub(crate) fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }
}

fn build_byte_to_char(text: &str) -> Vec<usize> {
    let mut map = Vec::with_capacity(text.len() + 1);
    for (char_idx, ch) in text.chars().enumerate() {
        for _ in 0..ch.len_utf8() {
            map.push(char_idx);
        }
    }
    // One-past-the-end byte maps to one-past-the-end char.
    map.push(text.chars().count());
    map
}
