//! Owned, independently resizable line storage.

use std::borrow::Cow;
use std::ops::Range;

/// A single line of text without its terminating newline.
///
/// Content is kept as raw bytes; it is usually UTF-8 but malformed input is
/// preserved verbatim so a load/save cycle never rewrites foreign bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    bytes: Vec<u8>,
}

impl Line {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Build from raw bytes. Any `\n` is dropped to keep the line invariant.
    pub fn from_bytes(mut bytes: Vec<u8>) -> Self {
        bytes.retain(|b| *b != b'\n');
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Display form; malformed bytes become U+FFFD.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Insert `data` at byte offset `at`, shifting the remainder right.
    pub(crate) fn insert_at(&mut self, at: usize, data: &[u8]) {
        debug_assert!(at <= self.bytes.len());
        self.bytes.splice(at..at, data.iter().copied());
    }

    /// Remove and return the bytes in `range`.
    pub(crate) fn remove_range(&mut self, range: Range<usize>) -> Vec<u8> {
        debug_assert!(range.end <= self.bytes.len());
        self.bytes.drain(range).collect()
    }

    /// Split at `at`, keeping `[0, at)` and returning the suffix as a new line.
    pub(crate) fn split_off(&mut self, at: usize) -> Line {
        Line {
            bytes: self.bytes.split_off(at),
        }
    }

    /// Append another line's content to the end of this one.
    pub(crate) fn append(&mut self, mut other: Line) {
        self.bytes.append(&mut other.bytes);
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Line::from_bytes(s.as_bytes().to_vec())
    }
}

impl PartialEq<&str> for Line {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}
