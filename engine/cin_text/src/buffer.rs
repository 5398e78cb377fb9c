//! Byte-addressed text buffer with a precomputed line index.
//!
//! The index is built once at construction with a memchr-accelerated
//! newline scan and recognizes all three legal delimiters (`\r\n`,
//! `\n`, lone `\r`). Offsets are byte offsets; `offset == len()` is a
//! legal query position (the caret can sit past the last character).

use thiserror::Error;

/// Line delimiters the buffer recognizes, longest first.
pub const LINE_DELIMITERS: &[&str] = &["\r\n", "\n", "\r"];

/// Error for the fallible slice API.
///
/// Out-of-range single-byte and line lookups return `None` instead;
/// the typed error exists so embedders get a real error at the
/// library boundary when extracting text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TextError {
    /// The byte range is outside the buffer or splits a UTF-8 character.
    #[error("byte range {start}..{end} invalid for buffer of length {len}")]
    BadRange {
        start: usize,
        end: usize,
        len: usize,
    },
}

/// Half-open `[start, end)` extent of a line, excluding its delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    /// Length of the line content in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// UTF-8 text with line-oriented lookup.
///
/// Immutable once constructed; the engine only ever reads. A buffer
/// always has at least one line (the empty buffer has one empty line).
#[derive(Debug, Clone)]
pub struct TextBuffer {
    text: String,
    /// Byte offset of the first character of each line. `line_starts[0]`
    /// is always 0; subsequent entries follow a line delimiter.
    line_starts: Vec<usize>,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = build_line_starts(text.as_bytes());
        Self { text, line_starts }
    }

    /// Length of the text in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Byte at `offset`, or `None` past the end.
    #[inline]
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(offset).copied()
    }

    /// Text in `[start, end)`.
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> Result<&str, TextError> {
        self.text.get(start..end).ok_or(TextError::BadRange {
            start,
            end,
            len: self.text.len(),
        })
    }

    /// Number of lines; at least 1.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line number containing `offset`. `offset == len()` maps to the
    /// last line; anything past that is `None`.
    pub fn line_of_offset(&self, offset: usize) -> Option<usize> {
        if offset > self.text.len() {
            return None;
        }
        let idx = self.line_starts.partition_point(|&s| s <= offset);
        Some(idx - 1)
    }

    /// Byte offset of the first character of `line`.
    #[inline]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Byte offset just past the last content character of `line`
    /// (the delimiter, if any, starts here).
    pub fn line_end(&self, line: usize) -> Option<usize> {
        let start = *self.line_starts.get(line)?;
        match self.line_starts.get(line + 1) {
            None => Some(self.text.len()),
            Some(&next) => {
                let bytes = self.text.as_bytes();
                if next >= start + 2 && bytes[next - 2] == b'\r' && bytes[next - 1] == b'\n' {
                    Some(next - 2)
                } else {
                    Some(next - 1)
                }
            }
        }
    }

    /// Content length of `line` in bytes, delimiter excluded.
    #[inline]
    pub fn line_len(&self, line: usize) -> Option<usize> {
        Some(self.line_end(line)? - self.line_start(line)?)
    }

    /// Content extent of the line containing `offset`.
    pub fn line_span_of_offset(&self, offset: usize) -> Option<LineSpan> {
        let line = self.line_of_offset(offset)?;
        Some(LineSpan {
            start: self.line_start(line)?,
            end: self.line_end(line)?,
        })
    }

    /// Delimiters recognized by the line index.
    #[inline]
    pub fn legal_line_delimiters(&self) -> &'static [&'static str] {
        LINE_DELIMITERS
    }
}

fn build_line_starts(bytes: &[u8]) -> Vec<usize> {
    let mut starts = vec![0];
    let mut i = 0;
    while let Some(k) = memchr::memchr2(b'\n', b'\r', &bytes[i..]) {
        let pos = i + k;
        let next = if bytes[pos] == b'\r' && bytes.get(pos + 1) == Some(&b'\n') {
            pos + 2
        } else {
            pos + 1
        };
        starts.push(next);
        i = next;
    }
    starts
}
