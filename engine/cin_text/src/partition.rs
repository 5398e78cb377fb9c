//! Typed content partitions over a source buffer.
//!
//! A partition is a half-open span tagged with what kind of content it
//! holds. Exactly one kind, [`PartitionKind::Code`], is the "default"
//! content; everything else (comments, string/char literals,
//! preprocessor lines) is opaque to the token scanner, which jumps
//! such spans atomically instead of reading into them.
//!
//! [`PartitionMap::scan`] is a reference single-pass partitioner for
//! C-family source. It is deliberately simple: a comment opener inside
//! a preprocessor line stays part of the preprocessor partition, and
//! an unterminated string or char literal ends at the line delimiter.

/// Content type of a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionKind {
    /// Plain code, the default content type.
    Code,
    /// `// ...` comment, backslash continuations included.
    LineComment,
    /// `/* ... */` comment.
    BlockComment,
    /// `"..."` string literal.
    String,
    /// `'...'` character literal.
    Char,
    /// `#...` preprocessor directive, backslash continuations included.
    Preprocessor,
}

impl PartitionKind {
    /// Whether the scanner may read characters from this partition.
    #[inline]
    pub fn is_code(self) -> bool {
        matches!(self, PartitionKind::Code)
    }
}

/// A typed half-open span `[start, start + len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub kind: PartitionKind,
    pub start: usize,
    pub len: usize,
}

impl Partition {
    #[inline]
    pub fn new(kind: PartitionKind, start: usize, len: usize) -> Self {
        Self { kind, start, len }
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end()
    }
}

/// Source of partition information.
///
/// `partition_at` must answer for every `offset` in `0..=len` (the
/// caret may sit just past the last character; a zero-length code
/// partition at the end is the conventional answer there).
pub trait PartitionOracle {
    fn partition_at(&self, offset: usize) -> Partition;
}

/// Concrete oracle holding the non-code spans of a buffer.
///
/// Code partitions are not stored; they are synthesized on demand for
/// the gaps between stored spans.
#[derive(Debug, Clone)]
pub struct PartitionMap {
    /// Non-code spans, sorted, non-overlapping, each at least 1 byte.
    non_code: Vec<Partition>,
    len: usize,
}

impl PartitionMap {
    /// A map with no non-code spans: the whole buffer is code.
    pub fn uniform(len: usize) -> Self {
        Self {
            non_code: Vec::new(),
            len,
        }
    }

    /// Partition C-family source in a single pass.
    pub fn scan(text: &str) -> Self {
        let bytes = text.as_bytes();
        let n = bytes.len();
        let mut non_code = Vec::new();
        let mut at_line_start = true;
        let mut i = 0;
        while i < n {
            match bytes[i] {
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    let end = to_unescaped_eol(bytes, i + 2);
                    non_code.push(Partition::new(PartitionKind::LineComment, i, end - i));
                    i = end;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    let end = past_block_comment(bytes, i + 2);
                    non_code.push(Partition::new(PartitionKind::BlockComment, i, end - i));
                    i = end;
                    at_line_start = false;
                }
                quote @ (b'"' | b'\'') => {
                    let kind = if quote == b'"' {
                        PartitionKind::String
                    } else {
                        PartitionKind::Char
                    };
                    let end = past_quoted(bytes, i + 1, quote);
                    non_code.push(Partition::new(kind, i, end - i));
                    i = end;
                    at_line_start = false;
                }
                b'#' if at_line_start => {
                    let end = to_unescaped_eol(bytes, i + 1);
                    non_code.push(Partition::new(PartitionKind::Preprocessor, i, end - i));
                    i = end;
                }
                b'\n' | b'\r' => {
                    at_line_start = true;
                    i += 1;
                }
                b' ' | b'\t' | b'\x0c' => i += 1,
                _ => {
                    at_line_start = false;
                    i += 1;
                }
            }
        }
        Self { non_code, len: n }
    }
}

impl PartitionOracle for PartitionMap {
    fn partition_at(&self, offset: usize) -> Partition {
        let idx = self.non_code.partition_point(|p| p.end() <= offset);
        if let Some(p) = self.non_code.get(idx) {
            if p.start <= offset {
                return *p;
            }
            let gap_start = if idx == 0 {
                0
            } else {
                self.non_code[idx - 1].end()
            };
            return Partition::new(PartitionKind::Code, gap_start, p.start - gap_start);
        }
        let gap_start = self.non_code.last().map_or(0, Partition::end);
        Partition::new(PartitionKind::Code, gap_start, self.len - gap_start)
    }
}

/// Offset of the first line delimiter at or after `i` that is not
/// preceded by a backslash, or the end of the buffer.
fn to_unescaped_eol(bytes: &[u8], mut i: usize) -> usize {
    let n = bytes.len();
    loop {
        let Some(k) = memchr::memchr2(b'\n', b'\r', &bytes[i..]) else {
            return n;
        };
        let nl = i + k;
        if nl > 0 && bytes[nl - 1] == b'\\' {
            i = if bytes[nl] == b'\r' && bytes.get(nl + 1) == Some(&b'\n') {
                nl + 2
            } else {
                nl + 1
            };
        } else {
            return nl;
        }
    }
}

/// Offset just past the closing `*/`, or the end of the buffer.
fn past_block_comment(bytes: &[u8], mut i: usize) -> usize {
    let n = bytes.len();
    loop {
        let Some(k) = memchr::memchr(b'*', &bytes[i..]) else {
            return n;
        };
        let star = i + k;
        if bytes.get(star + 1) == Some(&b'/') {
            return star + 2;
        }
        i = star + 1;
    }
}

/// Offset just past the closing quote, or at the terminating line
/// delimiter of an unterminated literal, or the end of the buffer.
fn past_quoted(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    let n = bytes.len();
    while i < n {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' | b'\r' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    n
}
