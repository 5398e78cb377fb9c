//! Heuristic bidirectional token scanner.
//!
//! The scanner reads raw characters from a [`TextBuffer`] and
//! classifies them into [`Token`]s without any grammar: whitespace is
//! skipped, non-code partitions (comments, literals, preprocessor
//! lines) are jumped atomically, multi-character operators are
//! detected by a one-character peek, and identifier runs are resolved
//! against the keyword table.
//!
//! All operations are value-returning and leave no hidden state behind
//! (the only mutable field is a partition lookup cache). Scans take an
//! explicit `bound`:
//!
//! - forward: positions in `[start, bound)` are considered; pass
//!   `buffer.len()` for an unbounded scan
//! - backward: positions in `[bound, start)` are considered; pass `0`
//!   for an unbounded scan
//!
//! A scan that finds nothing returns an empty [`TokenKind::Eof`] token
//! sitting at the exhausted boundary, so chained calls terminate
//! instead of wrapping.

use std::cell::Cell;
use std::ops::Range;

use cin_text::{Partition, PartitionKind, PartitionOracle, TextBuffer};

use crate::keywords;
use crate::{Token, TokenKind};

/// Window for angle-bracket peer searches. `<` and `>` are ambiguous
/// with relational operators, so scope searches for them are never
/// unbounded.
pub const ANGLE_WINDOW: usize = 200;

/// Heuristic scanner over a partitioned buffer.
pub struct HeuristicScanner<'a, P: PartitionOracle> {
    buf: &'a TextBuffer,
    partitions: &'a P,
    /// Most recently used partition; spans many adjacent lookups.
    cached: Cell<Partition>,
}

/// Stop condition for the scan cores. Conditions other than `NonWs`
/// only stop inside the code partition and jump non-code partitions
/// atomically.
#[derive(Clone, Copy)]
enum Stop<'c> {
    /// First non-whitespace character in any partition.
    NonWs,
    /// First non-whitespace character in the code partition.
    NonWsCode,
    /// First non-identifier character, or any character outside the
    /// code partition.
    NonIdentCode,
    /// A character from the set, in the code partition.
    Chars(&'c [u8]),
}

impl<'a, P: PartitionOracle> HeuristicScanner<'a, P> {
    pub fn new(buf: &'a TextBuffer, partitions: &'a P) -> Self {
        Self {
            buf,
            partitions,
            cached: Cell::new(Partition::new(PartitionKind::Code, usize::MAX, 0)),
        }
    }

    #[inline]
    pub fn buffer(&self) -> &'a TextBuffer {
        self.buf
    }

    #[inline]
    pub fn buffer_len(&self) -> usize {
        self.buf.len()
    }

    // === Tokens ===

    /// Next token at or after `start`, not reaching `bound`.
    ///
    /// A leading string or char literal comes back as a single
    /// [`TokenKind::Other`] token covering the whole literal partition;
    /// its extent comes from partitioning, never from quote matching.
    pub fn next_token(&self, start: usize, bound: usize) -> Token {
        let limit = bound.min(self.buf.len());
        let Some(pos) = self.scan_forward_cond(start, bound, Stop::NonWs) else {
            return Token::eof(limit);
        };
        if matches!(self.buf.byte_at(pos), Some(b'"' | b'\'')) {
            let end = self.step_over_partition_forward(pos);
            return Token::new(TokenKind::Other, pos, end);
        }
        let Some(pos) = self.scan_forward_cond(pos, bound, Stop::NonWsCode) else {
            return Token::eof(limit);
        };
        let Some(ch) = self.buf.byte_at(pos) else {
            return Token::eof(limit);
        };
        let next = self.buf.byte_at(pos + 1);
        let one = |kind| Token::new(kind, pos, pos + 1);
        let two = |kind| Token::new(kind, pos, pos + 2);
        match ch {
            b'{' => one(TokenKind::LBrace),
            b'}' => one(TokenKind::RBrace),
            b'[' => one(TokenKind::LBracket),
            b']' => one(TokenKind::RBracket),
            b'(' => one(TokenKind::LParen),
            b')' => one(TokenKind::RParen),
            b';' => one(TokenKind::Semicolon),
            b',' => one(TokenKind::Comma),
            b'?' => one(TokenKind::Question),
            b'=' => one(TokenKind::Equal),
            b':' => match next {
                Some(b':') => two(TokenKind::DoubleColon),
                _ => one(TokenKind::Colon),
            },
            b'<' => match next {
                Some(b'<') => two(TokenKind::ShiftLeft),
                Some(b'=') => two(TokenKind::Other),
                _ => one(TokenKind::Less),
            },
            b'>' => match next {
                Some(b'>') => two(TokenKind::ShiftRight),
                Some(b'=') => two(TokenKind::Other),
                _ => one(TokenKind::Greater),
            },
            b'-' => match next {
                Some(b'>') => two(TokenKind::Arrow),
                _ => one(TokenKind::Minus),
            },
            b'.' => one(TokenKind::Dot),
            b'+' => one(TokenKind::Plus),
            b'~' => one(TokenKind::Tilde),
            c if is_ident_part(c) => {
                let end = self
                    .scan_forward_cond(pos + 1, bound, Stop::NonIdentCode)
                    .unwrap_or(limit);
                self.ident_token(pos, end)
            }
            _ => one(TokenKind::Other),
        }
    }

    /// Previous token strictly before `start`, not reaching below
    /// `bound`.
    pub fn previous_token(&self, start: usize, bound: usize) -> Token {
        let Some(pos) = self.scan_backward_cond(to_isize(start) - 1, bound, Stop::NonWsCode)
        else {
            return Token::eof(bound);
        };
        let Some(ch) = self.buf.byte_at(pos) else {
            return Token::eof(bound);
        };
        let prev = if pos > 0 { self.buf.byte_at(pos - 1) } else { None };
        let one = |kind| Token::new(kind, pos, pos + 1);
        let two = |kind| Token::new(kind, pos - 1, pos + 1);
        match ch {
            b'{' => one(TokenKind::LBrace),
            b'}' => one(TokenKind::RBrace),
            b'[' => one(TokenKind::LBracket),
            b']' => one(TokenKind::RBracket),
            b'(' => one(TokenKind::LParen),
            b')' => one(TokenKind::RParen),
            b';' => one(TokenKind::Semicolon),
            b',' => one(TokenKind::Comma),
            b'?' => one(TokenKind::Question),
            b':' => match prev {
                Some(b':') => two(TokenKind::DoubleColon),
                _ => one(TokenKind::Colon),
            },
            b'=' => match prev {
                // <= and >= collapse to an uninterpreted operator
                Some(b'<' | b'>') => two(TokenKind::Other),
                _ => one(TokenKind::Equal),
            },
            b'<' => match prev {
                Some(b'<') => two(TokenKind::ShiftLeft),
                _ => one(TokenKind::Less),
            },
            b'>' => match prev {
                Some(b'>') => two(TokenKind::ShiftRight),
                Some(b'-') => two(TokenKind::Arrow),
                _ => one(TokenKind::Greater),
            },
            b'.' => one(TokenKind::Dot),
            b'-' => one(TokenKind::Minus),
            b'+' => one(TokenKind::Plus),
            b'~' => one(TokenKind::Tilde),
            c if is_ident_part(c) => {
                let from = match self.scan_backward_cond(to_isize(pos) - 1, bound, Stop::NonIdentCode)
                {
                    Some(p) => p + 1,
                    None => bound,
                };
                self.ident_token(from, pos + 1)
            }
            _ => one(TokenKind::Other),
        }
    }

    fn ident_token(&self, start: usize, end: usize) -> Token {
        let kind = self
            .buf
            .slice(start, end)
            .ok()
            .and_then(keywords::lookup)
            .unwrap_or(TokenKind::Ident);
        Token::new(kind, start, end)
    }

    // === Peer Matching ===

    /// Position of the closing peer (forward search), skipping nested
    /// scopes. `start` must point past the opening peer, at the first
    /// character to search. Peers only count in the code partition;
    /// the depth starts at 1.
    pub fn find_closing_peer(
        &self,
        start: usize,
        bound: usize,
        open: u8,
        close: u8,
    ) -> Option<usize> {
        let set = [open, close];
        let mut depth = 1u32;
        let mut pos = start;
        loop {
            let found = self.scan_forward_cond(pos, bound, Stop::Chars(&set))?;
            if self.buf.byte_at(found) == Some(open) {
                depth += 1;
            } else {
                depth -= 1;
            }
            if depth == 0 {
                return Some(found);
            }
            pos = found + 1;
        }
    }

    /// Position of the opening peer (backward search), skipping nested
    /// scopes. `start` must point before the closing peer, at the
    /// first character to search (inclusive).
    pub fn find_opening_peer(
        &self,
        start: usize,
        bound: usize,
        open: u8,
        close: u8,
    ) -> Option<usize> {
        let set = [open, close];
        let mut depth = 1u32;
        let mut pos = to_isize(start);
        loop {
            let found = self.scan_backward_cond(pos, bound, Stop::Chars(&set))?;
            if self.buf.byte_at(found) == Some(close) {
                depth += 1;
            } else {
                depth -= 1;
            }
            if depth == 0 {
                return Some(found);
            }
            pos = to_isize(found) - 1;
        }
    }

    /// The innermost `{...}` region around `offset`. An opening brace
    /// at `offset` is not part of the block; a closing brace is.
    pub fn find_surrounding_block(&self, offset: usize) -> Option<Range<usize>> {
        if offset < 1 || offset >= self.buf.len() {
            return None;
        }
        let begin = self.find_opening_peer(offset - 1, 0, b'{', b'}')?;
        let end = self.find_closing_peer(offset, self.buf.len(), b'{', b'}')?;
        Some(begin..end + 1)
    }

    /// Backward search for the `<` matching a `>`, bounded to
    /// [`ANGLE_WINDOW`] characters.
    pub fn find_opening_angle(&self, start: usize, bound: usize) -> Option<usize> {
        let bound = bound.max(start.saturating_sub(ANGLE_WINDOW));
        self.find_opening_peer(start, bound, b'<', b'>')
    }

    /// Whether the `<` at `pos` plausibly opens a template parameter
    /// or argument list: it must follow an identifier or `template`.
    pub fn looks_like_template_open(&self, pos: usize, bound: usize) -> bool {
        let bound = bound.max(pos.saturating_sub(ANGLE_WINDOW));
        matches!(
            self.previous_token(pos, bound).kind,
            TokenKind::Ident | TokenKind::Template
        )
    }

    // === Whitespace Searches ===

    /// Smallest position in `[position, bound)` holding a
    /// non-whitespace character in the code partition.
    #[inline]
    pub fn find_non_ws_forward(&self, position: usize, bound: usize) -> Option<usize> {
        self.scan_forward_cond(position, bound, Stop::NonWsCode)
    }

    /// Like [`Self::find_non_ws_forward`], but stops in any partition.
    #[inline]
    pub fn find_non_ws_forward_any_partition(&self, position: usize, bound: usize) -> Option<usize> {
        self.scan_forward_cond(position, bound, Stop::NonWs)
    }

    /// Highest position in `[bound, position]` holding a
    /// non-whitespace character in the code partition.
    #[inline]
    pub fn find_non_ws_backward(&self, position: usize, bound: usize) -> Option<usize> {
        self.scan_backward_cond(to_isize(position), bound, Stop::NonWsCode)
    }

    // === Partitions ===

    /// Whether `position` is in the code partition.
    pub fn is_code_partition(&self, position: usize) -> bool {
        self.partition(position).kind.is_code()
    }

    fn partition(&self, position: usize) -> Partition {
        let cached = self.cached.get();
        if cached.contains(position) {
            return cached;
        }
        let p = self.partitions.partition_at(position.min(self.buf.len()));
        self.cached.set(p);
        p
    }

    /// Next scan position after `pos`, jumping a non-code partition
    /// to its end.
    fn step_over_partition_forward(&self, pos: usize) -> usize {
        let p = self.partition(pos);
        if !p.kind.is_code() && pos < p.end() {
            return p.end();
        }
        pos + 1
    }

    // === Scan Cores ===

    fn scan_forward_cond(&self, start: usize, bound: usize, cond: Stop<'_>) -> Option<usize> {
        let bound = bound.min(self.buf.len());
        let mut pos = start;
        while pos < bound {
            let b = self.buf.byte_at(pos)?;
            if self.is_stop(cond, b, pos) {
                return Some(pos);
            }
            pos = usize::try_from(self.next_position(cond, to_isize(pos), true)).ok()?;
        }
        None
    }

    /// Backward scan over `[bound, start]`, highest match first.
    /// `start` may be negative (empty range).
    fn scan_backward_cond(&self, start: isize, bound: usize, cond: Stop<'_>) -> Option<usize> {
        let limit = to_isize(bound) - 1;
        let mut pos = start.min(to_isize(self.buf.len()) - 1);
        while pos > limit {
            let upos = usize::try_from(pos).ok()?;
            let b = self.buf.byte_at(upos)?;
            if self.is_stop(cond, b, upos) {
                return Some(upos);
            }
            pos = self.next_position(cond, pos, false);
        }
        None
    }

    fn is_stop(&self, cond: Stop<'_>, b: u8, pos: usize) -> bool {
        match cond {
            Stop::NonWs => !is_ws(b),
            Stop::NonWsCode => !is_ws(b) && self.is_code_partition(pos),
            Stop::NonIdentCode => !is_ident_part(b) || !self.is_code_partition(pos),
            Stop::Chars(set) => set.contains(&b) && self.is_code_partition(pos),
        }
    }

    fn next_position(&self, cond: Stop<'_>, pos: isize, forward: bool) -> isize {
        let step = if forward { pos + 1 } else { pos - 1 };
        if matches!(cond, Stop::NonWs) {
            return step;
        }
        let Ok(upos) = usize::try_from(pos) else {
            return step;
        };
        let p = self.partition(upos);
        if !p.kind.is_code() {
            if forward {
                let end = to_isize(p.end());
                if pos < end {
                    return end;
                }
            } else {
                let off = to_isize(p.start);
                if pos > off {
                    return off - 1;
                }
            }
        }
        step
    }
}

#[inline]
fn is_ws(b: u8) -> bool {
    b.is_ascii_whitespace()
}

/// Identifier characters: ASCII alphanumerics, `_`, and any non-ASCII
/// byte (so multi-byte identifiers are consumed whole).
#[inline]
fn is_ident_part(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

#[inline]
fn to_isize(v: usize) -> isize {
    isize::try_from(v).unwrap_or(isize::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cin_text::PartitionMap;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn scan_all(text: &str) -> Vec<(TokenKind, usize, usize)> {
        let buf = TextBuffer::new(text);
        let map = PartitionMap::scan(text);
        let sc = HeuristicScanner::new(&buf, &map);
        let mut out = Vec::new();
        let mut pos = 0;
        loop {
            let t = sc.next_token(pos, buf.len());
            if t.kind == TokenKind::Eof {
                return out;
            }
            out.push((t.kind, t.start, t.end));
            pos = t.end;
        }
    }

    fn kinds(text: &str) -> Vec<TokenKind> {
        scan_all(text).into_iter().map(|(k, _, _)| k).collect()
    }

    // === Forward Tokens ===

    #[test]
    fn punctuation_and_keywords() {
        use TokenKind::*;
        assert_eq!(
            kinds("if (x) { y[0] = z; }"),
            // a bare number scans as an identifier run that misses the
            // keyword table
            vec![If, LParen, Ident, RParen, LBrace, Ident, LBracket, Ident, RBracket, Equal, Ident, Semicolon, RBrace]
        );
    }

    #[test]
    fn multi_char_operators_forward() {
        use TokenKind::*;
        assert_eq!(kinds("a::b"), vec![Ident, DoubleColon, Ident]);
        assert_eq!(kinds("a->b"), vec![Ident, Arrow, Ident]);
        assert_eq!(kinds("a << b"), vec![Ident, ShiftLeft, Ident]);
        assert_eq!(kinds("a >> b"), vec![Ident, ShiftRight, Ident]);
        assert_eq!(kinds("a <= b"), vec![Ident, Other, Ident]);
        assert_eq!(kinds("a >= b"), vec![Ident, Other, Ident]);
        assert_eq!(kinds("a < b > c"), vec![Ident, Less, Ident, Greater, Ident]);
    }

    #[test]
    fn string_literal_is_one_other_token() {
        let text = r#"f("a, b; {")"#;
        let toks = scan_all(text);
        assert_eq!(
            toks,
            vec![
                (TokenKind::Ident, 0, 1),
                (TokenKind::LParen, 1, 2),
                (TokenKind::Other, 2, 11),
                (TokenKind::RParen, 11, 12),
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        use TokenKind::*;
        assert_eq!(kinds("a /* ; */ b // c\n;"), vec![Ident, Ident, Semicolon]);
    }

    #[test]
    fn preprocessor_lines_are_skipped() {
        use TokenKind::*;
        assert_eq!(kinds("#include <a>\nint x;"), vec![Ident, Ident, Semicolon]);
    }

    #[test]
    fn forward_bound_is_exclusive() {
        let buf = TextBuffer::new("ab cd");
        let map = PartitionMap::uniform(5);
        let sc = HeuristicScanner::new(&buf, &map);
        let t = sc.next_token(2, 3);
        assert_eq!(t.kind, TokenKind::Eof);
        // the identifier run is clipped at the bound
        let t = sc.next_token(3, 4);
        assert_eq!((t.kind, t.start, t.end), (TokenKind::Ident, 3, 4));
    }

    // === Backward Tokens ===

    fn scanner_for(text: &str) -> (TextBuffer, PartitionMap) {
        (TextBuffer::new(text), PartitionMap::scan(text))
    }

    #[test]
    fn previous_token_basics() {
        let (buf, map) = scanner_for("foo(bar);");
        let sc = HeuristicScanner::new(&buf, &map);
        let t = sc.previous_token(buf.len(), 0);
        assert_eq!((t.kind, t.start, t.end), (TokenKind::Semicolon, 8, 9));
        let t = sc.previous_token(t.start, 0);
        assert_eq!((t.kind, t.start, t.end), (TokenKind::RParen, 7, 8));
        let t = sc.previous_token(t.start, 0);
        assert_eq!((t.kind, t.start, t.end), (TokenKind::Ident, 4, 7));
        let t = sc.previous_token(t.start, 0);
        assert_eq!(t.kind, TokenKind::LParen);
        let t = sc.previous_token(t.start, 0);
        assert_eq!((t.kind, t.start), (TokenKind::Ident, 0));
        let t = sc.previous_token(t.start, 0);
        assert_eq!(t.kind, TokenKind::Eof);
        assert_eq!(t.start, 0);
    }

    #[test]
    fn multi_char_operators_backward() {
        let check = |text: &str, kind: TokenKind, start: usize| {
            let (buf, map) = scanner_for(text);
            let sc = HeuristicScanner::new(&buf, &map);
            let t = sc.previous_token(buf.len(), 0);
            assert_eq!((t.kind, t.start), (kind, start), "{text}");
        };
        check("a::", TokenKind::DoubleColon, 1);
        check("a->", TokenKind::Arrow, 1);
        check("a<<", TokenKind::ShiftLeft, 1);
        check("a>>", TokenKind::ShiftRight, 1);
        check("a<=", TokenKind::Other, 1);
        check("a>=", TokenKind::Other, 1);
        check("a=", TokenKind::Equal, 1);
        check("a<", TokenKind::Less, 1);
        check("a>", TokenKind::Greater, 1);
        check("a~", TokenKind::Tilde, 1);
    }

    #[test]
    fn backward_skips_comment_partitions() {
        let (buf, map) = scanner_for("x = 1; /* } */");
        let sc = HeuristicScanner::new(&buf, &map);
        let t = sc.previous_token(buf.len(), 0);
        assert_eq!(t.kind, TokenKind::Semicolon);
    }

    #[test]
    fn backward_bound_limits_identifier_run() {
        let (buf, map) = scanner_for("abcd");
        let sc = HeuristicScanner::new(&buf, &map);
        let t = sc.previous_token(4, 2);
        assert_eq!((t.kind, t.start, t.end), (TokenKind::Ident, 2, 4));
        let t = sc.previous_token(2, 2);
        assert_eq!(t.kind, TokenKind::Eof);
    }

    #[test]
    fn keyword_backward() {
        let (buf, map) = scanner_for("} while");
        let sc = HeuristicScanner::new(&buf, &map);
        let t = sc.previous_token(buf.len(), 0);
        assert_eq!((t.kind, t.start, t.end), (TokenKind::While, 2, 7));
    }

    // === Peer Matching ===

    #[test]
    fn closing_peer_skips_nested_scopes() {
        let (buf, map) = scanner_for("( a ( b ) c ) d");
        let sc = HeuristicScanner::new(&buf, &map);
        assert_eq!(sc.find_closing_peer(1, buf.len(), b'(', b')'), Some(12));
    }

    #[test]
    fn opening_peer_skips_nested_scopes() {
        let (buf, map) = scanner_for("{ { } }");
        let sc = HeuristicScanner::new(&buf, &map);
        assert_eq!(sc.find_opening_peer(5, 0, b'{', b'}'), Some(0));
    }

    #[test]
    fn peers_ignore_braces_in_strings_and_comments() {
        let text = "{ \"}\" /* } */ }";
        let (buf, map) = scanner_for(text);
        let sc = HeuristicScanner::new(&buf, &map);
        assert_eq!(sc.find_closing_peer(1, buf.len(), b'{', b'}'), Some(14));
    }

    #[test]
    fn unmatched_peer_is_none() {
        let (buf, map) = scanner_for("( ( )");
        let sc = HeuristicScanner::new(&buf, &map);
        assert_eq!(sc.find_closing_peer(1, buf.len(), b'(', b')'), None);
    }

    #[test]
    fn surrounding_block() {
        let text = "a { b { c } d } e";
        let (buf, map) = scanner_for(text);
        let sc = HeuristicScanner::new(&buf, &map);
        assert_eq!(sc.find_surrounding_block(8), Some(6..11));
        assert_eq!(sc.find_surrounding_block(12), Some(2..15));
        assert_eq!(sc.find_surrounding_block(0), None);
    }

    #[test]
    fn angle_peer_search_is_bounded() {
        let filler = "a".repeat(ANGLE_WINDOW + 20);
        let text = format!("v<{filler}>");
        let (buf, map) = scanner_for(&text);
        let sc = HeuristicScanner::new(&buf, &map);
        // the '<' lies outside the window from the '>'
        assert_eq!(sc.find_opening_angle(buf.len() - 2, 0), None);
    }

    #[test]
    fn template_open_heuristic() {
        let (buf, map) = scanner_for("vector<int> template <class T> a < b");
        let sc = HeuristicScanner::new(&buf, &map);
        assert!(sc.looks_like_template_open(6, 0));
        assert!(sc.looks_like_template_open(21, 0));
        // after `a` an identifier also qualifies; a paren does not
        let (buf2, map2) = scanner_for("f() < b");
        let sc2 = HeuristicScanner::new(&buf2, &map2);
        assert!(!sc2.looks_like_template_open(4, 0));
    }

    // === Whitespace Searches ===

    #[test]
    fn non_ws_forward_skips_comments() {
        let (buf, map) = scanner_for("  /* x */  b");
        let sc = HeuristicScanner::new(&buf, &map);
        assert_eq!(sc.find_non_ws_forward(0, buf.len()), Some(11));
        assert_eq!(sc.find_non_ws_forward_any_partition(0, buf.len()), Some(2));
    }

    #[test]
    fn non_ws_backward_is_inclusive() {
        let (buf, map) = scanner_for("ab  ");
        let sc = HeuristicScanner::new(&buf, &map);
        assert_eq!(sc.find_non_ws_backward(3, 0), Some(1));
        assert_eq!(sc.find_non_ws_backward(1, 0), Some(1));
        assert_eq!(sc.find_non_ws_backward(1, 2), None);
    }

    // === Properties ===

    fn token_text() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            "foo", "bar2", "_x", "if", "while", "class", "operator", "(", ")", "{", "}", "[", "]",
            ";", ",", "?", "=", "::", "->", "<<", ">>", "<", ">", ".", "-", "+", "~", ":",
        ])
        .prop_map(str::to_owned)
    }

    proptest! {
        #[test]
        fn token_round_trip(tokens in prop::collection::vec(token_text(), 1..40)) {
            let text = tokens.join(" ");
            let buf = TextBuffer::new(text.as_str());
            let map = PartitionMap::uniform(buf.len());
            let sc = HeuristicScanner::new(&buf, &map);
            let mut pos = 0;
            loop {
                let fwd = sc.next_token(pos, buf.len());
                if fwd.kind == TokenKind::Eof {
                    break;
                }
                let back = sc.previous_token(fwd.end, 0);
                prop_assert_eq!(back, fwd);
                pos = fwd.end;
            }
        }

        #[test]
        fn peer_symmetry(body in "[a-z (){}\\[\\];]{0,60}") {
            let text = format!("({body})");
            // only test on balanced bodies
            let mut depth = 0i32;
            let mut balanced = true;
            for b in text.bytes() {
                match b {
                    b'(' => depth += 1,
                    b')' => {
                        depth -= 1;
                        if depth < 0 { balanced = false; }
                    }
                    _ => {}
                }
            }
            prop_assume!(balanced && depth == 0);
            let buf = TextBuffer::new(text.as_str());
            let map = PartitionMap::uniform(buf.len());
            let sc = HeuristicScanner::new(&buf, &map);
            let close = sc.find_closing_peer(1, buf.len(), b'(', b')');
            prop_assert!(close.is_some());
            let close = close.unwrap();
            prop_assert_eq!(sc.find_opening_peer(close - 1, 0, b'(', b')'), Some(0));
        }

        #[test]
        fn scans_respect_bounds(text in "[a-z;{} ]{0,40}", start in 0usize..40, bound in 0usize..40) {
            let buf = TextBuffer::new(text.as_str());
            let map = PartitionMap::uniform(buf.len());
            let sc = HeuristicScanner::new(&buf, &map);
            let t = sc.next_token(start, bound);
            if t.kind != TokenKind::Eof {
                prop_assert!(t.start >= start);
                prop_assert!(t.start < bound);
            }
            let start = start.min(buf.len());
            if bound <= start {
                let t = sc.previous_token(start, bound);
                if t.kind != TokenKind::Eof {
                    prop_assert!(t.end <= start);
                    prop_assert!(t.start >= bound);
                }
            }
        }
    }
}
