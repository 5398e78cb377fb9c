//! Token cursors over the heuristic scanner.
//!
//! [`TokenCursor`] is the backtracking primitive of the heuristic
//! layer: a `Copy` value holding a scan position and a bound. A
//! predicate that needs to look ahead saves the cursor by copying it
//! and restores it by assigning the copy back; failed probes leave the
//! caller's state untouched.

use cin_text::PartitionOracle;

use crate::{HeuristicScanner, Token, TokenKind};

/// Backward scan position with a fixed lower bound.
///
/// Each [`Self::prev`] call reads the token strictly before `pos` and
/// moves `pos` to its start, so repeated calls walk token by token
/// toward `bound`. At the bound the cursor keeps returning
/// [`TokenKind::Eof`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenCursor {
    pub pos: usize,
    pub bound: usize,
}

impl TokenCursor {
    #[inline]
    pub fn new(pos: usize, bound: usize) -> Self {
        Self { pos, bound }
    }

    /// Read the previous token and advance over it.
    #[inline]
    pub fn prev<P: PartitionOracle>(&mut self, scanner: &HeuristicScanner<'_, P>) -> Token {
        let token = scanner.previous_token(self.pos, self.bound);
        self.pos = token.start;
        token
    }
}

/// A simplified bidirectional interface to the scanner's token
/// operations, for callers that just want to iterate.
pub struct TokenStream<'s, 'a, P: PartitionOracle> {
    scanner: &'s HeuristicScanner<'a, P>,
    pos: usize,
}

impl<'s, 'a, P: PartitionOracle> TokenStream<'s, 'a, P> {
    pub fn new(scanner: &'s HeuristicScanner<'a, P>, start: usize) -> Self {
        Self {
            scanner,
            pos: start,
        }
    }

    /// Current stream position.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Next token forward; the stream moves past it.
    pub fn next_token(&mut self) -> Token {
        let token = self.scanner.next_token(self.pos, self.scanner.buffer_len());
        self.pos = token.end;
        token
    }

    /// Next token backward; the stream moves before it.
    pub fn previous_token(&mut self) -> Token {
        let token = self.scanner.previous_token(self.pos, 0);
        self.pos = token.start;
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cin_text::{PartitionMap, TextBuffer};
    use pretty_assertions::assert_eq;

    #[test]
    fn cursor_walks_backward_and_restores_by_copy() {
        let buf = TextBuffer::new("a + b;");
        let map = PartitionMap::uniform(buf.len());
        let sc = HeuristicScanner::new(&buf, &map);

        let mut cur = TokenCursor::new(buf.len(), 0);
        assert_eq!(cur.prev(&sc).kind, TokenKind::Semicolon);
        let saved = cur;
        assert_eq!(cur.prev(&sc).kind, TokenKind::Ident);
        assert_eq!(cur.prev(&sc).kind, TokenKind::Plus);
        cur = saved;
        assert_eq!(cur.prev(&sc).kind, TokenKind::Ident);
    }

    #[test]
    fn cursor_stops_at_bound() {
        let buf = TextBuffer::new("x y");
        let map = PartitionMap::uniform(buf.len());
        let sc = HeuristicScanner::new(&buf, &map);

        let mut cur = TokenCursor::new(buf.len(), 2);
        assert_eq!(cur.prev(&sc).kind, TokenKind::Ident);
        assert_eq!(cur.prev(&sc).kind, TokenKind::Eof);
        assert_eq!(cur.prev(&sc).kind, TokenKind::Eof);
        assert_eq!(cur.pos, 2);
    }

    #[test]
    fn stream_runs_both_directions() {
        let buf = TextBuffer::new("if (x)");
        let map = PartitionMap::uniform(buf.len());
        let sc = HeuristicScanner::new(&buf, &map);

        let mut stream = TokenStream::new(&sc, 0);
        assert_eq!(stream.next_token().kind, TokenKind::If);
        assert_eq!(stream.next_token().kind, TokenKind::LParen);
        assert_eq!(stream.previous_token().kind, TokenKind::LParen);
        assert_eq!(stream.previous_token().kind, TokenKind::If);
        assert_eq!(stream.previous_token().kind, TokenKind::Eof);
        assert_eq!(stream.position(), 0);
    }
}
