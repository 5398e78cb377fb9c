//! Token kinds and spans produced by the heuristic scanner.
//!
//! The kind set is closed and C/C++-specific: structural punctuation,
//! the multi-character operators the indenter cares about, the
//! keywords that influence indentation, and three catch-alls
//! ([`TokenKind::Ident`], [`TokenKind::Other`], [`TokenKind::Eof`]).
//! Everything the indenter does is an exhaustive match over this enum.

/// Classification of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Semicolon,
    Colon,
    DoubleColon,
    Comma,
    Question,
    Equal,
    Less,
    Greater,
    ShiftLeft,
    ShiftRight,
    Arrow,
    Dot,
    Minus,
    Plus,
    Tilde,

    // keywords
    Break,
    Case,
    Catch,
    Class,
    Const,
    Default,
    Delete,
    Do,
    Else,
    Enum,
    Extern,
    For,
    Goto,
    If,
    Namespace,
    New,
    Noexcept,
    Operator,
    Override,
    Private,
    Protected,
    Public,
    Return,
    Static,
    Struct,
    Switch,
    Template,
    Throw,
    Try,
    Typedef,
    Typename,
    Union,
    Using,
    Virtual,
    While,

    /// Identifier that is not a recognized keyword.
    Ident,
    /// Anything else: number and string literals, operator fragments.
    Other,
    /// No token in the scanned range.
    Eof,
}

impl TokenKind {
    /// `public`, `protected` or `private`.
    #[inline]
    pub fn is_access_specifier(self) -> bool {
        matches!(
            self,
            TokenKind::Public | TokenKind::Protected | TokenKind::Private
        )
    }

    /// `class`, `struct` or `union` (the composite type keywords).
    #[inline]
    pub fn is_composite_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Class | TokenKind::Struct | TokenKind::Union
        )
    }
}

/// A classified span of text. `start..end` are byte offsets; a chained
/// scan resumes at `end` (forward) or `start` (backward).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { kind, start, end }
    }

    /// Empty end-of-scan token at the exhausted boundary.
    #[inline]
    pub fn eof(at: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            start: at,
            end: at,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
