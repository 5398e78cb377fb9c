//! Backward structural probes built on the token scanner.
//!
//! Each probe answers a yes/no question about the code just before a
//! position by walking tokens backward with a local [`TokenCursor`].
//! Probes never touch caller state; backtracking is a cursor copy.

use cin_text::PartitionOracle;

use crate::{HeuristicScanner, TokenCursor, TokenKind};

impl<P: PartitionOracle> HeuristicScanner<'_, P> {
    /// Whether the code before `position` is a conditional or loop
    /// header not followed by a block:
    ///
    /// ```text
    /// if (condition)
    ///     doStuff();
    /// ```
    ///
    /// True if the last code before `position` is `do`, `else`, or a
    /// complete `if`/`for`/`while` parenthesized header.
    pub fn is_braceless_block_start(&self, position: usize, bound: usize) -> bool {
        if position < 1 {
            return false;
        }
        let mut cur = TokenCursor::new(position, bound);
        let token = cur.prev(self);
        match token.kind {
            TokenKind::Do | TokenKind::Else => true,
            TokenKind::RParen => {
                let Some(open) = token
                    .start
                    .checked_sub(1)
                    .and_then(|p| self.find_opening_peer(p, 0, b'(', b')'))
                else {
                    return false;
                };
                open > 0
                    && matches!(
                        self.previous_token(open, bound).kind,
                        TokenKind::If | TokenKind::For | TokenKind::While
                    )
            }
            _ => false,
        }
    }

    /// Whether the code backward from `start` looks like a class
    /// instance creation: a possibly qualified type name preceded by
    /// `new`. `start` must be at the end of the type name.
    ///
    /// ```text
    /// new std::vector|(10)
    /// new str_vector |(10)
    /// ```
    pub fn looks_like_class_instance_creation_backward(&self, start: usize, bound: usize) -> bool {
        let mut cur = TokenCursor::new(start, bound);
        if cur.prev(self).kind != TokenKind::Ident {
            return false;
        }
        let mut token = cur.prev(self).kind;
        while token == TokenKind::DoubleColon {
            if cur.prev(self).kind != TokenKind::Ident {
                return false;
            }
            token = cur.prev(self).kind;
        }
        token == TokenKind::New
    }

    /// Whether the code backward from `start` looks like a field
    /// reference: an optional name preceded by `.`, `->` or `::`.
    pub fn looks_like_field_reference_backward(&self, start: usize, bound: usize) -> bool {
        let mut cur = TokenCursor::new(start, bound);
        let mut token = cur.prev(self).kind;
        if token == TokenKind::Ident {
            token = cur.prev(self).kind;
        }
        matches!(
            token,
            TokenKind::Dot | TokenKind::Arrow | TokenKind::DoubleColon
        )
    }

    /// Whether the code backward from `start` (the position of an
    /// opening brace) looks like a composite type or enum definition:
    ///
    /// ```text
    /// class A {
    /// struct A {
    /// class A : B {
    /// class A : virtual public B, protected C<T> {
    /// enum E {
    /// ```
    pub fn looks_like_composite_type_definition_backward(
        &self,
        start: usize,
        bound: usize,
    ) -> bool {
        let mut cur = TokenCursor::new(start, bound);
        let mut token = cur.prev(self).kind;
        match token {
            TokenKind::Struct | TokenKind::Union | TokenKind::Enum => return true, // anonymous
            TokenKind::Ident => {
                let saved = cur;
                match cur.prev(self).kind {
                    TokenKind::Class | TokenKind::Struct | TokenKind::Union | TokenKind::Enum => {
                        return true; // no base-clause
                    }
                    _ => cur = saved,
                }
            }
            _ => {}
        }
        // match base-clause
        if token == TokenKind::Greater {
            if !self.skip_template_args_backward(&mut cur) {
                return false;
            }
            token = cur.prev(self).kind;
        }
        'base: while token == TokenKind::Ident {
            token = cur.prev(self).kind;
            // nested-name-specifier qualification
            while token == TokenKind::DoubleColon {
                token = cur.prev(self).kind;
                if token != TokenKind::Ident {
                    break;
                }
                token = cur.prev(self).kind;
            }
            match token {
                TokenKind::Virtual | TokenKind::Public | TokenKind::Protected
                | TokenKind::Private => {
                    if token == TokenKind::Virtual {
                        // access specifier may precede `virtual`
                        cur.prev(self);
                    }
                    token = cur.prev(self).kind;
                    if token == TokenKind::Virtual {
                        token = cur.prev(self).kind;
                    }
                    if token == TokenKind::Comma {
                        token = cur.prev(self).kind;
                        if token == TokenKind::Greater {
                            if !self.skip_template_args_backward(&mut cur) {
                                return false;
                            }
                            token = cur.prev(self).kind;
                        }
                        continue 'base;
                    }
                    if token != TokenKind::Colon {
                        return false;
                    }
                    token = cur.prev(self).kind;
                    break 'base;
                }
                TokenKind::Colon => {
                    token = cur.prev(self).kind;
                    break 'base;
                }
                TokenKind::Comma => {
                    token = cur.prev(self).kind;
                    if token == TokenKind::Greater {
                        if !self.skip_template_args_backward(&mut cur) {
                            return false;
                        }
                        token = cur.prev(self).kind;
                    }
                    continue 'base;
                }
                TokenKind::Ident => break 'base,
                _ => return false,
            }
        }
        if token != TokenKind::Ident {
            return false;
        }
        matches!(
            cur.prev(self).kind,
            TokenKind::Class | TokenKind::Struct | TokenKind::Union | TokenKind::Enum
        )
    }

    /// Move the cursor before a `<...>` group whose closing `>` the
    /// cursor has just consumed. The search window is bounded; the
    /// character found must scan back as a plain `<`.
    fn skip_template_args_backward(&self, cur: &mut TokenCursor) -> bool {
        let Some(open) = cur
            .pos
            .checked_sub(1)
            .and_then(|p| self.find_opening_angle(p, cur.bound))
        else {
            return false;
        };
        cur.pos = open + 1;
        cur.prev(self).kind == TokenKind::Less
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cin_text::{PartitionMap, TextBuffer};

    fn with_scanner(text: &str, f: impl Fn(&HeuristicScanner<'_, PartitionMap>)) {
        let buf = TextBuffer::new(text);
        let map = PartitionMap::scan(text);
        let sc = HeuristicScanner::new(&buf, &map);
        f(&sc);
    }

    // === Braceless Block Start ===

    #[test]
    fn braceless_after_if_header() {
        with_scanner("if (a == b)\n", |sc| {
            assert!(sc.is_braceless_block_start(11, 0));
        });
    }

    #[test]
    fn braceless_after_do_and_else() {
        with_scanner("do\n", |sc| assert!(sc.is_braceless_block_start(2, 0)));
        with_scanner("else\n", |sc| assert!(sc.is_braceless_block_start(4, 0)));
    }

    #[test]
    fn call_is_not_braceless_block_start() {
        with_scanner("foo(a)\n", |sc| {
            assert!(!sc.is_braceless_block_start(6, 0));
        });
    }

    #[test]
    fn while_header_is_braceless_block_start() {
        with_scanner("while (x)\n", |sc| {
            assert!(sc.is_braceless_block_start(9, 0));
        });
    }

    // === Class Instance Creation ===

    #[test]
    fn new_with_qualified_name() {
        let text = "new std::vector";
        with_scanner(text, |sc| {
            assert!(sc.looks_like_class_instance_creation_backward(text.len(), 0));
        });
    }

    #[test]
    fn new_with_plain_name() {
        let text = "x = new Widget ";
        with_scanner(text, |sc| {
            assert!(sc.looks_like_class_instance_creation_backward(15, 0));
        });
    }

    #[test]
    fn plain_name_without_new() {
        let text = "vector ";
        with_scanner(text, |sc| {
            assert!(!sc.looks_like_class_instance_creation_backward(7, 0));
        });
    }

    // === Field Reference ===

    #[test]
    fn field_reference_operators() {
        for text in ["a.b", "a->b", "a::b", "a->", "a."] {
            with_scanner(text, |sc| {
                assert!(
                    sc.looks_like_field_reference_backward(text.len(), 0),
                    "{text}"
                );
            });
        }
        with_scanner("a b", |sc| {
            assert!(!sc.looks_like_field_reference_backward(3, 0));
        });
    }

    // === Composite Type Definition ===

    fn composite(text: &str) -> bool {
        let brace = text.rfind('{').unwrap_or(text.len());
        let buf = TextBuffer::new(text);
        let map = PartitionMap::scan(text);
        let sc = HeuristicScanner::new(&buf, &map);
        sc.looks_like_composite_type_definition_backward(brace, 0)
    }

    #[test]
    fn simple_definitions() {
        assert!(composite("class A {"));
        assert!(composite("struct A {"));
        assert!(composite("union U {"));
        assert!(composite("enum E {"));
        assert!(composite("struct {"));
    }

    #[test]
    fn base_clauses() {
        assert!(composite("class A : B {"));
        assert!(composite("class A : public B {"));
        assert!(composite("class A : virtual public B, protected C {"));
        assert!(composite("class A : public B, C {"));
        assert!(composite("class A : N::B {"));
    }

    #[test]
    fn template_base_clause() {
        assert!(composite("class A : public C<T> {"));
        assert!(composite("class A : C<T>, D {"));
    }

    #[test]
    fn non_definitions() {
        assert!(!composite("foo() {"));
        assert!(!composite("if (x) {"));
        assert!(!composite("int a[] = {"));
        assert!(!composite("namespace N {"));
    }
}
