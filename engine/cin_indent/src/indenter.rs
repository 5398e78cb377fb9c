//! Reference-based indentation computation.
//!
//! The indenter answers "how should the line at this offset be
//! indented" by scanning backward from the offset to a reference
//! position (usually the start of the governing statement), then
//! expressing the answer relative to that reference: a number of
//! indent units on top of the reference line's whitespace, or an
//! absolute alignment column for deep-indent cases (parameter lists,
//! initializer lists).
//!
//! All scan state lives in a per-request [`Pass`]; the public
//! [`Indenter`] is immutable and can be shared freely.

use cin_scan::{HeuristicScanner, Token, TokenKind};
use cin_text::{PartitionOracle, TextBuffer};
use tracing::trace;

use crate::prefs::IndentPrefs;
use crate::whitespace;

/// Which shortcut, if any, the reference search takes. Chosen from the
/// token that immediately follows the request offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Regular backward code analysis.
    Regular,
    /// Align with the matching opening brace.
    MatchBrace,
    /// Align with the matching opening parenthesis.
    MatchParen,
    /// Align with an earlier `case`/`default` label or the switch.
    MatchCase,
    /// Align with an earlier access specifier or the class body brace.
    MatchAccessSpecifier,
    /// Align with the head of the enclosing type declaration.
    MatchTypeDeclaration,
}

/// How the computed indentation relates to the reference position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentResult {
    /// Indent units (possibly negative) plus literal spaces on top of
    /// the reference line's leading whitespace.
    Relative { units: i32, extra_spaces: i32 },
    /// Copy the reference line verbatim up to this buffer offset,
    /// blanking non-tab characters (deep alignment).
    Align { offset: usize },
}

/// Computes indentation strings and reference positions for offsets in
/// a buffer. Holds no per-request state.
pub struct Indenter<'s, 'a, P: PartitionOracle> {
    buf: &'a TextBuffer,
    scanner: &'s HeuristicScanner<'a, P>,
    prefs: IndentPrefs,
}

impl<'s, 'a, P: PartitionOracle> Indenter<'s, 'a, P> {
    pub fn new(
        buf: &'a TextBuffer,
        scanner: &'s HeuristicScanner<'a, P>,
        prefs: IndentPrefs,
    ) -> Self {
        Self {
            buf,
            scanner,
            prefs,
        }
    }

    /// Indentation of the line holding the reference position for
    /// `offset`, or `None` if no reference can be found.
    pub fn reference_indentation(&self, offset: usize) -> Option<String> {
        let mut pass = self.pass();
        let next = pass.peek_forward(offset);
        let unit = pass.find_reference(offset, next)?;
        Some(pass.leading_whitespace(unit))
    }

    /// Full indentation string for the line at `offset`, or `None` if
    /// the indenter has no opinion.
    pub fn compute_indentation(&self, offset: usize) -> Option<String> {
        self.compute(offset, false)
    }

    /// Like [`Self::compute_indentation`], assuming an opening brace
    /// follows `offset`. Used by smart-brace insertion before the
    /// brace exists in the buffer.
    pub fn compute_indentation_assuming_opening_brace(&self, offset: usize) -> Option<String> {
        self.compute(offset, true)
    }

    /// Indentation for a wrapped continuation of the line at `offset`:
    /// the line's own indentation, plus one continuation indent if
    /// there is code before `offset` on that line.
    pub fn continuation_line_indentation(&self, offset: usize) -> Option<String> {
        let span = self.buf.line_span_of_offset(offset)?;
        let pass = self.pass();
        let mut reference = pass.leading_whitespace(offset);
        let head = &self.buf.as_bytes()[span.start..offset.max(span.start).min(span.end)];
        if head.iter().all(u8::is_ascii_whitespace) {
            return Some(reference);
        }
        whitespace::create_reusing_indent(&mut reference, self.prefs.continuation_indent, 0, &self.prefs);
        Some(reference)
    }

    /// Relative indent of continuation lines, in units.
    pub fn continuation_indent_units(&self) -> i32 {
        self.prefs.continuation_indent
    }

    /// Reference position for `offset` and the indent to apply
    /// relative to it.
    pub fn find_reference_position(&self, offset: usize) -> Option<(usize, IndentResult)> {
        let mut pass = self.pass();
        let next = pass.peek_forward(offset);
        let reference = pass.find_reference(offset, next)?;
        Some((reference, pass.result()))
    }

    /// Like [`Self::find_reference_position`], with the token after
    /// `offset` supplied by the caller instead of peeked.
    pub fn find_reference_position_for_token(
        &self,
        offset: usize,
        next_token: TokenKind,
    ) -> Option<(usize, IndentResult)> {
        let mut pass = self.pass();
        let reference = pass.find_reference(offset, next_token)?;
        Some((reference, pass.result()))
    }

    /// Lowest-level entry: run one search in an explicit mode.
    pub fn find_reference_position_in_mode(
        &self,
        offset: usize,
        dangling_else: bool,
        mode: MatchMode,
    ) -> Option<(usize, IndentResult)> {
        let mut pass = self.pass();
        let reference = pass.run(offset, dangling_else, mode)?;
        Some((reference, pass.result()))
    }

    fn compute(&self, offset: usize, assume_opening_brace: bool) -> Option<String> {
        let mut pass = self.pass();
        let next = if assume_opening_brace {
            TokenKind::LBrace
        } else {
            pass.peek_forward(offset)
        };
        let reference = pass.find_reference(offset, next);

        // Deep alignment wins over relative indentation.
        if let Some(align) = pass.align {
            let span = self.buf.line_span_of_offset(align)?;
            return Some(whitespace::create_indent(
                self.buf,
                span.start,
                align,
                !self.prefs.tabs_only_for_leading_indents,
                &self.prefs,
            ));
        }

        let mut indent = pass.leading_whitespace(reference?);
        whitespace::create_reusing_indent(&mut indent, pass.indent, pass.extra_spaces, &self.prefs);
        Some(indent)
    }

    fn pass(&self) -> Pass<'_, 'a, P> {
        Pass {
            buf: self.buf,
            sc: self.scanner,
            prefs: &self.prefs,
            indent: 0,
            extra_spaces: 0,
            align: None,
            pos: 0,
            prev_pos: 0,
            tok: Token::eof(0),
            line: 0,
        }
    }
}

/// Snapshot of the scan state, restored by copying it back.
#[derive(Clone, Copy)]
struct Mark {
    pos: usize,
    prev_pos: usize,
    tok: Token,
    line: usize,
}

/// Statement-start classification while scanning a block body.
#[derive(Clone, Copy, PartialEq, Eq)]
enum MethodBody {
    Nothing,
    ReadParens,
    ReadIdent,
}

/// One reference-position computation: a backward token walk plus the
/// indentation it accumulates.
struct Pass<'p, 'a, P: PartitionOracle> {
    buf: &'a TextBuffer,
    sc: &'p HeuristicScanner<'a, P>,
    prefs: &'p IndentPrefs,
    /// Relative indent in units, possibly negative.
    indent: i32,
    /// Literal spaces on top of `indent`.
    extra_spaces: i32,
    /// Deep-alignment offset, if a special case was detected.
    align: Option<usize>,
    /// Start of the most recent token.
    pos: usize,
    /// Where the scan producing that token started.
    prev_pos: usize,
    tok: Token,
    /// Line of `pos`.
    line: usize,
}

impl<P: PartitionOracle> Pass<'_, '_, P> {
    // === State plumbing ===

    fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            prev_pos: self.prev_pos,
            tok: self.tok,
            line: self.line,
        }
    }

    fn restore(&mut self, mark: Mark) {
        self.pos = mark.pos;
        self.prev_pos = mark.prev_pos;
        self.tok = mark.tok;
        self.line = mark.line;
    }

    /// Reads the token before `self.pos` and moves onto it.
    fn next_token(&mut self) {
        self.next_token_from(self.pos);
    }

    fn next_token_from(&mut self, start: usize) {
        let tok = self.sc.previous_token(start, 0);
        self.prev_pos = start;
        self.pos = tok.start;
        self.line = self.buf.line_of_offset(tok.start).unwrap_or(0);
        self.tok = tok;
    }

    /// Token before the current position, without moving.
    fn peek_back(&self) -> TokenKind {
        self.sc.previous_token(self.pos, 0).kind
    }

    /// First token after `offset` on the same line.
    fn peek_forward(&self, offset: usize) -> TokenKind {
        if offset < self.buf.len() {
            if let Some(span) = self.buf.line_span_of_offset(offset) {
                return self.sc.next_token(offset, span.end.max(offset)).kind;
            }
        }
        TokenKind::Eof
    }

    /// Second token after `offset` on the same line.
    fn peek_second_forward(&self, offset: usize) -> TokenKind {
        if offset < self.buf.len() {
            if let Some(span) = self.buf.line_span_of_offset(offset) {
                let bound = span.end.max(offset);
                let first = self.sc.next_token(offset, bound);
                return self.sc.next_token(first.end, bound).kind;
            }
        }
        TokenKind::Eof
    }

    fn token_text(&self) -> &str {
        self.buf.slice(self.tok.start, self.tok.end).unwrap_or("")
    }

    fn ws_only(&self, start: usize, end: usize) -> bool {
        self.buf.as_bytes()[start.min(end)..end]
            .iter()
            .all(u8::is_ascii_whitespace)
    }

    fn result(&self) -> IndentResult {
        match self.align {
            Some(offset) => IndentResult::Align { offset },
            None => IndentResult::Relative {
                units: self.indent,
                extra_spaces: self.extra_spaces,
            },
        }
    }

    /// Leading whitespace of the line holding `offset`. A line with no
    /// code on it yields the empty string.
    fn leading_whitespace(&self, offset: usize) -> String {
        let Some(span) = self.buf.line_span_of_offset(offset) else {
            return String::new();
        };
        match self.sc.find_non_ws_forward_any_partition(span.start, span.end) {
            Some(non_ws) => self
                .buf
                .slice(span.start, non_ws)
                .map(str::to_owned)
                .unwrap_or_default(),
            None => String::new(),
        }
    }

    // === Reference search ===

    /// Adjusts for un-indentation tokens already typed after `offset`
    /// (closing braces, labels, a dangling `else`) and runs the search.
    fn find_reference(&mut self, offset: usize, next_token: TokenKind) -> Option<usize> {
        let mut dangling_else = false;
        let mut cancel_indent = false;
        let mut extra_indent = 0i32;
        let mut mode = MatchMode::Regular;

        // offset == len is legal: the caller may be assuming a token
        // (smart brace at end of buffer) and every read below is
        // backward or clamped
        if offset <= self.buf.len() {
            let line = self.buf.line_of_offset(offset).unwrap_or(0);
            let line_offset = self.buf.line_start(line).unwrap_or(0);
            let scan_from = offset.max(1).min(self.buf.len());
            let is_first_on_line = self.ws_only(line_offset, scan_from.max(line_offset));
            let prev_token = self.sc.previous_token(scan_from, 0).kind;
            let braceless_block_start = self.sc.is_braceless_block_start(scan_from, 0);

            match next_token {
                TokenKind::Else => dangling_else = true,

                TokenKind::Case | TokenKind::Default => {
                    if is_first_on_line {
                        mode = MatchMode::MatchCase;
                    }
                }

                TokenKind::Public | TokenKind::Protected | TokenKind::Private => {
                    if is_first_on_line && self.peek_second_forward(offset) != TokenKind::Ident {
                        mode = MatchMode::MatchAccessSpecifier;
                    }
                }

                // opening-brace-on-new-line styles
                TokenKind::LBrace => {
                    if braceless_block_start {
                        if !self.prefs.indent_braces_for_blocks {
                            extra_indent = -1;
                        }
                    } else if prev_token == TokenKind::Colon && !self.prefs.indent_braces_for_blocks
                    {
                        extra_indent = -1;
                    } else if matches!(prev_token, TokenKind::Equal | TokenKind::RBracket)
                        && !self.prefs.indent_braces_for_arrays
                    {
                        cancel_indent = true;
                    } else if matches!(prev_token, TokenKind::RParen | TokenKind::Const)
                        && self.prefs.indent_braces_for_methods
                    {
                        extra_indent = 1;
                    } else if prev_token == TokenKind::Ident {
                        if self.prefs.indent_braces_for_types {
                            extra_indent = 1;
                        }
                        let saved = self.mark();
                        self.pos = offset;
                        if self.match_type_declaration().is_some() {
                            mode = MatchMode::MatchTypeDeclaration;
                        }
                        self.restore(saved);
                    }
                }

                // closing braces get unindented
                TokenKind::RBrace => {
                    if is_first_on_line || prev_token != TokenKind::LBrace {
                        mode = MatchMode::MatchBrace;
                    }
                }

                TokenKind::RParen => {
                    if is_first_on_line {
                        mode = MatchMode::MatchParen;
                    }
                }

                _ => {}
            }
        }

        trace!(offset, next = ?next_token, ?mode, dangling_else, "reference search");
        let reference = self.run(offset, dangling_else, mode);
        if cancel_indent {
            self.indent = 0;
        } else if extra_indent > 0 {
            self.align = None;
            self.indent += extra_indent;
        } else {
            self.indent += extra_indent;
        }
        trace!(?reference, indent = self.indent, align = ?self.align, "reference found");
        reference
    }

    /// Core dispatch: scans backward from `offset` and classifies the
    /// previous token.
    fn run(&mut self, offset: usize, dangling_else: bool, mode: MatchMode) -> Option<usize> {
        self.indent = 0;
        self.extra_spaces = 0;
        self.align = None;
        self.pos = offset;
        self.prev_pos = offset;
        self.tok = Token::eof(offset);
        self.line = self.buf.line_of_offset(offset.min(self.buf.len())).unwrap_or(0);

        match mode {
            MatchMode::MatchBrace => {
                if self.skip_scope_for(TokenKind::LBrace, TokenKind::RBrace) {
                    // align with an opening brace on a line of its own
                    if let Some(line_start) = self.buf.line_start(self.line) {
                        if line_start <= self.pos && self.ws_only(line_start, self.pos) {
                            return Some(self.pos);
                        }
                    }
                    let pos = self.skip_to_statement_start(true, true);
                    self.indent = 0; // aligned with the reference line
                    return Some(pos);
                }
                // no matching brace: unindent one against the regular
                // reference
                let pos = self.run(offset, dangling_else, MatchMode::Regular);
                self.indent -= 1;
                return pos;
            }

            MatchMode::MatchParen => {
                if self.skip_scope_for(TokenKind::LParen, TokenKind::RParen) {
                    return Some(self.pos);
                }
                let pos = self.run(offset, dangling_else, MatchMode::Regular);
                self.indent -= 1;
                return pos;
            }

            MatchMode::MatchCase => return Some(self.match_case_alignment()),

            MatchMode::MatchAccessSpecifier => {
                return Some(self.match_access_specifier_alignment());
            }

            MatchMode::MatchTypeDeclaration => return self.match_type_declaration(),

            MatchMode::Regular => {}
        }

        if self.peek_forward(offset) == TokenKind::Colon {
            let saved = self.mark();
            if self.looks_like_type_inheritance_decl() {
                self.indent = self.prefs.continuation_indent;
                return Some(self.pos);
            }
            self.restore(saved);
        }

        self.next_token();
        // skip access specifier labels
        while self.tok.kind == TokenKind::Colon && self.is_access_specifier_label() {
            self.next_token();
        }

        let entry = self.mark();
        match self.tok.kind {
            TokenKind::Greater | TokenKind::RBrace => {
                // skip the block; on failure resume from the token
                let pos = self.pos;
                if !self.skip_scope() {
                    self.pos = pos;
                }
                Some(self.skip_to_statement_start(dangling_else, false))
            }

            // the 90% case: after the end of a previous statement
            TokenKind::Semicolon => Some(self.skip_to_statement_start(dangling_else, false)),

            TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => Some(
                self.handle_scope_introduction((offset + 1).min(self.buf.len()), true),
            ),

            TokenKind::Eof => None,

            TokenKind::Equal => {
                self.indent = self.prefs.assignment_indent;
                Some(self.pos)
            }

            TokenKind::Colon => {
                let pos = self.pos;
                let colon = self.mark();
                if self.looks_like_case_statement() {
                    self.indent = self.prefs.case_block_indent;
                    return Some(pos);
                }
                self.restore(colon);
                if self.looks_like_type_inheritance_decl() {
                    self.indent = self.prefs.continuation_indent;
                    return Some(pos);
                }
                self.restore(colon);
                if self.looks_like_constructor_initializer() {
                    self.indent = self.prefs.block_indent;
                    return Some(pos);
                }
                self.restore(colon);
                if self.is_conditional() {
                    self.pos = offset;
                    self.line = entry.line;
                    return self.skip_to_previous_list_item_or_list_start();
                }
                self.restore(colon);
                self.skip_to_previous_list_item_or_list_start()
            }

            TokenKind::Question => {
                if self.prefs.ternary_deep_align {
                    self.set_first_element_alignment(self.pos, offset + 1);
                } else {
                    self.indent = self.prefs.ternary_indent;
                }
                Some(self.pos)
            }

            // blockless introducers
            TokenKind::Do | TokenKind::While | TokenKind::Else => {
                self.indent = self.prefs.simple_indent;
                Some(self.pos)
            }

            TokenKind::Try => Some(self.skip_to_statement_start(dangling_else, false)),

            TokenKind::Return | TokenKind::Typedef | TokenKind::Using => {
                self.indent = self.prefs.continuation_indent;
                Some(self.pos)
            }

            TokenKind::Const => {
                self.next_token();
                if self.tok.kind != TokenKind::RParen {
                    return self.skip_to_previous_list_item_or_list_start();
                }
                // could be a const method declaration
                self.after_closing_paren(offset, entry, dangling_else)
            }

            TokenKind::RParen => self.after_closing_paren(offset, entry, dangling_else),

            // trailing method qualifiers
            TokenKind::Noexcept | TokenKind::Override => {
                Some(self.skip_to_statement_start(dangling_else, false))
            }

            // inside a list of some kind
            TokenKind::Comma => self.skip_to_previous_list_item_or_list_start(),

            // inside a continued expression
            _ => self.skip_to_previous_list_item_or_list_start(),
        }
    }

    /// The token before the request is a `)`: classify what the
    /// parenthesized group belongs to.
    fn after_closing_paren(
        &mut self,
        offset: usize,
        entry: Mark,
        dangling_else: bool,
    ) -> Option<usize> {
        if self.skip_scope_for(TokenKind::LParen, TokenKind::RParen) {
            let scope = self.pos;
            self.next_token();
            if matches!(
                self.tok.kind,
                TokenKind::If | TokenKind::While | TokenKind::For
            ) {
                self.indent = self.prefs.simple_indent;
                return Some(self.pos);
            }
            if self.tok.kind == TokenKind::Switch {
                return Some(self.pos);
            }
            self.pos = scope;
            // a bare `noexcept` here is noexcept-with-argument on a
            // method declaration
            if self.looks_like_method_decl() || self.tok.kind == TokenKind::Noexcept {
                return Some(self.skip_to_statement_start(dangling_else, false));
            }
            if self.tok.kind == TokenKind::Catch {
                return Some(self.skip_to_statement_start(dangling_else, false));
            }
            self.pos = scope;
            if self.looks_like_anonymous_type_decl() {
                return Some(self.skip_to_statement_start(dangling_else, false));
            }
        }
        self.pos = offset;
        self.line = entry.line;
        self.skip_to_previous_list_item_or_list_start()
    }

    /// Skips to the start of the statement that ends at the current
    /// position. With `is_in_block` the search also classifies the
    /// enclosing body (type, method, or plain block) for the indent.
    fn skip_to_statement_start(&mut self, dangling_else: bool, is_in_block: bool) -> usize {
        let mut may_be_method_body = MethodBody::Nothing;
        let mut is_type_body = false;
        let start_line = self.line;
        loop {
            let prev = self.tok.kind;
            self.next_token();

            if is_in_block {
                match self.tok.kind {
                    // exit on all block introducers
                    TokenKind::If
                    | TokenKind::Else
                    | TokenKind::Catch
                    | TokenKind::Do
                    | TokenKind::While
                    | TokenKind::For
                    | TokenKind::Try => {
                        self.indent += i32::from(self.prefs.indent_braces_for_blocks);
                        return self.pos;
                    }
                    TokenKind::Class | TokenKind::Struct | TokenKind::Union => {
                        is_type_body = true;
                    }
                    TokenKind::Switch => {
                        self.indent = self.prefs.case_indent;
                        return self.pos;
                    }
                    _ => {}
                }
            }

            // skip semicolons on the same line, or we never reach the
            // head of a `for`
            if self.tok.kind == TokenKind::Semicolon && self.line == start_line {
                continue;
            }

            match self.tok.kind {
                TokenKind::LParen => {
                    if self.peek_back() == TokenKind::For {
                        self.next_token();
                        self.indent = self.prefs.continuation_indent;
                        return self.pos;
                    }
                }

                TokenKind::LBrace | TokenKind::Semicolon | TokenKind::Eof => {
                    if is_in_block {
                        self.indent = self
                            .block_indent(may_be_method_body == MethodBody::ReadIdent, is_type_body);
                    }
                    return self.prev_pos;
                }

                TokenKind::Colon => {
                    match prev {
                        // don't stop at the colon of a class head
                        TokenKind::Private | TokenKind::Protected | TokenKind::Public => continue,
                        TokenKind::Virtual => {
                            if !self.peek_back().is_access_specifier() {
                                continue;
                            }
                        }
                        _ => {}
                    }
                    let pos = self.prev_pos;
                    if !self.is_conditional() {
                        return pos;
                    }
                }

                // end of an array initializer or of a previous block
                TokenKind::RBrace => {
                    let pos = self.prev_pos;
                    if self.skip_scope() {
                        if self.looks_like_array_initializer_intro() {
                            continue;
                        }
                        if prev == TokenKind::Semicolon {
                            // end of a type definition
                            continue;
                        }
                    }
                    if is_in_block {
                        self.indent = self
                            .block_indent(may_be_method_body == MethodBody::ReadIdent, is_type_body);
                    }
                    return pos;
                }

                TokenKind::RParen => {
                    if is_in_block {
                        may_be_method_body = MethodBody::ReadParens;
                    }
                    let pos = self.prev_pos;
                    if !self.skip_scope() {
                        return pos;
                    }
                }

                TokenKind::RBracket => {
                    let pos = self.prev_pos;
                    if !self.skip_scope() {
                        return pos;
                    }
                }

                // stop at an `if` when a dangling else needs it
                TokenKind::If => {
                    if dangling_else {
                        return self.pos;
                    }
                }

                TokenKind::Else => {
                    // skip behind the matching if
                    let pos = self.pos;
                    if !self.skip_next_if() {
                        return pos;
                    }
                }

                TokenKind::Do => return self.pos,

                TokenKind::While => {
                    // either a while loop or the end of do..while
                    let pos = self.pos;
                    if !self.has_matching_do() {
                        self.pos = pos;
                    }
                }

                TokenKind::Ident => {
                    if may_be_method_body == MethodBody::ReadParens {
                        may_be_method_body = MethodBody::ReadIdent;
                    }
                }

                _ => {}
            }
        }
    }

    fn block_indent(&self, is_method_body: bool, is_type_body: bool) -> i32 {
        if is_type_body {
            self.prefs.type_indent + self.prefs.access_specifier_indent
        } else if is_method_body {
            self.prefs.method_body_indent + i32::from(self.prefs.indent_braces_for_methods)
        } else {
            self.indent
        }
    }

    /// Reference for a `case`/`default` label: an earlier label or the
    /// switch statement itself.
    fn match_case_alignment(&mut self) -> usize {
        loop {
            self.next_token();
            match self.tok.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::Eof => return self.pos,

                TokenKind::Switch => {
                    self.indent = self.prefs.case_indent;
                    return self.pos;
                }

                TokenKind::Case | TokenKind::Default => {
                    // align with the previous label
                    self.indent = 0;
                    return self.pos;
                }

                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    self.skip_scope();
                }

                _ => {}
            }
        }
    }

    /// Reference for an access specifier label: an earlier label or
    /// the class body brace.
    fn match_access_specifier_alignment(&mut self) -> usize {
        loop {
            self.next_token();
            match self.tok.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::Eof => return self.pos,

                TokenKind::LBrace => {
                    let pos = self.pos;
                    let type_decl = self.match_type_declaration();
                    self.indent = self.prefs.access_specifier_indent;
                    self.extra_spaces = self.prefs.access_specifier_extra_spaces;
                    return type_decl.unwrap_or(pos);
                }

                TokenKind::Public | TokenKind::Protected | TokenKind::Private => {
                    self.indent = 0;
                    return self.pos;
                }

                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    self.skip_scope();
                }

                _ => {}
            }
        }
    }

    /// Scans backward over identifiers, commas, colons and access
    /// specifiers to the `class`/`struct`/`union` head of a type
    /// declaration, if this is one.
    fn match_type_declaration(&mut self) -> Option<usize> {
        loop {
            self.next_token();
            match self.tok.kind {
                TokenKind::Ident
                | TokenKind::Comma
                | TokenKind::Colon
                | TokenKind::Public
                | TokenKind::Protected
                | TokenKind::Private => {}

                TokenKind::Class | TokenKind::Struct | TokenKind::Union => {
                    // not a parameter list: only `;` or EOF may precede
                    let pos = self.pos;
                    self.next_token();
                    if matches!(self.tok.kind, TokenKind::Semicolon | TokenKind::Eof) {
                        return Some(pos);
                    }
                    return None;
                }

                _ => return None,
            }
        }
    }

    /// Reference for a list element: a previous item that owns its
    /// line, or the list opener.
    fn skip_to_previous_list_item_or_list_start(&mut self) -> Option<usize> {
        let start_line = self.line;
        let start_position = self.pos;
        let mut lines_skipped_inside_scopes = 0usize;
        let mut continuation_candidate = matches!(
            self.tok.kind,
            TokenKind::Equal | TokenKind::ShiftLeft | TokenKind::RParen
        );
        loop {
            let previous = self.tok.kind;
            self.next_token();

            // a list item with its own indentation: adapt to it
            if self.line + lines_skipped_inside_scopes < start_line {
                let bound = self.buf.len().min(start_position + 1);
                let statement_boundary = matches!(
                    self.tok.kind,
                    TokenKind::Semicolon | TokenKind::RBrace
                ) || (self.tok.kind == TokenKind::LBrace
                    && !self.looks_like_array_initializer_intro()
                    && !self.looks_like_enum_declaration());
                if statement_boundary && continuation_candidate {
                    self.indent = self.prefs.continuation_indent;
                } else if let Some(line_offset) = self.buf.line_start(start_line) {
                    self.align = self.sc.find_non_ws_forward_any_partition(line_offset, bound);
                    // a reference line starting with a colon aligns
                    // past the colon
                    if let Some(align) = self.align {
                        if self.peek_forward(align) == TokenKind::Colon {
                            self.align = self.sc.find_non_ws_forward_any_partition(align + 1, bound);
                        }
                    }
                }
                return Some(start_position);
            }

            let line = self.line;
            match self.tok.kind {
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if self.tok.kind == TokenKind::RParen {
                        continuation_candidate = true;
                    }
                    self.skip_scope();
                    lines_skipped_inside_scopes = line.saturating_sub(self.line);
                }

                TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => {
                    return Some(self.handle_scope_introduction(
                        (start_position + 1).min(self.buf.len()),
                        false,
                    ));
                }

                TokenKind::Semicolon => return Some(self.pos),

                TokenKind::Question => {
                    if self.prefs.ternary_deep_align {
                        self.set_first_element_alignment(self.pos.saturating_sub(1), self.pos + 1);
                    } else {
                        self.indent = self.prefs.ternary_indent;
                    }
                    return Some(self.pos);
                }

                TokenKind::Equal | TokenKind::ShiftLeft => continuation_candidate = true,

                TokenKind::Return | TokenKind::Using => {
                    self.indent = self.prefs.continuation_indent;
                    return Some(self.pos);
                }

                TokenKind::Typedef => {
                    if !matches!(
                        previous,
                        TokenKind::Struct | TokenKind::Union | TokenKind::Class | TokenKind::Enum
                    ) {
                        self.indent = self.prefs.continuation_indent;
                    }
                    return Some(self.pos);
                }

                // a constructor initializer list with its head on the
                // same line: align under the first initializer
                TokenKind::Colon => {
                    let saved = self.mark();
                    let colon = self.tok;
                    if self.looks_like_constructor_initializer() {
                        let bound = self.buf.len().min(start_position + 1);
                        if let Some(first) =
                            self.sc.find_non_ws_forward_any_partition(colon.end, bound)
                        {
                            self.align = Some(first);
                            return Some(start_position);
                        }
                    }
                    self.restore(saved);
                }

                TokenKind::Eof => {
                    if continuation_candidate {
                        self.indent = self.prefs.continuation_indent;
                    }
                    return Some(0);
                }

                _ => {}
            }
        }
    }

    /// The current token opens a scope: pick deep alignment or a fixed
    /// indent depending on what the scope is.
    fn handle_scope_introduction(&mut self, bound: usize, first_token: bool) -> usize {
        let pos = self.pos;

        match self.tok.kind {
            TokenKind::LParen => {
                let saved = self.mark();
                if self.looks_like_method_decl() {
                    let deep = if first_token {
                        self.prefs.method_decl_first_parameter_deep_indent
                    } else {
                        self.prefs.method_decl_deep_indent
                    };
                    if deep {
                        return self.set_first_element_alignment(pos, bound);
                    }
                    self.indent = self.prefs.method_decl_indent;
                    return pos;
                }
                self.restore(saved);
                if self.looks_like_method_call() {
                    let deep = if first_token {
                        self.prefs.method_call_first_parameter_deep_indent
                    } else {
                        self.prefs.method_call_deep_indent
                    };
                    if deep {
                        return self.set_first_element_alignment(pos, bound);
                    }
                    self.indent = self.prefs.method_call_indent;
                    return pos;
                }
                if self.prefs.parenthesis_deep_indent {
                    return self.set_first_element_alignment(pos, bound);
                }
                self.indent = self.prefs.parenthesis_indent;
                pos
            }

            TokenKind::LBrace => {
                let saved = self.mark();
                let array_intro = self.looks_like_array_initializer_intro();
                if array_intro {
                    if self.prefs.array_deep_indent {
                        return self.set_first_element_alignment(pos, bound);
                    }
                    self.indent = self.prefs.array_indent;
                    return pos;
                }
                if self.is_linkage_spec() {
                    self.indent = self.prefs.linkage_body_indent;
                } else if self.is_namespace() {
                    self.indent = self.prefs.namespace_body_indent;
                } else if self.looks_like_enum_declaration() {
                    self.indent = self.prefs.type_indent;
                } else if self.match_type_declaration().is_some() {
                    self.indent = self.prefs.access_specifier_indent + self.prefs.type_indent;
                } else {
                    self.indent = self.prefs.block_indent;
                }

                // opening braces often sit on differently indented
                // lines than the statement they belong to
                self.restore(saved);
                self.skip_to_statement_start(true, true)
            }

            TokenKind::LBracket => {
                if self.prefs.array_dimensions_deep_indent {
                    return self.set_first_element_alignment(pos, bound);
                }
                self.indent = self.prefs.bracket_indent;
                pos
            }

            // callers guarantee a scope introducer
            _ => pos,
        }
    }

    /// Sets the deep-alignment offset to the first token after the
    /// scope introducer, or the column right after it when the scope
    /// introducer ends its line.
    fn set_first_element_alignment(&mut self, scope_introducer: usize, bound: usize) -> usize {
        let first_possible = scope_introducer + 1;
        let align = match self
            .sc
            .find_non_ws_forward_any_partition(first_possible, bound.min(self.buf.len()))
        {
            Some(found)
                if self
                    .buf
                    .line_span_of_offset(scope_introducer)
                    .is_some_and(|span| found <= span.end) =>
            {
                found
            }
            _ => first_possible,
        };
        self.align = Some(align);
        align
    }

    // === Scope skipping ===

    /// Skips the scope closed by the current token, leaving the
    /// position at the opener.
    fn skip_scope(&mut self) -> bool {
        match self.tok.kind {
            TokenKind::RParen => self.skip_scope_for(TokenKind::LParen, TokenKind::RParen),
            TokenKind::RBracket => self.skip_scope_for(TokenKind::LBracket, TokenKind::RBracket),
            TokenKind::RBrace => self.skip_scope_for(TokenKind::LBrace, TokenKind::RBrace),
            TokenKind::Greater => {
                if !self.prefs.has_templates {
                    return false;
                }
                // `<...>` is ambiguous; only try when the next token
                // backward makes a template plausible
                let saved = self.mark();
                self.next_token();
                if matches!(
                    self.tok.kind,
                    TokenKind::Ident | TokenKind::Question | TokenKind::Greater
                ) {
                    self.restore(saved);
                    if self.skip_scope_for(TokenKind::Less, TokenKind::Greater) {
                        return true;
                    }
                }
                self.restore(saved);
                false
            }
            _ => false,
        }
    }

    fn skip_scope_for(&mut self, open: TokenKind, close: TokenKind) -> bool {
        let mut depth = 1u32;
        loop {
            self.next_token();
            if self.tok.kind == close {
                depth += 1;
            } else if self.tok.kind == open {
                depth -= 1;
                if depth == 0 {
                    return true;
                }
            } else if self.tok.kind == TokenKind::Eof {
                return false;
            }
        }
    }

    /// Skips backward over the `if` matching the current `else`.
    fn skip_next_if(&mut self) -> bool {
        loop {
            self.next_token();
            match self.tok.kind {
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    self.skip_scope();
                }
                TokenKind::If => return true,
                TokenKind::Else => {
                    // nested else-if
                    self.skip_next_if();
                }
                TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket | TokenKind::Eof => {
                    return false;
                }
                _ => {}
            }
        }
    }

    /// `while (cond);` parsed backward is ambiguous between a loop and
    /// a `do..while` terminator; check for the `do`.
    fn has_matching_do(&mut self) -> bool {
        self.next_token();
        match self.tok.kind {
            TokenKind::RBrace => {
                self.skip_scope();
                self.skip_to_statement_start(false, false);
                self.tok.kind == TokenKind::Do
            }
            TokenKind::Semicolon => {
                self.skip_to_statement_start(false, false);
                self.tok.kind == TokenKind::Do
            }
            _ => false,
        }
    }

    // === Probes ===

    /// Whether the colon at the current position belongs to a ternary
    /// conditional.
    fn is_conditional(&mut self) -> bool {
        loop {
            let previous = self.tok.kind;
            self.next_token();
            match self.tok.kind {
                // case labels: possibly qualified identifiers, numbers
                TokenKind::Ident => {
                    if previous == TokenKind::Ident {
                        return false;
                    }
                }
                TokenKind::DoubleColon
                | TokenKind::Other
                | TokenKind::Minus
                | TokenKind::Plus => {}

                TokenKind::Question => return true,

                TokenKind::Semicolon
                | TokenKind::LBrace
                | TokenKind::RBrace
                | TokenKind::Case
                | TokenKind::Default
                | TokenKind::Public
                | TokenKind::Protected
                | TokenKind::Private
                | TokenKind::Class
                | TokenKind::Struct
                | TokenKind::Union => return false,

                _ => return true,
            }
        }
    }

    /// Whether the colon at the current position ends a case label.
    fn looks_like_case_statement(&mut self) -> bool {
        self.next_token();
        match self.tok.kind {
            // `case 'a':` scans the literal as one token
            TokenKind::Case | TokenKind::Default => true,
            TokenKind::Ident => {
                self.next_token();
                while self.skip_qualifiers() {
                    self.next_token();
                }
                while matches!(self.tok.kind, TokenKind::Minus | TokenKind::Plus) {
                    self.next_token();
                }
                self.tok.kind == TokenKind::Case
            }
            TokenKind::Other => {
                self.next_token();
                self.tok.kind == TokenKind::Case
            }
            _ => false,
        }
    }

    /// Whether the colon at the current position starts a base clause.
    fn looks_like_type_inheritance_decl(&mut self) -> bool {
        self.next_token();
        if self.tok.kind == TokenKind::Ident {
            self.next_token();
            while self.skip_qualifiers() {
                self.next_token();
            }
            return self.tok.kind.is_composite_type_keyword();
        }
        false
    }

    /// Whether the colon at the current position starts a constructor
    /// initializer list: `A::A() :`, `A() :` after a class body line,
    /// or `public: A() :`.
    fn looks_like_constructor_initializer(&mut self) -> bool {
        self.next_token();
        if self.tok.kind != TokenKind::RParen {
            return false;
        }
        if !self.skip_scope() {
            return false;
        }
        self.next_token();
        if self.tok.kind == TokenKind::Throw {
            self.next_token();
            if self.tok.kind != TokenKind::RParen {
                return false;
            }
            if !self.skip_scope() {
                return false;
            }
            self.next_token();
        }
        if self.tok.kind != TokenKind::Ident {
            return false;
        }
        self.next_token();
        match self.tok.kind {
            TokenKind::DoubleColon => true, // A::A() :
            TokenKind::Colon => {
                // public: A() :
                self.next_token();
                self.tok.kind.is_access_specifier()
            }
            TokenKind::LBrace | TokenKind::RBrace | TokenKind::Semicolon | TokenKind::Eof => true,
            _ => false,
        }
    }

    /// Whether the brace at the current position opens an enum body.
    fn looks_like_enum_declaration(&mut self) -> bool {
        let saved = self.mark();
        self.next_token();
        if self.tok.kind == TokenKind::Ident {
            self.next_token();
            while self.skip_qualifiers() {
                self.next_token();
            }
        }
        let found = self.tok.kind == TokenKind::Enum;
        self.restore(saved);
        found
    }

    /// Whether the colon at the current position ends an access
    /// specifier label. On success the position moves onto the
    /// specifier keyword.
    fn is_access_specifier_label(&mut self) -> bool {
        let saved = self.mark();
        self.next_token();
        if self.tok.kind.is_access_specifier() {
            return true;
        }
        self.restore(saved);
        false
    }

    /// Whether the tokens before the brace look like the start of an
    /// array initializer: `=`, `[]`, a nested `{`, or a comma.
    fn looks_like_array_initializer_intro(&mut self) -> bool {
        let saved = self.mark();
        self.next_token();
        match self.tok.kind {
            TokenKind::Equal => true,
            TokenKind::RBracket => self.skip_brackets(),
            TokenKind::LBrace => {
                if self.looks_like_array_initializer_intro() {
                    self.restore(saved);
                    return true;
                }
                false
            }
            TokenKind::Comma => {
                self.restore(saved);
                true
            }
            _ => {
                self.restore(saved);
                false
            }
        }
    }

    /// Whether the brace at the current position opens a namespace
    /// body.
    fn is_namespace(&mut self) -> bool {
        let saved = self.mark();
        self.next_token();
        if self.tok.kind == TokenKind::Namespace {
            self.restore(saved);
            return true; // anonymous namespace
        }
        if self.tok.kind == TokenKind::Ident {
            self.next_token();
            if self.tok.kind == TokenKind::Namespace {
                self.restore(saved);
                return true;
            }
        }
        self.restore(saved);
        false
    }

    /// Whether the brace at the current position opens an
    /// `extern "C"` linkage body.
    fn is_linkage_spec(&mut self) -> bool {
        let saved = self.mark();
        self.next_token();
        let found = self.tok.kind == TokenKind::Extern;
        self.restore(saved);
        found
    }

    /// Whether the tokens before the current position look like a
    /// method declaration header (name plus optional return type,
    /// destructor tilde, operator spelling, or constructor initializer
    /// tail).
    fn looks_like_method_decl(&mut self) -> bool {
        self.next_token();
        match self.tok.kind {
            TokenKind::Ident => {
                let name = self.mark();
                self.next_token();
                if self.tok.kind == TokenKind::Tilde {
                    return true; // destructor
                }
                while self.skip_qualifiers() {
                    self.next_token();
                }
                // array valued return types
                while self.skip_brackets() {
                    self.next_token();
                }
                while self.skip_pointer_operators() {
                    self.next_token();
                }
                // template type specification of the return type
                if self.tok.kind == TokenKind::Greater {
                    if !self.skip_scope() {
                        return false;
                    }
                    self.next_token();
                }
                match self.tok.kind {
                    TokenKind::Ident => true,
                    // constructor definitions reach the statement edge
                    TokenKind::Eof | TokenKind::Semicolon | TokenKind::RBrace => {
                        self.restore(name);
                        true
                    }
                    TokenKind::LBrace => {
                        if self
                            .sc
                            .looks_like_composite_type_definition_backward(self.pos, 0)
                        {
                            self.restore(name);
                            return true;
                        }
                        false
                    }
                    TokenKind::Comma => {
                        self.next_token();
                        if self.tok.kind == TokenKind::RParen && self.skip_scope() {
                            // field initializer
                            return self.looks_like_method_decl();
                        }
                        false
                    }
                    TokenKind::Colon => {
                        self.next_token();
                        match self.tok.kind {
                            TokenKind::Public | TokenKind::Protected | TokenKind::Private => {
                                self.restore(name);
                                true
                            }
                            TokenKind::RParen => {
                                // constructor initializer
                                if !self.skip_scope() {
                                    return false;
                                }
                                let after = self.mark();
                                self.next_token();
                                if self.tok.kind == TokenKind::Throw {
                                    self.next_token();
                                    if self.tok.kind != TokenKind::RParen || !self.skip_scope() {
                                        return false;
                                    }
                                } else {
                                    self.restore(after);
                                }
                                self.looks_like_method_decl()
                            }
                            _ => false,
                        }
                    }
                    _ => false,
                }
            }

            // operator spellings
            TokenKind::Arrow
            | TokenKind::Comma
            | TokenKind::Equal
            | TokenKind::Greater
            | TokenKind::Less
            | TokenKind::Minus
            | TokenKind::Plus
            | TokenKind::ShiftRight
            | TokenKind::ShiftLeft
            | TokenKind::Delete
            | TokenKind::New => {
                self.next_token();
                self.tok.kind == TokenKind::Operator
            }
            TokenKind::RParen => {
                self.next_token();
                if self.tok.kind != TokenKind::LParen {
                    return false;
                }
                self.next_token();
                self.tok.kind == TokenKind::Operator
            }
            TokenKind::RBracket => {
                self.next_token();
                if self.tok.kind != TokenKind::LBracket {
                    return false;
                }
                self.next_token();
                if matches!(self.tok.kind, TokenKind::New | TokenKind::Delete) {
                    self.next_token();
                }
                self.tok.kind == TokenKind::Operator
            }
            TokenKind::Other => {
                if self.tok.len() == 1 {
                    self.next_token();
                    if self.tok.kind == TokenKind::Operator {
                        return true;
                    }
                }
                if self.tok.len() == 1 {
                    self.next_token();
                    if self.tok.kind == TokenKind::Operator {
                        return true;
                    }
                }
                false
            }
            _ => false,
        }
    }

    /// Whether the tokens before the current position look like an
    /// anonymous type instantiation: a possibly qualified type name
    /// after `new`.
    fn looks_like_anonymous_type_decl(&mut self) -> bool {
        self.next_token();
        if self.tok.kind == TokenKind::Ident {
            self.next_token();
            while self.tok.kind == TokenKind::Other {
                self.next_token();
                if self.tok.kind != TokenKind::Ident {
                    return false;
                }
                self.next_token();
            }
            return self.tok.kind == TokenKind::New;
        }
        false
    }

    /// Whether the tokens before the current position look like a call
    /// rather than a keyword taking parentheses.
    fn looks_like_method_call(&mut self) -> bool {
        self.next_token();
        if self.tok.kind == TokenKind::Greater {
            if !self.skip_scope() {
                return false;
            }
            self.next_token();
        }
        self.tok.kind == TokenKind::Ident
    }

    /// `*`, `&` or `const` before a declarator name; the position
    /// stays at the operator.
    fn skip_pointer_operators(&mut self) -> bool {
        if self.tok.kind == TokenKind::Other {
            let text = self.token_text().trim();
            if text.len() == 1 && text.starts_with('*') || text.starts_with('&') {
                return true;
            }
        } else if self.tok.kind == TokenKind::Const {
            return true;
        }
        false
    }

    /// An empty `[]` pair; leaves the position at the `[`.
    fn skip_brackets(&mut self) -> bool {
        if self.tok.kind == TokenKind::RBracket {
            self.next_token();
            if self.tok.kind == TokenKind::LBracket {
                return true;
            }
        }
        false
    }

    /// A `::name` qualifier; leaves the position at the name.
    fn skip_qualifiers(&mut self) -> bool {
        if self.tok.kind == TokenKind::DoubleColon {
            self.next_token();
            if self.tok.kind == TokenKind::Ident {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cin_text::PartitionMap;
    use pretty_assertions::assert_eq;

    fn reference(text: &str, offset: usize) -> Option<(usize, IndentResult)> {
        let buf = TextBuffer::new(text);
        let map = PartitionMap::scan(text);
        let sc = HeuristicScanner::new(&buf, &map);
        Indenter::new(&buf, &sc, IndentPrefs::default()).find_reference_position(offset)
    }

    // === Reference Positions ===

    #[test]
    fn statement_after_semicolon_references_previous_statement() {
        let text = "a();\nb();\n";
        let (r, result) = reference(text, text.len()).unwrap();
        assert_eq!(r, 5); // start of b();
        assert_eq!(
            result,
            IndentResult::Relative {
                units: 0,
                extra_spaces: 0
            }
        );
    }

    #[test]
    fn open_paren_yields_continuation() {
        let text = "foo(\n";
        let (r, result) = reference(text, text.len()).unwrap();
        assert_eq!(r, 3);
        assert_eq!(
            result,
            IndentResult::Relative {
                units: 2,
                extra_spaces: 0
            }
        );
    }

    #[test]
    fn if_header_yields_simple_indent() {
        let text = "if (a)\n";
        let (r, result) = reference(text, text.len()).unwrap();
        assert_eq!(r, 0);
        assert_eq!(
            result,
            IndentResult::Relative {
                units: 1,
                extra_spaces: 0
            }
        );
    }

    #[test]
    fn empty_document_has_no_reference() {
        assert_eq!(reference("", 0), None);
    }

    #[test]
    fn unmatched_closing_brace_unindents_by_one() {
        let text = "a();\n}";
        let (_, result) = reference(text, 5).unwrap();
        assert_eq!(
            result,
            IndentResult::Relative {
                units: -1,
                extra_spaces: 0
            }
        );
    }

    #[test]
    fn array_initializer_deep_aligns() {
        let text = "int a[] = { 1,\n";
        let (_, result) = reference(text, text.len()).unwrap();
        assert_eq!(result, IndentResult::Align { offset: 12 });
    }

    #[test]
    fn assignment_yields_continuation() {
        let text = "int x =\n";
        let (r, result) = reference(text, text.len()).unwrap();
        assert_eq!(r, 6);
        assert_eq!(
            result,
            IndentResult::Relative {
                units: 2,
                extra_spaces: 0
            }
        );
    }

    // === Colon Disambiguation ===

    #[test]
    fn case_label_colon_indents_case_block() {
        let text = "switch (x) {\ncase 1:\n";
        let (r, result) = reference(text, text.len()).unwrap();
        assert_eq!(r, 19); // the colon
        assert_eq!(
            result,
            IndentResult::Relative {
                units: 1,
                extra_spaces: 0
            }
        );
    }

    #[test]
    fn base_clause_colon_indents_continuation() {
        let text = "class A :\n";
        let (_, result) = reference(text, text.len()).unwrap();
        assert_eq!(
            result,
            IndentResult::Relative {
                units: 2,
                extra_spaces: 0
            }
        );
    }

    #[test]
    fn constructor_colon_indents_block() {
        let text = "A::A() :\n";
        let (_, result) = reference(text, text.len()).unwrap();
        assert_eq!(
            result,
            IndentResult::Relative {
                units: 1,
                extra_spaces: 0
            }
        );
    }

    #[test]
    fn ternary_colon_continues_expression() {
        let text = "x = a ? b :\n";
        let (_, result) = reference(text, text.len()).unwrap();
        assert_eq!(
            result,
            IndentResult::Relative {
                units: 2,
                extra_spaces: 0
            }
        );
    }

    // === Probes ===

    fn pass_at<'p, 'a, T: PartitionOracle>(
        indenter: &'p Indenter<'p, 'a, T>,
        pos: usize,
    ) -> Pass<'p, 'a, T> {
        let mut pass = indenter.pass();
        pass.pos = pos;
        pass.prev_pos = pos;
        pass
    }

    #[test]
    fn constructor_initializer_probe_accepts_qualified_names() {
        for text in ["A::A() :", "A() {", "x; A() :"] {
            let buf = TextBuffer::new(text);
            let map = PartitionMap::scan(text);
            let sc = HeuristicScanner::new(&buf, &map);
            let indenter = Indenter::new(&buf, &sc, IndentPrefs::default());
            let mut pass = pass_at(&indenter, text.len() - 1);
            assert!(pass.looks_like_constructor_initializer(), "{text}");
        }
        let text = "b ? a :";
        let buf = TextBuffer::new(text);
        let map = PartitionMap::scan(text);
        let sc = HeuristicScanner::new(&buf, &map);
        let indenter = Indenter::new(&buf, &sc, IndentPrefs::default());
        let mut pass = pass_at(&indenter, text.len() - 1);
        assert!(!pass.looks_like_constructor_initializer());
    }

    #[test]
    fn namespace_probe() {
        let text = "namespace foo {";
        let buf = TextBuffer::new(text);
        let map = PartitionMap::scan(text);
        let sc = HeuristicScanner::new(&buf, &map);
        let indenter = Indenter::new(&buf, &sc, IndentPrefs::default());
        let mut pass = pass_at(&indenter, text.len() - 1);
        assert!(pass.is_namespace());
    }
}
