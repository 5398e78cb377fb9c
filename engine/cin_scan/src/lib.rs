//! Heuristic token scanning for C/C++ source.
//!
//! This crate reads tokens out of a [`cin_text::TextBuffer`] in either
//! direction without building a syntax tree. Scans are local: a caller
//! names a start position and a bound, and gets back the first token
//! (or character position) in that window. Comments, string literals
//! and preprocessor lines are skipped as opaque regions using the
//! buffer's partitioning.
//!
//! The two entry layers are:
//!
//! - [`HeuristicScanner`]: stateless scan operations (tokens, peer
//!   brackets, non-whitespace searches) plus backward structural
//!   probes (`looks_like_*`, `is_braceless_block_start`).
//! - [`TokenCursor`] / [`TokenStream`]: thin position-carrying
//!   wrappers for walking token by token.
//!
//! Results are best-effort by construction. The scanner answers from
//! a bounded window of text and trades precision for speed, which is
//! the right trade for editor features that run on every keystroke.

mod cursor;
mod heuristics;
mod keywords;
mod scanner;
mod token;

pub use cursor::{TokenCursor, TokenStream};
pub use scanner::{HeuristicScanner, ANGLE_WINDOW};
pub use token::{Token, TokenKind};
