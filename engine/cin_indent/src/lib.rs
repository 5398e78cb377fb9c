//! Heuristic indentation for C/C++ source.
//!
//! Given a buffer and an offset, the [`Indenter`] proposes the
//! indentation string for the line at that offset. It works from the
//! token scans in [`cin_scan`] rather than a syntax tree, so it stays
//! fast and tolerant of the half-written code an editor holds while
//! the user types.
//!
//! The computation has two halves:
//!
//! - a backward search for a *reference position*, the statement or
//!   scope introducer the new line hangs off, together with a relative
//!   indent in units or an absolute alignment column;
//! - whitespace synthesis that turns the reference line's existing
//!   indentation plus that delta into a concrete string, honoring the
//!   tab/space profile in [`IndentPrefs`].
//!
//! All knobs live in [`IndentPrefs`]; [`prefs::options`] lists the
//! string keys accepted by [`IndentPrefs::from_options`].

mod indenter;
mod prefs;
mod whitespace;

pub use indenter::{IndentResult, Indenter, MatchMode};
pub use prefs::{options, IndentPrefs, TabChar};
pub use whitespace::{create_reusing_indent, visual_length};
