//! Indentation string synthesis and measurement.
//!
//! Indentation is measured visually: a tab advances to the next
//! multiple of the tab size, a space counts one column. Synthesis
//! reuses the reference line's whitespace up to the last full tab stop
//! and fills the remainder per the tabs/spaces preference, so mixed
//! files keep their existing texture.

use cin_text::TextBuffer;

use crate::prefs::{IndentPrefs, TabChar};

/// Visual width of an indentation string. Characters other than tab
/// and space contribute nothing.
pub fn visual_length(indent: &str, tab_size: usize) -> usize {
    let mut length = 0;
    for ch in indent.chars() {
        match ch {
            '\t' => {
                if tab_size > 0 {
                    length += tab_size - length % tab_size;
                }
            }
            ' ' => length += 1,
            _ => {}
        }
    }
    length
}

/// Truncates `reference` to at most `indent_length` visual columns.
fn strip_exceeding(reference: &mut String, indent_length: usize, tab_size: usize) {
    let mut measured = 0usize;
    let mut end = 0usize;
    let mut last = 0usize;
    for (i, ch) in reference.char_indices() {
        if measured >= indent_length {
            break;
        }
        last = i;
        match ch {
            '\t' => {
                if tab_size > 0 {
                    measured += tab_size - measured % tab_size;
                }
            }
            ' ' => measured += 1,
            _ => {}
        }
        end = i + ch.len_utf8();
    }
    let cut = if measured > indent_length { last } else { end };
    reference.truncate(cut);
}

/// Builds an indentation string covering the buffer range
/// `[start, end)`: tabs are copied, every other character becomes a
/// space. With `convert_space_runs` set (and a tabs preference), each
/// full run of `tab_size` spaces collapses into a tab.
pub(crate) fn create_indent(
    buf: &TextBuffer,
    start: usize,
    end: usize,
    convert_space_runs: bool,
    prefs: &IndentPrefs,
) -> String {
    let convert_tabs = prefs.use_tabs && convert_space_runs;
    let mut out = String::new();
    let mut spaces = 0usize;
    if let Ok(text) = buf.slice(start, end) {
        for ch in text.chars() {
            if ch == '\t' {
                out.push('\t');
                spaces = 0;
            } else if convert_tabs {
                spaces += 1;
                if spaces == prefs.tab_size {
                    out.push('\t');
                    spaces = 0;
                }
            } else {
                out.push(' ');
            }
        }
    }
    for _ in 0..spaces {
        out.push(' ');
    }
    out
}

/// Extends (or shrinks) `buffer` by `additional` indent units plus
/// `extra_spaces` columns, reusing the existing whitespace up to the
/// last full tab stop of the target width.
pub fn create_reusing_indent(
    buffer: &mut String,
    additional: i32,
    extra_spaces: i32,
    prefs: &IndentPrefs,
) {
    let ref_length = visual_length(buffer, prefs.tab_size);
    let add_length = to_i32(prefs.indent_size) * additional + extra_spaces;
    let total_length = to_usize(to_i32(ref_length) + add_length);

    let min_length = total_length.min(ref_length);
    let tab_size = prefs.tab_size;
    let max_copy = if tab_size > 0 {
        min_length - min_length % tab_size
    } else {
        min_length
    };
    strip_exceeding(buffer, max_copy, tab_size);

    let missing = total_length - max_copy;
    let (tabs, spaces) = if prefs.tab_char == TabChar::Space || tab_size == 0 {
        (0, missing)
    } else {
        (missing / tab_size, missing % tab_size)
    };
    for _ in 0..tabs {
        buffer.push('\t');
    }
    for _ in 0..spaces {
        buffer.push(' ');
    }
}

fn to_i32(v: usize) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

fn to_usize(v: i32) -> usize {
    usize::try_from(v).unwrap_or(0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn tab_prefs() -> IndentPrefs {
        IndentPrefs::default()
    }

    fn space_prefs() -> IndentPrefs {
        IndentPrefs {
            use_tabs: false,
            tab_char: TabChar::Space,
            ..IndentPrefs::default()
        }
    }

    // === Measurement ===

    #[test]
    fn visual_length_counts_tab_stops() {
        assert_eq!(visual_length("", 4), 0);
        assert_eq!(visual_length("    ", 4), 4);
        assert_eq!(visual_length("\t", 4), 4);
        assert_eq!(visual_length(" \t", 4), 4);
        assert_eq!(visual_length("   \t ", 4), 5);
        assert_eq!(visual_length("\t\t  ", 4), 10);
    }

    #[test]
    fn visual_length_with_zero_tab_size() {
        assert_eq!(visual_length("\t\t  ", 0), 2);
    }

    // === Synthesis ===

    #[test]
    fn reusing_indent_appends_tabs() {
        let mut s = String::from("\t");
        create_reusing_indent(&mut s, 1, 0, &tab_prefs());
        assert_eq!(s, "\t\t");
    }

    #[test]
    fn reusing_indent_appends_spaces_only() {
        let mut s = String::from("    ");
        create_reusing_indent(&mut s, 1, 0, &space_prefs());
        assert_eq!(s, "        ");
    }

    #[test]
    fn reusing_indent_unindents() {
        let mut s = String::from("\t\t");
        create_reusing_indent(&mut s, -1, 0, &tab_prefs());
        assert_eq!(s, "\t");
    }

    #[test]
    fn reusing_indent_never_goes_negative() {
        let mut s = String::from("\t");
        create_reusing_indent(&mut s, -3, 0, &tab_prefs());
        assert_eq!(s, "");
    }

    #[test]
    fn reusing_indent_adds_extra_spaces() {
        let mut s = String::new();
        create_reusing_indent(&mut s, 1, 2, &tab_prefs());
        assert_eq!(s, "\t  ");
    }

    #[test]
    fn reusing_indent_keeps_mixed_prefix() {
        // "  \t" measures 4; adding one unit keeps the prefix intact
        let mut s = String::from("  \t");
        create_reusing_indent(&mut s, 1, 0, &tab_prefs());
        assert_eq!(s, "  \t\t");
    }

    #[test]
    fn create_indent_copies_tabs_and_blanks_code() {
        let buf = TextBuffer::new("\tfoo(bar");
        assert_eq!(create_indent(&buf, 0, 5, false, &space_prefs()), "\t    ");
    }

    #[test]
    fn create_indent_converts_space_runs() {
        let buf = TextBuffer::new("A::A() : a(1),");
        assert_eq!(create_indent(&buf, 0, 9, true, &tab_prefs()), "\t\t ");
    }

    // === Properties ===

    proptest! {
        #[test]
        fn reused_indent_hits_target_width(
            ws in "[ \t]{0,12}",
            additional in -3i32..=3,
            extra in 0i32..=3,
        ) {
            let prefs = tab_prefs();
            let before = visual_length(&ws, prefs.tab_size);
            let mut s = ws;
            create_reusing_indent(&mut s, additional, extra, &prefs);
            let want = (to_i32(before) + to_i32(prefs.indent_size) * additional + extra).max(0);
            prop_assert_eq!(to_i32(visual_length(&s, prefs.tab_size)), want);
        }

        #[test]
        fn space_profile_emits_no_tabs(ws in " {0,8}", additional in 0i32..=3) {
            let prefs = space_prefs();
            let mut s = ws;
            create_reusing_indent(&mut s, additional, 0, &prefs);
            prop_assert!(!s.contains('\t'));
        }
    }
}
