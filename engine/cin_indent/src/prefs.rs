//! Indentation preferences.
//!
//! [`IndentPrefs`] is a flat, read-only bag of knobs the indenter
//! consults. The embedder either fills it in directly or derives it
//! from a textual option map with [`IndentPrefs::from_options`], the
//! way a formatter profile would be loaded. Derived knobs (simple
//! indent, bracket indent, the per-construct continuation copies) are
//! recomputed from their sources when parsing options, so a profile
//! only has to name the primary settings.

use rustc_hash::FxHashMap;

/// Well-known option keys accepted by [`IndentPrefs::from_options`].
pub mod options {
    /// `"tab"`, `"space"` or `"mixed"`.
    pub const TAB_CHAR: &str = "tab_char";
    pub const TAB_SIZE: &str = "tab_size";
    pub const INDENT_SIZE: &str = "indent_size";
    pub const TABS_ONLY_FOR_LEADING_INDENTS: &str = "tabs_only_for_leading_indents";
    /// Continuation indent in units.
    pub const CONTINUATION_INDENT: &str = "continuation_indent";
    pub const INDENT_STATEMENTS_WITHIN_BLOCKS: &str = "indent_statements_within_blocks";
    pub const INDENT_STATEMENTS_WITHIN_BODIES: &str = "indent_statements_within_bodies";
    pub const INDENT_DECLARATIONS_WITHIN_ACCESS_SPECIFIER: &str =
        "indent_declarations_within_access_specifier";
    pub const INDENT_ACCESS_SPECIFIERS_WITHIN_TYPES: &str = "indent_access_specifiers_within_types";
    pub const ACCESS_SPECIFIER_EXTRA_SPACES: &str = "access_specifier_extra_spaces";
    pub const INDENT_DECLARATIONS_WITHIN_NAMESPACES: &str = "indent_declarations_within_namespaces";
    pub const INDENT_DECLARATIONS_WITHIN_LINKAGE: &str = "indent_declarations_within_linkage";
    pub const INDENT_CASES_WITHIN_SWITCH: &str = "indent_cases_within_switch";
    pub const INDENT_STATEMENTS_WITHIN_CASES: &str = "indent_statements_within_cases";
    /// `"column"`, `"by_one"` or `"continuation"`.
    pub const ALIGNMENT_FOR_INITIALIZER_LIST: &str = "alignment_for_initializer_list";
    /// `"column"`, `"by_one"` or `"continuation"`.
    pub const ALIGNMENT_FOR_DECLARATION_PARAMETERS: &str = "alignment_for_declaration_parameters";
    /// `"column"`, `"by_one"` or `"continuation"`.
    pub const ALIGNMENT_FOR_CALL_ARGUMENTS: &str = "alignment_for_call_arguments";
    /// `"same_line"`, `"next_line"` or `"next_line_shifted"`.
    pub const BRACE_POSITION_FOR_BLOCKS: &str = "brace_position_for_blocks";
    pub const BRACE_POSITION_FOR_INITIALIZER_LISTS: &str = "brace_position_for_initializer_lists";
    pub const BRACE_POSITION_FOR_METHODS: &str = "brace_position_for_methods";
    pub const BRACE_POSITION_FOR_TYPES: &str = "brace_position_for_types";
    pub const HAS_TEMPLATES: &str = "has_templates";
}

/// Which character fills synthesized indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabChar {
    Tab,
    Space,
    /// Tabs up to the last full tab stop, spaces for the rest.
    Mixed,
}

/// Indentation knobs. All `*_indent` fields count indent units unless
/// noted; a unit is `indent_size` visual columns.
#[derive(Debug, Clone)]
pub struct IndentPrefs {
    pub use_tabs: bool,
    pub tab_size: usize,
    pub indent_size: usize,
    pub tab_char: TabChar,
    /// When set, deep-alignment columns are synthesized with spaces
    /// only; otherwise space runs become tabs.
    pub tabs_only_for_leading_indents: bool,

    pub continuation_indent: i32,
    pub block_indent: i32,
    pub simple_indent: i32,
    pub bracket_indent: i32,
    pub assignment_indent: i32,
    pub case_indent: i32,
    pub case_block_indent: i32,
    pub ternary_deep_align: bool,
    pub ternary_indent: i32,
    pub array_indent: i32,
    pub array_deep_indent: bool,
    pub array_dimensions_deep_indent: bool,
    pub method_decl_indent: i32,
    pub method_decl_deep_indent: bool,
    pub method_decl_first_parameter_deep_indent: bool,
    pub method_call_indent: i32,
    pub method_call_deep_indent: bool,
    pub method_call_first_parameter_deep_indent: bool,
    pub parenthesis_indent: i32,
    pub parenthesis_deep_indent: bool,
    pub method_body_indent: i32,
    pub type_indent: i32,
    pub access_specifier_indent: i32,
    /// Literal spaces, not units.
    pub access_specifier_extra_spaces: i32,
    pub namespace_body_indent: i32,
    pub linkage_body_indent: i32,
    pub indent_braces_for_blocks: bool,
    pub indent_braces_for_arrays: bool,
    pub indent_braces_for_methods: bool,
    pub indent_braces_for_types: bool,
    /// Whether `<`/`>` may close template argument lists.
    pub has_templates: bool,
}

impl Default for IndentPrefs {
    fn default() -> Self {
        Self {
            use_tabs: true,
            tab_size: 4,
            indent_size: 4,
            tab_char: TabChar::Tab,
            tabs_only_for_leading_indents: false,
            continuation_indent: 2,
            block_indent: 1,
            simple_indent: 1,
            bracket_indent: 1,
            assignment_indent: 2,
            case_indent: 0,
            case_block_indent: 1,
            ternary_deep_align: false,
            ternary_indent: 2,
            array_indent: 2,
            array_deep_indent: true,
            array_dimensions_deep_indent: true,
            method_decl_indent: 2,
            method_decl_deep_indent: false,
            method_decl_first_parameter_deep_indent: false,
            method_call_indent: 2,
            method_call_deep_indent: false,
            method_call_first_parameter_deep_indent: false,
            parenthesis_indent: 2,
            parenthesis_deep_indent: false,
            method_body_indent: 1,
            type_indent: 1,
            access_specifier_indent: 0,
            access_specifier_extra_spaces: 0,
            namespace_body_indent: 0,
            linkage_body_indent: 0,
            indent_braces_for_blocks: false,
            indent_braces_for_arrays: false,
            indent_braces_for_methods: false,
            indent_braces_for_types: false,
            has_templates: true,
        }
    }
}

/// Alignment style named by an option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    Column,
    ByOne,
    Continuation,
}

impl IndentPrefs {
    /// Builds preferences from a textual option map. Unknown keys and
    /// malformed values fall back to the defaults.
    pub fn from_options(opts: &FxHashMap<String, String>) -> Self {
        let mut p = Self::default();

        if let Some(v) = opts.get(options::TAB_CHAR) {
            p.tab_char = match v.as_str() {
                "space" => TabChar::Space,
                "mixed" => TabChar::Mixed,
                _ => TabChar::Tab,
            };
            p.use_tabs = p.tab_char != TabChar::Space;
        }
        if let Some(v) = parse_usize(opts, options::TAB_SIZE) {
            p.tab_size = v;
        }
        if let Some(v) = parse_usize(opts, options::INDENT_SIZE) {
            p.indent_size = v;
        }
        if let Some(v) = parse_bool(opts, options::TABS_ONLY_FOR_LEADING_INDENTS) {
            p.tabs_only_for_leading_indents = v;
        }

        if let Some(v) = parse_units(opts, options::CONTINUATION_INDENT) {
            p.continuation_indent = v;
        }
        if let Some(v) = parse_bool(opts, options::INDENT_STATEMENTS_WITHIN_BLOCKS) {
            p.block_indent = i32::from(v);
        }
        if let Some(v) = parse_bool(opts, options::INDENT_STATEMENTS_WITHIN_BODIES) {
            p.method_body_indent = i32::from(v);
        }
        if let Some(v) = parse_bool(opts, options::INDENT_DECLARATIONS_WITHIN_ACCESS_SPECIFIER) {
            p.type_indent = i32::from(v);
        }
        if let Some(v) = parse_bool(opts, options::INDENT_ACCESS_SPECIFIERS_WITHIN_TYPES) {
            p.access_specifier_indent = i32::from(v);
        }
        if let Some(v) = parse_units(opts, options::ACCESS_SPECIFIER_EXTRA_SPACES) {
            p.access_specifier_extra_spaces = v;
        }
        if let Some(v) = parse_bool(opts, options::INDENT_CASES_WITHIN_SWITCH) {
            p.case_indent = i32::from(v);
        }
        if let Some(v) = parse_bool(opts, options::INDENT_STATEMENTS_WITHIN_CASES) {
            p.case_block_indent = i32::from(v);
        }

        if let Some(a) = parse_alignment(opts, options::ALIGNMENT_FOR_INITIALIZER_LIST) {
            p.array_deep_indent = a == Alignment::Column;
            p.array_indent = if a == Alignment::ByOne {
                1
            } else {
                p.continuation_indent
            };
        }
        if let Some(a) = parse_alignment(opts, options::ALIGNMENT_FOR_DECLARATION_PARAMETERS) {
            p.method_decl_deep_indent = a == Alignment::Column;
            p.method_decl_first_parameter_deep_indent = a == Alignment::Column;
            p.method_decl_indent = if a == Alignment::ByOne {
                1
            } else {
                p.continuation_indent
            };
        }
        if let Some(a) = parse_alignment(opts, options::ALIGNMENT_FOR_CALL_ARGUMENTS) {
            p.method_call_deep_indent = a == Alignment::Column;
            p.method_call_first_parameter_deep_indent = a == Alignment::Column;
            p.method_call_indent = if a == Alignment::ByOne {
                1
            } else {
                p.continuation_indent
            };
        }

        if let Some(v) = parse_shifted(opts, options::BRACE_POSITION_FOR_BLOCKS) {
            p.indent_braces_for_blocks = v;
        }
        if let Some(v) = parse_shifted(opts, options::BRACE_POSITION_FOR_INITIALIZER_LISTS) {
            p.indent_braces_for_arrays = v;
        }
        if let Some(v) = parse_shifted(opts, options::BRACE_POSITION_FOR_METHODS) {
            p.indent_braces_for_methods = v;
        }
        if let Some(v) = parse_shifted(opts, options::BRACE_POSITION_FOR_TYPES) {
            p.indent_braces_for_types = v;
        }
        if let Some(v) = parse_bool(opts, options::HAS_TEMPLATES) {
            p.has_templates = v;
        }

        // derived knobs
        p.assignment_indent = p.continuation_indent;
        p.ternary_indent = p.continuation_indent;
        p.parenthesis_indent = p.continuation_indent;
        p.bracket_indent = p.block_indent;
        p.simple_indent = if p.indent_braces_for_blocks && p.block_indent == 0 {
            1
        } else {
            p.block_indent
        };
        if let Some(v) = parse_bool(opts, options::INDENT_DECLARATIONS_WITHIN_NAMESPACES) {
            p.namespace_body_indent = if v { p.block_indent } else { 0 };
        }
        if let Some(v) = parse_bool(opts, options::INDENT_DECLARATIONS_WITHIN_LINKAGE) {
            p.linkage_body_indent = if v { p.block_indent } else { 0 };
        }

        p
    }
}

fn parse_bool(opts: &FxHashMap<String, String>, key: &str) -> Option<bool> {
    match opts.get(key).map(String::as_str) {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

fn parse_units(opts: &FxHashMap<String, String>, key: &str) -> Option<i32> {
    opts.get(key).and_then(|v| v.parse().ok())
}

fn parse_usize(opts: &FxHashMap<String, String>, key: &str) -> Option<usize> {
    opts.get(key).and_then(|v| v.parse().ok())
}

fn parse_alignment(opts: &FxHashMap<String, String>, key: &str) -> Option<Alignment> {
    match opts.get(key).map(String::as_str) {
        Some("column") => Some(Alignment::Column),
        Some("by_one") => Some(Alignment::ByOne),
        Some("continuation") => Some(Alignment::Continuation),
        _ => None,
    }
}

fn parse_shifted(opts: &FxHashMap<String, String>, key: &str) -> Option<bool> {
    match opts.get(key).map(String::as_str) {
        Some("next_line_shifted") => Some(true),
        Some("same_line" | "next_line") => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn map(pairs: &[(&str, &str)]) -> FxHashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn defaults_survive_empty_map() {
        let p = IndentPrefs::from_options(&FxHashMap::default());
        let d = IndentPrefs::default();
        assert_eq!(p.tab_size, d.tab_size);
        assert_eq!(p.continuation_indent, d.continuation_indent);
        assert_eq!(p.block_indent, d.block_indent);
        assert_eq!(p.use_tabs, d.use_tabs);
    }

    #[test]
    fn spaces_profile() {
        let p = IndentPrefs::from_options(&map(&[
            ("tab_char", "space"),
            ("tab_size", "2"),
            ("indent_size", "2"),
        ]));
        assert_eq!(p.tab_char, TabChar::Space);
        assert!(!p.use_tabs);
        assert_eq!(p.tab_size, 2);
        assert_eq!(p.indent_size, 2);
    }

    #[test]
    fn continuation_feeds_derived_knobs() {
        let p = IndentPrefs::from_options(&map(&[("continuation_indent", "3")]));
        assert_eq!(p.continuation_indent, 3);
        assert_eq!(p.assignment_indent, 3);
        assert_eq!(p.ternary_indent, 3);
        assert_eq!(p.parenthesis_indent, 3);
    }

    #[test]
    fn alignment_styles() {
        let p = IndentPrefs::from_options(&map(&[
            ("alignment_for_initializer_list", "by_one"),
            ("alignment_for_declaration_parameters", "column"),
            ("alignment_for_call_arguments", "continuation"),
        ]));
        assert!(!p.array_deep_indent);
        assert_eq!(p.array_indent, 1);
        assert!(p.method_decl_deep_indent);
        assert!(!p.method_call_deep_indent);
        assert_eq!(p.method_call_indent, p.continuation_indent);
    }

    #[test]
    fn shifted_braces_raise_simple_indent() {
        let p = IndentPrefs::from_options(&map(&[
            ("brace_position_for_blocks", "next_line_shifted"),
            ("indent_statements_within_blocks", "false"),
        ]));
        assert!(p.indent_braces_for_blocks);
        assert_eq!(p.block_indent, 0);
        assert_eq!(p.simple_indent, 1);
    }

    #[test]
    fn malformed_values_fall_back() {
        let p = IndentPrefs::from_options(&map(&[
            ("tab_size", "banana"),
            ("indent_cases_within_switch", "yes"),
        ]));
        assert_eq!(p.tab_size, 4);
        assert_eq!(p.case_indent, 0);
    }
}
