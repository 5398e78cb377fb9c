//! Keyword resolution for scanned identifier runs.
//!
//! The lookup uses the identifier's length as a first-pass filter
//! (indentation-relevant keywords range from 2-9 chars), then matches
//! against the specific keywords of that length. Identifiers that miss
//! the table come back as `None` and stay [`TokenKind::Ident`].

use crate::TokenKind;

/// Look up a C/C++ keyword by text.
///
/// Returns the corresponding `TokenKind` if the text is a keyword the
/// indenter distinguishes, `None` for a regular identifier.
///
/// Uses length-bucketing for fast rejection: identifiers whose length
/// falls outside the 2-9 range are immediately rejected without any
/// comparison.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    let bytes = text.as_bytes();
    let len = bytes.len();

    // Guard: all keywords are 2-9 chars and start with ASCII alpha
    if !(2..=9).contains(&len) {
        return None;
    }
    if !bytes[0].is_ascii_lowercase() {
        return None;
    }

    match len {
        2 => match text {
            "if" => Some(TokenKind::If),
            "do" => Some(TokenKind::Do),
            _ => None,
        },
        3 => match text {
            "for" => Some(TokenKind::For),
            "try" => Some(TokenKind::Try),
            "new" => Some(TokenKind::New),
            _ => None,
        },
        4 => match text {
            "case" => Some(TokenKind::Case),
            "else" => Some(TokenKind::Else),
            "enum" => Some(TokenKind::Enum),
            "goto" => Some(TokenKind::Goto),
            _ => None,
        },
        5 => match text {
            "break" => Some(TokenKind::Break),
            "catch" => Some(TokenKind::Catch),
            "class" => Some(TokenKind::Class),
            "const" => Some(TokenKind::Const),
            "while" => Some(TokenKind::While),
            "union" => Some(TokenKind::Union),
            "using" => Some(TokenKind::Using),
            "throw" => Some(TokenKind::Throw),
            _ => None,
        },
        6 => match text {
            "delete" => Some(TokenKind::Delete),
            "public" => Some(TokenKind::Public),
            "return" => Some(TokenKind::Return),
            "static" => Some(TokenKind::Static),
            "struct" => Some(TokenKind::Struct),
            "switch" => Some(TokenKind::Switch),
            "extern" => Some(TokenKind::Extern),
            _ => None,
        },
        7 => match text {
            "default" => Some(TokenKind::Default),
            "private" => Some(TokenKind::Private),
            "typedef" => Some(TokenKind::Typedef),
            "virtual" => Some(TokenKind::Virtual),
            _ => None,
        },
        8 => match text {
            "operator" => Some(TokenKind::Operator),
            "template" => Some(TokenKind::Template),
            "typename" => Some(TokenKind::Typename),
            "noexcept" => Some(TokenKind::Noexcept),
            "override" => Some(TokenKind::Override),
            _ => None,
        },
        9 => match text {
            "namespace" => Some(TokenKind::Namespace),
            "protected" => Some(TokenKind::Protected),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_flow_keywords() {
        assert_eq!(lookup("if"), Some(TokenKind::If));
        assert_eq!(lookup("else"), Some(TokenKind::Else));
        assert_eq!(lookup("for"), Some(TokenKind::For));
        assert_eq!(lookup("do"), Some(TokenKind::Do));
        assert_eq!(lookup("while"), Some(TokenKind::While));
        assert_eq!(lookup("switch"), Some(TokenKind::Switch));
        assert_eq!(lookup("case"), Some(TokenKind::Case));
        assert_eq!(lookup("default"), Some(TokenKind::Default));
        assert_eq!(lookup("break"), Some(TokenKind::Break));
        assert_eq!(lookup("goto"), Some(TokenKind::Goto));
        assert_eq!(lookup("return"), Some(TokenKind::Return));
    }

    #[test]
    fn type_and_scope_keywords() {
        assert_eq!(lookup("class"), Some(TokenKind::Class));
        assert_eq!(lookup("struct"), Some(TokenKind::Struct));
        assert_eq!(lookup("union"), Some(TokenKind::Union));
        assert_eq!(lookup("enum"), Some(TokenKind::Enum));
        assert_eq!(lookup("namespace"), Some(TokenKind::Namespace));
        assert_eq!(lookup("extern"), Some(TokenKind::Extern));
        assert_eq!(lookup("template"), Some(TokenKind::Template));
        assert_eq!(lookup("typename"), Some(TokenKind::Typename));
        assert_eq!(lookup("typedef"), Some(TokenKind::Typedef));
        assert_eq!(lookup("using"), Some(TokenKind::Using));
    }

    #[test]
    fn access_specifiers() {
        assert_eq!(lookup("public"), Some(TokenKind::Public));
        assert_eq!(lookup("protected"), Some(TokenKind::Protected));
        assert_eq!(lookup("private"), Some(TokenKind::Private));
        assert_eq!(lookup("virtual"), Some(TokenKind::Virtual));
    }

    #[test]
    fn exception_and_memory_keywords() {
        assert_eq!(lookup("try"), Some(TokenKind::Try));
        assert_eq!(lookup("catch"), Some(TokenKind::Catch));
        assert_eq!(lookup("throw"), Some(TokenKind::Throw));
        assert_eq!(lookup("noexcept"), Some(TokenKind::Noexcept));
        assert_eq!(lookup("new"), Some(TokenKind::New));
        assert_eq!(lookup("delete"), Some(TokenKind::Delete));
        assert_eq!(lookup("operator"), Some(TokenKind::Operator));
        assert_eq!(lookup("override"), Some(TokenKind::Override));
        assert_eq!(lookup("const"), Some(TokenKind::Const));
        assert_eq!(lookup("static"), Some(TokenKind::Static));
    }

    #[test]
    fn non_keywords_return_none() {
        assert_eq!(lookup("foo"), None);
        assert_eq!(lookup("classes"), None);
        assert_eq!(lookup("iff"), None);
        assert_eq!(lookup("x"), None);
        assert_eq!(lookup(""), None);
        assert_eq!(lookup("_if"), None);
        assert_eq!(lookup("reinterpret_cast"), None);
    }

    #[test]
    fn case_sensitivity() {
        assert_eq!(lookup("If"), None);
        assert_eq!(lookup("CLASS"), None);
        assert_eq!(lookup("Struct"), None);
    }
}
