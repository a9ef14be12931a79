//! vCard text escaping utilities.

use washi_core::profile::EscapeDialect;

/// Escapes a TEXT value per the dialect in effect.
///
/// The full table escapes backslash, comma, semicolon, and newline; the
/// versit (2.1) table leaves commas literal.
#[must_use]
pub fn escape_text(s: &str, dialect: EscapeDialect) -> String {
    let mut result = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ';' => result.push_str("\\;"),
            ',' if dialect == EscapeDialect::Full => result.push_str("\\,"),
            '\n' => result.push_str("\\n"),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// Escapes one component of a structured or list value.
///
/// Commas separate list elements even in 2.1 structured values, so they
/// are always escaped here.
#[must_use]
pub fn escape_component(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ';' => result.push_str("\\;"),
            ',' => result.push_str("\\,"),
            '\n' => result.push_str("\\n"),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// Escapes a parameter value, quoting it if needed.
///
/// Characters illegal even inside quotes use RFC 6868 caret encoding.
#[must_use]
pub fn escape_param_value(s: &str) -> String {
    if !needs_quoting(s) {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len() + 10);
    result.push('"');
    for c in s.chars() {
        match c {
            '^' => result.push_str("^^"),
            '\n' => result.push_str("^n"),
            '"' => result.push_str("^'"),
            _ => result.push(c),
        }
    }
    result.push('"');
    result
}

fn needs_quoting(s: &str) -> bool {
    s.chars().any(|c| matches!(c, ':' | ';' | ',' | '"' | '\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_text_full_dialect() {
        assert_eq!(
            escape_text("a, b; c\nd", EscapeDialect::Full),
            "a\\, b\\; c\\nd"
        );
    }

    #[test]
    fn escape_text_versit_leaves_commas() {
        assert_eq!(
            escape_text("a, b; c", EscapeDialect::Versit),
            "a, b\\; c"
        );
    }

    #[test]
    fn escape_component_always_escapes_commas() {
        assert_eq!(escape_component("ABC, Inc."), "ABC\\, Inc.");
    }

    #[test]
    fn escape_param_value_quotes_reserved() {
        assert_eq!(escape_param_value("plain"), "plain");
        assert_eq!(escape_param_value("a:b"), "\"a:b\"");
        assert_eq!(escape_param_value("say \"hi\""), "\"say ^'hi^'\"");
    }
}
