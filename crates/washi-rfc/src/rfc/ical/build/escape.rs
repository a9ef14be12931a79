//! iCalendar text escaping utilities.

/// Escapes text for iCalendar TEXT values (RFC 5545 §3.3.11).
///
/// Escapes: backslash, comma, semicolon, and newlines.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\n' => result.push_str("\\n"),
            '\r' => {} // CR never survives; CRLF pairs collapse to \n
            _ => result.push(c),
        }
    }
    result
}

/// Escapes a parameter value, quoting it if needed.
///
/// Characters that cannot appear even inside quotes use RFC 6868 caret
/// encoding.
#[must_use]
pub fn escape_param_value(s: &str) -> String {
    if needs_quoting(s) {
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
    } else {
        s.to_string()
    }
}

/// Checks if a parameter value needs quoting.
fn needs_quoting(s: &str) -> bool {
    s.chars().any(|c| matches!(c, ':' | ';' | ',' | '"' | '\n'))
}
