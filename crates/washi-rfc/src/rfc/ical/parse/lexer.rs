//! Content line lexer for iCalendar (RFC 5545 §3.1).
//!
//! Handles line unfolding and tokenization of content lines.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{ContentLine, Parameter};

/// Splits input into logical content lines, merging folded continuations.
///
/// Per RFC 5545 §3.1 a long line is folded by inserting CRLF followed by a
/// single SPACE or HTAB; unfolding removes the line break and that one
/// whitespace character (no space is inserted). Bare LF line endings are
/// accepted for lenient parsing, blank lines are skipped, and a line with
/// no colon at all is treated as a stray continuation and joined to its
/// predecessor.
///
/// Each returned entry carries the 1-based number of the line it started
/// on, for error reporting. The result is a pure function of the input, so
/// the sequence can be re-created from the top at any time.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (i, raw_line) in input.lines().enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if line.is_empty() {
            continue;
        }

        if let Some(continuation) = line.strip_prefix([' ', '\t']) {
            if let Some((_, prev)) = lines.last_mut() {
                prev.push_str(continuation);
            } else {
                lines.push((i + 1, continuation.to_string()));
            }
        } else if !line.contains(':') {
            // Lenient: a line without a colon cannot stand alone; treat it
            // as a continuation whose leading whitespace was lost.
            if let Some((_, prev)) = lines.last_mut() {
                prev.push_str(line);
            } else {
                lines.push((i + 1, line.to_string()));
            }
        } else {
            lines.push((i + 1, line.to_string()));
        }
    }

    lines
}

/// Parses a single content line.
///
/// Format: `name *(";" param) ":" value`
///
/// ## Errors
/// Returns an error if the line is malformed or contains invalid characters.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let mut chars = line.char_indices().peekable();

    // Property name runs up to ';' (parameters follow) or ':' (value follows).
    let mut name_end = 0;
    let mut at_colon = false;
    while let Some(&(i, c)) = chars.peek() {
        if c == ';' || c == ':' {
            name_end = i;
            at_colon = c == ':';
            break;
        }
        if !c.is_ascii_alphanumeric() && c != '-' {
            return Err(ParseError::new(
                ParseErrorKind::InvalidPropertyName,
                line_num,
                i + 1,
            ));
        }
        chars.next();
    }

    if name_end == 0 {
        return Err(ParseError::new(
            if line.is_empty() || line.starts_with([':', ';']) {
                ParseErrorKind::MissingPropertyName
            } else {
                ParseErrorKind::MissingColon
            },
            line_num,
            1,
        ));
    }

    let name = line[..name_end].to_ascii_uppercase();
    chars.next(); // consume the ';' or ':'

    let mut params = Vec::new();
    if !at_colon {
        loop {
            let (param, next_is_colon) = parse_parameter(&mut chars, line, line_num)?;
            params.push(param);
            if next_is_colon {
                break;
            }
        }
    }

    // Everything that remains is the value.
    let value_start = chars.peek().map_or(line.len(), |&(i, _)| i);

    Ok(ContentLine {
        name,
        params,
        raw_value: line[value_start..].to_string(),
    })
}

/// Parses one parameter from the character stream.
///
/// On return the stream is positioned after the ';' or ':' that terminated
/// the parameter; the bool reports whether it was the ':'.
fn parse_parameter(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    line: &str,
    line_num: usize,
) -> ParseResult<(Parameter, bool)> {
    let start = chars.peek().map_or(line.len(), |&(i, _)| i);

    // Parameter name runs up to '='.
    let mut name_end = start;
    while let Some(&(i, c)) = chars.peek() {
        if c == '=' {
            name_end = i;
            chars.next(); // consume '='
            break;
        }
        if !c.is_ascii_alphanumeric() && c != '-' {
            return Err(ParseError::new(
                ParseErrorKind::InvalidParameter,
                line_num,
                i + 1,
            ));
        }
        chars.next();
    }

    if name_end == start {
        return Err(ParseError::new(
            ParseErrorKind::InvalidParameter,
            line_num,
            start + 1,
        ));
    }

    let param_name = &line[start..name_end];

    // Comma-separated values, each possibly quoted.
    let mut values = Vec::new();
    let mut lenient = false;
    loop {
        let (value, value_lenient) = parse_param_value(chars, line, line_num)?;
        values.push(value);
        lenient |= value_lenient;

        match chars.next() {
            Some((_, ',')) => {}
            Some((_, ';')) => {
                let mut param = Parameter::with_values(param_name, values);
                param.lenient = lenient;
                return Ok((param, false));
            }
            Some((_, ':')) => {
                let mut param = Parameter::with_values(param_name, values);
                param.lenient = lenient;
                return Ok((param, true));
            }
            Some((i, c)) => {
                return Err(
                    ParseError::new(ParseErrorKind::InvalidParameter, line_num, i + 1)
                        .with_context(format!("unexpected character '{c}'")),
                );
            }
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::MissingColon,
                    line_num,
                    line.len(),
                ));
            }
        }
    }
}

/// Parses a parameter value (possibly quoted).
///
/// Returns the decoded value and whether lenient acceptance was required
/// (an unquoted value carrying characters that should have been quoted).
fn parse_param_value(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    line: &str,
    line_num: usize,
) -> ParseResult<(String, bool)> {
    let Some(&(start, first)) = chars.peek() else {
        // Empty value at end of line (e.g. `X-INTERN=` before the colon is
        // handled by the caller seeing the terminator immediately).
        return Err(ParseError::new(
            ParseErrorKind::MissingColon,
            line_num,
            line.len(),
        ));
    };

    if first == '"' {
        chars.next(); // consume opening quote
        let mut value = String::new();
        let mut closed = false;

        while let Some((_, c)) = chars.next() {
            if c == '"' {
                closed = true;
                break;
            }
            if c == '^' {
                decode_caret(chars, &mut value);
            } else {
                value.push(c);
            }
        }

        if !closed {
            return Err(ParseError::new(
                ParseErrorKind::UnclosedQuote,
                line_num,
                start + 1,
            ));
        }

        Ok((value, false))
    } else {
        // Unquoted value: runs to ',' ';' or ':'. A double quote inside is
        // illegal but accepted in lenient mode and flagged.
        let mut value = String::new();
        let mut lenient = false;
        while let Some(&(_, c)) = chars.peek() {
            if c == ',' || c == ';' || c == ':' {
                break;
            }
            chars.next();
            if c == '^' {
                decode_caret(chars, &mut value);
                continue;
            }
            if c == '"' || c.is_control() {
                lenient = true;
            }
            value.push(c);
        }
        Ok((value, lenient))
    }
}

/// Decodes one RFC 6868 caret escape; the leading '^' is already consumed.
fn decode_caret(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>, out: &mut String) {
    match chars.peek().map(|&(_, c)| c) {
        Some('^') => {
            out.push('^');
            chars.next();
        }
        Some('n') => {
            out.push('\n');
            chars.next();
        }
        Some('\'') => {
            out.push('"');
            chars.next();
        }
        _ => out.push('^'),
    }
}
