//! vCard lexer for line unfolding and content line tokenization.
//!
//! vCard folds lines the same way iCalendar does (CRLF followed by one
//! SPACE or HTAB). The parameter grammar is looser: vCard 2.1 permits bare
//! parameters without a value (`PHOTO;BASE64:...`), which the lexer
//! accepts for any version.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::vcard::core::VCardParameter;

/// Splits input into logical lines, merging folded continuations.
///
/// Blank lines are skipped; the one leading whitespace character of each
/// continuation is removed and nothing is inserted in its place. Each
/// entry carries the 1-based number of its first physical line.
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
        } else {
            lines.push((i + 1, line.to_string()));
        }
    }

    lines
}

/// A tokenized content line before value interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name (uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<VCardParameter>,
    /// Raw value string.
    pub value: String,
}

impl ContentLine {
    /// Returns the first value of the named parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        let name_upper = name.to_ascii_uppercase();
        self.params
            .iter()
            .find(|p| p.name == name_upper)?
            .value()
    }

    /// Returns whether a parameter with the given name exists (bare or not).
    #[must_use]
    pub fn has_param(&self, name: &str) -> bool {
        let name_upper = name.to_ascii_uppercase();
        self.params.iter().any(|p| p.name == name_upper)
    }
}

/// Parses a single content line.
///
/// Format: `[group.]name *(";" param) ":" value`
///
/// ## Errors
/// Returns an error if the line is malformed or missing its colon.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let colon_pos = find_value_separator(line).ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::InvalidPropertyName,
            line_num,
            "missing colon separator",
        )
    })?;

    let (head, value) = line.split_at(colon_pos);
    let value = &value[1..]; // skip the colon

    let (group, head) = split_group(head);

    let (name, params_str) = match head.find(';') {
        Some(semi_pos) => (&head[..semi_pos], Some(&head[semi_pos + 1..])),
        None => (head, None),
    };

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ParseError::new(
            ParseErrorKind::InvalidPropertyName,
            line_num,
            format!("invalid property name: {name}"),
        ));
    }

    let params = match params_str {
        Some(params_str) => parse_parameters(params_str, line_num)?,
        None => Vec::new(),
    };

    Ok(ContentLine {
        group: group.map(String::from),
        name: name.to_ascii_uppercase(),
        params,
        value: value.to_string(),
    })
}

/// Finds the colon separating name/params from the value, skipping colons
/// inside quoted parameter values.
fn find_value_separator(line: &str) -> Option<usize> {
    let mut in_quotes = false;

    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some(i),
            _ => {}
        }
    }

    None
}

/// Splits off an optional group prefix.
fn split_group(s: &str) -> (Option<&str>, &str) {
    if let Some(dot_pos) = s.find('.') {
        let candidate = &s[..dot_pos];
        if !candidate.is_empty()
            && candidate
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return (Some(candidate), &s[dot_pos + 1..]);
        }
    }
    (None, s)
}

/// Parses the parameter section (everything between the first ';' and the
/// colon).
fn parse_parameters(s: &str, line_num: usize) -> ParseResult<Vec<VCardParameter>> {
    let mut params = Vec::new();

    for chunk in split_unquoted(s, ';') {
        if chunk.is_empty() {
            continue;
        }

        match chunk.find('=') {
            Some(eq_pos) => {
                let name = &chunk[..eq_pos];
                validate_param_name(name, line_num)?;
                let values = parse_param_values(&chunk[eq_pos + 1..], line_num)?;
                params.push(VCardParameter::multi(name, values));
            }
            None => {
                // Bare parameter (vCard 2.1 style): `PHOTO;BASE64:...`
                validate_param_name(chunk, line_num)?;
                params.push(VCardParameter::bare(chunk));
            }
        }
    }

    Ok(params)
}

fn validate_param_name(name: &str, line_num: usize) -> ParseResult<()> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ParseError::new(
            ParseErrorKind::InvalidParameter,
            line_num,
            format!("invalid parameter name: {name}"),
        ));
    }
    Ok(())
}

/// Parses comma-separated parameter values, handling quotes and RFC 6868
/// caret escapes.
fn parse_param_values(s: &str, line_num: usize) -> ParseResult<Vec<String>> {
    let mut values = Vec::new();

    for raw in split_unquoted(s, ',') {
        values.push(decode_param_value(raw, line_num)?);
    }

    Ok(values)
}

fn decode_param_value(raw: &str, line_num: usize) -> ParseResult<String> {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    let mut in_quotes = false;
    let mut saw_closing_quote = true;

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                saw_closing_quote = !in_quotes;
            }
            '^' => match chars.peek() {
                Some('n') => {
                    value.push('\n');
                    chars.next();
                }
                Some('\'') => {
                    value.push('"');
                    chars.next();
                }
                Some('^') => {
                    value.push('^');
                    chars.next();
                }
                _ => value.push('^'),
            },
            _ => value.push(c),
        }
    }

    if !saw_closing_quote {
        return Err(ParseError::new(
            ParseErrorKind::UnclosedQuote,
            line_num,
            format!("unclosed quote in parameter value: {raw}"),
        ));
    }

    Ok(value)
}

/// Splits on a separator, ignoring separators inside double quotes.
fn split_unquoted(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == sep && !in_quotes {
            parts.push(&s[start..i]);
            start = i + sep.len_utf8();
        }
    }
    parts.push(&s[start..]);

    parts
}
