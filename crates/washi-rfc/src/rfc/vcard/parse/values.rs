//! vCard value parsers.
//!
//! Escaping differs by version: vCard 3.0/4.0 share iCalendar's full table
//! (`\\` `\,` `\;` `\n`), while vCard 2.1 escapes only backslash and
//! semicolon - commas are literal text.

use washi_core::profile::EscapeDialect;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::vcard::core::{
    Address, DateAndOrTime, Organization, StructuredName, VCardDate, VCardTime, VCardUtcOffset,
};

/// Unescapes a text value according to the dialect in effect.
#[must_use]
pub fn unescape_text(s: &str, dialect: EscapeDialect) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(';') => result.push(';'),
            Some(',') if dialect == EscapeDialect::Full => result.push(','),
            Some('\\') | None => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
        }
    }

    result
}

/// Splits a component list at unescaped commas, unescaping each element.
#[must_use]
pub fn split_component(s: &str, dialect: EscapeDialect) -> Vec<String> {
    split_unescaped(s, ',')
        .into_iter()
        .map(|part| unescape_text(part, dialect))
        .collect()
}

/// Splits a structured value at unescaped semicolons, keeping escapes.
#[must_use]
pub fn split_structured(s: &str) -> Vec<&str> {
    split_unescaped(s, ';')
}

fn split_unescaped(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == sep {
            parts.push(&s[start..i]);
            start = i + sep.len_utf8();
        }
    }
    parts.push(&s[start..]);

    parts
}

/// Drops empty trailing components (`N:Doe;Jon;;;` has two real parts).
fn component_list(part: &str, dialect: EscapeDialect) -> Vec<String> {
    if part.is_empty() {
        Vec::new()
    } else {
        split_component(part, dialect)
    }
}

/// Parses an N property value into a structured name.
#[must_use]
pub fn parse_structured_name(s: &str, dialect: EscapeDialect) -> StructuredName {
    let mut parts = split_structured(s).into_iter();
    let mut next = || component_list(parts.next().unwrap_or(""), dialect);

    StructuredName {
        family: next(),
        given: next(),
        additional: next(),
        prefixes: next(),
        suffixes: next(),
    }
}

/// Parses an ADR property value into an address.
#[must_use]
pub fn parse_address(s: &str, dialect: EscapeDialect) -> Address {
    let mut parts = split_structured(s).into_iter();
    let mut next = || component_list(parts.next().unwrap_or(""), dialect);

    Address {
        po_box: next(),
        extended: next(),
        street: next(),
        locality: next(),
        region: next(),
        postal_code: next(),
        country: next(),
    }
}

/// Parses an ORG property value into an organization.
#[must_use]
pub fn parse_organization(s: &str, dialect: EscapeDialect) -> Organization {
    let mut parts = split_structured(s)
        .into_iter()
        .map(|part| unescape_text(part, dialect));

    Organization {
        name: parts.next().unwrap_or_default(),
        units: parts.collect(),
    }
}

/// Parses a date, time, or date-time value, including truncated forms.
///
/// ## Errors
/// Returns an error if the value matches none of the RFC 6350 §4.3 shapes.
pub fn parse_date_and_or_time(s: &str, line: usize) -> ParseResult<DateAndOrTime> {
    let err = |context: &str| ParseError::new(ParseErrorKind::InvalidPropertyName, line, context.to_string());

    if let Some(time_part) = s.strip_prefix('T') {
        let (time, offset) = parse_time_with_offset(time_part, line)?;
        return Ok(DateAndOrTime::Time { time, offset });
    }

    match s.find('T') {
        Some(t_pos) => {
            let date = parse_vcard_date(&s[..t_pos], line)?;
            let (time, offset) = parse_time_with_offset(&s[t_pos + 1..], line)?;
            Ok(DateAndOrTime::DateTime { date, time, offset })
        }
        None => {
            if s.is_empty() {
                return Err(err("empty date value"));
            }
            Ok(DateAndOrTime::Date(parse_vcard_date(s, line)?))
        }
    }
}

/// Parses a full or partial date (`19960415`, `1996-10`, `1953`, `--0415`,
/// `---15`).
fn parse_vcard_date(s: &str, line: usize) -> ParseResult<VCardDate> {
    let err =
        || ParseError::new(ParseErrorKind::InvalidPropertyName, line, format!("invalid date: {s}"));

    if let Some(rest) = s.strip_prefix("---") {
        return Ok(VCardDate::Day(rest.parse().map_err(|_| err())?));
    }
    if let Some(rest) = s.strip_prefix("--") {
        if rest.len() != 4 {
            return Err(err());
        }
        return Ok(VCardDate::MonthDay {
            month: rest[..2].parse().map_err(|_| err())?,
            day: rest[2..].parse().map_err(|_| err())?,
        });
    }
    if let Some((year, month)) = s.split_once('-') {
        return Ok(VCardDate::YearMonth {
            year: year.parse().map_err(|_| err())?,
            month: month.parse().map_err(|_| err())?,
        });
    }
    match s.len() {
        8 => Ok(VCardDate::Full {
            year: s[..4].parse().map_err(|_| err())?,
            month: s[4..6].parse().map_err(|_| err())?,
            day: s[6..].parse().map_err(|_| err())?,
        }),
        4 => Ok(VCardDate::Year(s.parse().map_err(|_| err())?)),
        _ => Err(err()),
    }
}

fn parse_time_with_offset(
    s: &str,
    line: usize,
) -> ParseResult<(VCardTime, Option<VCardUtcOffset>)> {
    let (time_str, offset) = if let Some(stripped) = s.strip_suffix('Z') {
        (stripped, Some(VCardUtcOffset::UTC))
    } else if let Some(sign_pos) = s.find(['+', '-']) {
        (&s[..sign_pos], Some(parse_utc_offset(&s[sign_pos..], line)?))
    } else {
        (s, None)
    };

    let err = || {
        ParseError::new(
            ParseErrorKind::InvalidPropertyName,
            line,
            format!("invalid time: {time_str}"),
        )
    };

    let time = match time_str.len() {
        6 => VCardTime::Full {
            hour: time_str[..2].parse().map_err(|_| err())?,
            minute: time_str[2..4].parse().map_err(|_| err())?,
            second: time_str[4..].parse().map_err(|_| err())?,
        },
        4 => VCardTime::HourMinute {
            hour: time_str[..2].parse().map_err(|_| err())?,
            minute: time_str[2..].parse().map_err(|_| err())?,
        },
        2 => VCardTime::Hour(time_str.parse().map_err(|_| err())?),
        _ => return Err(err()),
    };

    Ok((time, offset))
}

/// Parses a UTC offset (`Z`, `+0530`, `-08:00`, `-0800`).
///
/// ## Errors
/// Returns an error if the string is not a valid offset.
pub fn parse_utc_offset(s: &str, line: usize) -> ParseResult<VCardUtcOffset> {
    let err = || {
        ParseError::new(
            ParseErrorKind::InvalidPropertyName,
            line,
            format!("invalid UTC offset: {s}"),
        )
    };

    if s == "Z" {
        return Ok(VCardUtcOffset::UTC);
    }

    let sign: i8 = match s.as_bytes().first() {
        Some(b'+') => 1,
        Some(b'-') => -1,
        _ => return Err(err()),
    };

    let digits = s[1..].replace(':', "");
    if digits.len() != 4 && digits.len() != 2 {
        return Err(err());
    }

    let hours: i8 = digits[..2].parse().map_err(|_| err())?;
    let minutes: u8 = if digits.len() == 4 {
        digits[2..].parse().map_err(|_| err())?
    } else {
        0
    };

    Ok(VCardUtcOffset {
        hours: sign * hours,
        minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_dialects_differ_on_commas() {
        assert_eq!(
            unescape_text("a\\, b", EscapeDialect::Full),
            "a, b"
        );
        // vCard 2.1 leaves the escape alone - commas are never escaped.
        assert_eq!(unescape_text("a\\, b", EscapeDialect::Versit), "a\\, b");
        assert_eq!(unescape_text("a\\;b", EscapeDialect::Versit), "a;b");
    }

    #[test]
    fn structured_name_parses_components() {
        let n = parse_structured_name("Doe;Jon;;;", EscapeDialect::Full);
        assert_eq!(n.family, vec!["Doe"]);
        assert_eq!(n.given, vec!["Jon"]);
        assert!(n.additional.is_empty());
        assert!(n.suffixes.is_empty());
    }

    #[test]
    fn structured_name_keeps_escaped_semicolons() {
        let n = parse_structured_name("Doe\\;Jr;Jon;;;", EscapeDialect::Full);
        assert_eq!(n.family, vec!["Doe;Jr"]);
    }

    #[test]
    fn address_parses_seven_components() {
        let adr = parse_address(";;123 Main St;Anytown;CA;91921;USA", EscapeDialect::Full);
        assert_eq!(adr.street, vec!["123 Main St"]);
        assert_eq!(adr.locality, vec!["Anytown"]);
        assert_eq!(adr.country, vec!["USA"]);
        assert!(adr.po_box.is_empty());
    }

    #[test]
    fn organization_with_units() {
        let org = parse_organization("ABC\\, Inc.;North American Division;Marketing", EscapeDialect::Full);
        assert_eq!(org.name, "ABC, Inc.");
        assert_eq!(org.units, vec!["North American Division", "Marketing"]);
    }

    #[test]
    fn date_and_or_time_forms() {
        assert_eq!(
            parse_date_and_or_time("19960415", 1).unwrap(),
            DateAndOrTime::Date(VCardDate::Full {
                year: 1996,
                month: 4,
                day: 15
            })
        );
        assert_eq!(
            parse_date_and_or_time("--0415", 1).unwrap(),
            DateAndOrTime::Date(VCardDate::MonthDay { month: 4, day: 15 })
        );
        assert_eq!(
            parse_date_and_or_time("1953", 1).unwrap(),
            DateAndOrTime::Date(VCardDate::Year(1953))
        );
        assert!(matches!(
            parse_date_and_or_time("19531015T231000Z", 1).unwrap(),
            DateAndOrTime::DateTime { .. }
        ));
        assert!(matches!(
            parse_date_and_or_time("T1030", 1).unwrap(),
            DateAndOrTime::Time { .. }
        ));
    }

    #[test]
    fn utc_offset_forms() {
        assert_eq!(parse_utc_offset("Z", 1).unwrap(), VCardUtcOffset::UTC);
        assert_eq!(
            parse_utc_offset("-05:00", 1).unwrap(),
            VCardUtcOffset {
                hours: -5,
                minutes: 0
            }
        );
        assert_eq!(
            parse_utc_offset("+0530", 1).unwrap(),
            VCardUtcOffset {
                hours: 5,
                minutes: 30
            }
        );
        assert!(parse_utc_offset("0500", 1).is_err());
    }
}
