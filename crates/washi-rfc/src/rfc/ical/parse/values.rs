//! Value type parsers for iCalendar (RFC 5545 §3.3).
//!
//! Error sources are intentionally discarded during parsing (`map_err_ignore`)
//! since each parser reports a single, specific error kind.
#![expect(
    clippy::map_err_ignore,
    reason = "Value parsers report one specific error kind per format"
)]

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{
    Date, DateTime, DateTimeForm, Duration, Frequency, Period, RRule, RRuleUntil, Time, UtcOffset,
    Weekday, WeekdayNum,
};

/// Parses a DATE value (RFC 5545 §3.3.4).
///
/// Format: YYYYMMDD (e.g., "19970714")
///
/// ## Errors
/// Returns an error if the string is not a valid 8-digit date.
pub fn parse_date(s: &str, line: usize, col: usize) -> ParseResult<Date> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(ParseErrorKind::InvalidDate, line, col));
    }

    let year = s[0..4]
        .parse::<u16>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidDate, line, col))?;
    let month = s[4..6]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidDate, line, col))?;
    let day = s[6..8]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidDate, line, col))?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(ParseError::new(ParseErrorKind::InvalidDate, line, col));
    }

    Ok(Date { year, month, day })
}

/// Parses a TIME value (RFC 5545 §3.3.12).
///
/// Format: HHMMSS[Z] (e.g., "133000", "133000Z")
///
/// ## Errors
/// Returns an error if the string is not a valid 6-digit time.
pub fn parse_time(s: &str, line: usize, col: usize) -> ParseResult<Time> {
    let (time_str, is_utc) = match s.strip_suffix('Z') {
        Some(stripped) => (stripped, true),
        None => (s, false),
    };

    if time_str.len() != 6 || !time_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(ParseErrorKind::InvalidTime, line, col));
    }

    let hour = time_str[0..2]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidTime, line, col))?;
    let minute = time_str[2..4]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidTime, line, col))?;
    let second = time_str[4..6]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidTime, line, col))?;

    // 60 allowed for leap seconds
    if hour > 23 || minute > 59 || second > 60 {
        return Err(ParseError::new(ParseErrorKind::InvalidTime, line, col));
    }

    Ok(Time {
        hour,
        minute,
        second,
        is_utc,
    })
}

/// Parses a DATE-TIME value (RFC 5545 §3.3.5).
///
/// Format: YYYYMMDD"T"HHMMSS[Z] (e.g., "19970714T133000Z")
///
/// The TZID is carried by the property's parameter, not by the value
/// itself; a trailing `Z` wins over a supplied TZID.
///
/// ## Errors
/// Returns an error if the string is not a valid date-time format.
pub fn parse_datetime(
    s: &str,
    tzid: Option<&str>,
    line: usize,
    col: usize,
) -> ParseResult<DateTime> {
    let t_pos = s
        .find('T')
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidDateTime, line, col))?;

    let date = parse_date(&s[..t_pos], line, col)
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidDateTime, line, col))?;
    let time = parse_time(&s[t_pos + 1..], line, col + t_pos + 1)
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidDateTime, line, col))?;

    let form = if time.is_utc {
        DateTimeForm::Utc
    } else if let Some(tz) = tzid {
        DateTimeForm::Zoned {
            tzid: tz.to_string(),
        }
    } else {
        DateTimeForm::Floating
    };

    Ok(DateTime {
        year: date.year,
        month: date.month,
        day: date.day,
        hour: time.hour,
        minute: time.minute,
        second: time.second,
        form,
    })
}

/// Parses a UTC-OFFSET value (RFC 5545 §3.3.14).
///
/// Format: (+|-)HHMM[SS] (e.g., "+0530", "-0800")
///
/// ## Errors
/// Returns an error if the string is not a valid UTC offset format.
pub fn parse_utc_offset(s: &str, line: usize, col: usize) -> ParseResult<UtcOffset> {
    let err = || ParseError::new(ParseErrorKind::InvalidUtcOffset, line, col);

    if s.len() != 5 && s.len() != 7 {
        return Err(err());
    }

    let sign = match s.as_bytes()[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return Err(err()),
    };

    let hours = s[1..3].parse::<i32>().map_err(|_| err())?;
    let minutes = s[3..5].parse::<i32>().map_err(|_| err())?;
    let seconds = if s.len() == 7 {
        s[5..7].parse::<i32>().map_err(|_| err())?
    } else {
        0
    };

    if minutes > 59 || seconds > 59 {
        return Err(err());
    }

    Ok(UtcOffset::from_seconds(
        sign * (hours * 3600 + minutes * 60 + seconds),
    ))
}

/// Parses a DURATION value (RFC 5545 §3.3.6).
///
/// Format: [+|-]P[nW] or [+|-]P[nD][T[nH][nM][nS]]
///
/// ## Errors
/// Returns an error if the string is not a valid duration format.
pub fn parse_duration(s: &str, line: usize, col: usize) -> ParseResult<Duration> {
    let err = || ParseError::new(ParseErrorKind::InvalidDuration, line, col);

    let mut rest = s;
    let mut dur = Duration::zero();

    if let Some(r) = rest.strip_prefix('-') {
        dur.negative = true;
        rest = r;
    } else if let Some(r) = rest.strip_prefix('+') {
        rest = r;
    } else {
        // No sign, duration is positive.
    }

    rest = rest.strip_prefix('P').ok_or_else(err)?;

    let mut in_time = false;
    let mut saw_component = false;
    while !rest.is_empty() {
        if let Some(r) = rest.strip_prefix('T') {
            if in_time {
                return Err(err());
            }
            in_time = true;
            rest = r;
            continue;
        }

        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(err)?;
        if digits_end == 0 {
            return Err(err());
        }
        let num: u32 = rest[..digits_end].parse().map_err(|_| err())?;

        match rest.as_bytes()[digits_end] {
            b'W' if !in_time => dur.weeks = num,
            b'D' if !in_time => dur.days = num,
            b'H' if in_time => dur.hours = num,
            b'M' if in_time => dur.minutes = num,
            b'S' if in_time => dur.seconds = num,
            _ => return Err(err()),
        }
        saw_component = true;
        rest = &rest[digits_end + 1..];
    }

    if !saw_component {
        return Err(err());
    }
    Ok(dur)
}

/// Parses a PERIOD value (RFC 5545 §3.3.9).
///
/// Format: start"/"end or start"/"duration
///
/// ## Errors
/// Returns an error if the string is not a valid period format.
pub fn parse_period(s: &str, tzid: Option<&str>, line: usize, col: usize) -> ParseResult<Period> {
    let slash_pos = s
        .find('/')
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidPeriod, line, col))?;

    let start = parse_datetime(&s[..slash_pos], tzid, line, col)?;
    let end_str = &s[slash_pos + 1..];

    if end_str.starts_with(['P', '+', '-']) {
        let duration = parse_duration(end_str, line, col + slash_pos + 1)?;
        Ok(Period::Duration { start, duration })
    } else {
        let end = parse_datetime(end_str, tzid, line, col + slash_pos + 1)?;
        Ok(Period::Explicit { start, end })
    }
}

/// Parses a BINARY value (RFC 5545 §3.3.1), base64 encoded.
///
/// ## Errors
/// Returns an error if the string is not valid base64.
pub fn parse_binary(s: &str, line: usize, col: usize) -> ParseResult<Vec<u8>> {
    BASE64
        .decode(s)
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidBinary, line, col))
}

/// Parses a RECUR (RRULE) value (RFC 5545 §3.3.10).
///
/// ## Errors
/// Returns an error if the string is not a valid recurrence rule.
pub fn parse_rrule(s: &str, line: usize, col: usize) -> ParseResult<RRule> {
    let mut rrule = RRule::new();

    for part in s.split(';') {
        let eq_pos = part
            .find('=')
            .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidRRule, line, col))?;
        parse_rrule_part(&mut rrule, &part[..eq_pos], &part[eq_pos + 1..], line, col)?;
    }

    Ok(rrule)
}

/// Parses a single RRULE key-value pair.
fn parse_rrule_part(
    rrule: &mut RRule,
    key: &str,
    value: &str,
    line: usize,
    col: usize,
) -> ParseResult<()> {
    let err = || ParseError::new(ParseErrorKind::InvalidRRule, line, col);

    match key.to_ascii_uppercase().as_str() {
        "FREQ" => {
            rrule.freq = Some(
                Frequency::parse(value)
                    .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidFrequency, line, col))?,
            );
        }
        "INTERVAL" => rrule.interval = Some(value.parse().map_err(|_| err())?),
        "COUNT" => {
            if rrule.until.is_some() {
                return Err(ParseError::new(
                    ParseErrorKind::UntilCountConflict,
                    line,
                    col,
                ));
            }
            rrule.count = Some(value.parse().map_err(|_| err())?);
        }
        "UNTIL" => {
            if rrule.count.is_some() {
                return Err(ParseError::new(
                    ParseErrorKind::UntilCountConflict,
                    line,
                    col,
                ));
            }
            rrule.until = Some(if value.contains('T') {
                RRuleUntil::DateTime(parse_datetime(value, None, line, col)?)
            } else {
                RRuleUntil::Date(parse_date(value, line, col)?)
            });
        }
        "WKST" => {
            rrule.wkst = Some(
                Weekday::parse(value)
                    .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidWeekday, line, col))?,
            );
        }
        "BYSECOND" => rrule.by_second = parse_num_list(value, line, col)?,
        "BYMINUTE" => rrule.by_minute = parse_num_list(value, line, col)?,
        "BYHOUR" => rrule.by_hour = parse_num_list(value, line, col)?,
        "BYDAY" => rrule.by_day = parse_byday(value, line, col)?,
        "BYMONTHDAY" => rrule.by_monthday = parse_num_list(value, line, col)?,
        "BYYEARDAY" => rrule.by_yearday = parse_num_list(value, line, col)?,
        "BYWEEKNO" => rrule.by_weekno = parse_num_list(value, line, col)?,
        "BYMONTH" => rrule.by_month = parse_num_list(value, line, col)?,
        "BYSETPOS" => rrule.by_setpos = parse_num_list(value, line, col)?,
        _ => {} // Unknown rule part - ignore
    }
    Ok(())
}

/// Parses a comma-separated list of numbers.
fn parse_num_list<T: std::str::FromStr>(s: &str, line: usize, col: usize) -> ParseResult<Vec<T>> {
    s.split(',')
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| ParseError::new(ParseErrorKind::InvalidRRule, line, col))
        })
        .collect()
}

/// Parses a BYDAY value (weekdays with optional ordinals).
fn parse_byday(s: &str, line: usize, col: usize) -> ParseResult<Vec<WeekdayNum>> {
    s.split(',')
        .map(|v| parse_weekday_num(v.trim(), line, col))
        .collect()
}

/// Parses a single weekday with optional ordinal (e.g., "MO", "1MO", "-1FR").
fn parse_weekday_num(s: &str, line: usize, col: usize) -> ParseResult<WeekdayNum> {
    if s.len() < 2 {
        return Err(ParseError::new(ParseErrorKind::InvalidWeekday, line, col));
    }

    let (ordinal_str, weekday_str) = s.split_at(s.len() - 2);

    let weekday = Weekday::parse(weekday_str)
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidWeekday, line, col))?;

    let ordinal = if ordinal_str.is_empty() {
        None
    } else {
        Some(
            ordinal_str
                .parse()
                .map_err(|_| ParseError::new(ParseErrorKind::InvalidRRule, line, col))?,
        )
    };

    Ok(WeekdayNum { ordinal, weekday })
}

/// Unescapes text values (RFC 5545 §3.3.11).
///
/// Escape sequences: `\\` `\,` `\;` `\n` `\N`
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 'N') => result.push('\n'),
                Some(',') => result.push(','),
                Some(';') => result.push(';'),
                Some('\\') | None => result.push('\\'),
                Some(other) => {
                    // Invalid escape, preserve as-is
                    result.push('\\');
                    result.push(other);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Splits a TEXT-LIST value at unescaped commas, unescaping each element.
#[must_use]
pub fn split_text_list(s: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push(c);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            ',' => items.push(unescape_text(&std::mem::take(&mut current))),
            _ => current.push(c),
        }
    }
    items.push(unescape_text(&current));

    items
}

/// Parses a BOOLEAN value (RFC 5545 §3.3.2).
///
/// ## Errors
/// Returns an error if the string is not "TRUE" or "FALSE".
pub fn parse_boolean(s: &str, line: usize, col: usize) -> ParseResult<bool> {
    match s.to_ascii_uppercase().as_str() {
        "TRUE" => Ok(true),
        "FALSE" => Ok(false),
        _ => Err(ParseError::new(ParseErrorKind::InvalidBoolean, line, col)),
    }
}

/// Parses an INTEGER value (RFC 5545 §3.3.8).
///
/// ## Errors
/// Returns an error if the string is not a valid integer.
pub fn parse_integer(s: &str, line: usize, col: usize) -> ParseResult<i32> {
    s.parse()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidInteger, line, col))
}

/// Parses a FLOAT value (RFC 5545 §3.3.7).
///
/// ## Errors
/// Returns an error if the string is not a valid floating-point number.
pub fn parse_float(s: &str, line: usize, col: usize) -> ParseResult<f64> {
    s.parse()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidFloat, line, col))
}
