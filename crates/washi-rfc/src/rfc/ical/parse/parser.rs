//! iCalendar document parser (RFC 5545).
//!
//! Parses complete iCalendar documents into typed structures. Structural
//! errors (mismatched BEGIN/END, malformed lines) abort the parse; value
//! coercion errors do not — the property keeps its raw text as an opaque
//! value and the validator reports it.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{parse_content_line, split_lines};
use super::values::{
    parse_binary, parse_boolean, parse_date, parse_datetime, parse_duration, parse_float,
    parse_integer, parse_period, parse_rrule, parse_time, parse_utc_offset, split_text_list,
    unescape_text,
};
use crate::rfc::ical::core::{
    Component, ComponentKind, ContentLine, ICalendar, Property, Value, ValueType,
};

/// Parses an iCalendar document from a string.
///
/// ## Errors
///
/// Returns an error if the input is not structurally valid iCalendar.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<ICalendar> {
    tracing::debug!("Parsing iCalendar document");

    let root = parse_component_source(input)?;

    if root.kind != ComponentKind::Calendar {
        tracing::warn!(name = %root.name, "Root component is not VCALENDAR");
        return Err(
            ParseError::new(ParseErrorKind::MissingBegin, 1, 1).with_context("expected VCALENDAR")
        );
    }

    tracing::debug!("iCalendar document parsed successfully");

    Ok(ICalendar { root })
}

/// Parses a single component (`BEGIN:` through matching `END:`) from text.
///
/// Unlike [`parse`], the component need not be a VCALENDAR. Useful for
/// fragments such as a lone VTODO.
///
/// ## Errors
///
/// Returns an error if the input is not a structurally valid component.
pub fn parse_component_source(input: &str) -> ParseResult<Component> {
    let lines = split_lines(input);

    if lines.is_empty() {
        return Err(ParseError::new(ParseErrorKind::MissingBegin, 1, 1));
    }

    let content_lines: Vec<(usize, ContentLine)> = lines
        .into_iter()
        .map(|(line_num, line)| parse_content_line(&line, line_num).map(|cl| (line_num, cl)))
        .collect::<ParseResult<_>>()?;

    tracing::trace!(count = content_lines.len(), "Parsed content lines");

    let mut iter = content_lines.into_iter();

    let (line_num, begin) = iter
        .next()
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingBegin, 1, 1))?;
    if begin.name != "BEGIN" {
        return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1));
    }

    parse_component_body(&mut iter, line_num, &begin.raw_value.to_ascii_uppercase())
}

/// Parses a component's contents given that its BEGIN line was consumed.
fn parse_component_body(
    iter: &mut impl Iterator<Item = (usize, ContentLine)>,
    begin_line_num: usize,
    component_name: &str,
) -> ParseResult<Component> {
    let mut component = Component::named(component_name);
    let mut last_line_num = begin_line_num;

    loop {
        let Some((line_num, content_line)) = iter.next() else {
            return Err(ParseError::new(ParseErrorKind::MissingEnd, last_line_num, 1)
                .with_context(format!("missing END:{component_name}")));
        };
        last_line_num = line_num;

        match content_line.name.as_str() {
            "BEGIN" => {
                let nested_name = content_line.raw_value.to_ascii_uppercase();
                let nested = parse_component_body(iter, line_num, &nested_name)?;
                component.children.push(nested);
            }
            "END" => {
                let end_name = content_line.raw_value.to_ascii_uppercase();
                if end_name != component_name {
                    return Err(
                        ParseError::new(ParseErrorKind::MismatchedComponent, line_num, 1)
                            .with_context(format!(
                                "expected END:{component_name}, got END:{end_name}"
                            )),
                    );
                }
                break;
            }
            _ => component.properties.push(parse_property(content_line, line_num)),
        }
    }

    Ok(component)
}

/// Builds a property from a content line, coercing its value leniently.
///
/// A value that fails to coerce to its resolved type is retained as opaque
/// text; the property is never dropped and the parse never aborts for it.
fn parse_property(cl: ContentLine, line_num: usize) -> Property {
    let value_type = resolve_value_type(&cl);

    let value = match coerce_value(&cl.name, &cl.raw_value, value_type, cl.tzid(), line_num) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(
                property = %cl.name,
                error = %err,
                "value failed to coerce to its resolved type; keeping raw text"
            );
            Value::Unknown(cl.raw_value.clone())
        }
    };

    Property {
        name: cl.name,
        params: cl.params,
        value,
        raw_value: cl.raw_value,
        value_type,
    }
}

/// Resolves the effective value type of a content line.
///
/// An explicit `VALUE=` parameter wins; otherwise the default for the
/// property name applies. Date-valued properties are common in the wild
/// without a `VALUE=DATE` declaration, so the date-time defaults sniff the
/// value shape (8 digits, no `T`) before settling on DATE-TIME.
#[must_use]
pub fn resolve_value_type(cl: &ContentLine) -> ValueType {
    if let Some(explicit) = cl.value_type() {
        return ValueType::from_param(explicit);
    }

    match cl.name.as_str() {
        "DTSTART" | "DTEND" | "DTSTAMP" | "CREATED" | "LAST-MODIFIED" | "COMPLETED" | "DUE"
        | "RECURRENCE-ID" | "EXDATE" => date_or_datetime(&cl.raw_value),

        // RDATE may also hold periods.
        "RDATE" => {
            if cl.raw_value.contains('/') {
                ValueType::Period
            } else {
                date_or_datetime(&cl.raw_value)
            }
        }

        // TRIGGER defaults to a duration but may carry an absolute time.
        "DURATION" | "TRIGGER" => {
            if cl.raw_value.starts_with(['P', '-', '+']) {
                ValueType::Duration
            } else {
                ValueType::DateTime
            }
        }

        "PERCENT-COMPLETE" | "PRIORITY" | "REPEAT" | "SEQUENCE" => ValueType::Integer,

        "RRULE" | "EXRULE" => ValueType::Recur,

        "TZOFFSETFROM" | "TZOFFSETTO" => ValueType::UtcOffset,

        "URL" | "TZURL" | "SOURCE" | "ATTACH" => ValueType::Uri,

        "FREEBUSY" => ValueType::Period,

        "ATTENDEE" | "ORGANIZER" => ValueType::CalAddress,

        // Everything else (SUMMARY, DESCRIPTION, GEO, CATEGORIES, X-...) is text.
        _ => ValueType::Text,
    }
}

/// Picks DATE vs DATE-TIME from the shape of the first list element.
fn date_or_datetime(raw: &str) -> ValueType {
    let sample = raw.split(',').next().unwrap_or(raw);
    if sample.len() == 8 && !sample.contains('T') {
        ValueType::Date
    } else {
        ValueType::DateTime
    }
}

/// Property names whose TEXT value is a comma-separated list.
fn is_multi_valued_text(name: &str) -> bool {
    matches!(name, "CATEGORIES" | "RESOURCES")
}

/// Coerces a raw value string into a typed [`Value`].
fn coerce_value(
    name: &str,
    raw: &str,
    value_type: ValueType,
    tzid: Option<&str>,
    line_num: usize,
) -> ParseResult<Value> {
    match value_type {
        ValueType::Text => {
            if is_multi_valued_text(name) && contains_unescaped_comma(raw) {
                Ok(Value::TextList(split_text_list(raw)))
            } else {
                Ok(Value::Text(unescape_text(raw)))
            }
        }
        ValueType::DateTime => {
            if raw.contains(',') {
                let dts = raw
                    .split(',')
                    .map(|s| parse_datetime(s.trim(), tzid, line_num, 1))
                    .collect::<ParseResult<Vec<_>>>()?;
                Ok(Value::DateTimeList(dts))
            } else {
                Ok(Value::DateTime(parse_datetime(raw, tzid, line_num, 1)?))
            }
        }
        ValueType::Date => {
            if raw.contains(',') {
                let dates = raw
                    .split(',')
                    .map(|s| parse_date(s.trim(), line_num, 1))
                    .collect::<ParseResult<Vec<_>>>()?;
                Ok(Value::DateList(dates))
            } else {
                Ok(Value::Date(parse_date(raw, line_num, 1)?))
            }
        }
        ValueType::Duration => Ok(Value::Duration(parse_duration(raw, line_num, 1)?)),
        ValueType::Period => {
            if raw.contains(',') {
                let periods = raw
                    .split(',')
                    .map(|s| parse_period(s.trim(), tzid, line_num, 1))
                    .collect::<ParseResult<Vec<_>>>()?;
                Ok(Value::PeriodList(periods))
            } else {
                Ok(Value::Period(parse_period(raw, tzid, line_num, 1)?))
            }
        }
        ValueType::Integer => Ok(Value::Integer(parse_integer(raw, line_num, 1)?)),
        ValueType::Float => Ok(Value::Float(parse_float(raw, line_num, 1)?)),
        ValueType::Boolean => Ok(Value::Boolean(parse_boolean(raw, line_num, 1)?)),
        ValueType::Recur => Ok(Value::Recur(Box::new(parse_rrule(raw, line_num, 1)?))),
        ValueType::UtcOffset => Ok(Value::UtcOffset(parse_utc_offset(raw, line_num, 1)?)),
        ValueType::Time => Ok(Value::Time(parse_time(raw, line_num, 1)?)),
        ValueType::Binary => Ok(Value::Binary(parse_binary(raw, line_num, 1)?)),
        ValueType::Uri => Ok(Value::Uri(raw.to_string())),
        ValueType::CalAddress => Ok(Value::CalAddress(raw.to_string())),
        ValueType::Unknown => Ok(Value::Unknown(raw.to_string())),
    }
}

/// Returns whether the raw text contains a comma outside any escape.
fn contains_unescaped_comma(raw: &str) -> bool {
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            ',' => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_VEVENT: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:test-uid-123@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART:20260123T140000Z\r\n\
DTEND:20260123T150000Z\r\n\
SUMMARY:Test Event\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    #[test]
    fn parse_simple_vevent() {
        let ical = parse(SIMPLE_VEVENT).unwrap();

        assert_eq!(ical.version(), Some("2.0"));
        assert_eq!(ical.prodid(), Some("-//Test//Test//EN"));

        let events = ical.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].uid(), Some("test-uid-123@example.com"));
        assert_eq!(events[0].summary(), Some("Test Event"));
    }

    #[test]
    fn parse_with_timezone() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:test@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART;TZID=America/New_York:20260123T090000\r\n\
SUMMARY:Morning Meeting\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let event = &ical.events()[0];

        let dt = event.get_property("DTSTART").unwrap().as_datetime().unwrap();
        assert_eq!(dt.tzid(), Some("America/New_York"));
        assert_eq!(dt.hour, 9);
    }

    #[test]
    fn parse_with_valarm() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:alarm@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART:20260123T090000Z\r\n\
SUMMARY:Event with Alarm\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
TRIGGER:-PT15M\r\n\
DESCRIPTION:Reminder\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let event = &ical.events()[0];

        let alarms = event.alarms();
        assert_eq!(alarms.len(), 1);
        assert_eq!(
            alarms[0].get_property("ACTION").unwrap().as_text(),
            Some("DISPLAY")
        );
        let trigger = alarms[0].get_property("TRIGGER").unwrap();
        assert_eq!(trigger.as_duration().unwrap().minutes, 15);
        assert!(trigger.as_duration().unwrap().negative);
    }

    #[test]
    fn parse_with_escaped_text() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:escaped@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART:20260123T090000Z\r\n\
SUMMARY:Meeting\\, important\r\n\
DESCRIPTION:Line 1\\nLine 2\\nLine 3\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let event = &ical.events()[0];

        assert_eq!(event.summary(), Some("Meeting, important"));
        assert_eq!(event.description(), Some("Line 1\nLine 2\nLine 3"));
    }

    #[test]
    fn parse_with_folded_lines() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:folded@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART:20260123T090000Z\r\n\
SUMMARY:This is a very long summary that needs to be folded across\r\n\
  multiple lines to comply with the 75 octet limit\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let summary = ical.events()[0].summary().unwrap();
        assert!(summary.contains("folded across multiple lines"));
    }

    #[test]
    fn parse_missing_begin() {
        assert!(parse("VERSION:2.0\r\n").is_err());
    }

    #[test]
    fn parse_mismatched_end() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
END:VEVENT\r\n";
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MismatchedComponent);
    }

    #[test]
    fn parse_unterminated_component() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:oops@example.com\r\n";
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingEnd);
    }

    #[test]
    fn parse_preserves_x_properties() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:xprop@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART:20260123T090000Z\r\n\
X-APPLE-STRUCTURED-LOCATION:geo:37.7749,-122.4194\r\n\
SUMMARY:Event\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let x_apple = ical.events()[0]
            .get_property("X-APPLE-STRUCTURED-LOCATION")
            .unwrap();
        assert!(x_apple.raw_value.contains("geo:"));
        assert_eq!(x_apple.value_type, ValueType::Text);
    }

    #[test]
    fn uncoercible_value_downgrades_instead_of_failing() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VTODO\r\n\
UID:bad@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART:not-a-datetime\r\n\
END:VTODO\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let dtstart = ical.todos()[0].get_property("DTSTART").unwrap();
        assert_eq!(dtstart.value, Value::Unknown("not-a-datetime".to_string()));
        assert_eq!(dtstart.raw_value, "not-a-datetime");
        assert!(dtstart.is_downgraded());
    }

    #[test]
    fn bare_date_value_is_sniffed_as_date() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VTODO\r\n\
UID:due@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DUE:20111225\r\n\
END:VTODO\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let due = ical.todos()[0].get_property("DUE").unwrap();
        assert_eq!(due.value_type, ValueType::Date);
        assert_eq!(due.as_date().unwrap().day, 25);
    }

    #[test]
    fn exdate_list_keeps_every_value() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:list@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART:20260101T090000Z\r\n\
EXDATE:20260108T090000Z,20260115T090000Z,20260122T090000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let exdate = ical.events()[0].get_property("EXDATE").unwrap();
        match &exdate.value {
            Value::DateTimeList(dts) => {
                assert_eq!(dts.len(), 3);
                assert_eq!(dts[1].day, 15);
            }
            other => panic!("expected DateTimeList, got {other:?}"),
        }
    }

    #[test]
    fn categories_become_text_list() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:cats@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART:20260123T090000Z\r\n\
CATEGORIES:WORK,MEETING\\, WEEKLY\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let categories = ical.events()[0].get_property("CATEGORIES").unwrap();
        assert_eq!(
            categories.value,
            Value::TextList(vec!["WORK".to_string(), "MEETING, WEEKLY".to_string()])
        );
    }

    #[test]
    fn explicit_value_param_wins_over_sniffing() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VTODO\r\n\
UID:explicit@example.com\r\n\
DTSTAMP:20140520T131600Z\r\n\
DTSTART;VALUE=DATE-TIME:20140520T131600Z\r\n\
DUE;VALUE=DATE:20140520\r\n\
END:VTODO\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let todo = &ical.todos()[0];
        assert_eq!(
            todo.get_property("DTSTART").unwrap().value_type,
            ValueType::DateTime
        );
        assert_eq!(todo.get_property("DUE").unwrap().value_type, ValueType::Date);
    }

    #[test]
    fn parse_component_fragment() {
        let input = "\
BEGIN:VTODO\r\n\
UID:fragment@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
END:VTODO\r\n";

        let todo = parse_component_source(input).unwrap();
        assert_eq!(todo.kind, ComponentKind::Todo);
        assert_eq!(todo.uid(), Some("fragment@example.com"));
    }
}
