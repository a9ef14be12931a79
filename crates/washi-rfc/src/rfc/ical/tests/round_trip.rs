//! Round-trip parsing and serialization tests for iCalendar.
//!
//! Parsing the serializer's output must yield a tree structurally equal to
//! the first parse: same components, properties, parameters, and values.

use test_log::test;

use super::fixtures::*;
use crate::rfc::ical::build::serialize;
use crate::rfc::ical::parse::parse;

fn round_trip(input: &str) {
    let first = parse(input).expect("first parse failed");
    let serialized = serialize(&first);
    let second =
        parse(&serialized).unwrap_or_else(|e| panic!("second parse failed: {e}\n{serialized}"));

    assert_eq!(first, second, "round trip changed the tree:\n{serialized}");
}

#[test]
fn round_trip_event() {
    round_trip(ICAL_EVENT);
}

#[test]
fn round_trip_todo() {
    round_trip(ICAL_TODO);
}

#[test]
fn round_trip_recurring() {
    round_trip(ICAL_RECURRING);
}

#[test]
fn round_trip_timezone() {
    round_trip(ICAL_TIMEZONE);
}

#[test]
fn round_trip_alarm() {
    round_trip(ICAL_ALARM);
}

#[test]
fn round_trip_extensions() {
    round_trip(ICAL_EXTENSIONS);
}

#[test]
fn round_trip_unicode() {
    let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp//Calendar 1.0//EN\r\n\
BEGIN:VEVENT\r\n\
UID:unicode@example.com\r\n\
DTSTAMP:20260101T000000Z\r\n\
DTSTART:20260105T090000Z\r\n\
SUMMARY:日本語の予定\r\n\
DESCRIPTION:カレンダーのテストです。改行\\nもあります。\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
    round_trip(input);
}

#[test]
fn round_trip_folded_long_line() {
    let long_summary = "This summary is deliberately much longer than seventy-five octets \
so that the serializer is forced to fold it across multiple physical lines";
    let input = format!(
        "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp//Calendar 1.0//EN\r\n\
BEGIN:VEVENT\r\n\
UID:folded@example.com\r\n\
DTSTAMP:20260101T000000Z\r\n\
DTSTART:20260105T090000Z\r\n\
SUMMARY:{long_summary}\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n"
    );
    round_trip(&input);

    // And the serialized form actually folds.
    let serialized = serialize(&parse(&input).unwrap());
    for line in serialized.split("\r\n") {
        assert!(line.len() <= 75, "unfolded line escaped: {line}");
    }
}

#[test]
fn round_trip_lenient_unescaped_text() {
    // A semicolon in a TEXT value is tolerated on input and re-serialized
    // escaped; the decoded value survives unchanged.
    let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp//Calendar 1.0//EN\r\n\
BEGIN:VEVENT\r\n\
UID:lenient@example.com\r\n\
DTSTAMP:20260101T000000Z\r\n\
DTSTART:20260105T090000Z\r\n\
LOCATION:Room 4;A\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
    round_trip(input);

    let serialized = serialize(&parse(input).unwrap());
    assert!(serialized.contains("LOCATION:Room 4\\;A\r\n"));
}

#[test]
fn mutation_between_parse_and_serialize() {
    let mut ical = parse(ICAL_TODO).unwrap();

    let todo = &mut ical.root.children[0];
    todo.remove_properties("SUMMARY");
    todo.add_property(crate::rfc::ical::core::Property::text(
        "SUMMARY",
        "Wrap presents, then hide them",
    ));

    let serialized = serialize(&ical);
    assert!(serialized.contains("SUMMARY:Wrap presents\\, then hide them\r\n"));

    let reparsed = parse(&serialized).unwrap();
    assert_eq!(
        reparsed.todos()[0].summary(),
        Some("Wrap presents, then hide them")
    );
}
