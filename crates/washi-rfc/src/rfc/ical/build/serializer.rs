//! iCalendar serializer (RFC 5545).
//!
//! Renders the in-memory tree back to the folded, escaped wire format.
//! Serialization of a well-formed tree cannot fail: every legally
//! constructed value has a textual form.

use super::escape::{escape_param_value, escape_text};
use super::fold::fold_line;
use crate::rfc::ical::core::{Component, ICalendar, Parameter, Property, Value};

/// Serializes an iCalendar document to a string.
#[must_use]
pub fn serialize(ical: &ICalendar) -> String {
    serialize_component(&ical.root)
}

/// Serializes a component to a string.
///
/// Properties and child components are emitted in tree order - the
/// serializer imposes no reordering of its own.
#[must_use]
pub fn serialize_component(component: &Component) -> String {
    let mut result = String::new();

    result.push_str(&fold_line(&format!("BEGIN:{}", component.name)));

    for prop in &component.properties {
        result.push_str(&serialize_property(prop));
    }

    for child in &component.children {
        result.push_str(&serialize_component(child));
    }

    result.push_str(&fold_line(&format!("END:{}", component.name)));

    result
}

/// Serializes a single property to a folded line (with trailing CRLF).
#[must_use]
pub fn serialize_property(prop: &Property) -> String {
    let mut line = prop.name.clone();

    for param in &prop.params {
        line.push(';');
        serialize_parameter(param, &mut line);
    }

    line.push(':');
    line.push_str(&serialize_value(&prop.value, &prop.raw_value));

    fold_line(&line)
}

fn serialize_parameter(param: &Parameter, out: &mut String) {
    out.push_str(&param.name);
    out.push('=');

    for (i, value) in param.values.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_param_value(value));
    }
}

/// Serializes a value, preferring the raw text for round-trip fidelity.
///
/// Text values are re-escaped from their decoded form (the caller may have
/// mutated them); everything else round-trips through the raw value, which
/// is kept in sync by the property constructors.
fn serialize_value(value: &Value, raw_value: &str) -> String {
    match value {
        Value::Text(s) => escape_text(s),
        Value::TextList(list) => list
            .iter()
            .map(|s| escape_text(s))
            .collect::<Vec<_>>()
            .join(","),
        _ => raw_value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::Property;
    use crate::rfc::ical::parse;

    #[test]
    fn serialize_simple_vevent() {
        let mut ical = ICalendar::new("-//Test//Test//EN");
        let mut event = Component::event();
        event.add_property(Property::text("UID", "test-uid-123"));
        event.add_property(Property::text("SUMMARY", "Test Event"));
        ical.add_component(event);

        let output = serialize(&ical);

        assert!(output.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(output.ends_with("END:VCALENDAR\r\n"));
        assert!(output.contains("VERSION:2.0\r\n"));
        assert!(output.contains("UID:test-uid-123\r\n"));
        assert!(output.contains("SUMMARY:Test Event\r\n"));
    }

    #[test]
    fn serialize_escapes_text() {
        let mut event = Component::event();
        event.add_property(Property::text("SUMMARY", "Meeting, important"));
        event.add_property(Property::text("DESCRIPTION", "Line 1\nLine 2"));

        let output = serialize_component(&event);

        assert!(output.contains("SUMMARY:Meeting\\, important\r\n"));
        assert!(output.contains("DESCRIPTION:Line 1\\nLine 2\r\n"));
    }

    #[test]
    fn serialize_folds_long_lines() {
        let mut event = Component::event();
        let long_summary = "A".repeat(100);
        event.add_property(Property::text("SUMMARY", &long_summary));

        let output = serialize_component(&event);

        assert!(output.contains("\r\n "));
        let unfolded = output.replace("\r\n ", "");
        assert!(unfolded.contains(&format!("SUMMARY:{long_summary}\r\n")));
    }

    #[test]
    fn serialize_preserves_tree_order() {
        // No canonical reordering: output order is insertion order.
        let mut event = Component::event();
        event.add_property(Property::text("SUMMARY", "Summary"));
        event.add_property(Property::text("UID", "uid"));
        event.add_property(Property::text("DESCRIPTION", "Desc"));

        let output = serialize_component(&event);

        let summary_pos = output.find("SUMMARY:").unwrap();
        let uid_pos = output.find("UID:").unwrap();
        let desc_pos = output.find("DESCRIPTION:").unwrap();
        assert!(summary_pos < uid_pos);
        assert!(uid_pos < desc_pos);
    }

    #[test]
    fn serialize_quotes_parameters() {
        let mut prop = Property::text("ATTENDEE", "mailto:jane@example.com");
        prop.add_param(crate::rfc::ical::core::Parameter::cn("Doe, Jane"));

        let line = serialize_property(&prop);
        assert_eq!(line, "ATTENDEE;CN=\"Doe, Jane\":mailto:jane@example.com\r\n");
    }

    #[test]
    fn roundtrip_simple() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:roundtrip@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART:20260123T140000Z\r\n\
SUMMARY:Roundtrip Test\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let parsed = parse::parse(input).unwrap();
        let output = serialize(&parsed);
        assert_eq!(output, input);
    }
}
