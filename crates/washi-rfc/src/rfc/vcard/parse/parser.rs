//! vCard document parser.
//!
//! Tokenizes cards, lifts the VERSION property into the card's version
//! tag, and coerces values with the escape dialect and default value types
//! of that version. Like the iCalendar parser, value coercion is lenient:
//! a value that fails to coerce is kept verbatim as an opaque value.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{ContentLine, parse_content_line, split_lines};
use super::values::{
    parse_address, parse_date_and_or_time, parse_organization, parse_structured_name,
    parse_utc_offset, split_component, unescape_text,
};
use crate::rfc::vcard::core::{VCard, VCardProperty, VCardValue, VCardVersion};
use washi_core::profile::EscapeDialect;

/// Parses one or more vCards from a string.
///
/// ## Errors
///
/// Returns an error if the input is not structurally valid vCard.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<Vec<VCard>> {
    tracing::debug!("Parsing vCard input");

    let lines = split_lines(input);
    if lines.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::MissingBegin,
            1,
            "empty input",
        ));
    }

    let content_lines: Vec<(usize, ContentLine)> = lines
        .into_iter()
        .map(|(line_num, line)| parse_content_line(&line, line_num).map(|cl| (line_num, cl)))
        .collect::<ParseResult<_>>()?;

    let mut cards = Vec::new();
    let mut iter = content_lines.into_iter();

    while let Some((line_num, cl)) = iter.next() {
        if cl.name != "BEGIN" || !cl.value.eq_ignore_ascii_case("VCARD") {
            return Err(ParseError::new(
                ParseErrorKind::MissingBegin,
                line_num,
                format!("expected BEGIN:VCARD, got {}", cl.name),
            ));
        }

        cards.push(parse_card_body(&mut iter, line_num)?);
    }

    tracing::debug!(count = cards.len(), "vCard input parsed");

    Ok(cards)
}

/// Parses exactly one vCard from a string.
///
/// ## Errors
///
/// Returns an error if the input does not hold exactly one valid vCard.
pub fn parse_single(input: &str) -> ParseResult<VCard> {
    let cards = parse(input)?;
    match <[VCard; 1]>::try_from(cards) {
        Ok([card]) => Ok(card),
        Err(cards) => Err(ParseError::new(
            ParseErrorKind::MissingBegin,
            1,
            format!("expected exactly one vCard, found {}", cards.len()),
        )),
    }
}

/// Collects one card's content lines (BEGIN already consumed), resolves
/// the version, then coerces every property.
fn parse_card_body(
    iter: &mut impl Iterator<Item = (usize, ContentLine)>,
    begin_line_num: usize,
) -> ParseResult<VCard> {
    let mut body: Vec<(usize, ContentLine)> = Vec::new();
    let mut terminated = false;

    for (line_num, cl) in iter.by_ref() {
        match cl.name.as_str() {
            "END" => {
                if !cl.value.eq_ignore_ascii_case("VCARD") {
                    return Err(ParseError::new(
                        ParseErrorKind::MissingEnd,
                        line_num,
                        format!("expected END:VCARD, got END:{}", cl.value),
                    ));
                }
                terminated = true;
                break;
            }
            _ => body.push((line_num, cl)),
        }
    }

    if !terminated {
        return Err(ParseError::new(
            ParseErrorKind::MissingEnd,
            begin_line_num,
            "missing END:VCARD",
        ));
    }

    // The version governs escaping and default value types for the whole
    // card, so it is resolved before any value is interpreted. Absent or
    // unrecognized versions fall back to 4.0.
    let version = body
        .iter()
        .find(|(_, cl)| cl.name == "VERSION")
        .and_then(|(_, cl)| VCardVersion::parse(&cl.value))
        .unwrap_or_default();

    let mut card = VCard::with_version(version);
    for (line_num, cl) in body {
        if cl.name == "VERSION" {
            continue;
        }
        card.properties.push(build_property(cl, version, line_num));
    }

    Ok(card)
}

/// Builds a property from a content line, coercing its value leniently.
fn build_property(cl: ContentLine, version: VCardVersion, line_num: usize) -> VCardProperty {
    let value = match coerce_value(&cl, version, line_num) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(
                property = %cl.name,
                error = %err,
                "value failed to coerce; keeping raw text"
            );
            VCardValue::Unknown(cl.value.clone())
        }
    };

    VCardProperty {
        group: cl.group,
        name: cl.name,
        params: cl.params,
        value,
        raw_value: cl.value,
    }
}

/// Whether a property carries inline base64 data, in any of the spellings
/// the three versions use.
fn is_inline_binary(cl: &ContentLine) -> bool {
    if cl.has_param("BASE64") {
        return true;
    }
    cl.get_param_value("ENCODING")
        .is_some_and(|v| v.eq_ignore_ascii_case("B") || v.eq_ignore_ascii_case("BASE64"))
}

fn coerce_value(
    cl: &ContentLine,
    version: VCardVersion,
    line_num: usize,
) -> ParseResult<VCardValue> {
    let dialect = version.profile().escapes;

    // Explicit VALUE parameter wins over per-name defaults.
    if let Some(explicit) = cl.get_param_value("VALUE") {
        return coerce_explicit(explicit, cl, dialect, line_num);
    }

    if is_inline_binary(cl) {
        return Ok(VCardValue::Binary(decode_base64(&cl.value, line_num)?));
    }

    Ok(match cl.name.as_str() {
        "N" => VCardValue::StructuredName(parse_structured_name(&cl.value, dialect)),
        "ADR" => VCardValue::Address(parse_address(&cl.value, dialect)),
        "ORG" => VCardValue::Organization(parse_organization(&cl.value, dialect)),
        "CATEGORIES" | "NICKNAME" => VCardValue::TextList(split_component(&cl.value, dialect)),
        "BDAY" | "ANNIVERSARY" | "REV" => {
            VCardValue::DateAndOrTime(parse_date_and_or_time(&cl.value, line_num)?)
        }
        "TZ" => match parse_utc_offset(&cl.value, line_num) {
            Ok(offset) => VCardValue::UtcOffset(offset),
            // 4.0 allows text timezone names.
            Err(_) => VCardValue::Text(unescape_text(&cl.value, dialect)),
        },
        "LANG" => VCardValue::LanguageTag(cl.value.clone()),
        "PHOTO" | "LOGO" | "SOUND" | "KEY" | "URL" | "SOURCE" | "IMPP" | "MEMBER" | "FBURL"
        | "CALURI" | "CALADRURI" | "GEO" => VCardValue::Uri(cl.value.clone()),
        _ => VCardValue::Text(unescape_text(&cl.value, dialect)),
    })
}

fn coerce_explicit(
    explicit: &str,
    cl: &ContentLine,
    dialect: EscapeDialect,
    line_num: usize,
) -> ParseResult<VCardValue> {
    let err = |context: String| ParseError::new(ParseErrorKind::InvalidPropertyName, line_num, context);

    Ok(match explicit.to_ascii_uppercase().as_str() {
        "TEXT" => VCardValue::Text(unescape_text(&cl.value, dialect)),
        "URI" => VCardValue::Uri(cl.value.clone()),
        "DATE" | "TIME" | "DATE-TIME" | "DATE-AND-OR-TIME" | "TIMESTAMP" => {
            VCardValue::DateAndOrTime(parse_date_and_or_time(&cl.value, line_num)?)
        }
        "BOOLEAN" => match cl.value.to_ascii_uppercase().as_str() {
            "TRUE" => VCardValue::Boolean(true),
            "FALSE" => VCardValue::Boolean(false),
            other => return Err(err(format!("invalid boolean: {other}"))),
        },
        "INTEGER" => VCardValue::Integer(
            cl.value
                .parse()
                .map_err(|_| err(format!("invalid integer: {}", cl.value)))?,
        ),
        "FLOAT" => VCardValue::Float(
            cl.value
                .parse()
                .map_err(|_| err(format!("invalid float: {}", cl.value)))?,
        ),
        "UTC-OFFSET" => VCardValue::UtcOffset(parse_utc_offset(&cl.value, line_num)?),
        "LANGUAGE-TAG" => VCardValue::LanguageTag(cl.value.clone()),
        "BINARY" => VCardValue::Binary(decode_base64(&cl.value, line_num)?),
        _ => VCardValue::Unknown(cl.value.clone()),
    })
}

fn decode_base64(s: &str, line_num: usize) -> ParseResult<Vec<u8>> {
    BASE64.decode(s.trim()).map_err(|e| {
        ParseError::new(
            ParseErrorKind::InvalidParameter,
            line_num,
            format!("invalid base64 payload: {e}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VCARD_21: &str = "\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
N:Doe;Jon;;;\r\n\
FN:Jon Doe\r\n\
EMAIL;X-INTERN:foo@example.org\r\n\
UID:foo\r\n\
END:VCARD\r\n";

    #[test]
    fn parse_v21_card() {
        let card = parse_single(VCARD_21).unwrap();
        assert_eq!(card.version, VCardVersion::V2_1);
        assert_eq!(card.formatted_name(), Some("Jon Doe"));
        assert_eq!(card.name().unwrap().family, vec!["Doe"]);

        // The bare X-INTERN parameter survives.
        let email = card.get_property("EMAIL").unwrap();
        assert!(email.get_param("X-INTERN").unwrap().is_bare());
    }

    #[test]
    fn version_is_lifted_not_stored() {
        let card = parse_single(VCARD_21).unwrap();
        assert!(card.get_property("VERSION").is_none());
    }

    #[test]
    fn parse_v4_with_structured_values() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Jane Example\r\n\
N:Example;Jane;;Dr.;\r\n\
ORG:ABC\\, Inc.;Marketing\r\n\
ADR;TYPE=work:;;123 Main St;Anytown;CA;91921;USA\r\n\
CATEGORIES:friends,co-workers\r\n\
END:VCARD\r\n";

        let card = parse_single(input).unwrap();
        assert_eq!(card.name().unwrap().prefixes, vec!["Dr."]);

        let org = card.get_property("ORG").unwrap().value.as_organization().unwrap();
        assert_eq!(org.name, "ABC, Inc.");

        let adr = card.get_property("ADR").unwrap().value.as_address().unwrap();
        assert_eq!(adr.locality, vec!["Anytown"]);

        assert_eq!(
            card.get_property("CATEGORIES").unwrap().value,
            VCardValue::TextList(vec!["friends".to_string(), "co-workers".to_string()])
        );
    }

    #[test]
    fn inline_base64_photo_decodes() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
FN:Photo Holder\r\n\
PHOTO;BASE64:cmFuZG9tX3N0dWZm\r\n\
END:VCARD\r\n";

        let card = parse_single(input).unwrap();
        let photo = card.get_property("PHOTO").unwrap();
        assert_eq!(photo.value.as_binary(), Some(b"random_stuff".as_slice()));
        assert_eq!(photo.raw_value, "cmFuZG9tX3N0dWZm");
    }

    #[test]
    fn v21_commas_are_literal_text() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
FN:Jon Doe\r\n\
NOTE:One, two, three\r\n\
END:VCARD\r\n";

        let card = parse_single(input).unwrap();
        assert_eq!(
            card.get_property("NOTE").unwrap().as_text(),
            Some("One, two, three")
        );
    }

    #[test]
    fn bday_partial_date() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:No Year\r\n\
BDAY:--0415\r\n\
END:VCARD\r\n";

        let card = parse_single(input).unwrap();
        assert!(matches!(
            card.get_property("BDAY").unwrap().value,
            VCardValue::DateAndOrTime(_)
        ));
    }

    #[test]
    fn uncoercible_value_downgrades() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Bad Birthday\r\n\
BDAY:someday soon\r\n\
END:VCARD\r\n";

        let card = parse_single(input).unwrap();
        assert_eq!(
            card.get_property("BDAY").unwrap().value,
            VCardValue::Unknown("someday soon".to_string())
        );
    }

    #[test]
    fn multiple_cards() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:First\r\n\
END:VCARD\r\n\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Second\r\n\
END:VCARD\r\n";

        let cards = parse(input).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].formatted_name(), Some("Second"));
    }

    #[test]
    fn missing_end_fails() {
        let input = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Unterminated\r\n";
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingEnd);
    }

    #[test]
    fn non_vcard_root_fails() {
        let err = parse("BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingBegin);
    }
}
