//! vCard serializer.
//!
//! Emits `BEGIN:VCARD`, `VERSION`, the properties in tree order, and
//! `END:VCARD`. Never fails on a well-formed in-memory card.

use washi_core::profile::EscapeDialect;

use super::escape::{escape_component, escape_param_value, escape_text};
use super::fold::fold_line;
use crate::rfc::vcard::core::{
    Address, Organization, StructuredName, VCard, VCardParameter, VCardProperty, VCardValue,
    VCardVersion,
};

/// Serializes one or more vCards to a string.
#[must_use]
pub fn serialize(cards: &[VCard]) -> String {
    let mut output = String::new();
    for card in cards {
        serialize_vcard(card, &mut output);
    }
    output
}

/// Serializes a single vCard to a string.
#[must_use]
#[tracing::instrument(skip(card), fields(version = card.version.as_str()))]
pub fn serialize_single(card: &VCard) -> String {
    let mut output = String::new();
    serialize_vcard(card, &mut output);
    output
}

fn serialize_vcard(card: &VCard, output: &mut String) {
    output.push_str("BEGIN:VCARD\r\n");

    // VERSION is structural and always comes first.
    output.push_str("VERSION:");
    output.push_str(card.version.as_str());
    output.push_str("\r\n");

    for prop in &card.properties {
        serialize_property(prop, card.version, output);
    }

    output.push_str("END:VCARD\r\n");
}

fn serialize_property(prop: &VCardProperty, version: VCardVersion, output: &mut String) {
    let mut line = String::new();

    if let Some(ref group) = prop.group {
        line.push_str(group);
        line.push('.');
    }

    line.push_str(&prop.name);

    for param in &prop.params {
        serialize_parameter(param, version, &mut line);
    }

    line.push(':');
    serialize_value(&prop.value, &prop.raw_value, version.profile().escapes, &mut line);

    output.push_str(&fold_line(&line));
}

/// Writes one parameter.
///
/// A valueless parameter is written bare under 2.1 (`;BASE64`) and with an
/// empty value under 3.0/4.0 (`;X-INTERN=`).
fn serialize_parameter(param: &VCardParameter, version: VCardVersion, output: &mut String) {
    output.push(';');
    output.push_str(&param.name);

    if param.is_bare() && version == VCardVersion::V2_1 {
        return;
    }

    output.push('=');
    for (i, value) in param.values.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        output.push_str(&escape_param_value(value));
    }
}

fn serialize_value(
    value: &VCardValue,
    raw_value: &str,
    dialect: EscapeDialect,
    output: &mut String,
) {
    match value {
        VCardValue::Text(s) => output.push_str(&escape_text(s, dialect)),
        VCardValue::TextList(list) => {
            for (i, s) in list.iter().enumerate() {
                if i > 0 {
                    output.push(',');
                }
                output.push_str(&escape_component(s));
            }
        }
        VCardValue::StructuredName(name) => serialize_structured_name(name, output),
        VCardValue::Address(addr) => serialize_address(addr, output),
        VCardValue::Organization(org) => serialize_organization(org, output),
        VCardValue::DateAndOrTime(dt) => output.push_str(&dt.to_string()),
        VCardValue::Boolean(b) => output.push_str(if *b { "TRUE" } else { "FALSE" }),
        VCardValue::Integer(i) => output.push_str(&i.to_string()),
        VCardValue::Float(f) => output.push_str(&f.to_string()),
        VCardValue::UtcOffset(offset) => output.push_str(&offset.to_string()),
        // URIs are emitted verbatim; binary re-emits its original base64.
        VCardValue::Uri(s) | VCardValue::LanguageTag(s) | VCardValue::Unknown(s) => {
            output.push_str(s);
        }
        VCardValue::Binary(_) => output.push_str(raw_value),
    }
}

fn serialize_component_list(list: &[String], output: &mut String) {
    for (i, s) in list.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        output.push_str(&escape_component(s));
    }
}

fn serialize_structured_name(name: &StructuredName, output: &mut String) {
    // family;given;additional;prefixes;suffixes
    serialize_component_list(&name.family, output);
    output.push(';');
    serialize_component_list(&name.given, output);
    output.push(';');
    serialize_component_list(&name.additional, output);
    output.push(';');
    serialize_component_list(&name.prefixes, output);
    output.push(';');
    serialize_component_list(&name.suffixes, output);
}

fn serialize_address(addr: &Address, output: &mut String) {
    // pobox;extended;street;locality;region;postal;country
    serialize_component_list(&addr.po_box, output);
    output.push(';');
    serialize_component_list(&addr.extended, output);
    output.push(';');
    serialize_component_list(&addr.street, output);
    output.push(';');
    serialize_component_list(&addr.locality, output);
    output.push(';');
    serialize_component_list(&addr.region, output);
    output.push(';');
    serialize_component_list(&addr.postal_code, output);
    output.push(';');
    serialize_component_list(&addr.country, output);
}

fn serialize_organization(org: &Organization, output: &mut String) {
    output.push_str(&escape_component(&org.name));
    for unit in &org.units {
        output.push(';');
        output.push_str(&escape_component(unit));
    }
}
