//! vCard version conversion.
//!
//! Translates a card between 2.1, 3.0, and 4.0 by rewriting the parameter
//! and encoding conventions that changed between the versions:
//!
//! - 2.1 bare type words (`TEL;HOME;VOICE:`) become `TYPE=` values
//! - 2.1 inline base64 (`PHOTO;BASE64:` / `ENCODING=BASE64`) becomes
//!   `ENCODING=b` under 3.0 and a `data:` URI under 4.0
//! - `CHARSET` parameters are dropped when leaving 2.1
//!
//! Everything out of table passes through unchanged, including extension
//! properties and valueless extension parameters.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use super::core::{VCard, VCardParameter, VCardProperty, VCardValue, VCardVersion};

/// Bare 2.1 parameter words that are TYPE values in 3.0/4.0.
const TYPE_WORDS: &[&str] = &[
    "HOME", "WORK", "CELL", "VOICE", "FAX", "PAGER", "MSG", "VIDEO", "BBS", "MODEM", "CAR",
    "ISDN", "PCS", "PREF", "INTERNET", "X400", "DOM", "INTL", "POSTAL", "PARCEL",
];

/// Converts a card to the target version.
///
/// The input is not modified; the returned card is an independent tree.
#[must_use]
#[tracing::instrument(skip(card), fields(from = card.version.as_str(), to = target.as_str()))]
pub fn convert(card: &VCard, target: VCardVersion) -> VCard {
    let source = card.version;
    let mut out = VCard::with_version(target);

    for prop in &card.properties {
        out.properties.push(convert_property(prop, source, target));
    }

    out
}

fn convert_property(
    prop: &VCardProperty,
    source: VCardVersion,
    target: VCardVersion,
) -> VCardProperty {
    let mut prop = prop.clone();

    if source == VCardVersion::V2_1 && target != VCardVersion::V2_1 {
        upgrade_from_21(&mut prop);
    } else if source != VCardVersion::V2_1 && target == VCardVersion::V2_1 {
        downgrade_to_21(&mut prop);
    } else {
        // 3.0 <-> 4.0: only the binary convention changes.
    }

    if target == VCardVersion::V4 {
        encoding_to_data_uri(&mut prop);
    }
    if source == VCardVersion::V4 && target == VCardVersion::V3 {
        data_uri_to_encoding(&mut prop);
    }

    prop
}

/// Rewrites 2.1 parameter conventions into 3.0/4.0 shape.
fn upgrade_from_21(prop: &mut VCardProperty) {
    prop.remove_param("CHARSET");

    let mut types = Vec::new();
    let mut binary = false;

    prop.params.retain(|param| {
        if param.is_bare() && TYPE_WORDS.contains(&param.name.as_str()) {
            types.push(param.name.clone());
            return false;
        }
        if param.name == "BASE64"
            || (param.name == "ENCODING" && param.has_value("BASE64"))
        {
            binary = true;
            return false;
        }
        // Unrecognized parameters (X-INTERN, ...) pass through verbatim.
        true
    });

    for type_value in types {
        prop.add_type(type_value);
    }

    // Under 4.0 the ENCODING=b marker is rewritten into a data: URI by the
    // caller; under 3.0 it is the final form.
    if binary {
        prop.add_param(VCardParameter::encoding("b"));
    }
}

/// Rewrites 3.0/4.0 parameter conventions into 2.1 shape.
fn downgrade_to_21(prop: &mut VCardProperty) {
    let mut types = Vec::new();
    let mut binary = false;

    prop.params.retain(|param| {
        if param.name == "TYPE" {
            types.extend(param.values.iter().cloned());
            return false;
        }
        if param.name == "ENCODING" && (param.has_value("B") || param.has_value("BASE64")) {
            binary = true;
            return false;
        }
        true
    });

    for type_value in types {
        prop.add_param(VCardParameter::bare(type_value.to_ascii_uppercase()));
    }

    if let Some((payload, bytes)) = data_uri_payload(&prop.value) {
        prop.raw_value = payload;
        prop.value = VCardValue::Binary(bytes);
        binary = true;
    }

    if binary {
        prop.add_param(VCardParameter::bare("BASE64"));
    }
}

/// Turns `ENCODING=b` inline binary into a `data:` URI (the 4.0 form).
fn encoding_to_data_uri(prop: &mut VCardProperty) {
    let had_encoding = prop
        .params
        .iter()
        .any(|p| p.name == "ENCODING" && (p.has_value("B") || p.has_value("BASE64")));
    if !had_encoding {
        return;
    }

    prop.remove_param("ENCODING");
    let payload: String = prop.raw_value.split_whitespace().collect();
    let uri = format!("data:application/octet-stream;base64,{payload}");
    prop.raw_value = uri.clone();
    prop.value = VCardValue::Uri(uri);
}

/// Turns a base64 `data:` URI back into `ENCODING=b` inline binary.
fn data_uri_to_encoding(prop: &mut VCardProperty) {
    let Some((payload, bytes)) = data_uri_payload(&prop.value) else {
        return;
    };

    prop.raw_value = payload;
    prop.value = VCardValue::Binary(bytes);
    prop.add_param(VCardParameter::encoding("b"));
}

/// Extracts the base64 payload of a `data:...;base64,` URI value.
fn data_uri_payload(value: &VCardValue) -> Option<(String, Vec<u8>)> {
    let VCardValue::Uri(uri) = value else {
        return None;
    };
    let rest = uri.strip_prefix("data:")?;
    let (head, payload) = rest.split_once(',')?;
    if !head.ends_with(";base64") {
        return None;
    }
    let bytes = BASE64.decode(payload).ok()?;
    Some((payload.to_string(), bytes))
}
