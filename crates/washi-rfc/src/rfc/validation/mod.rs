//! Rule-table validation for parsed documents.
//!
//! Validation walks a tree depth-first and collects [`Diagnostic`]s; it
//! never fails and never mutates. Per component the order is fixed:
//! cardinality violations in rule-table order, then per-property coercion
//! failures in declaration order, then cross-property rules, then lenient
//! parameter warnings, then child components. Running validation twice
//! yields the same sequence.

pub mod rules;

use washi_core::diagnostic::Diagnostic;

use crate::rfc::ical::core::{Component, ComponentKind, ICalendar, Property, Value};
use crate::rfc::vcard::core::VCard;
use rules::{Cardinality, rules_for, vcard_rules};

pub use washi_core::diagnostic::{Severity, error_messages};

/// Validates a complete iCalendar document.
#[must_use]
#[tracing::instrument(skip(ical))]
pub fn validate(ical: &ICalendar) -> Vec<Diagnostic> {
    validate_component(&ical.root)
}

/// Validates a component and all of its descendants.
#[must_use]
pub fn validate_component(component: &Component) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    validate_into(component, &mut diagnostics);
    tracing::debug!(count = diagnostics.len(), "validation finished");
    diagnostics
}

fn validate_into(component: &Component, diagnostics: &mut Vec<Diagnostic>) {
    check_cardinality(component, diagnostics);
    check_coercions(component, diagnostics);
    check_cross_property(component, diagnostics);
    check_parameters(component, diagnostics);

    for child in &component.children {
        validate_into(child, diagnostics);
    }
}

fn check_cardinality(component: &Component, diagnostics: &mut Vec<Diagnostic>) {
    for rule in rules_for(component.kind) {
        let count = component.count_properties(rule.name);
        if let Some(message) = cardinality_message(rule.name, rule.cardinality, count, &component.name)
        {
            diagnostics.push(Diagnostic::error(rule.name, message));
        }
    }
}

fn cardinality_message(
    name: &str,
    cardinality: Cardinality,
    count: usize,
    component_name: &str,
) -> Option<String> {
    match cardinality {
        Cardinality::ExactlyOne if count != 1 => Some(format!(
            "{name} MUST appear exactly once in a {component_name} component"
        )),
        Cardinality::ZeroOrOne if count > 1 => Some(format!(
            "{name} MUST NOT appear more than once in a {component_name} component"
        )),
        Cardinality::OneOrMore if count == 0 => Some(format!(
            "{name} MUST appear at least once in a {component_name} component"
        )),
        _ => None,
    }
}

/// Reports properties whose value failed to coerce to the resolved type.
fn check_coercions(component: &Component, diagnostics: &mut Vec<Diagnostic>) {
    for prop in &component.properties {
        if prop.is_downgraded() {
            diagnostics.push(Diagnostic::error(
                &prop.name,
                format!(
                    "{} does not hold a valid {} value",
                    prop.name, prop.value_type
                ),
            ));
        }
    }
}

fn check_cross_property(component: &Component, diagnostics: &mut Vec<Diagnostic>) {
    match component.kind {
        ComponentKind::Todo => {
            check_start_end_pair(component, "DUE", diagnostics);
        }
        ComponentKind::Event => {
            check_start_end_pair(component, "DTEND", diagnostics);
        }
        _ => {}
    }
}

/// Checks an end-of-interval property (`DUE`/`DTEND`) against `DTSTART`:
/// the two must share a value type, and the end must not precede the start.
///
/// The ordering check only runs when the types match, so a single problem
/// yields a single diagnostic.
fn check_start_end_pair(component: &Component, end_name: &str, diagnostics: &mut Vec<Diagnostic>) {
    let (Some(end_prop), Some(start_prop)) = (
        component.get_property(end_name),
        component.get_property("DTSTART"),
    ) else {
        return;
    };

    let (Some(end_is_date), Some(start_is_date)) =
        (date_kind(end_prop), date_kind(start_prop))
    else {
        // One of the values failed coercion; already reported.
        return;
    };

    if end_is_date != start_is_date {
        diagnostics.push(Diagnostic::error(
            end_name,
            format!("The value type (DATE or DATE-TIME) must be identical for {end_name} and DTSTART"),
        ));
        return;
    }

    if let (Some(end_key), Some(start_key)) = (time_key(end_prop), time_key(start_prop))
        && end_key < start_key
    {
        diagnostics.push(Diagnostic::error(
            end_name,
            format!("{end_name} must occur after DTSTART"),
        ));
    }
}

/// Whether a property holds a DATE (`Some(true)`), a DATE-TIME
/// (`Some(false)`), or neither (`None`).
fn date_kind(prop: &Property) -> Option<bool> {
    match &prop.value {
        Value::Date(_) => Some(true),
        Value::DateTime(_) => Some(false),
        _ => None,
    }
}

/// A naive, zone-ignoring ordering key for DATE and DATE-TIME values.
fn time_key(prop: &Property) -> Option<(u16, u8, u8, u8, u8, u8)> {
    match &prop.value {
        Value::Date(d) => Some((d.year, d.month, d.day, 0, 0, 0)),
        Value::DateTime(dt) => Some((dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second)),
        _ => None,
    }
}

/// Flags lenient-mode parameter tolerances as warnings.
fn check_parameters(component: &Component, diagnostics: &mut Vec<Diagnostic>) {
    for prop in &component.properties {
        for param in &prop.params {
            if param.lenient {
                diagnostics.push(Diagnostic::warning(
                    &prop.name,
                    format!(
                        "{} parameter value on {} contains unquoted reserved characters",
                        param.name, prop.name
                    ),
                ));
            }
        }
    }
}

/// Validates a vCard body against its cardinality table.
#[must_use]
pub fn validate_vcard(card: &VCard) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for rule in vcard_rules() {
        let count = card.count_properties(rule.name);
        if let Some(message) = cardinality_message(rule.name, rule.cardinality, count, "VCARD") {
            diagnostics.push(Diagnostic::error(rule.name, message));
        }
    }

    diagnostics
}
