//! Static cardinality rule tables.
//!
//! Each component type maps to an ordered list of property rules; the
//! validator walks the list in declaration order, so diagnostic order is
//! deterministic. Names absent from a table are unconstrained - extension
//! and unrecognized properties never produce a diagnostic.

use crate::rfc::ical::core::ComponentKind;

/// How often a property may appear within its component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Required, exactly once.
    ExactlyOne,
    /// Optional, at most once.
    ZeroOrOne,
    /// Required, at least once.
    OneOrMore,
}

/// A single cardinality constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyRule {
    /// Property name the rule constrains.
    pub name: &'static str,
    /// Allowed number of occurrences.
    pub cardinality: Cardinality,
}

const fn one(name: &'static str) -> PropertyRule {
    PropertyRule {
        name,
        cardinality: Cardinality::ExactlyOne,
    }
}

const fn opt(name: &'static str) -> PropertyRule {
    PropertyRule {
        name,
        cardinality: Cardinality::ZeroOrOne,
    }
}

const fn some(name: &'static str) -> PropertyRule {
    PropertyRule {
        name,
        cardinality: Cardinality::OneOrMore,
    }
}

const VCALENDAR_RULES: &[PropertyRule] = &[
    one("PRODID"),
    one("VERSION"),
    opt("CALSCALE"),
    opt("METHOD"),
];

const VEVENT_RULES: &[PropertyRule] = &[
    one("UID"),
    one("DTSTAMP"),
    opt("DTSTART"),
    opt("CLASS"),
    opt("CREATED"),
    opt("DESCRIPTION"),
    opt("GEO"),
    opt("LAST-MODIFIED"),
    opt("LOCATION"),
    opt("ORGANIZER"),
    opt("PRIORITY"),
    opt("SEQUENCE"),
    opt("STATUS"),
    opt("SUMMARY"),
    opt("TRANSP"),
    opt("URL"),
    opt("RECURRENCE-ID"),
    opt("RRULE"),
    opt("DTEND"),
    opt("DURATION"),
];

const VTODO_RULES: &[PropertyRule] = &[
    one("UID"),
    one("DTSTAMP"),
    opt("CLASS"),
    opt("COMPLETED"),
    opt("CREATED"),
    opt("DESCRIPTION"),
    opt("DTSTART"),
    opt("GEO"),
    opt("LAST-MODIFIED"),
    opt("LOCATION"),
    opt("ORGANIZER"),
    opt("PERCENT-COMPLETE"),
    opt("PRIORITY"),
    opt("RECURRENCE-ID"),
    opt("SEQUENCE"),
    opt("STATUS"),
    opt("SUMMARY"),
    opt("URL"),
    opt("RRULE"),
    opt("DUE"),
    opt("DURATION"),
];

const VJOURNAL_RULES: &[PropertyRule] = &[
    one("UID"),
    one("DTSTAMP"),
    opt("CLASS"),
    opt("CREATED"),
    opt("DTSTART"),
    opt("LAST-MODIFIED"),
    opt("ORGANIZER"),
    opt("RECURRENCE-ID"),
    opt("SEQUENCE"),
    opt("STATUS"),
    opt("SUMMARY"),
    opt("URL"),
    opt("RRULE"),
];

const VFREEBUSY_RULES: &[PropertyRule] = &[
    one("UID"),
    one("DTSTAMP"),
    opt("CONTACT"),
    opt("DTSTART"),
    opt("DTEND"),
    opt("ORGANIZER"),
    opt("URL"),
];

const VALARM_RULES: &[PropertyRule] = &[
    one("ACTION"),
    one("TRIGGER"),
    opt("DURATION"),
    opt("REPEAT"),
];

const VTIMEZONE_RULES: &[PropertyRule] = &[one("TZID"), opt("LAST-MODIFIED"), opt("TZURL")];

const TZ_SUBCOMPONENT_RULES: &[PropertyRule] =
    &[one("DTSTART"), one("TZOFFSETFROM"), one("TZOFFSETTO")];

/// Returns the cardinality table for a component kind.
///
/// Unknown components have no table and are only recursed into.
#[must_use]
pub fn rules_for(kind: ComponentKind) -> &'static [PropertyRule] {
    match kind {
        ComponentKind::Calendar => VCALENDAR_RULES,
        ComponentKind::Event => VEVENT_RULES,
        ComponentKind::Todo => VTODO_RULES,
        ComponentKind::Journal => VJOURNAL_RULES,
        ComponentKind::FreeBusy => VFREEBUSY_RULES,
        ComponentKind::Alarm => VALARM_RULES,
        ComponentKind::Timezone => VTIMEZONE_RULES,
        ComponentKind::Standard | ComponentKind::Daylight => TZ_SUBCOMPONENT_RULES,
        ComponentKind::Unknown => &[],
    }
}

/// Cardinality table for a vCard body.
#[must_use]
pub fn vcard_rules() -> &'static [PropertyRule] {
    const VCARD_RULES: &[PropertyRule] = &[
        some("FN"),
        opt("N"),
        opt("BDAY"),
        opt("ANNIVERSARY"),
        opt("GENDER"),
        opt("KIND"),
        opt("PRODID"),
        opt("REV"),
        opt("UID"),
    ];
    VCARD_RULES
}
