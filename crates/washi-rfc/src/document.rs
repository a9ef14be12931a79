//! Format-sniffing document entry point.
//!
//! A [`Document`] is one parsed interchange file: either a calendar or a
//! sequence of contact cards. The format and version tag resolved here
//! governs escaping, default value types, and folding for everything
//! below it.

use washi_core::diagnostic::Diagnostic;
use washi_core::profile::{FormatKind, SyntaxProfile};

use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::ICalendar;
use crate::rfc::vcard::core::{VCard, VCardVersion};
use crate::rfc::{ical, validation, vcard};

/// A parsed interchange document.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// An iCalendar document (one VCALENDAR tree).
    Calendar(ICalendar),
    /// A contact-card document (one or more VCARDs).
    ContactCards(Vec<VCard>),
}

impl Document {
    /// Parses a document, sniffing the format from its first line.
    ///
    /// ## Errors
    ///
    /// Returns an error if the input starts with neither `BEGIN:VCALENDAR`
    /// nor `BEGIN:VCARD`, or if the body is structurally invalid.
    #[tracing::instrument(skip(input), fields(input_len = input.len()))]
    pub fn parse(input: &str) -> RfcResult<Self> {
        let first_line = input
            .lines()
            .map(str::trim_end)
            .find(|line| !line.is_empty())
            .unwrap_or("");

        if first_line.eq_ignore_ascii_case("BEGIN:VCALENDAR") {
            return Ok(Self::Calendar(ical::parse(input)?));
        }
        if first_line.eq_ignore_ascii_case("BEGIN:VCARD") {
            return Ok(Self::ContactCards(vcard::parse(input)?));
        }

        tracing::warn!(first_line, "unrecognized document format");
        Err(RfcError::Core(washi_core::error::CoreError::InvalidInput(
            format!("unrecognized document format: {first_line}"),
        )))
    }

    /// Serializes the document back to its wire format.
    #[must_use]
    pub fn serialize(&self) -> String {
        match self {
            Self::Calendar(ical) => ical::serialize(ical),
            Self::ContactCards(cards) => vcard::serialize(cards),
        }
    }

    /// Validates the document, returning all diagnostics in order.
    #[must_use]
    pub fn validate(&self) -> Vec<Diagnostic> {
        match self {
            Self::Calendar(ical) => validation::validate(ical),
            Self::ContactCards(cards) => cards
                .iter()
                .flat_map(validation::validate_vcard)
                .collect(),
        }
    }

    /// Returns the syntax profile in effect for this document.
    ///
    /// For a multi-card contact document the first card's version governs.
    #[must_use]
    pub fn profile(&self) -> SyntaxProfile {
        match self {
            Self::Calendar(_) => SyntaxProfile::for_kind(FormatKind::ICalendar),
            Self::ContactCards(cards) => cards
                .first()
                .map_or(VCardVersion::V4, |card| card.version)
                .profile(),
        }
    }

    /// Returns the calendar tree, if this is a calendar document.
    #[must_use]
    pub fn as_calendar(&self) -> Option<&ICalendar> {
        match self {
            Self::Calendar(ical) => Some(ical),
            Self::ContactCards(_) => None,
        }
    }

    /// Returns the cards, if this is a contact-card document.
    #[must_use]
    pub fn as_contact_cards(&self) -> Option<&[VCard]> {
        match self {
            Self::ContactCards(cards) => Some(cards),
            Self::Calendar(_) => None,
        }
    }
}
