//! Per-document syntax configuration.
//!
//! The interchange formats share one line-based grammar but differ in
//! escaping rules, default value types, and folding width depending on the
//! format and version in effect. Rather than querying "the current version"
//! ad hoc, a [`SyntaxProfile`] is resolved once per document and threaded
//! through parser and serializer calls.

use std::fmt;

/// Which wire format a document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// iCalendar 2.0 (RFC 5545).
    ICalendar,
    /// vCard 2.1 (the pre-RFC versit specification).
    VCard21,
    /// vCard 3.0 (RFC 2426).
    VCard30,
    /// vCard 4.0 (RFC 6350).
    VCard40,
}

impl FormatKind {
    /// Returns the `VERSION` property value for this format.
    #[must_use]
    pub const fn version_str(self) -> &'static str {
        match self {
            Self::ICalendar => "2.0",
            Self::VCard21 => "2.1",
            Self::VCard30 => "3.0",
            Self::VCard40 => "4.0",
        }
    }

    /// Returns whether this is one of the contact-card formats.
    #[must_use]
    pub const fn is_vcard(self) -> bool {
        matches!(self, Self::VCard21 | Self::VCard30 | Self::VCard40)
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ICalendar => write!(f, "iCalendar {}", self.version_str()),
            _ => write!(f, "vCard {}", self.version_str()),
        }
    }
}

/// Which backslash-escape table applies to TEXT values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscapeDialect {
    /// Full table: `\\`, `\,`, `\;`, `\n` (iCalendar and vCard 3.0/4.0).
    Full,
    /// vCard 2.1: `\\`, `\;`, `\n` only — commas are literal.
    Versit,
}

/// Resolved syntax settings for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxProfile {
    /// Format and version in effect.
    pub kind: FormatKind,
    /// Maximum logical line length in octets, not counting CRLF.
    pub max_line_octets: usize,
    /// Escape table for TEXT values.
    pub escapes: EscapeDialect,
    /// Whether bare, valueless parameters (`PHOTO;BASE64:…`) are legal.
    pub bare_params: bool,
}

impl SyntaxProfile {
    /// Resolves the profile for a format kind.
    #[must_use]
    pub const fn for_kind(kind: FormatKind) -> Self {
        match kind {
            FormatKind::ICalendar | FormatKind::VCard30 | FormatKind::VCard40 => Self {
                kind,
                max_line_octets: 75,
                escapes: EscapeDialect::Full,
                bare_params: false,
            },
            FormatKind::VCard21 => Self {
                kind,
                max_line_octets: 75,
                escapes: EscapeDialect::Versit,
                bare_params: true,
            },
        }
    }
}
