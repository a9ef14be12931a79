//! vCard value variants.

use super::datetime::{DateAndOrTime, VCardUtcOffset};
use super::structured::{Address, Organization, StructuredName};

/// A vCard property value.
#[derive(Debug, Clone, PartialEq)]
pub enum VCardValue {
    /// Text value (unescaped).
    Text(String),
    /// Multi-valued text (comma-separated on the wire).
    TextList(Vec<String>),
    /// URI value.
    Uri(String),
    /// Date, time, or date-time value, possibly partial.
    DateAndOrTime(DateAndOrTime),
    /// Structured name (N property).
    StructuredName(StructuredName),
    /// Address (ADR property).
    Address(Address),
    /// Organization (ORG property).
    Organization(Organization),
    /// Boolean value.
    Boolean(bool),
    /// Integer value.
    Integer(i64),
    /// Float value.
    Float(f64),
    /// UTC offset value (TZ property).
    UtcOffset(VCardUtcOffset),
    /// Language tag value (LANG property).
    LanguageTag(String),
    /// Binary data (decoded from inline base64).
    Binary(Vec<u8>),
    /// Opaque value: unrecognized type or failed coercion, kept verbatim.
    Unknown(String),
}

impl VCardValue {
    /// Returns the value as text if applicable.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Unknown(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a URI if applicable.
    #[must_use]
    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Self::Uri(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a structured name if applicable.
    #[must_use]
    pub fn as_structured_name(&self) -> Option<&StructuredName> {
        match self {
            Self::StructuredName(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the value as an address if applicable.
    #[must_use]
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            Self::Address(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the value as an organization if applicable.
    #[must_use]
    pub fn as_organization(&self) -> Option<&Organization> {
        match self {
            Self::Organization(o) => Some(o),
            _ => None,
        }
    }

    /// Returns the decoded binary payload if applicable.
    #[must_use]
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(b) => Some(b),
            _ => None,
        }
    }
}

impl From<String> for VCardValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for VCardValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<StructuredName> for VCardValue {
    fn from(n: StructuredName) -> Self {
        Self::StructuredName(n)
    }
}

impl From<Address> for VCardValue {
    fn from(a: Address) -> Self {
        Self::Address(a)
    }
}

impl From<Organization> for VCardValue {
    fn from(o: Organization) -> Self {
        Self::Organization(o)
    }
}
