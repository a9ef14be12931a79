//! vCard wrapper type.

use washi_core::profile::{FormatKind, SyntaxProfile};

use super::property::VCardProperty;
use super::structured::StructuredName;
use super::value::VCardValue;

/// vCard version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VCardVersion {
    /// vCard 2.1 (the pre-RFC versit specification).
    V2_1,
    /// vCard 3.0 (RFC 2426).
    V3,
    /// vCard 4.0 (RFC 6350).
    #[default]
    V4,
}

impl VCardVersion {
    /// Parses from a `VERSION` property value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "2.1" => Some(Self::V2_1),
            "3.0" => Some(Self::V3),
            "4.0" => Some(Self::V4),
            _ => None,
        }
    }

    /// Returns the version string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V2_1 => "2.1",
            Self::V3 => "3.0",
            Self::V4 => "4.0",
        }
    }

    /// Returns the syntax profile in effect for this version.
    #[must_use]
    pub const fn profile(self) -> SyntaxProfile {
        SyntaxProfile::for_kind(self.format_kind())
    }

    /// Returns the format kind tag for this version.
    #[must_use]
    pub const fn format_kind(self) -> FormatKind {
        match self {
            Self::V2_1 => FormatKind::VCard21,
            Self::V3 => FormatKind::VCard30,
            Self::V4 => FormatKind::VCard40,
        }
    }
}

impl core::str::FromStr for VCardVersion {
    type Err = washi_core::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| washi_core::error::CoreError::UnknownVersion(s.to_string()))
    }
}

/// A complete vCard.
///
/// The `VERSION` property is lifted into the `version` field; it is not
/// kept in `properties` and the serializer re-emits it first.
#[derive(Debug, Clone, PartialEq)]
pub struct VCard {
    /// vCard version.
    pub version: VCardVersion,
    /// All other properties in order of appearance.
    pub properties: Vec<VCardProperty>,
}

impl VCard {
    /// Creates a new, empty vCard 4.0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: VCardVersion::V4,
            properties: Vec::new(),
        }
    }

    /// Creates a vCard with the specified version.
    #[must_use]
    pub fn with_version(version: VCardVersion) -> Self {
        Self {
            version,
            properties: Vec::new(),
        }
    }

    /// Adds a property to the vCard.
    pub fn add_property(&mut self, prop: VCardProperty) {
        self.properties.push(prop);
    }

    /// Returns all properties with the given name, in declaration order.
    #[must_use]
    pub fn get_properties(&self, name: &str) -> Vec<&VCardProperty> {
        let name_upper = name.to_ascii_uppercase();
        self.properties
            .iter()
            .filter(|p| p.name == name_upper)
            .collect()
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&VCardProperty> {
        let name_upper = name.to_ascii_uppercase();
        self.properties.iter().find(|p| p.name == name_upper)
    }

    /// Counts properties with the given name.
    #[must_use]
    pub fn count_properties(&self, name: &str) -> usize {
        let name_upper = name.to_ascii_uppercase();
        self.properties
            .iter()
            .filter(|p| p.name == name_upper)
            .count()
    }

    /// Returns the FN (formatted name) value.
    #[must_use]
    pub fn formatted_name(&self) -> Option<&str> {
        self.get_property("FN")?.as_text()
    }

    /// Returns the N (structured name) value.
    #[must_use]
    pub fn name(&self) -> Option<&StructuredName> {
        match &self.get_property("N")?.value {
            VCardValue::StructuredName(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the UID value.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.get_property("UID")?.as_text()
    }

    /// Returns all EMAIL property values.
    #[must_use]
    pub fn emails(&self) -> Vec<&str> {
        self.get_properties("EMAIL")
            .iter()
            .filter_map(|p| p.as_text())
            .collect()
    }

    /// Returns all TEL property values.
    #[must_use]
    pub fn telephones(&self) -> Vec<&str> {
        self.get_properties("TEL")
            .iter()
            .filter_map(|p| match &p.value {
                VCardValue::Text(s) | VCardValue::Uri(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for VCard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vcard_new() {
        let card = VCard::new();
        assert_eq!(card.version, VCardVersion::V4);
        assert!(card.properties.is_empty());
    }

    #[test]
    fn vcard_version_parse() {
        assert_eq!(VCardVersion::parse("2.1"), Some(VCardVersion::V2_1));
        assert_eq!(VCardVersion::parse("3.0"), Some(VCardVersion::V3));
        assert_eq!(VCardVersion::parse("4.0"), Some(VCardVersion::V4));
        assert_eq!(VCardVersion::parse("5.0"), None);
    }

    #[test]
    fn version_profiles_differ() {
        assert!(VCardVersion::V2_1.profile().bare_params);
        assert!(!VCardVersion::V3.profile().bare_params);
    }

    #[test]
    fn vcard_formatted_name() {
        let mut card = VCard::new();
        card.add_property(VCardProperty::text("FN", "John Doe"));
        assert_eq!(card.formatted_name(), Some("John Doe"));
    }

    #[test]
    fn vcard_emails() {
        let mut card = VCard::new();
        card.add_property(VCardProperty::text("EMAIL", "john@example.com"));
        card.add_property(VCardProperty::text("EMAIL", "john.doe@work.com"));

        assert_eq!(card.emails().len(), 2);
        assert_eq!(card.count_properties("email"), 2);
    }
}
