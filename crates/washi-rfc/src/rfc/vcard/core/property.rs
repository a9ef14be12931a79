//! vCard property model.

use super::parameter::VCardParameter;
use super::value::VCardValue;

/// A vCard property.
///
/// Contains the parsed value along with the original raw value for
/// round-trip fidelity.
#[derive(Debug, Clone)]
pub struct VCardProperty {
    /// Optional property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<VCardParameter>,
    /// Parsed value.
    pub value: VCardValue,
    /// Original raw value string (for round-trip).
    pub raw_value: String,
}

// Structural equality is over the decoded value, not its spelling, so the
// raw text does not participate.
impl PartialEq for VCardProperty {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group
            && self.name == other.name
            && self.params == other.params
            && self.value == other.value
    }
}

impl VCardProperty {
    /// Creates a property with a text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value_str = value.into();
        Self {
            group: None,
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: VCardValue::Text(value_str.clone()),
            raw_value: value_str,
        }
    }

    /// Creates a property with a text value and group.
    #[must_use]
    pub fn grouped_text(
        group: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut prop = Self::text(name, value);
        prop.group = Some(group.into());
        prop
    }

    /// Creates a property with a URI value.
    #[must_use]
    pub fn uri(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value_str = value.into();
        Self {
            group: None,
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: VCardValue::Uri(value_str.clone()),
            raw_value: value_str,
        }
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&VCardParameter> {
        let name_upper = name.to_ascii_uppercase();
        self.params.iter().find(|p| p.name == name_upper)
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.get_param(name)?.value()
    }

    /// Returns whether this property has the specified TYPE value.
    #[must_use]
    pub fn has_type(&self, type_value: &str) -> bool {
        self.get_param("TYPE")
            .is_some_and(|p| p.has_value(type_value))
    }

    /// Adds a parameter to this property.
    pub fn add_param(&mut self, param: VCardParameter) {
        self.params.push(param);
    }

    /// Removes every parameter with the given name and returns whether any
    /// was present.
    pub fn remove_param(&mut self, name: &str) -> bool {
        let name_upper = name.to_ascii_uppercase();
        let before = self.params.len();
        self.params.retain(|p| p.name != name_upper);
        self.params.len() != before
    }

    /// Adds a TYPE parameter value, merging into an existing TYPE parameter.
    pub fn add_type(&mut self, type_value: impl Into<String>) {
        if let Some(param) = self.params.iter_mut().find(|p| p.name == "TYPE") {
            param.values.push(type_value.into());
        } else {
            self.params.push(VCardParameter::type_param(type_value));
        }
    }

    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_text() {
        let prop = VCardProperty::text("fn", "John Doe");
        assert_eq!(prop.name, "FN");
        assert_eq!(prop.as_text(), Some("John Doe"));
    }

    #[test]
    fn property_grouped() {
        let prop = VCardProperty::grouped_text("item1", "TEL", "+1-555-555-5555");
        assert_eq!(prop.group, Some("item1".to_string()));
        assert_eq!(prop.name, "TEL");
    }

    #[test]
    fn property_types_merge() {
        let mut prop = VCardProperty::text("TEL", "+1-555-555-5555");
        prop.add_type("home");
        prop.add_type("voice");

        assert_eq!(prop.params.len(), 1);
        assert!(prop.has_type("home"));
        assert!(prop.has_type("VOICE"));
    }

    #[test]
    fn remove_param_reports_presence() {
        let mut prop = VCardProperty::text("PHOTO", "xxxx");
        prop.add_param(VCardParameter::bare("BASE64"));
        assert!(prop.remove_param("base64"));
        assert!(!prop.remove_param("BASE64"));
    }
}
