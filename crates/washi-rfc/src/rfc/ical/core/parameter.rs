//! iCalendar property parameters (RFC 5545 §3.2).

use std::fmt;

/// A single property parameter.
///
/// Parameters modify or annotate a property value, e.g.
/// `DTSTART;TZID=America/New_York:20260123T120000`. Names are
/// case-insensitive and normalized to uppercase; a parameter may carry
/// several comma-separated values (MEMBER, DELEGATED-TO).
#[derive(Debug, Clone, Eq)]
pub struct Parameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values. Empty for a bare, valueless parameter
    /// (legal in vCard 2.1, tolerated elsewhere).
    pub values: Vec<String>,
    /// Set by the lexer when an unquoted value contained characters that
    /// should have been quoted. Accepted in lenient mode and flagged to the
    /// validator; not part of structural identity.
    pub lenient: bool,
}

// `lenient` records how the parameter was written, not what it means, so
// equality ignores it: a lenient parameter re-serializes quoted and must
// still compare equal after a round trip.
impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.values == other.values
    }
}

impl Parameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
            lenient: false,
        }
    }

    /// Creates a new parameter with multiple values.
    #[must_use]
    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
            lenient: false,
        }
    }

    /// Creates a bare parameter with no value.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: Vec::new(),
            lenient: false,
        }
    }

    /// Returns the first (and usually only) value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter has the specified value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }

    /// Returns whether this parameter carries no value at all.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.values.is_empty()
    }

    /// Creates a TZID parameter.
    #[must_use]
    pub fn tzid(tzid: impl Into<String>) -> Self {
        Self::new("TZID", tzid)
    }

    /// Creates a VALUE parameter.
    #[must_use]
    pub fn value_type(value_type: impl Into<String>) -> Self {
        Self::new("VALUE", value_type)
    }

    /// Creates an ENCODING parameter.
    #[must_use]
    pub fn encoding(encoding: impl Into<String>) -> Self {
        Self::new("ENCODING", encoding)
    }

    /// Creates a LANGUAGE parameter.
    #[must_use]
    pub fn language(lang: impl Into<String>) -> Self {
        Self::new("LANGUAGE", lang)
    }

    /// Creates a CN (common name) parameter.
    #[must_use]
    pub fn cn(name: impl Into<String>) -> Self {
        Self::new("CN", name)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        write!(f, "=")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            if needs_quoting(value) {
                write!(f, "\"{value}\"")?;
            } else {
                write!(f, "{value}")?;
            }
        }
        Ok(())
    }
}

/// Checks if a parameter value needs quoting.
fn needs_quoting(s: &str) -> bool {
    s.chars().any(|c| matches!(c, ':' | ';' | ',' | '"'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_simple() {
        let param = Parameter::new("TZID", "America/New_York");
        assert_eq!(param.to_string(), "TZID=America/New_York");
    }

    #[test]
    fn display_quoted() {
        let param = Parameter::cn("Doe; Jane");
        assert_eq!(param.to_string(), "CN=\"Doe; Jane\"");
    }

    #[test]
    fn display_multiple_values() {
        let param = Parameter::with_values(
            "MEMBER",
            vec![
                "mailto:a@example.com".to_string(),
                "mailto:b@example.com".to_string(),
            ],
        );
        assert_eq!(
            param.to_string(),
            "MEMBER=mailto:a@example.com,mailto:b@example.com"
        );
    }

    #[test]
    fn display_bare() {
        assert_eq!(Parameter::bare("base64").to_string(), "BASE64=");
    }

    #[test]
    fn name_normalized() {
        assert_eq!(Parameter::new("tzid", "Europe/London").name, "TZID");
    }

    #[test]
    fn lenient_not_part_of_identity() {
        let mut a = Parameter::cn("Jane");
        let b = Parameter::cn("Jane");
        a.lenient = true;
        assert_eq!(a, b);
    }
}
