//! Structured vCard values (N, ADR, ORG).
//!
//! These properties hold semicolon-separated component lists whose
//! components may themselves be comma-separated lists.

/// Structured name - the N property (RFC 6350 §6.2.2).
///
/// Components: family; given; additional; prefixes; suffixes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructuredName {
    /// Family names (surnames).
    pub family: Vec<String>,
    /// Given names.
    pub given: Vec<String>,
    /// Additional (middle) names.
    pub additional: Vec<String>,
    /// Honorific prefixes (e.g., "Dr.").
    pub prefixes: Vec<String>,
    /// Honorific suffixes (e.g., "Jr.").
    pub suffixes: Vec<String>,
}

impl StructuredName {
    /// Creates a name with a single family and given component.
    #[must_use]
    pub fn simple(family: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            family: vec![family.into()],
            given: vec![given.into()],
            ..Self::default()
        }
    }
}

/// Postal address - the ADR property (RFC 6350 §6.3.1).
///
/// Components: po box; extended; street; locality; region; postal code;
/// country.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    /// Post office box (deprecated in 4.0 but still on the wire).
    pub po_box: Vec<String>,
    /// Extended address (apartment, suite).
    pub extended: Vec<String>,
    /// Street address.
    pub street: Vec<String>,
    /// Locality (city).
    pub locality: Vec<String>,
    /// Region (state, province).
    pub region: Vec<String>,
    /// Postal code.
    pub postal_code: Vec<String>,
    /// Country name.
    pub country: Vec<String>,
}

/// Organization - the ORG property (RFC 6350 §6.6.4).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Organization {
    /// Organization name.
    pub name: String,
    /// Organizational units, outermost first.
    pub units: Vec<String>,
}
