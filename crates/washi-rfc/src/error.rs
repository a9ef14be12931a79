use thiserror::Error;

/// Library-level errors for parsing and evaluation.
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("iCalendar parse error: {0}")]
    ICalParse(#[from] crate::rfc::ical::parse::ParseError),

    #[error("vCard parse error: {0}")]
    VCardParse(#[from] crate::rfc::vcard::parse::ParseError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    Core(#[from] washi_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;

/// A value could not be coerced to the type an operation requires.
///
/// Parsing never raises this: an uncoercible property downgrades to opaque
/// text and surfaces through validation. Operations that *must* interpret a
/// value (the time-range evaluator reading `DTSTART`) fail with this error
/// instead of silently treating the component as out of range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{property}: {message}")]
pub struct ValueError {
    /// Name of the offending property.
    pub property: String,
    /// What was wrong with the value.
    pub message: String,
}

impl ValueError {
    /// Creates a value error for the named property.
    #[must_use]
    pub fn new(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            message: message.into(),
        }
    }
}
