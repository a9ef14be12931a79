//! Parsing, modeling, validation, and serialization for the calendaring and
//! contact interchange formats (iCalendar, RFC 5545; vCard, RFC 6350/2426 and
//! the versit 2.1 dialect).
//!
//! The crate is a pure, synchronous library: it reads text into an owned
//! tree, lets the caller mutate and query it, and writes it back out with
//! round-trip fidelity for properties and parameters it does not recognize.
//! I/O, timezone databases, and protocol layers live outside this crate; the
//! time-range evaluator only consumes a [`TzResolver`] capability.
//!
//! ## Entry points
//!
//! - [`Document::parse`] — sniff the format and build a tree.
//! - [`rfc::ical::parse`] / [`rfc::vcard::parse`] — format-specific parsing.
//! - [`rfc::validation::validate_component`] — rule-table validation.
//! - [`rfc::ical::timerange`] — effective-interval intersection queries.
//! - [`rfc::vcard::convert`] — vCard version conversion.
//!
//! [`TzResolver`]: rfc::ical::timerange::TzResolver

pub mod document;
pub mod error;
pub mod rfc;

pub use document::Document;
pub use error::{RfcError, RfcResult, ValueError};
