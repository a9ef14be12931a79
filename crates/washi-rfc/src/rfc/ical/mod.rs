//! iCalendar implementation (RFC 5545).
//!
//! ## Submodules
//!
//! - [`core`] - Core types (`ICalendar`, `Component`, `Property`, `Value`, ...)
//! - [`parse`] - Lexer, value parsers, and the document parser
//! - [`build`] - Escaping, folding, and the serializer
//! - [`timerange`] - Effective-interval intersection queries
//!
//! ## Usage
//!
//! ```rust
//! use washi_rfc::rfc::ical::{parse, serialize};
//!
//! let input = "\
//! BEGIN:VCALENDAR\r\n\
//! VERSION:2.0\r\n\
//! PRODID:-//Test//Test//EN\r\n\
//! BEGIN:VEVENT\r\n\
//! UID:demo@example.com\r\n\
//! DTSTAMP:20260123T120000Z\r\n\
//! DTSTART:20260123T140000Z\r\n\
//! SUMMARY:Demo\r\n\
//! END:VEVENT\r\n\
//! END:VCALENDAR\r\n";
//!
//! let ical = parse(input).unwrap();
//! assert_eq!(ical.events()[0].summary(), Some("Demo"));
//! let output = serialize(&ical);
//! assert!(output.contains("SUMMARY:Demo\r\n"));
//! ```
//!
//! ## Round-trip fidelity
//!
//! Unknown properties and parameters are kept verbatim, uncoercible values
//! are kept as opaque text, and the serializer emits the tree in the exact
//! order it holds — callers control output order entirely through tree
//! order.

pub mod build;
pub mod core;
pub mod parse;
pub mod timerange;

#[cfg(test)]
mod tests;

pub use build::{serialize, serialize_component};
pub use core::{
    Component, ComponentKind, Date, DateTime, DateTimeForm, Duration, ICalendar, Parameter, Period,
    Property, Value, ValueType,
};
pub use parse::{ParseError, ParseResult, parse};
