//! vCard implementation (RFC 6350, RFC 2426, and the versit 2.1 dialect).
//!
//! ## Overview
//!
//! vCard is the contact-interchange side of the line-based grammar family.
//! This implementation parses and serializes vCard 2.1, 3.0, and 4.0, and
//! converts documents between those versions.
//!
//! The three versions differ in their escaping table (2.1 leaves commas
//! literal), their parameter syntax (2.1 allows bare parameters such as
//! `PHOTO;BASE64:...`), and their binary encoding conventions - the
//! per-document [`SyntaxProfile`] captures the differences, and
//! [`convert`] translates between them.
//!
//! ## Usage
//!
//! ```rust
//! use washi_rfc::rfc::vcard::{parse, serialize_single};
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:4.0\r\n\
//! FN:John Doe\r\n\
//! EMAIL:john@example.com\r\n\
//! END:VCARD\r\n";
//!
//! let cards = parse(input).unwrap();
//! assert_eq!(cards[0].formatted_name(), Some("John Doe"));
//! let output = serialize_single(&cards[0]);
//! assert!(output.contains("FN:John Doe"));
//! ```
//!
//! [`SyntaxProfile`]: washi_core::profile::SyntaxProfile
//! [`convert`]: convert::convert

pub mod build;
pub mod convert;
pub mod core;
pub mod parse;

#[cfg(test)]
mod tests;

pub use build::{serialize, serialize_single};
pub use convert::convert;
pub use core::{
    Address, DateAndOrTime, Organization, StructuredName, VCard, VCardParameter, VCardProperty,
    VCardValue, VCardVersion,
};
pub use parse::{ParseError, ParseResult, parse, parse_single};
