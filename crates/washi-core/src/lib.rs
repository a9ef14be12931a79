//! Shared plumbing for the washi interchange-format crates.
//!
//! This crate holds the pieces that are independent of any one wire format:
//! the error taxonomy, the validation [`Diagnostic`](diagnostic::Diagnostic)
//! record, and the per-document [`SyntaxProfile`](profile::SyntaxProfile)
//! that parsers and serializers thread through their calls.

pub mod diagnostic;
pub mod error;
pub mod profile;

pub use diagnostic::{Diagnostic, Severity};
pub use error::{CoreError, CoreResult};
pub use profile::{EscapeDialect, FormatKind, SyntaxProfile};
