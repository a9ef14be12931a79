//! iCalendar parsing primitives (RFC 5545).
//!
//! - Lexer: line unfolding and content line tokenization
//! - Values: value type parsers (DATE, DATE-TIME, DURATION, ...)
//! - Parser: full document parsing into typed structures
//!
//! Structural problems (mismatched BEGIN/END, malformed content lines) are
//! fatal [`ParseError`]s. Value problems are not: a value that fails to
//! coerce to its resolved type downgrades the property to opaque text, to
//! be reported by the validator.

mod error;
mod lexer;
mod parser;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{parse_content_line, split_lines};
pub use parser::{parse, parse_component_source, resolve_value_type};
pub use values::{
    parse_binary, parse_boolean, parse_date, parse_datetime, parse_duration, parse_float,
    parse_integer, parse_period, parse_rrule, parse_time, parse_utc_offset, split_text_list,
    unescape_text,
};
