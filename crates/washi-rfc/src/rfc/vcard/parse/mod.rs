//! vCard parsing.
//!
//! - Handles line folding/unfolding and property groups (`item1.TEL`)
//! - Tokenizes quoted, multi-valued, caret-encoded, and bare parameters
//! - Coerces values per property name and card version
//!
//! Structural problems are fatal [`ParseError`]s; value coercion problems
//! downgrade the property to an opaque value instead of failing.

mod error;
mod lexer;
mod parser;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{ContentLine, parse_content_line, split_lines};
pub use parser::{parse, parse_single};
pub use values::{
    parse_address, parse_date_and_or_time, parse_organization, parse_structured_name,
    parse_utc_offset, split_component, split_structured, unescape_text,
};
