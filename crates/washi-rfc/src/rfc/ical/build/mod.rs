//! iCalendar serialization (RFC 5545).
//!
//! - Text escaping per RFC 5545 §3.3.11
//! - RFC 6868 caret encoding for parameter values
//! - Line folding at 75 octets (UTF-8 safe)
//!
//! Output order is tree order: properties and children are emitted exactly
//! as the in-memory tree holds them, so callers control the output entirely
//! by arranging the tree.

mod escape;
mod fold;
mod serializer;

pub use escape::{escape_param_value, escape_text};
pub use fold::fold_line;
pub use serializer::{serialize, serialize_component, serialize_property};
