//! vCard serialization.
//!
//! - Text escaping per the version's dialect (2.1 leaves commas literal)
//! - Bare parameters under 2.1, `NAME=` under 3.0/4.0
//! - Line folding at 75 octets (UTF-8 safe)
//! - Tree order preserved; only VERSION is pinned to the top

mod escape;
mod fold;
mod serializer;

pub use escape::{escape_component, escape_param_value, escape_text};
pub use fold::fold_line;
pub use serializer::{serialize, serialize_single};
