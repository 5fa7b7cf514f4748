//! Cache Module
//!
//! Typed payload storage on top of a key-value store.

mod typed;
mod value;


// Re-export public types
pub use typed::Cache;
pub use value::{decode_float, decode_integer, decode_text, Key, StoredValue};
