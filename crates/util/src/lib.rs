//! jsonapi-util - Utility functions for jsonapi-core
//!
//! Name casing for document keys and the emptiness predicates behind the
//! wire format's omit-if-empty rules.

pub mod is_empty;
pub mod strings;

// Re-exports for convenience
pub use is_empty::{is_empty_btree, is_empty_map, is_empty_value};
pub use strings::{is_initialism, jsonify, pluralize, COMMON_INITIALISMS};
