//! String utilities.
//!
//! Provides name casing helpers for mapping member names to document keys.

mod jsonify;
mod pluralize;

pub use jsonify::{is_initialism, jsonify, COMMON_INITIALISMS};
pub use pluralize::pluralize;
