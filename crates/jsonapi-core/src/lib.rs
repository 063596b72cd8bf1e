//! JSON:API document codec.
//!
//! # Overview
//!
//! - [`codec`] decodes and encodes [`Document`]s, resolving the polymorphic
//!   `data`, relationship linkage and link members by sniffing their first
//!   significant byte.
//! - [`fieldset`] restricts resource attributes to `fields[<type>]` requests.
//! - [`resolve`] hydrates domain objects from resource objects and the
//!   included side-table.
//! - [`http_error`] encodes error aggregates as JSON:API error documents.
//!
//! # Example
//!
//! ```
//! use jsonapi_core::codec::{decode_document, encode_document_string};
//! use jsonapi_core::fieldset::{filter_sparse_fields, parse_query_fields};
//!
//! let doc = decode_document(
//!     br#"{"data":{"type":"test","id":"1","attributes":{"foo":"bar","baz":1}}}"#,
//! )
//! .unwrap();
//! let fields = parse_query_fields([("fields[test]", "foo")]);
//! let doc = filter_sparse_fields(doc, &fields).unwrap();
//!
//! assert_eq!(
//!     encode_document_string(&doc).unwrap(),
//!     r#"{"data":{"type":"test","id":"1","attributes":{"foo":"bar"}}}"#
//! );
//! ```

pub mod codec;
pub mod error;
pub mod fieldset;
pub mod http_error;
pub mod model;
pub mod resolve;

// Re-export the core public API
pub use codec::{decode_document, encode_document, encode_document_string};
pub use error::{CodecError, HydrationError};
pub use fieldset::{filter_sparse_fields, parse_query_fields, FieldsetOptions, SparseFieldsets};
pub use http_error::{marshal_http_error, HttpError};
pub use model::{
    Data, DataContainer, Document, Link, Links, Meta, RawJson, Relationship, RelationshipData,
    RelationshipDataContainer,
};
pub use resolve::{hydrate, hydrate_new, IncludedIndex, Resource};
