//! JSON:API document model.
//!
//! The polymorphic members of the format (`data`, relationship linkage and
//! links) are enums, so a container can never hold a single resource and a
//! list at the same time. Resource attributes stay undecoded ([`RawJson`]).

mod document;
mod error;
mod link;
mod raw;

pub use document::{
    Data, DataContainer, Document, Relationship, RelationshipData, RelationshipDataContainer,
};
pub use error::{Error, ErrorLinks, ErrorSource};
pub use link::{Link, Links, Meta};
pub use raw::RawJson;
