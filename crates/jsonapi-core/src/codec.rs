//! Structural encoding and decoding of JSON:API documents.
//!
//! Decoding happens in two passes. serde first splits the payload into wire
//! structs whose polymorphic members are kept as raw JSON text; the second
//! pass sniffs the first significant byte of every such member to pick the
//! model variant (`{` for a single object, `[` for a list). Shape errors
//! therefore carry exactly the messages of [`CodecError`], without the
//! position suffix serde would append.
//!
//! Encoding is plain `serde::Serialize` on the model types.

use crate::error::CodecError;
use crate::model::{
    Data, DataContainer, Document, Link, Links, Meta, RawJson, Relationship, RelationshipData,
    RelationshipDataContainer,
};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;
use serde_json::Value;
use std::collections::BTreeMap;

const NULL: &[u8] = b"null";

#[derive(Deserialize)]
struct WireDocument {
    #[serde(default)]
    links: Option<BTreeMap<String, Box<RawValue>>>,
    #[serde(default)]
    data: Option<Box<RawValue>>,
    #[serde(default)]
    included: Option<Vec<Box<RawValue>>>,
    #[serde(default)]
    meta: Option<Meta>,
}

#[derive(Deserialize)]
struct WireData {
    #[serde(rename = "type")]
    resource_type: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    attributes: Option<Box<RawValue>>,
    #[serde(default)]
    relationships: Option<BTreeMap<String, Option<WireRelationship>>>,
    #[serde(default)]
    links: Option<BTreeMap<String, Box<RawValue>>>,
    #[serde(default)]
    meta: Option<Box<RawValue>>,
}

#[derive(Deserialize)]
struct WireRelationship {
    #[serde(default)]
    links: Option<BTreeMap<String, Box<RawValue>>>,
    // `null` must stay distinguishable from an absent member.
    #[serde(default, deserialize_with = "present")]
    data: Option<Box<RawValue>>,
    #[serde(default)]
    meta: Option<Meta>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Box<RawValue>>, D::Error> {
    Box::<RawValue>::deserialize(deserializer).map(Some)
}

/// Returns the first byte that is not JSON whitespace.
fn sniff(payload: &[u8]) -> Option<u8> {
    payload
        .iter()
        .copied()
        .find(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
}

/// Decodes a complete document.
///
/// # Errors
///
/// [`CodecError::RootNotObject`] if the root is not a JSON object,
/// [`CodecError::Parse`] for malformed JSON, and the shape errors of the
/// nested decoders.
///
/// # Example
///
/// ```
/// use jsonapi_core::codec::decode_document;
///
/// let doc = decode_document(br#"{"data":{"type":"t","id":"1"}}"#).unwrap();
/// assert_eq!(doc.data.as_single().unwrap().id, "1");
/// assert!(doc.data.as_many().is_none());
/// ```
pub fn decode_document(payload: &[u8]) -> Result<Document, CodecError> {
    if sniff(payload) != Some(b'{') {
        return Err(CodecError::RootNotObject);
    }
    let wire: WireDocument = serde_json::from_slice(payload)?;

    let data = match wire.data {
        Some(raw) => decode_data_container(raw.get().as_bytes())?,
        None => DataContainer::None,
    };
    let included = wire
        .included
        .unwrap_or_default()
        .iter()
        .map(|raw| decode_resource(raw.get().as_bytes()))
        .collect::<Result<Vec<_>, _>>()?;

    let document = Document {
        links: decode_links(wire.links)?,
        data,
        included,
        meta: wire.meta.unwrap_or_default(),
    };
    tracing::debug!(
        primary = primary_shape(&document.data),
        included = document.included.len(),
        "decoded document"
    );
    Ok(document)
}

/// Decodes primary data: `{` yields [`DataContainer::Single`], `[` yields
/// [`DataContainer::Many`].
pub fn decode_data_container(payload: &[u8]) -> Result<DataContainer, CodecError> {
    match sniff(payload) {
        Some(b'{') => Ok(DataContainer::single(decode_resource(payload)?)),
        Some(b'[') => {
            let items: Vec<Box<RawValue>> = serde_json::from_slice(payload)?;
            items
                .iter()
                .map(|raw| decode_resource(raw.get().as_bytes()))
                .collect::<Result<Vec<_>, _>>()
                .map(DataContainer::Many)
        }
        _ => Err(CodecError::ExpectedObjectOrArray),
    }
}

/// Decodes relationship linkage. An empty array is `Many(vec![])`, never
/// `None`.
pub fn decode_relationship_data(payload: &[u8]) -> Result<RelationshipDataContainer, CodecError> {
    match sniff(payload) {
        Some(b'{') => Ok(RelationshipDataContainer::Single(decode_identifier(payload)?)),
        Some(b'[') => {
            let items: Vec<Box<RawValue>> = serde_json::from_slice(payload)?;
            items
                .iter()
                .map(|raw| decode_identifier(raw.get().as_bytes()))
                .collect::<Result<Vec<_>, _>>()
                .map(RelationshipDataContainer::Many)
        }
        _ => Err(CodecError::InvalidRelationshipData),
    }
}

/// Decodes a link from `null`, a bare href string or an `{href, meta}`
/// object. A `meta` member that is not an object is ignored.
pub fn decode_link(payload: &[u8]) -> Result<Link, CodecError> {
    // Pagination links are commonly null.
    if payload == NULL {
        return Ok(Link::Empty);
    }
    match sniff(payload) {
        Some(b'"') => {
            let href: String = serde_json::from_slice(payload)?;
            Ok(Link::from_parts(href, Meta::new()))
        }
        Some(b'{') => {
            let obj: Meta = serde_json::from_slice(payload)?;
            let href = obj
                .get("href")
                .and_then(Value::as_str)
                .ok_or(CodecError::LinkMissingHref)?;
            let meta = obj
                .get("meta")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            Ok(Link::from_parts(href, meta))
        }
        _ => Err(CodecError::ExpectedStringOrObject),
    }
}

/// Encodes a document, omitting every empty optional member.
pub fn encode_document(document: &Document) -> Result<Vec<u8>, CodecError> {
    let bytes = serde_json::to_vec(document).map_err(CodecError::Serialize)?;
    log_encoded(document, bytes.len());
    Ok(bytes)
}

/// Like [`encode_document`], returning text.
pub fn encode_document_string(document: &Document) -> Result<String, CodecError> {
    let text = serde_json::to_string(document).map_err(CodecError::Serialize)?;
    log_encoded(document, text.len());
    Ok(text)
}

fn log_encoded(document: &Document, bytes: usize) {
    tracing::debug!(
        primary = primary_shape(&document.data),
        included = document.included.len(),
        bytes,
        "encoded document"
    );
}

fn decode_resource(payload: &[u8]) -> Result<Data, CodecError> {
    if sniff(payload) != Some(b'{') {
        return Err(serde_json::Error::custom("expected a JSON encoded resource object").into());
    }
    let wire: WireData = serde_json::from_slice(payload)?;

    let mut relationships = BTreeMap::new();
    for (name, relationship) in wire.relationships.unwrap_or_default() {
        let relationship = match relationship {
            Some(wire) => decode_relationship(wire)?,
            None => Relationship::default(),
        };
        relationships.insert(name, relationship);
    }

    Ok(Data {
        resource_type: wire.resource_type,
        id: wire.id,
        attributes: wire.attributes.map(RawJson::from_raw),
        relationships,
        links: decode_links(wire.links)?,
        meta: wire.meta.map(RawJson::from_raw),
    })
}

fn decode_relationship(wire: WireRelationship) -> Result<Relationship, CodecError> {
    let data = match wire.data {
        None => None,
        Some(raw) if raw.get().as_bytes() == NULL => Some(RelationshipDataContainer::None),
        Some(raw) => Some(decode_relationship_data(raw.get().as_bytes())?),
    };
    Ok(Relationship {
        links: decode_links(wire.links)?,
        data,
        meta: wire.meta.unwrap_or_default(),
    })
}

fn decode_identifier(payload: &[u8]) -> Result<RelationshipData, CodecError> {
    #[derive(Deserialize)]
    struct WireIdentifier {
        #[serde(rename = "type")]
        resource_type: String,
        #[serde(default)]
        id: String,
    }

    if sniff(payload) != Some(b'{') {
        return Err(CodecError::InvalidRelationshipData);
    }
    let wire: WireIdentifier = serde_json::from_slice(payload)?;
    Ok(RelationshipData {
        resource_type: wire.resource_type,
        id: wire.id,
    })
}

fn decode_links(links: Option<BTreeMap<String, Box<RawValue>>>) -> Result<Links, CodecError> {
    links
        .unwrap_or_default()
        .into_iter()
        .map(|(name, raw)| decode_link(raw.get().as_bytes()).map(|link| (name, link)))
        .collect()
}

fn primary_shape(data: &DataContainer) -> &'static str {
    match data {
        DataContainer::None => "null",
        DataContainer::Single(_) => "object",
        DataContainer::Many(_) => "array",
    }
}
