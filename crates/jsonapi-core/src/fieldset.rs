//! Sparse fieldsets (<https://jsonapi.org/format/#fetching-sparse-fieldsets>).
//!
//! Restricts the attributes of every resource object in a document to the
//! fields a client asked for with `fields[<type>]=a,b` query parameters.
//! Validation is all-or-nothing: a single unknown field anywhere in the
//! document rejects the whole response.

use crate::model::{Data, Document, Error, RawJson};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Error code attached to every rejected field.
pub const CODE_INVALID_QUERY_FIELDS: &str = "API2GO_INVALID_FIELD_QUERY_PARAM";

/// Requested field lists, keyed by resource type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseFieldsets {
    fields: BTreeMap<String, Vec<String>>,
}

impl SparseFieldsets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, resource_type: impl Into<String>, fields: Vec<String>) {
        self.fields.insert(resource_type.into(), fields);
    }

    pub fn with(mut self, resource_type: impl Into<String>, fields: &[&str]) -> Self {
        self.insert(resource_type, fields.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn get(&self, resource_type: &str) -> Option<&[String]> {
        self.fields.get(resource_type).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Members of the errors produced for unknown fields.
///
/// The defaults match the error documents clients of this format already
/// expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldsetOptions {
    pub status: String,
    pub code: String,
    pub detail: String,
}

impl Default for FieldsetOptions {
    fn default() -> Self {
        FieldsetOptions {
            status: "Bad Request".to_string(),
            code: CODE_INVALID_QUERY_FIELDS.to_string(),
            detail: "Please make sure you do only request existing fields".to_string(),
        }
    }
}

fn query_fields_regex() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    // Type names are ASCII word characters only.
    RE.get_or_init(|| regex::Regex::new(r"^fields\[([0-9A-Za-z_]+)\]$").unwrap())
}

/// Collects `fields[<type>]` parameters from decoded query pairs.
///
/// Values are split on `,`. When the same key occurs more than once only the
/// first value is used; later ones are dropped.
///
/// # Example
///
/// ```
/// use jsonapi_core::fieldset::parse_query_fields;
///
/// let fields = parse_query_fields([("fields[posts]", "title,body"), ("sort", "-id")]);
/// assert_eq!(fields.get("posts").unwrap(), ["title", "body"]);
/// assert_eq!(fields.len(), 1);
/// ```
pub fn parse_query_fields<I, K, V>(query: I) -> SparseFieldsets
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut result = SparseFieldsets::new();
    for (name, value) in query {
        let Some(captures) = query_fields_regex().captures(name.as_ref()) else {
            continue;
        };
        let resource_type = &captures[1];
        if result.fields.contains_key(resource_type) {
            continue;
        }
        let fields = value.as_ref().split(',').map(str::to_string).collect();
        result.insert(resource_type, fields);
    }
    result
}

/// Filters every resource object of `document` down to the requested fields.
///
/// Uses [`FieldsetOptions::default`] for the produced errors.
///
/// # Errors
///
/// One [`Error`] per requested field that does not exist on a resource of
/// the requested type. No partially filtered document is returned.
pub fn filter_sparse_fields(
    document: Document,
    fieldsets: &SparseFieldsets,
) -> Result<Document, Vec<Error>> {
    filter_sparse_fields_with(document, fieldsets, &FieldsetOptions::default())
}

/// [`filter_sparse_fields`] with explicit error members.
pub fn filter_sparse_fields_with(
    mut document: Document,
    fieldsets: &SparseFieldsets,
    options: &FieldsetOptions,
) -> Result<Document, Vec<Error>> {
    if fieldsets.is_empty() {
        return Ok(document);
    }

    // type -> unknown fields, in first-seen order
    let mut wrong_fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut encode_failures = Vec::new();
    for entry in document.resources_mut() {
        let Some(fields) = fieldsets.get(&entry.resource_type) else {
            continue;
        };
        match filter_attributes(&decode_attributes(entry), fields) {
            Ok(filtered) => match encode_attributes(&filtered, &entry.resource_type) {
                Ok(raw) => entry.attributes = Some(raw),
                Err(error) => encode_failures.push(error),
            },
            Err(missing) => {
                let known = wrong_fields.entry(entry.resource_type.clone()).or_default();
                for field in missing {
                    if !known.contains(&field) {
                        known.push(field);
                    }
                }
            }
        }
    }

    if wrong_fields.is_empty() && encode_failures.is_empty() {
        return Ok(document);
    }

    let mut errors: Vec<Error> = wrong_fields
        .iter()
        .flat_map(|(resource_type, fields)| {
            fields.iter().map(move |field| {
                Error::new()
                    .with_status(options.status.as_str())
                    .with_code(options.code.as_str())
                    .with_title(format!(
                        "Field \"{}\" does not exist for type \"{}\"",
                        field, resource_type
                    ))
                    .with_detail(options.detail.as_str())
                    .with_parameter(format!("fields[{}]", resource_type))
            })
        })
        .collect();
    errors.extend(encode_failures);
    tracing::debug!(errors = errors.len(), "sparse fieldset request rejected");
    Err(errors)
}

/// Encodes filtered attributes back into their opaque slot.
fn encode_attributes<T: Serialize + ?Sized>(
    attributes: &T,
    resource_type: &str,
) -> Result<RawJson, Error> {
    RawJson::from_serialize(attributes).map_err(|err| {
        Error::new()
            .with_status("Internal Server Error")
            .with_title(format!(
                "Attributes of type \"{}\" could not be encoded",
                resource_type
            ))
            .with_detail(err.to_string())
    })
}

/// Absent, `null` or non-object attributes count as an empty object.
fn decode_attributes(entry: &Data) -> Map<String, Value> {
    let Some(raw) = &entry.attributes else {
        return Map::new();
    };
    match raw.parse::<Map<String, Value>>() {
        Ok(map) => map,
        Err(err) => {
            tracing::trace!(
                resource_type = %entry.resource_type,
                id = %entry.id,
                error = %err,
                "attributes are not an object"
            );
            Map::new()
        }
    }
}

/// Keeps only `fields` of `attributes`, or returns the requested fields the
/// attributes do not have.
fn filter_attributes(
    attributes: &Map<String, Value>,
    fields: &[String],
) -> Result<BTreeMap<String, Value>, Vec<String>> {
    let mut filtered = BTreeMap::new();
    let mut missing = Vec::new();
    for field in fields {
        match attributes.get(field) {
            Some(value) => {
                filtered.insert(field.clone(), value.clone());
            }
            None => missing.push(field.clone()),
        }
    }
    if missing.is_empty() {
        Ok(filtered)
    } else {
        Err(missing)
    }
}
