//! Hydration of domain objects from resource objects.
//!
//! A domain object only has to know how to decode its own attributes
//! ([`Resource::decode_attributes`]). Everything else is opt-in: the object
//! advertises each capability it supports through the accessor methods of
//! [`Resource`], and [`hydrate`] uses only the ones that are present.

use crate::error::HydrationError;
use crate::model::{Data, RawJson, RelationshipDataContainer};
use std::collections::HashMap;

/// Included resources indexed by type, then id.
#[derive(Debug, Clone, Default)]
pub struct IncludedIndex<'a> {
    by_type: HashMap<&'a str, HashMap<&'a str, &'a Data>>,
}

impl<'a> IncludedIndex<'a> {
    /// Builds the index from a document's `included` member. When the same
    /// type/id pair appears twice the first entry wins.
    pub fn new(included: &'a [Data]) -> Self {
        let mut by_type: HashMap<&'a str, HashMap<&'a str, &'a Data>> = HashMap::new();
        for data in included {
            by_type
                .entry(data.resource_type.as_str())
                .or_default()
                .entry(data.id.as_str())
                .or_insert(data);
        }
        IncludedIndex { by_type }
    }

    pub fn get(&self, resource_type: &str, id: &str) -> Option<&'a Data> {
        self.by_type.get(resource_type)?.get(id).copied()
    }

    /// All included resources of one type, keyed by id.
    pub fn of_type(&self, resource_type: &str) -> Option<&HashMap<&'a str, &'a Data>> {
        self.by_type.get(resource_type)
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

/// Lists the relationship names an object understands, in the order they
/// are applied.
pub trait EnumeratesRelationships {
    fn relationship_names(&self) -> Vec<String>;
}

/// Accepts the id referenced by a to-one relationship.
pub trait AcceptsToOne {
    fn set_to_one(&mut self, name: &str, id: &str) -> Result<(), HydrationError>;
}

/// Accepts all ids referenced by a to-many relationship in one call.
pub trait AcceptsToMany {
    fn set_to_many(&mut self, name: &str, ids: Vec<String>) -> Result<(), HydrationError>;
}

/// Hydrates nested objects from the included side-table, usually by calling
/// [`hydrate`] for the entries matching previously assigned ids.
pub trait ResolvesIncluded {
    fn resolve_included(&mut self, included: &IncludedIndex<'_>) -> Result<(), HydrationError>;
}

/// Accepts the id of the resource object itself.
pub trait AcceptsIdentifier {
    fn set_id(&mut self, id: &str) -> Result<(), HydrationError>;
}

/// A domain object that can be hydrated from a resource object.
///
/// Capability accessors default to `None`. An implementor opts in by
/// returning `Some(self)`:
///
/// ```
/// use jsonapi_core::model::RawJson;
/// use jsonapi_core::resolve::{AcceptsToOne, EnumeratesRelationships, Resource};
/// use jsonapi_core::HydrationError;
///
/// #[derive(Default, serde::Deserialize)]
/// struct Post {
///     title: String,
///     #[serde(skip)]
///     author_id: String,
/// }
///
/// impl Resource for Post {
///     fn decode_attributes(&mut self, attributes: &RawJson) -> Result<(), serde_json::Error> {
///         let author_id = std::mem::take(&mut self.author_id);
///         *self = attributes.parse()?;
///         self.author_id = author_id;
///         Ok(())
///     }
///
///     fn relationships(&self) -> Option<&dyn EnumeratesRelationships> {
///         Some(self)
///     }
///
///     fn to_one(&mut self) -> Option<&mut dyn AcceptsToOne> {
///         Some(self)
///     }
/// }
///
/// impl EnumeratesRelationships for Post {
///     fn relationship_names(&self) -> Vec<String> {
///         vec!["author".to_string()]
///     }
/// }
///
/// impl AcceptsToOne for Post {
///     fn set_to_one(&mut self, _name: &str, id: &str) -> Result<(), HydrationError> {
///         self.author_id = id.to_string();
///         Ok(())
///     }
/// }
/// ```
pub trait Resource {
    /// Decodes the resource's `attributes` member into `self`.
    fn decode_attributes(&mut self, attributes: &RawJson) -> Result<(), serde_json::Error>;

    fn identifier(&mut self) -> Option<&mut dyn AcceptsIdentifier> {
        None
    }

    fn relationships(&self) -> Option<&dyn EnumeratesRelationships> {
        None
    }

    fn to_one(&mut self) -> Option<&mut dyn AcceptsToOne> {
        None
    }

    fn to_many(&mut self) -> Option<&mut dyn AcceptsToMany> {
        None
    }

    fn included(&mut self) -> Option<&mut dyn ResolvesIncluded> {
        None
    }
}

/// Hydrates `target` from `data`.
///
/// Steps, each aborting on the first error:
/// 1. decode `attributes` (skipped when the member is absent);
/// 2. assign the resource id, if [`AcceptsIdentifier`] is supported;
/// 3. for each name from [`EnumeratesRelationships`] present in
///    `data.relationships`, assign a to-one id or the whole list of to-many
///    ids, if the matching capability is supported;
/// 4. hand `included` to [`ResolvesIncluded`], if supported.
pub fn hydrate<R: Resource + ?Sized>(
    target: &mut R,
    data: &Data,
    included: &IncludedIndex<'_>,
) -> Result<(), HydrationError> {
    if let Some(attributes) = &data.attributes {
        target
            .decode_attributes(attributes)
            .map_err(|source| HydrationError::Attributes {
                resource_type: data.resource_type.clone(),
                source,
            })?;
    }

    if let Some(identifier) = target.identifier() {
        identifier.set_id(&data.id)?;
    }

    let names = match target.relationships() {
        Some(source) => source.relationship_names(),
        None => Vec::new(),
    };
    for name in names {
        let Some(linkage) = data.relationships.get(&name).and_then(|r| r.data.as_ref()) else {
            continue;
        };
        match linkage {
            RelationshipDataContainer::Single(reference) => {
                if let Some(to_one) = target.to_one() {
                    tracing::trace!(relationship = %name, id = %reference.id, "assigning to-one");
                    to_one.set_to_one(&name, &reference.id)?;
                }
            }
            RelationshipDataContainer::Many(_) => {
                if let Some(to_many) = target.to_many() {
                    let ids = linkage.ids();
                    tracing::trace!(relationship = %name, count = ids.len(), "assigning to-many");
                    to_many.set_to_many(&name, ids)?;
                }
            }
            RelationshipDataContainer::None => {}
        }
    }

    if let Some(resolver) = target.included() {
        resolver.resolve_included(included)?;
    }
    Ok(())
}

/// Creates a default `R` and hydrates it from `data`.
pub fn hydrate_new<R: Resource + Default>(
    data: &Data,
    included: &IncludedIndex<'_>,
) -> Result<R, HydrationError> {
    let mut target = R::default();
    hydrate(&mut target, data, included)?;
    Ok(target)
}
