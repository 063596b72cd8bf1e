use super::link::{Links, Meta};
use super::raw::RawJson;
use jsonapi_util::{is_empty_btree, is_empty_map};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// A JSON:API top-level document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    #[serde(skip_serializing_if = "is_empty_btree")]
    pub links: Links,
    pub data: DataContainer,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<Data>,
    #[serde(skip_serializing_if = "is_empty_map")]
    pub meta: Meta,
}

impl Document {
    pub fn new(data: DataContainer) -> Self {
        Document {
            data,
            ..Default::default()
        }
    }

    /// Every resource object reachable from the document: primary data
    /// first, then the included side-table.
    pub fn resources(&self) -> impl Iterator<Item = &Data> {
        self.data.iter().chain(self.included.iter())
    }

    pub fn resources_mut(&mut self) -> impl Iterator<Item = &mut Data> {
        self.data.iter_mut().chain(self.included.iter_mut())
    }
}

/// Primary data of a document: `null`, a single resource, or a list.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DataContainer {
    #[default]
    None,
    Single(Box<Data>),
    Many(Vec<Data>),
}

impl DataContainer {
    pub fn single(data: Data) -> Self {
        DataContainer::Single(Box::new(data))
    }

    pub fn as_single(&self) -> Option<&Data> {
        match self {
            DataContainer::Single(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_many(&self) -> Option<&[Data]> {
        match self {
            DataContainer::Many(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, DataContainer::None)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Data> {
        match self {
            DataContainer::None => Default::default(),
            DataContainer::Single(data) => std::slice::from_ref(data.as_ref()).iter(),
            DataContainer::Many(items) => items.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Data> {
        match self {
            DataContainer::None => Default::default(),
            DataContainer::Single(data) => std::slice::from_mut(data.as_mut()).iter_mut(),
            DataContainer::Many(items) => items.iter_mut(),
        }
    }
}

impl Serialize for DataContainer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DataContainer::None => serializer.serialize_none(),
            DataContainer::Single(data) => data.serialize(serializer),
            DataContainer::Many(items) => items.serialize(serializer),
        }
    }
}

/// A resource object, used both for primary data and included resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Data {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<RawJson>,
    #[serde(skip_serializing_if = "is_empty_btree")]
    pub relationships: BTreeMap<String, Relationship>,
    #[serde(skip_serializing_if = "is_empty_btree")]
    pub links: Links,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<RawJson>,
}

impl Data {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Data {
            resource_type: resource_type.into(),
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_attributes(mut self, attributes: RawJson) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn with_relationship(
        mut self,
        name: impl Into<String>,
        relationship: Relationship,
    ) -> Self {
        self.relationships.insert(name.into(), relationship);
        self
    }
}

/// A named relationship of a resource object.
///
/// `data: None` means the member was absent and is omitted on encode;
/// `Some(RelationshipDataContainer::None)` is an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Relationship {
    #[serde(skip_serializing_if = "is_empty_btree")]
    pub links: Links,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<RelationshipDataContainer>,
    #[serde(skip_serializing_if = "is_empty_map")]
    pub meta: Meta,
}

impl Relationship {
    pub fn to_one(reference: Option<RelationshipData>) -> Self {
        let data = match reference {
            Some(reference) => RelationshipDataContainer::Single(reference),
            None => RelationshipDataContainer::None,
        };
        Relationship {
            data: Some(data),
            ..Default::default()
        }
    }

    pub fn to_many(references: Vec<RelationshipData>) -> Self {
        Relationship {
            data: Some(RelationshipDataContainer::Many(references)),
            ..Default::default()
        }
    }
}

/// Resource linkage of a relationship.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RelationshipDataContainer {
    #[default]
    None,
    Single(RelationshipData),
    Many(Vec<RelationshipData>),
}

impl RelationshipDataContainer {
    /// Referenced ids in document order.
    pub fn ids(&self) -> Vec<String> {
        match self {
            RelationshipDataContainer::None => Vec::new(),
            RelationshipDataContainer::Single(reference) => vec![reference.id.clone()],
            RelationshipDataContainer::Many(references) => {
                references.iter().map(|r| r.id.clone()).collect()
            }
        }
    }
}

impl Serialize for RelationshipDataContainer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RelationshipDataContainer::None => serializer.serialize_none(),
            RelationshipDataContainer::Single(reference) => reference.serialize(serializer),
            RelationshipDataContainer::Many(references) => references.serialize(serializer),
        }
    }
}

/// A resource identifier: one referenced `{type, id}` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct RelationshipData {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
}

impl RelationshipData {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        RelationshipData {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(text: &str) -> RawJson {
        RawJson::from_string(text.to_string()).unwrap()
    }

    #[test]
    fn test_empty_document_encodes_null_data_only() {
        let doc = Document::default();
        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"data":null}"#);
    }

    #[test]
    fn test_data_omits_empty_optionals() {
        let data = Data::new("posts", "1");
        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"{"type":"posts","id":"1"}"#
        );
    }

    #[test]
    fn test_data_keeps_attribute_bytes() {
        let data = Data::new("posts", "1").with_attributes(raw(r#"{"title": "Hi"}"#));
        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"{"type":"posts","id":"1","attributes":{"title": "Hi"}}"#
        );
    }

    #[test]
    fn test_many_container_encodes_array() {
        let doc = Document::new(DataContainer::Many(vec![
            Data::new("a", "1"),
            Data::new("a", "2"),
        ]));
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"data": [{"type": "a", "id": "1"}, {"type": "a", "id": "2"}]})
        );
    }

    #[test]
    fn test_relationship_encoding_distinguishes_absent_and_null() {
        let absent = Relationship::default();
        let null = Relationship::to_one(None);
        let empty_many = Relationship::to_many(vec![]);

        assert_eq!(serde_json::to_string(&absent).unwrap(), "{}");
        assert_eq!(serde_json::to_string(&null).unwrap(), r#"{"data":null}"#);
        assert_eq!(serde_json::to_string(&empty_many).unwrap(), r#"{"data":[]}"#);
    }

    #[test]
    fn test_resources_visits_primary_then_included() {
        let mut doc = Document::new(DataContainer::single(Data::new("a", "1")));
        doc.included.push(Data::new("b", "2"));
        let ids: Vec<_> = doc.resources().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_relationship_ids_in_document_order() {
        let container = RelationshipDataContainer::Many(vec![
            RelationshipData::new("comments", "2"),
            RelationshipData::new("comments", "1"),
        ]);
        assert_eq!(container.ids(), vec!["2".to_string(), "1".to_string()]);
    }
}
