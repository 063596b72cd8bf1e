use jsonapi_core::codec::decode_document;
use jsonapi_core::resolve::{
    hydrate, hydrate_new, AcceptsIdentifier, AcceptsToMany, AcceptsToOne,
    EnumeratesRelationships, IncludedIndex, ResolvesIncluded, Resource,
};
use jsonapi_core::{HydrationError, RawJson};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct Person {
    name: String,
    #[serde(skip)]
    id: String,
}

impl Resource for Person {
    fn decode_attributes(&mut self, attributes: &RawJson) -> Result<(), serde_json::Error> {
        let decoded: Person = attributes.parse()?;
        self.name = decoded.name;
        Ok(())
    }

    fn identifier(&mut self) -> Option<&mut dyn AcceptsIdentifier> {
        Some(self)
    }
}

impl AcceptsIdentifier for Person {
    fn set_id(&mut self, id: &str) -> Result<(), HydrationError> {
        self.id = id.to_string();
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct PostAttributes {
    title: String,
}

#[derive(Debug, Default)]
struct Post {
    id: String,
    title: String,
    author_id: Option<String>,
    comment_ids: Vec<String>,
    to_many_calls: usize,
    author: Option<Person>,
}

impl Resource for Post {
    fn decode_attributes(&mut self, attributes: &RawJson) -> Result<(), serde_json::Error> {
        let decoded: PostAttributes = attributes.parse()?;
        self.title = decoded.title;
        Ok(())
    }

    fn identifier(&mut self) -> Option<&mut dyn AcceptsIdentifier> {
        Some(self)
    }

    fn relationships(&self) -> Option<&dyn EnumeratesRelationships> {
        Some(self)
    }

    fn to_one(&mut self) -> Option<&mut dyn AcceptsToOne> {
        Some(self)
    }

    fn to_many(&mut self) -> Option<&mut dyn AcceptsToMany> {
        Some(self)
    }

    fn included(&mut self) -> Option<&mut dyn ResolvesIncluded> {
        Some(self)
    }
}

impl AcceptsIdentifier for Post {
    fn set_id(&mut self, id: &str) -> Result<(), HydrationError> {
        self.id = id.to_string();
        Ok(())
    }
}

impl EnumeratesRelationships for Post {
    fn relationship_names(&self) -> Vec<String> {
        vec!["author".to_string(), "comments".to_string(), "editor".to_string()]
    }
}

impl AcceptsToOne for Post {
    fn set_to_one(&mut self, name: &str, id: &str) -> Result<(), HydrationError> {
        match name {
            "author" => {
                self.author_id = Some(id.to_string());
                Ok(())
            }
            other => Err(HydrationError::rejected(other, "unknown to-one relationship")),
        }
    }
}

impl AcceptsToMany for Post {
    fn set_to_many(&mut self, name: &str, ids: Vec<String>) -> Result<(), HydrationError> {
        if name != "comments" {
            return Err(HydrationError::rejected(name, "unknown to-many relationship"));
        }
        if ids.iter().any(|id| id.is_empty()) {
            return Err(HydrationError::rejected(name, "empty id"));
        }
        self.to_many_calls += 1;
        self.comment_ids = ids;
        Ok(())
    }
}

impl ResolvesIncluded for Post {
    fn resolve_included(&mut self, included: &IncludedIndex<'_>) -> Result<(), HydrationError> {
        let Some(author_id) = &self.author_id else {
            return Ok(());
        };
        if let Some(data) = included.get("people", author_id) {
            self.author = Some(hydrate_new(data, included)?);
        }
        Ok(())
    }
}

const POST: &[u8] = br#"{
    "data": {
        "type": "posts",
        "id": "1",
        "attributes": {"title": "Hello"},
        "relationships": {
            "author": {"data": {"type": "people", "id": "9"}},
            "comments": {"data": [
                {"type": "comments", "id": "5"},
                {"type": "comments", "id": "12"},
                {"type": "comments", "id": "3"}
            ]},
            "editor": {"data": null},
            "tags": {"data": [{"type": "tags", "id": "x"}]}
        }
    },
    "included": [
        {"type": "people", "id": "9", "attributes": {"name": "Ann"}},
        {"type": "comments", "id": "5", "attributes": {"body": "first"}}
    ]
}"#;

#[test]
fn hydrates_attributes_relationships_and_included() {
    let doc = decode_document(POST).unwrap();
    let index = IncludedIndex::new(&doc.included);
    let post: Post = hydrate_new(doc.data.as_single().unwrap(), &index).unwrap();

    assert_eq!(post.id, "1");
    assert_eq!(post.title, "Hello");
    assert_eq!(post.author_id.as_deref(), Some("9"));
    assert_eq!(post.comment_ids, vec!["5", "12", "3"]);
    assert_eq!(post.to_many_calls, 1);

    let author = post.author.expect("author resolved from included");
    assert_eq!(author.id, "9");
    assert_eq!(author.name, "Ann");
}

#[test]
fn undeclared_relationships_are_ignored() {
    // "tags" is present in the document but not declared by Post.
    let doc = decode_document(POST).unwrap();
    let index = IncludedIndex::new(&doc.included);
    let mut post = Post::default();
    assert!(hydrate(&mut post, doc.data.as_single().unwrap(), &index).is_ok());
}

#[test]
fn declared_but_absent_relationships_are_skipped() {
    let doc = decode_document(
        br#"{"data": {"type": "posts", "id": "2", "attributes": {"title": "t"}}}"#,
    )
    .unwrap();
    let post: Post = hydrate_new(doc.data.as_single().unwrap(), &IncludedIndex::default()).unwrap();
    assert!(post.author_id.is_none());
    assert!(post.comment_ids.is_empty());
    assert_eq!(post.to_many_calls, 0);
    assert!(post.author.is_none());
}

#[test]
fn empty_to_many_is_assigned_as_empty_batch() {
    let doc = decode_document(
        br#"{"data": {"type": "posts", "id": "2", "attributes": {"title": "t"},
            "relationships": {"comments": {"data": []}}}}"#,
    )
    .unwrap();
    let post: Post = hydrate_new(doc.data.as_single().unwrap(), &IncludedIndex::default()).unwrap();
    assert_eq!(post.to_many_calls, 1);
    assert!(post.comment_ids.is_empty());
}

#[test]
fn attribute_decode_failure_aborts() {
    let doc = decode_document(
        br#"{"data": {"type": "posts", "id": "1", "attributes": {"title": 42},
            "relationships": {"author": {"data": {"type": "people", "id": "9"}}}}}"#,
    )
    .unwrap();
    let mut post = Post::default();
    let err = hydrate(&mut post, doc.data.as_single().unwrap(), &IncludedIndex::default())
        .unwrap_err();
    assert!(matches!(
        err,
        HydrationError::Attributes { ref resource_type, .. } if resource_type == "posts"
    ));
    assert!(post.author_id.is_none());
    assert!(post.id.is_empty());
}

#[test]
fn to_many_rejection_is_all_or_nothing() {
    let doc = decode_document(
        br#"{"data": {"type": "posts", "id": "1", "attributes": {"title": "t"},
            "relationships": {"comments": {"data": [
                {"type": "comments", "id": "1"},
                {"type": "comments", "id": ""}
            ]}}}}"#,
    )
    .unwrap();
    let mut post = Post::default();
    let err = hydrate(&mut post, doc.data.as_single().unwrap(), &IncludedIndex::default())
        .unwrap_err();
    assert_eq!(err.to_string(), r#"relationship "comments" rejected: empty id"#);
    assert!(post.comment_ids.is_empty());
    assert_eq!(post.to_many_calls, 0);
}

#[test]
fn nested_hydration_error_propagates() {
    let doc = decode_document(
        br#"{"data": {"type": "posts", "id": "1", "attributes": {"title": "t"},
            "relationships": {"author": {"data": {"type": "people", "id": "9"}}}},
            "included": [{"type": "people", "id": "9", "attributes": {"name": []}}]}"#,
    )
    .unwrap();
    let index = IncludedIndex::new(&doc.included);
    let mut post = Post::default();
    let err = hydrate(&mut post, doc.data.as_single().unwrap(), &index).unwrap_err();
    assert!(matches!(
        err,
        HydrationError::Attributes { ref resource_type, .. } if resource_type == "people"
    ));
    assert!(post.author.is_none());
}

#[test]
fn hydrates_every_entry_of_a_list() {
    let doc = decode_document(
        br#"{"data": [
            {"type": "people", "id": "1", "attributes": {"name": "Ann"}},
            {"type": "people", "id": "2", "attributes": {"name": "Bob"}}
        ]}"#,
    )
    .unwrap();
    let index = IncludedIndex::new(&doc.included);
    let people = doc
        .data
        .iter()
        .map(|data| hydrate_new::<Person>(data, &index))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let names: Vec<_> = people.iter().map(|p| (p.id.as_str(), p.name.as_str())).collect();
    assert_eq!(names, vec![("1", "Ann"), ("2", "Bob")]);
}
