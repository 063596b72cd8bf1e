use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Unstructured metadata.
pub type Meta = Map<String, Value>;

/// Named links of a document, resource or relationship.
pub type Links = BTreeMap<String, Link>;

/// A link as it appears in a `links` object.
///
/// Encodes to `null`, to a bare href string, or to `{"href", "meta"}` when
/// metadata is attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Link {
    /// No href and no metadata. Pagination links are commonly `null`.
    #[default]
    Empty,
    Href(String),
    HrefWithMeta(String, Meta),
}

impl Link {
    /// Builds a link from its parts, collapsing to the variant the wire
    /// format would produce for them.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonapi_core::model::{Link, Meta};
    ///
    /// assert_eq!(Link::from_parts("", Meta::new()), Link::Empty);
    /// assert_eq!(Link::from_parts("/a", Meta::new()), Link::Href("/a".into()));
    /// ```
    pub fn from_parts(href: impl Into<String>, meta: Meta) -> Self {
        let href = href.into();
        if !meta.is_empty() {
            Link::HrefWithMeta(href, meta)
        } else if href.is_empty() {
            Link::Empty
        } else {
            Link::Href(href)
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            Link::Empty => None,
            Link::Href(href) | Link::HrefWithMeta(href, _) => Some(href),
        }
    }

    pub fn meta(&self) -> Option<&Meta> {
        match self {
            Link::HrefWithMeta(_, meta) => Some(meta),
            _ => None,
        }
    }

    /// `true` if the link has no href and no metadata.
    pub fn is_empty(&self) -> bool {
        match self {
            Link::Empty => true,
            Link::Href(href) => href.is_empty(),
            Link::HrefWithMeta(href, meta) => href.is_empty() && meta.is_empty(),
        }
    }
}

impl From<&str> for Link {
    fn from(href: &str) -> Self {
        Link::from_parts(href, Meta::new())
    }
}

impl From<String> for Link {
    fn from(href: String) -> Self {
        Link::from_parts(href, Meta::new())
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            _ if self.is_empty() => serializer.serialize_none(),
            Link::HrefWithMeta(href, meta) if !meta.is_empty() => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("href", href)?;
                map.serialize_entry("meta", meta)?;
                map.end()
            }
            _ => serializer.serialize_str(self.href().unwrap_or_default()),
        }
    }
}
