//! JSON:API error objects (<https://jsonapi.org/format/#error-objects>).

use jsonapi_util::is_empty_value;
use serde::Serialize;
use serde_json::Value;

/// An application error reported to the client.
///
/// Every member is optional and omitted from the output when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Error {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ErrorLinks>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
    #[serde(skip_serializing_if = "is_empty_value")]
    pub meta: Option<Value>,
}

impl Error {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.links = Some(ErrorLinks { about: about.into() });
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Points at the offending member of the request document.
    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.source.get_or_insert_with(ErrorSource::default).pointer = pointer.into();
        self
    }

    /// Names the offending query parameter.
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.source.get_or_insert_with(ErrorSource::default).parameter = parameter.into();
        self
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// Links to further details about a particular occurrence of the problem.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorLinks {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub about: String,
}

/// References to the source of an error.
///
/// `pointer` is a JSON Pointer into the request document, `parameter` the
/// query parameter that caused the error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorSource {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pointer: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parameter: String,
}
