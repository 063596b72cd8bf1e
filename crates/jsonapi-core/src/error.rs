use thiserror::Error;

/// Errors raised while decoding or encoding a document.
///
/// The messages of the shape errors are part of the wire contract and must
/// not change.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The payload is not well-formed JSON, or a member has the wrong type.
    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    #[error("expected a JSON encoded object at the document root")]
    RootNotObject,

    #[error("expected a JSON encoded object or array")]
    ExpectedObjectOrArray,

    #[error("Invalid json for relationship data array/object")]
    InvalidRelationshipData,

    #[error("link object expects a \"href\" key")]
    LinkMissingHref,

    #[error("expected a JSON encoded string or object")]
    ExpectedStringOrObject,

    #[error("failed to encode document: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Errors raised while hydrating a domain object from a resource object.
#[derive(Error, Debug)]
pub enum HydrationError {
    #[error("could not decode attributes of \"{resource_type}\" resource: {source}")]
    Attributes {
        resource_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("relationship \"{relationship}\" rejected: {reason}")]
    Rejected { relationship: String, reason: String },

    #[error("{0}")]
    Custom(String),
}

impl HydrationError {
    /// Shorthand for a capability refusing a relationship assignment.
    pub fn rejected(relationship: impl Into<String>, reason: impl Into<String>) -> Self {
        HydrationError::Rejected {
            relationship: relationship.into(),
            reason: reason.into(),
        }
    }
}
