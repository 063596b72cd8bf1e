//! Error aggregate handed to the transport layer and its JSON:API encoding.

use crate::error::{CodecError, HydrationError};
use crate::model::Error;
use serde::Serialize;
use std::fmt;

type Cause = Box<dyn std::error::Error + Send + Sync>;

/// An error response: HTTP status, a message, and optional error objects.
///
/// `cause` is kept for logging and is never sent to a client.
#[derive(Debug)]
pub struct HttpError {
    cause: Option<Cause>,
    message: String,
    status: u16,
    pub errors: Vec<Error>,
}

impl HttpError {
    pub fn new(cause: Option<Cause>, message: impl Into<String>, status: u16) -> Self {
        HttpError {
            cause,
            message: message.into(),
            status,
            errors: Vec::new(),
        }
    }

    /// A `400 Bad Request` carrying the errors of a rejected sparse
    /// fieldset request.
    pub fn from_field_errors(errors: Vec<Error>) -> Self {
        HttpError::new(None, "Some requested fields were invalid.", 400).with_errors(errors)
    }

    pub fn with_errors(mut self, errors: Vec<Error>) -> Self {
        self.errors = errors;
        self
    }

    pub fn push(&mut self, error: Error) {
        self.errors.push(error);
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "http error ({}) {} and {} more errors",
            self.status,
            self.message,
            self.errors.len()
        )?;
        if let Some(cause) = &self.cause {
            write!(f, ", {}", cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

impl From<CodecError> for HttpError {
    fn from(err: CodecError) -> Self {
        let message = err.to_string();
        HttpError::new(Some(Box::new(err)), message, 400)
    }
}

impl From<HydrationError> for HttpError {
    fn from(err: HydrationError) -> Self {
        let message = err.to_string();
        HttpError::new(Some(Box::new(err)), message, 400)
    }
}

#[derive(Serialize)]
struct ErrorDocument<'a> {
    errors: &'a [Error],
}

/// Encodes `input` as a JSON:API error document.
///
/// Without explicit error objects a single one is synthesized from the
/// message and status. Explicit error objects are written as they are.
/// If encoding fails the result is `{}`.
///
/// # Example
///
/// ```
/// use jsonapi_core::http_error::{marshal_http_error, HttpError};
///
/// let err = HttpError::new(None, "Invalid use case done", 500);
/// assert_eq!(
///     marshal_http_error(&err),
///     r#"{"errors":[{"status":"500","title":"Invalid use case done"}]}"#
/// );
/// ```
pub fn marshal_http_error(input: &HttpError) -> String {
    let synthesized;
    let errors = if input.errors.is_empty() {
        synthesized = [Error::new()
            .with_title(input.message.as_str())
            .with_status(input.status.to_string())];
        &synthesized[..]
    } else {
        &input.errors[..]
    };
    encode_or_empty(&ErrorDocument { errors })
}

fn encode_or_empty<T: Serialize>(document: &T) -> String {
    match serde_json::to_string(document) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(error = %err, "failed to encode error document");
            "{}".to_string()
        }
    }
}
