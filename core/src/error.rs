//! Error types for the run log client.
//!
//! # Design
//! Each failure a `call` can end in has its own variant so callers can branch
//! on it: a rejected payload or response shape (`Validation`), a non-2xx
//! status (`Network`), a body that is not JSON (`Decode`), and I/O failures
//! below HTTP (`Transport`). Nothing is retried or recovered here.

use thiserror::Error;

/// A value did not match the expected schema.
///
/// `field` is a path such as `version`, `statusCode` or `[2].score`;
/// it is empty when the top-level value itself has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}expected {expected}, found {found}", field_prefix(.field))]
pub struct ValidationError {
    pub field: String,
    pub expected: String,
    pub found: String,
}

fn field_prefix(field: &str) -> String {
    if field.is_empty() {
        String::new()
    } else {
        format!("`{field}`: ")
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Prefix the field path with `parent`, used when validating nested values.
    pub(crate) fn within(mut self, parent: &str) -> Self {
        self.field = match (parent.is_empty(), self.field.is_empty()) {
            (true, _) => self.field,
            (false, true) => parent.to_string(),
            (false, false) if self.field.starts_with('[') => format!("{parent}{}", self.field),
            (false, false) => format!("{parent}.{}", self.field),
        };
        self
    }
}

/// Errors returned by `LogClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Outbound payload or inbound body failed schema validation.
    #[error("validation failed for {path}: {source}")]
    Validation {
        path: &'static str,
        #[source]
        source: ValidationError,
    },

    /// The server answered with a non-2xx status.
    #[error("request to {path} failed: HTTP {status} {status_text}")]
    Network {
        path: &'static str,
        status: u16,
        status_text: String,
    },

    /// The response body could not be parsed as JSON.
    #[error("could not decode response from {path}: {message}")]
    Decode { path: &'static str, message: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The request never produced an HTTP response.
    #[error("transport failed: {0}")]
    Transport(String),
}
