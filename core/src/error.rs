//! Error types for the todo API client and view model.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers distinguish "the todo
//! no longer exists server-side" from "the server returned an unexpected
//! status." `Network` is produced by the host when the round-trip itself
//! could not complete; the core never does I/O.

use thiserror::Error;

/// Coarse classification handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkFailure,
    NotFound,
    Unknown,
}

/// Errors returned by `TodoClient` parse methods and view-model events.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not complete (reported by the host transport).
    #[error("network failure: {0}")]
    Network(String),

    /// The server returned 404, the todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network(_) => ErrorKind::NetworkFailure,
            ApiError::NotFound => ErrorKind::NotFound,
            ApiError::HttpError { .. }
            | ApiError::DeserializationError(_)
            | ApiError::SerializationError(_) => ErrorKind::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_classifies_variants() {
        assert_eq!(ApiError::Network("refused".into()).kind(), ErrorKind::NetworkFailure);
        assert_eq!(ApiError::NotFound.kind(), ErrorKind::NotFound);
        let err = ApiError::HttpError {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }
}
