//! Error types for the todo API client.
//!
//! # Design
//! The server answers failures with `{"errorMessage": ...}`. 404 and 400 get
//! dedicated variants carrying that message; every other unexpected status
//! lands in `HttpError` with the raw status and body.

use std::fmt;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404: the todo does not exist.
    NotFound { message: String },

    /// The server returned 400: the payload was rejected.
    BadRequest { message: String },

    /// Any other unexpected status.
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { message } => write!(f, "not found: {message}"),
            ApiError::BadRequest { message } => write!(f, "bad request: {message}"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
