//! Error responses.
//!
//! # Design
//! Every handler returns `Result<_, ApiError>`. Expected failures (bad input,
//! unknown id) are raised as their own variants where they are detected;
//! store failures bubble up with `?`. [`ApiError`]'s `IntoResponse` impl is
//! the one place that turns a failure into a status code and an
//! `{"errorMessage": ...}` body. Server-side failures are logged there and
//! answered with a generic message.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::store::StoreError;
use crate::validation::ValidationError;

pub const NOT_FOUND_MESSAGE: &str = "todo does not exist";
pub const EMPTY_VALUE_MESSAGE: &str = "todo value does not exist";
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The body was not JSON, or not sent as JSON.
    #[error("{0}")]
    MalformedBody(String),

    #[error("todo value does not exist")]
    EmptyValue,

    #[error("todo does not exist")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A handler panicked.
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody(_) | ApiError::EmptyValue => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            ApiError::Store(_) | ApiError::Internal => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed: {self}");
        }
        let body = ErrorBody {
            error_message: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Response for a handler that panicked.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("handler panicked: {detail}");
    ApiError::Internal.into_response()
}
