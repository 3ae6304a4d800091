//! API error taxonomy and its HTTP mapping.
//!
//! Every failure a handler can produce is one of these variants, and
//! every variant renders as `{"error": "<message>"}` with a fixed status.
//! Store failures keep their source for the log but only the
//! operation-scoped message reaches the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Failure surfaced by a request handler.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input: bad ids, absent fields, wrong types.
    #[error("{0}")]
    Validation(String),

    /// A write collides with existing data, such as a duplicate email.
    /// Reported as 400, which is the public contract of this API.
    #[error("{0}")]
    Conflict(String),

    /// Credentials matched no user.
    #[error("{0}")]
    Unauthorized(String),

    /// No document matched the targeted operation.
    #[error("{0}")]
    NotFound(String),

    /// The store failed underneath the handler.
    #[error("{message}")]
    Store {
        message: String,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Store failure with a message describing the operation that hit it.
    pub fn store(message: impl Into<String>, source: StoreError) -> Self {
        Self::Store {
            message: message.into(),
            source,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(source: StoreError) -> Self {
        Self::store("Internal server error", source)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let Self::Store { message, source } = &self {
            tracing::error!(error = %source, "{message}");
        }

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
