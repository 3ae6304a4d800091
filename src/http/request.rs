//! Request-side plumbing.
//!
//! # Responsibilities
//! - Deserialize JSON bodies while keeping rejections inside the API
//!   error taxonomy
//! - Name the header every request is tagged and traced under

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::http::error::ApiError;

/// Header carrying the per-request correlation id. Set on ingress when
/// absent and echoed back on every response.
pub const X_REQUEST_ID: &str = "x-request-id";

/// JSON body extractor whose rejection is an [`ApiError`].
///
/// The stock extractor answers malformed bodies with its own plain-text
/// responses; this wrapper folds those into the `{"error": ...}` shape
/// the rest of the API speaks.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(reject(rejection)),
        }
    }
}

fn reject(rejection: JsonRejection) -> ApiError {
    ApiError::validation(rejection.body_text())
}
