//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;

use crate::telemost::TelemostError;

// Errors

pub struct ApiError(anyhow::Error);

impl ApiError {
    /// Caller-supplied data failed a route-level check.
    pub fn bad_request(message: &str) -> Self {
        Self(TelemostError::Validation(message.to_string()).into())
    }

    /// The conferencing client failed to construct at startup, so the
    /// route cannot serve the request.
    pub fn client_unavailable() -> Self {
        Self(TelemostError::Api("Telemost API client not available".to_string()).into())
    }
}

/// Convert `ApiError` into an Axum compatible response.
///
/// The three client error kinds map to stable status codes. Anything
/// unexpected becomes a generic 500 so internal error text never leaks
/// into a response body.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        tracing::error!("{}", self.0);

        let (status, message) = match self.0.downcast_ref::<TelemostError>() {
            Some(TelemostError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            Some(TelemostError::Auth(_)) => (
                StatusCode::UNAUTHORIZED,
                "Authentication failed".to_string(),
            ),
            Some(TelemostError::Api(msg)) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            None => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// Re-export public types from each route

pub mod health {
    pub use crate::api::routes::health::public::*;
}

pub mod meetings {
    pub use crate::api::routes::meetings::public::*;
}

pub mod notify {
    pub use crate::api::routes::notify::public::*;
}
