//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use autorank_domain::error::AutorankError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`AutorankError`] to an HTTP response with appropriate status code.
pub struct ApiError(AutorankError);

impl From<AutorankError> for ApiError {
    fn from(err: AutorankError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AutorankError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AutorankError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            AutorankError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
            AutorankError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
