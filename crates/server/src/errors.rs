use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::StoreError;
use tracing::error;

/// Maps domain errors onto HTTP responses with a JSON error body.
///
/// Missing entities are 404, a rejected checkout is 409, and substrate
/// failures are 500. The error message is passed through verbatim.
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            StoreError::AccountDoesNotExist(_) | StoreError::BookDoesNotExist(_) => {
                StatusCode::NOT_FOUND
            }
            StoreError::InsufficientBalance(_) => StatusCode::CONFLICT,
            StoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "storage failure");
        }
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}
