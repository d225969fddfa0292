//! HTTP error mapping for domain errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use slotbook_domain::SlotbookError;

/// Wrapper turning domain errors into HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub SlotbookError);

impl From<SlotbookError> for ApiError {
    fn from(err: SlotbookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SlotbookError::Validation(_) => StatusCode::BAD_REQUEST,
            SlotbookError::Auth(_) => StatusCode::UNAUTHORIZED,
            SlotbookError::NotFound(_) => StatusCode::NOT_FOUND,
            SlotbookError::DuplicateSlot(_) => StatusCode::CONFLICT,
            SlotbookError::Provider(_) | SlotbookError::Network(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // The domain error serialises as a { type, message } object.
        let body = Json(json!({ "error": self.0 }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
