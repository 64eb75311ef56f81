use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use flashdeck_core::CoreError;
use tracing::{debug, error};

use crate::api::dto::ErrorBody;

pub enum ApiError {
    MissingCurrentId,
    InvalidCurrentId,
    Core(CoreError),
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::Core(e)
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::MissingCurrentId => (StatusCode::BAD_REQUEST, "current_id is required"),
            ApiError::InvalidCurrentId => (
                StatusCode::BAD_REQUEST,
                "Invalid current_id format, expected integer",
            ),
            ApiError::Core(CoreError::EmptyDeck) => (StatusCode::NOT_FOUND, "No cards found in deck"),
            ApiError::Core(CoreError::NoNextCard) => (StatusCode::NOT_FOUND, "No next card found"),
            ApiError::Core(CoreError::Count(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to count documents")
            }
            ApiError::Core(CoreError::Fetch(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch card")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        match &self {
            ApiError::Core(e @ (CoreError::Count(_) | CoreError::Fetch(_))) => {
                error!(error = %e, "storage fault");
            }
            _ => debug!(status = %status, reason = message, "request rejected"),
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
