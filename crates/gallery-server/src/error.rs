//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gallery_core::{ErrorResponse, GalleryError};

/// Handler error; every variant renders as `{"error": ...}`
#[derive(Debug)]
pub struct ApiError(pub GalleryError);

impl From<GalleryError> for ApiError {
    fn from(e: GalleryError) -> Self {
        ApiError(e)
    }
}

impl From<gallery_core::ValidationError> for ApiError {
    fn from(e: gallery_core::ValidationError) -> Self {
        ApiError(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            GalleryError::Validation(reason) => (StatusCode::BAD_REQUEST, reason.to_string()),
            GalleryError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            GalleryError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Payload too large".to_string(),
            ),
            GalleryError::MalformedRequest(reason) => {
                tracing::debug!("Malformed request: {}", reason);
                (StatusCode::BAD_REQUEST, "Malformed request".to_string())
            }
            fault => {
                tracing::error!("Request failed: {}", fault);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
