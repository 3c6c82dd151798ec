//! HTTP handlers

pub mod health;
pub mod memories;
pub mod texts;

use crate::error::ApiError;
use gallery_core::GalleryError;

pub use health::health;

/// Fallback for methods a route does not serve
pub async fn method_not_allowed() -> ApiError {
    ApiError(GalleryError::MethodNotAllowed)
}
