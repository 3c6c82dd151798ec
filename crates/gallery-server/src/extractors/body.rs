//! Lenient JSON body extractor
//!
//! Unlike `axum::Json` this does not require a `Content-Type` header, and an
//! empty body reads as `{}` so that missing fields reach validation. A body
//! that is present but not valid JSON is a serialization fault. A body over
//! the route's `DefaultBodyLimit` is rejected with 413.

use crate::error::ApiError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::StatusCode,
};
use gallery_core::GalleryError;
use serde::de::DeserializeOwned;

#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError(body_rejection(e)))?;

        parse(&bytes).map(JsonBody).map_err(ApiError)
    }
}

fn body_rejection(rejection: BytesRejection) -> GalleryError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GalleryError::PayloadTooLarge
    } else {
        GalleryError::MalformedRequest(rejection.body_text())
    }
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> gallery_core::Result<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_str("{}")?);
    }
    Ok(serde_json::from_slice(bytes)?)
}
