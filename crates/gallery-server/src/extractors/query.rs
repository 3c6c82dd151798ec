//! Query string extractor
//!
//! Reads the query as ordered key/value pairs so repeated keys never fail
//! deserialization; the target type decides which occurrence wins. Anything
//! unreadable is rejected with the usual JSON error body.

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use gallery_core::GalleryError;

#[derive(Debug)]
pub struct QueryPairs<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryPairs<T>
where
    T: FromIterator<(String, String)>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError(GalleryError::MalformedRequest(e.body_text())))?;

        Ok(QueryPairs(pairs.into_iter().collect()))
    }
}
