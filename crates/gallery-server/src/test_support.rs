//! Shared fixtures for handler tests

use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::services::CdnLocation;
use crate::storage::{InMemoryBlobStore, InMemoryStore};
use crate::{app, AppState};
use axum::{
    body::{Body, Bytes},
    http::{
        header::{ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE},
        Request,
    },
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub blobs: Arc<InMemoryBlobStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(InMemoryBlobStore::new(), DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub fn with_failing_blobs() -> Self {
        Self::build(InMemoryBlobStore::failing_puts(), DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub fn with_upload_limit(max_upload_bytes: usize) -> Self {
        Self::build(InMemoryBlobStore::new(), max_upload_bytes)
    }

    fn build(blobs: InMemoryBlobStore, max_upload_bytes: usize) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let blobs = Arc::new(blobs);
        let cdn = CdnLocation {
            base_url: "https://cdn.test".to_string(),
            account_id: "acct".to_string(),
        };
        let state = AppState::new(store.clone(), store.clone(), blobs.clone(), cdn);

        Self {
            router: app(state, max_upload_bytes),
            store,
            blobs,
        }
    }

    pub async fn call(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub async fn body_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn assert_json_content_type(response: &Response) {
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
}

/// Allow-list as individual method names, whatever the separator spacing
pub fn allowed_methods(response: &Response) -> Vec<String> {
    response.headers()[ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap()
        .split(',')
        .map(|m| m.trim().to_string())
        .collect()
}
