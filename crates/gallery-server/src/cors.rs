//! Per-route CORS policy
//!
//! `CorsLayer` answers preflights and stamps `Access-Control-Allow-Origin: *`
//! on every other response. Each route also registers an `OPTIONS` handler
//! with the same allow-list, so an `OPTIONS` the layer passes through never
//! lands on the 405 fallback. Neither path touches storage.

use axum::{
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_MAX_AGE,
            CONTENT_TYPE,
        },
        HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Response},
};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// How long browsers may cache a preflight answer
pub const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorsPolicy {
    Memories,
    Texts,
}

impl CorsPolicy {
    pub fn methods(self) -> Vec<Method> {
        match self {
            CorsPolicy::Memories => vec![Method::GET, Method::POST, Method::DELETE, Method::OPTIONS],
            CorsPolicy::Texts => vec![Method::GET, Method::PUT, Method::OPTIONS],
        }
    }

    /// Layer that adds `Access-Control-Allow-Origin: *` to every response
    pub fn layer(self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(self.methods())
            .allow_headers([CONTENT_TYPE])
            .max_age(PREFLIGHT_MAX_AGE)
    }

    pub fn allowed_methods(self) -> String {
        self.methods()
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// 200 with an empty body and the allow-list headers
    pub fn preflight(self) -> Response {
        let mut response = StatusCode::OK.into_response();
        let headers = response.headers_mut();

        if let Ok(methods) = HeaderValue::from_str(&self.allowed_methods()) {
            headers.insert(ACCESS_CONTROL_ALLOW_METHODS, methods);
        }
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );
        headers.insert(
            ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from(PREFLIGHT_MAX_AGE.as_secs()),
        );

        response
    }
}
