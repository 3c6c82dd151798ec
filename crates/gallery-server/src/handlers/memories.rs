//! Memory handlers

use crate::cors::CorsPolicy;
use crate::error::ApiError;
use crate::extractors::{JsonBody, QueryPairs};
use crate::AppState;
use axum::{
    extract::State,
    response::Response,
    Json,
};
use gallery_core::{
    DeleteMemoryQuery, MemoryListResponse, MessageResponse, UploadMemoryRequest,
    UploadMemoryResponse,
};

pub async fn preflight() -> Response {
    CorsPolicy::Memories.preflight()
}

pub async fn list(State(state): State<AppState>) -> Result<Json<MemoryListResponse>, ApiError> {
    let memories = state.memories.list().await?;
    Ok(Json(MemoryListResponse { memories }))
}

pub async fn upload(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UploadMemoryRequest>,
) -> Result<Json<UploadMemoryResponse>, ApiError> {
    let upload = req.validate()?;
    let response = state.memories.upload(upload).await?;
    Ok(Json(response))
}

pub async fn delete(
    State(state): State<AppState>,
    QueryPairs(query): QueryPairs<DeleteMemoryQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = query.validate()?;
    state.memories.delete(&id).await?;
    Ok(Json(MessageResponse::new("Memory deleted successfully")))
}
