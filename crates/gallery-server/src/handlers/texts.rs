//! Site text handlers

use crate::cors::CorsPolicy;
use crate::error::ApiError;
use crate::extractors::JsonBody;
use crate::AppState;
use axum::{extract::State, response::Response, Json};
use gallery_core::{MessageResponse, TextListResponse, UpdateTextRequest};

pub async fn preflight() -> Response {
    CorsPolicy::Texts.preflight()
}

pub async fn list(State(state): State<AppState>) -> Result<Json<TextListResponse>, ApiError> {
    let texts = state.texts.list().await?;
    Ok(Json(texts.into_iter().collect()))
}

pub async fn update(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateTextRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let update = req.validate()?;
    state.texts.update(update).await?;
    Ok(Json(MessageResponse::new("Text updated successfully")))
}
