//! Asset handlers
//!
//! The list endpoint returns every asset, soft-deleted included; the HTTP
//! delete is a hard delete. The filtered search and soft delete are agent
//! surfaces and are not routed here.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::MessageResponse;
use crate::AppState;
use labvault_common::{
    errors::Result,
    id::DocumentId,
    models::{Asset, CreateAsset},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Asset>>> {
    Ok(Json(state.services.assets.list().await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Asset>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.assets.get(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAsset>,
) -> Result<(StatusCode, Json<Asset>)> {
    let asset = state.services.assets.create(input).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreateAsset>,
) -> Result<Json<Asset>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.assets.update(&id, input).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = DocumentId::parse(&id)?;
    state.services.assets.delete(&id).await?;
    Ok(Json(MessageResponse::new("Asset deleted successfully")))
}
