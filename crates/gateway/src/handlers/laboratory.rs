//! Laboratory handlers

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
    models::{CreateLaboratory, Laboratory},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Laboratory>>> {
    Ok(Json(state.services.laboratories.list().await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Laboratory>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.laboratories.get(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateLaboratory>,
) -> Result<(StatusCode, Json<Laboratory>)> {
    let laboratory = state.services.laboratories.create(input).await?;
    Ok((StatusCode::CREATED, Json(laboratory)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreateLaboratory>,
) -> Result<Json<Laboratory>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.laboratories.update(&id, input).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = DocumentId::parse(&id)?;
    state.services.laboratories.delete(&id).await?;
    Ok(Json(MessageResponse::new("Laboratory deleted successfully")))
}
