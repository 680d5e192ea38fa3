//! Script handlers

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
    models::{CreateScript, Script},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Script>>> {
    Ok(Json(state.services.scripts.list().await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Script>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.scripts.get(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateScript>,
) -> Result<(StatusCode, Json<Script>)> {
    let script = state.services.scripts.create(input).await?;
    Ok((StatusCode::CREATED, Json(script)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreateScript>,
) -> Result<Json<Script>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.scripts.update(&id, input).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = DocumentId::parse(&id)?;
    state.services.scripts.delete(&id).await?;
    Ok(Json(MessageResponse::new("Script deleted successfully")))
}
