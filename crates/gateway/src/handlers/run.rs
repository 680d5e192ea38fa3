//! Run handlers

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
    models::{CreateRun, Run, UpdateRun},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Run>>> {
    Ok(Json(state.services.runs.list().await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Run>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.runs.get(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRun>,
) -> Result<(StatusCode, Json<Run>)> {
    let run = state.services.runs.create(input).await?;
    Ok((StatusCode::CREATED, Json(run)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateRun>,
) -> Result<Json<Run>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.runs.update(&id, input).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = DocumentId::parse(&id)?;
    state.services.runs.delete(&id).await?;
    Ok(Json(MessageResponse::new("Run deleted successfully")))
}
