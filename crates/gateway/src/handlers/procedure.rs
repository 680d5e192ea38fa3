//! Procedure handlers

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
    models::{CreateProcedure, Procedure, UpdateProcedure},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Procedure>>> {
    Ok(Json(state.services.procedures.list().await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Procedure>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.procedures.get(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProcedure>,
) -> Result<(StatusCode, Json<Procedure>)> {
    let procedure = state.services.procedures.create(input).await?;
    Ok((StatusCode::CREATED, Json(procedure)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProcedure>,
) -> Result<Json<Procedure>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.procedures.update(&id, input).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = DocumentId::parse(&id)?;
    state.services.procedures.delete(&id).await?;
    Ok(Json(MessageResponse::new("Procedure deleted successfully")))
}
