//! Role handlers

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
    models::{CreateRole, Role},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Role>>> {
    Ok(Json(state.services.roles.list().await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Role>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.roles.get(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRole>,
) -> Result<(StatusCode, Json<Role>)> {
    let role = state.services.roles.create(input).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreateRole>,
) -> Result<Json<Role>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.roles.update(&id, input).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = DocumentId::parse(&id)?;
    state.services.roles.delete(&id).await?;
    Ok(Json(MessageResponse::new("Role deleted successfully")))
}
