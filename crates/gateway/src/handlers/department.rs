//! Department handlers

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
    models::{CreateDepartment, Department},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Department>>> {
    Ok(Json(state.services.departments.list().await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Department>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.departments.get(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateDepartment>,
) -> Result<(StatusCode, Json<Department>)> {
    let department = state.services.departments.create(input).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreateDepartment>,
) -> Result<Json<Department>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.departments.update(&id, input).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = DocumentId::parse(&id)?;
    state.services.departments.delete(&id).await?;
    Ok(Json(MessageResponse::new("Department deleted successfully")))
}
