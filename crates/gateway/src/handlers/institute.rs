//! Institute handlers

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
    models::{CreateInstitute, Institute},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Institute>>> {
    Ok(Json(state.services.institutes.list().await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Institute>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.institutes.get(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateInstitute>,
) -> Result<(StatusCode, Json<Institute>)> {
    let institute = state.services.institutes.create(input).await?;
    Ok((StatusCode::CREATED, Json(institute)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreateInstitute>,
) -> Result<Json<Institute>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.institutes.update(&id, input).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = DocumentId::parse(&id)?;
    state.services.institutes.delete(&id).await?;
    Ok(Json(MessageResponse::new("Institute deleted successfully")))
}
