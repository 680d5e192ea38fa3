//! Report handlers

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
    models::{CreateReport, Report},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Report>>> {
    Ok(Json(state.services.reports.list().await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Report>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.reports.get(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateReport>,
) -> Result<(StatusCode, Json<Report>)> {
    let report = state.services.reports.create(input).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreateReport>,
) -> Result<Json<Report>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.reports.update(&id, input).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = DocumentId::parse(&id)?;
    state.services.reports.delete(&id).await?;
    Ok(Json(MessageResponse::new("Report deleted successfully")))
}
