//! Analytics handlers

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
    models::{Analytics, CreateAnalytics},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Analytics>>> {
    Ok(Json(state.services.analytics.list().await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Analytics>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.analytics.get(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAnalytics>,
) -> Result<(StatusCode, Json<Analytics>)> {
    let analytics = state.services.analytics.create(input).await?;
    Ok((StatusCode::CREATED, Json(analytics)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreateAnalytics>,
) -> Result<Json<Analytics>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.analytics.update(&id, input).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = DocumentId::parse(&id)?;
    state.services.analytics.delete(&id).await?;
    Ok(Json(MessageResponse::new("Analytics deleted successfully")))
}
