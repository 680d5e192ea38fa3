//! Organisation handlers
//!
//! These endpoints predate the rest of the API and answer with
//! `{ "message": ... }` bodies on the fetch, create, and delete paths, and
//! wrap the created record in `{ "data": ... }`. Update keeps the common
//! `{ "error": ... }` shape.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use super::MessageResponse;
use crate::AppState;
use labvault_common::{
    errors::{AppError, Result},
    id::DocumentId,
    models::{CreateOrganisation, Organisation},
};

/// Error wrapper that renders as `{ "message": ... }`; server errors carry
/// the detail in a separate `error` field under a fixed message.
pub struct MessageError(AppError);

impl From<AppError> for MessageError {
    fn from(err: AppError) -> Self {
        MessageError(err)
    }
}

impl IntoResponse for MessageError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let body = if self.0.is_server_error() {
            json!({ "message": "Internal Server Error", "error": self.0.to_string() })
        } else {
            json!({ "message": self.0.to_string() })
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub data: Organisation,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Organisation>>> {
    Ok(Json(state.services.organisations.list().await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> std::result::Result<Json<Organisation>, MessageError> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.organisations.get(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateOrganisation>,
) -> std::result::Result<(StatusCode, Json<CreatedResponse>), MessageError> {
    let organisation = state.services.organisations.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse { data: organisation }),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreateOrganisation>,
) -> Result<Json<Organisation>> {
    let id = DocumentId::parse(&id)?;
    Ok(Json(state.services.organisations.update(&id, input).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> std::result::Result<Json<MessageResponse>, MessageError> {
    let id = DocumentId::parse(&id)?;
    state.services.organisations.delete(&id).await?;
    Ok(Json(MessageResponse::new(
        "Organisation deleted successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_of(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_client_errors_render_message_only() {
        let response =
            MessageError(AppError::not_found_message("Organisation not found")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_of(response).await;
        assert_eq!(body["message"], "Organisation not found");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_server_errors_carry_detail_field() {
        let response = MessageError(AppError::Internal {
            message: "boom".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert_eq!(body["message"], "Internal Server Error");
        assert_eq!(body["error"], "Internal server error: boom");
    }
}
