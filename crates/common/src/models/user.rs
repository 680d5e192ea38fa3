//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::default_true;
use crate::id::DocumentId;

fn default_status() -> String {
    "Active".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DocumentId,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    pub role: DocumentId,

    pub institute: DocumentId,

    pub organisation: DocumentId,

    pub department: Vec<DocumentId>,

    pub lab: Vec<DocumentId>,

    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub role: Option<DocumentId>,
    pub institute: Option<DocumentId>,
    pub organisation: Option<DocumentId>,
    pub department: Option<Vec<DocumentId>>,
    pub lab: Option<Vec<DocumentId>>,
}

/// Update is restricted to this field set; anything else in the body is
/// ignored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<DocumentId>,
    pub status: Option<String>,
    pub is_active: Option<bool>,
}
