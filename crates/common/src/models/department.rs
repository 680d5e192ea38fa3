//! Department entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::default_true;
use crate::id::DocumentId;

fn default_status() -> String {
    "Active".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DocumentId,

    pub name: String,

    #[serde(default)]
    pub department_number: Option<String>,

    /// Head-of-department user
    #[serde(default)]
    pub user: Option<DocumentId>,

    pub institute_id: DocumentId,

    pub organisation_id: DocumentId,

    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartment {
    pub name: Option<String>,
    pub department_number: Option<String>,
    pub user: Option<DocumentId>,
    pub institute_id: Option<DocumentId>,
    pub organisation_id: Option<DocumentId>,
    pub status: Option<String>,
    pub is_active: Option<bool>,
    pub is_deleted: Option<bool>,
}
