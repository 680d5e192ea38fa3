//! Laboratory entity — leaf of the containment hierarchy

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::default_true;
use crate::id::DocumentId;

fn default_status() -> String {
    "Active".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Laboratory {
    pub id: DocumentId,

    pub name: String,

    #[serde(default)]
    pub department_id: Option<DocumentId>,

    #[serde(default)]
    pub institute_id: Option<DocumentId>,

    #[serde(default)]
    pub organisation_id: Option<DocumentId>,

    #[serde(default = "default_status")]
    pub status: String,

    /// Lab manager user
    #[serde(default)]
    pub user: Option<DocumentId>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLaboratory {
    pub name: Option<String>,
    pub organisation_id: Option<DocumentId>,
    pub institute_id: Option<DocumentId>,
    pub department_id: Option<DocumentId>,
    pub user: Option<DocumentId>,
    pub status: Option<String>,
    pub is_active: Option<bool>,
    pub is_deleted: Option<bool>,
}
