//! Script entity — stored automation snippets; every field optional

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::default_true;
use crate::id::DocumentId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub id: DocumentId,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub script: Option<String>,

    #[serde(default, rename = "type")]
    pub script_type: Option<String>,

    // Legacy wire name, all lowercase
    #[serde(default, rename = "createdby")]
    pub created_by: Option<DocumentId>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScript {
    pub name: Option<String>,
    pub script: Option<String>,
    #[serde(rename = "type")]
    pub script_type: Option<String>,
    #[serde(rename = "createdby")]
    pub created_by: Option<DocumentId>,
}
