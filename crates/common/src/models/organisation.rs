//! Organisation entity
//!
//! The only entity whose create path verifies a reference: the institute it
//! points at must exist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::default_true;
use crate::id::DocumentId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organisation {
    pub id: DocumentId,

    pub name: String,

    /// Institute this organisation belongs to
    pub institute: DocumentId,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganisation {
    pub name: Option<String>,
    pub institute: Option<DocumentId>,
    pub is_active: Option<bool>,
    pub is_deleted: Option<bool>,
}
