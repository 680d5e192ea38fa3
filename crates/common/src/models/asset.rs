//! Asset entity
//!
//! Assets can be shared across departments and laboratories, so both of
//! those references are arrays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::default_true;
use crate::id::DocumentId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: DocumentId,

    pub name: String,

    #[serde(default)]
    pub asset_number: Option<String>,

    #[serde(default)]
    pub department_id: Vec<DocumentId>,

    #[serde(default)]
    pub laboratory_id: Vec<DocumentId>,

    #[serde(default)]
    pub institute_id: Option<DocumentId>,

    pub organisation_id: DocumentId,

    #[serde(default)]
    pub purchased_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_used_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub availability: Option<String>,

    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAsset {
    pub name: Option<String>,
    pub asset_number: Option<String>,
    pub department_id: Option<Vec<DocumentId>>,
    pub laboratory_id: Option<Vec<DocumentId>>,
    pub institute_id: Option<DocumentId>,
    pub organisation_id: Option<DocumentId>,
    pub purchased_date: Option<DateTime<Utc>>,
    pub last_used_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub availability: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
    pub is_deleted: Option<bool>,
}
