//! Report entity
//!
//! A report is built over one or more analytics records, so `analyticsId`
//! is an array. `createdOn` and `createdBy` are free-form strings on the
//! wire, matching the stored documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::DocumentId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: DocumentId,

    pub report_name: String,

    pub analytics_id: Vec<DocumentId>,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub created_on: Option<String>,

    #[serde(default)]
    pub created_by: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReport {
    pub report_name: Option<String>,
    pub analytics_id: Option<Vec<DocumentId>>,
    pub content: Option<String>,
    pub created_on: Option<String>,
    pub created_by: Option<String>,
}
