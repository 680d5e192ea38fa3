//! Run entity — a scheduled execution of a procedure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::DocumentId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub id: DocumentId,

    pub procedure: DocumentId,

    // Legacy wire name, all lowercase
    #[serde(rename = "duedate")]
    pub due_date: DateTime<Utc>,

    pub objective: String,

    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,

    pub organisation: DocumentId,

    pub department: DocumentId,

    pub lab: DocumentId,

    #[serde(default)]
    pub assign_to: Option<DocumentId>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRun {
    pub procedure: Option<DocumentId>,
    #[serde(rename = "duedate")]
    pub due_date: Option<DateTime<Utc>>,
    pub objective: Option<String>,
    pub created_on: Option<DateTime<Utc>>,
    pub organisation: Option<DocumentId>,
    pub department: Option<DocumentId>,
    pub lab: Option<DocumentId>,
    pub assign_to: Option<DocumentId>,
}

/// Only due date, objective and assignee are mutable after creation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRun {
    #[serde(rename = "duedate")]
    pub due_date: Option<DateTime<Utc>>,
    pub objective: Option<String>,
    pub assign_to: Option<DocumentId>,
}
