//! Procedure entity
//!
//! Organisation and institute are never client-supplied: they are copied
//! from the referenced department at create time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::default_true;
use crate::id::DocumentId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    pub id: DocumentId,

    pub name: String,

    pub department: Vec<DocumentId>,

    pub lab: Vec<DocumentId>,

    /// Copied from the first department at create time
    #[serde(default)]
    pub organisation: Option<DocumentId>,

    /// Copied from the first department at create time
    #[serde(default)]
    pub institute: Option<DocumentId>,

    pub created_on: DateTime<Utc>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProcedure {
    pub name: Option<String>,
    pub department: Option<Vec<DocumentId>>,
    pub lab: Option<Vec<DocumentId>>,
    pub created_on: Option<DateTime<Utc>>,
}

/// Only the name is mutable after creation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProcedure {
    pub name: Option<String>,
}
