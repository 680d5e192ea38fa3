//! Entity services
//!
//! One service per entity, all sharing a single `SharedStore`. Every rule
//! that used to live in the HTTP controllers lives here instead: required
//! field checks, reference checks, soft-delete visibility, and restricted
//! update field sets. Both the gateway handlers and the agent tools call
//! through this layer, so the two surfaces can never drift apart.

mod analytics;
mod asset;
mod department;
mod institute;
mod laboratory;
mod organisation;
mod procedure;
mod report;
mod role;
mod run;
mod script;
mod user;

pub use analytics::AnalyticsService;
pub use asset::{AssetSearch, AssetService, SEARCH_LIMIT_DEFAULT, SEARCH_LIMIT_MAX};
pub use department::DepartmentService;
pub use institute::InstituteService;
pub use laboratory::LaboratoryService;
pub use organisation::OrganisationService;
pub use procedure::ProcedureService;
pub use report::ReportService;
pub use role::RoleService;
pub use run::RunService;
pub use script::ScriptService;
pub use user::UserService;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::{AppError, Result};
use crate::store::SharedStore;

/// Every entity service, ready to hand to a gateway or agent
#[derive(Clone)]
pub struct Services {
    pub institutes: InstituteService,
    pub organisations: OrganisationService,
    pub departments: DepartmentService,
    pub laboratories: LaboratoryService,
    pub users: UserService,
    pub roles: RoleService,
    pub assets: AssetService,
    pub procedures: ProcedureService,
    pub runs: RunService,
    pub analytics: AnalyticsService,
    pub reports: ReportService,
    pub scripts: ScriptService,
}

impl Services {
    pub fn new(store: SharedStore) -> Self {
        Self {
            institutes: InstituteService::new(store.clone()),
            organisations: OrganisationService::new(store.clone()),
            departments: DepartmentService::new(store.clone()),
            laboratories: LaboratoryService::new(store.clone()),
            users: UserService::new(store.clone()),
            roles: RoleService::new(store.clone()),
            assets: AssetService::new(store.clone()),
            procedures: ProcedureService::new(store.clone()),
            runs: RunService::new(store.clone()),
            analytics: AnalyticsService::new(store.clone()),
            reports: ReportService::new(store.clone()),
            scripts: ScriptService::new(store),
        }
    }
}

/// Decode a stored document into its typed model.
pub(crate) fn decode<T: DeserializeOwned>(doc: Value) -> Result<T> {
    serde_json::from_value(doc).map_err(|e| AppError::Internal {
        message: format!("Stored document does not match schema: {}", e),
    })
}

pub(crate) fn decode_all<T: DeserializeOwned>(docs: Vec<Value>) -> Result<Vec<T>> {
    docs.into_iter().map(decode).collect()
}

/// Serialize an all-optional input struct into a merge patch, dropping the
/// fields the caller left unset.
pub(crate) fn to_patch<T: Serialize>(input: &T) -> Result<Value> {
    let mut value = serde_json::to_value(input)?;
    if let Value::Object(map) = &mut value {
        map.retain(|_, v| !v.is_null());
    }
    Ok(value)
}

pub(crate) fn is_deleted(doc: &Value) -> bool {
    doc.get("isDeleted").and_then(Value::as_bool).unwrap_or(false)
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::store::{MemoryStore, SharedStore};
    use std::sync::Arc;

    pub fn memory_store() -> SharedStore {
        Arc::new(MemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    struct SampleInput {
        name: Option<String>,
        asset_number: Option<String>,
    }

    #[test]
    fn test_to_patch_drops_unset_fields() {
        let input = SampleInput {
            name: Some("pipette".to_string()),
            asset_number: None,
        };
        let patch = to_patch(&input).unwrap();
        assert_eq!(patch, json!({ "name": "pipette" }));
    }

    #[test]
    fn test_is_deleted_defaults_false() {
        assert!(!is_deleted(&json!({ "name": "x" })));
        assert!(!is_deleted(&json!({ "isDeleted": false })));
        assert!(is_deleted(&json!({ "isDeleted": true })));
    }
}
