//! Role entity and typed permission maps
//!
//! The legacy schema stored each permission map as a free-form object. Here
//! the keys are an enumerated action set and the values an explicit
//! allow/deny effect, so downstream checks never dispatch on untyped JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::default_true;
use crate::id::DocumentId;

/// Actions a role can be granted on a management area
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PermissionAction {
    View,
    Create,
    Edit,
    Delete,
    Export,
    Approve,
}

/// Effect of a granted action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionEffect {
    Allow,
    Deny,
}

/// Action -> effect map for one management area; serializes as a plain JSON
/// object (`{"view": "allow", ...}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMap(pub BTreeMap<PermissionAction, PermissionEffect>);

impl PermissionMap {
    pub fn allows(&self, action: PermissionAction) -> bool {
        matches!(self.0.get(&action), Some(PermissionEffect::Allow))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: DocumentId,

    pub name: String,

    #[serde(default, rename = "type")]
    pub role_type: Option<String>,

    #[serde(default, rename = "procedure_management")]
    pub procedure_management: PermissionMap,

    #[serde(default, rename = "analytics_management")]
    pub analytics_management: PermissionMap,

    #[serde(default, rename = "reports_management")]
    pub reports_management: PermissionMap,

    #[serde(default, rename = "profile_management")]
    pub profile_management: PermissionMap,

    #[serde(default, rename = "asset_management")]
    pub asset_management: PermissionMap,

    #[serde(default, rename = "runs_management")]
    pub runs_management: PermissionMap,

    #[serde(default, rename = "user_management")]
    pub user_management: PermissionMap,

    #[serde(default, rename = "role_management")]
    pub role_management: PermissionMap,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRole {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub role_type: Option<String>,
    #[serde(default, rename = "procedure_management")]
    pub procedure_management: Option<PermissionMap>,
    #[serde(default, rename = "analytics_management")]
    pub analytics_management: Option<PermissionMap>,
    #[serde(default, rename = "reports_management")]
    pub reports_management: Option<PermissionMap>,
    #[serde(default, rename = "profile_management")]
    pub profile_management: Option<PermissionMap>,
    #[serde(default, rename = "asset_management")]
    pub asset_management: Option<PermissionMap>,
    #[serde(default, rename = "runs_management")]
    pub runs_management: Option<PermissionMap>,
    #[serde(default, rename = "user_management")]
    pub user_management: Option<PermissionMap>,
    #[serde(default, rename = "role_management")]
    pub role_management: Option<PermissionMap>,
    pub is_active: Option<bool>,
    pub is_deleted: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_map_serialization() {
        let mut map = PermissionMap::default();
        map.0.insert(PermissionAction::View, PermissionEffect::Allow);
        map.0.insert(PermissionAction::Delete, PermissionEffect::Deny);

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["view"], "allow");
        assert_eq!(json["delete"], "deny");

        let back: PermissionMap = serde_json::from_value(json).unwrap();
        assert!(back.allows(PermissionAction::View));
        assert!(!back.allows(PermissionAction::Delete));
        assert!(!back.allows(PermissionAction::Export));
    }

    #[test]
    fn test_unknown_permission_key_rejected() {
        let json = serde_json::json!({ "frobnicate": "allow" });
        assert!(serde_json::from_value::<PermissionMap>(json).is_err());
    }
}
