//! Role service
//!
//! A role carries one permission map per management area. Maps the caller
//! leaves out default to empty, which denies everything.

use serde_json::json;

use super::{decode, decode_all, to_patch};
use crate::errors::{AppError, Result};
use crate::id::DocumentId;
use crate::models::{CreateRole, PermissionMap, Role};
use crate::store::{Collection, SharedStore};

#[derive(Clone)]
pub struct RoleService {
    store: SharedStore,
}

impl RoleService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Role>> {
        decode_all(self.store.find_all(Collection::Roles).await?)
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Role> {
        let doc = self
            .store
            .find_by_id(Collection::Roles, id)
            .await?
            .ok_or_else(|| AppError::not_found("Role"))?;
        decode(doc)
    }

    pub async fn create(&self, input: CreateRole) -> Result<Role> {
        let name = input
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::validation("Role name is required."))?;

        let map = |m: Option<PermissionMap>| m.unwrap_or_default();

        let doc = json!({
            "name": name,
            "type": input.role_type,
            "procedure_management": map(input.procedure_management),
            "analytics_management": map(input.analytics_management),
            "reports_management": map(input.reports_management),
            "profile_management": map(input.profile_management),
            "asset_management": map(input.asset_management),
            "runs_management": map(input.runs_management),
            "user_management": map(input.user_management),
            "role_management": map(input.role_management),
            "isActive": input.is_active.unwrap_or(true),
            "isDeleted": input.is_deleted.unwrap_or(false),
        });

        decode(self.store.insert(Collection::Roles, doc).await?)
    }

    pub async fn update(&self, id: &DocumentId, input: CreateRole) -> Result<Role> {
        let doc = self
            .store
            .merge(Collection::Roles, id, to_patch(&input)?)
            .await?
            .ok_or_else(|| AppError::not_found("Role"))?;
        decode(doc)
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<()> {
        if !self.store.remove(Collection::Roles, id).await? {
            return Err(AppError::not_found("Role"));
        }
        Ok(())
    }
}
