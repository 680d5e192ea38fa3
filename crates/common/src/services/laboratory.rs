//! Laboratory service

use serde_json::json;

use super::{decode, decode_all, to_patch};
use crate::errors::{AppError, Result};
use crate::id::DocumentId;
use crate::models::{CreateLaboratory, Laboratory};
use crate::store::{Collection, SharedStore};

#[derive(Clone)]
pub struct LaboratoryService {
    store: SharedStore,
}

impl LaboratoryService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Laboratory>> {
        decode_all(self.store.find_all(Collection::Laboratories).await?)
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Laboratory> {
        let doc = self
            .store
            .find_by_id(Collection::Laboratories, id)
            .await?
            .ok_or_else(|| AppError::not_found("Laboratory"))?;
        decode(doc)
    }

    pub async fn create(&self, input: CreateLaboratory) -> Result<Laboratory> {
        let name = input.name.as_deref().filter(|n| !n.trim().is_empty());
        let (name, organisation_id, institute_id, department_id) = match (
            name,
            input.organisation_id.as_ref(),
            input.institute_id.as_ref(),
            input.department_id.as_ref(),
        ) {
            (Some(name), Some(org), Some(institute), Some(department)) => {
                (name, org, institute, department)
            }
            _ => {
                return Err(AppError::validation(
                    "name, organisationId, instituteId, departmentId are required.",
                ))
            }
        };

        let doc = json!({
            "name": name,
            "organisationId": organisation_id,
            "instituteId": institute_id,
            "departmentId": department_id,
            "user": input.user,
            "status": input.status.as_deref().unwrap_or("Active"),
            "isActive": input.is_active.unwrap_or(true),
            "isDeleted": input.is_deleted.unwrap_or(false),
        });

        decode(self.store.insert(Collection::Laboratories, doc).await?)
    }

    pub async fn update(&self, id: &DocumentId, input: CreateLaboratory) -> Result<Laboratory> {
        let doc = self
            .store
            .merge(Collection::Laboratories, id, to_patch(&input)?)
            .await?
            .ok_or_else(|| AppError::not_found("Laboratory"))?;
        decode(doc)
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<()> {
        if !self.store.remove(Collection::Laboratories, id).await? {
            return Err(AppError::not_found("Laboratory"));
        }
        Ok(())
    }
}
