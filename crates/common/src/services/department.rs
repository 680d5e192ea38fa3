//! Department service

use serde_json::json;

use super::{decode, decode_all, to_patch};
use crate::errors::{AppError, Result};
use crate::id::DocumentId;
use crate::models::{CreateDepartment, Department};
use crate::store::{Collection, SharedStore};

#[derive(Clone)]
pub struct DepartmentService {
    store: SharedStore,
}

impl DepartmentService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Department>> {
        decode_all(self.store.find_all(Collection::Departments).await?)
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Department> {
        let doc = self
            .store
            .find_by_id(Collection::Departments, id)
            .await?
            .ok_or_else(|| AppError::not_found("Department"))?;
        decode(doc)
    }

    pub async fn create(&self, input: CreateDepartment) -> Result<Department> {
        let name = input.name.as_deref().filter(|n| !n.trim().is_empty());
        let (name, institute_id, organisation_id) =
            match (name, input.institute_id.as_ref(), input.organisation_id.as_ref()) {
                (Some(name), Some(institute), Some(organisation)) => {
                    (name, institute, organisation)
                }
                _ => {
                    return Err(AppError::validation(
                        "name, instituteId, and organisationId are required.",
                    ))
                }
            };

        let doc = json!({
            "name": name,
            "departmentNumber": input.department_number,
            "user": input.user,
            "instituteId": institute_id,
            "organisationId": organisation_id,
            "status": input.status.as_deref().unwrap_or("Active"),
            "isActive": input.is_active.unwrap_or(true),
            "isDeleted": input.is_deleted.unwrap_or(false),
        });

        decode(self.store.insert(Collection::Departments, doc).await?)
    }

    pub async fn update(&self, id: &DocumentId, input: CreateDepartment) -> Result<Department> {
        let doc = self
            .store
            .merge(Collection::Departments, id, to_patch(&input)?)
            .await?
            .ok_or_else(|| AppError::not_found("Department"))?;
        decode(doc)
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<()> {
        if !self.store.remove(Collection::Departments, id).await? {
            return Err(AppError::not_found("Department"));
        }
        Ok(())
    }
}
