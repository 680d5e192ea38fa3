//! Procedure service
//!
//! Create resolves the first referenced department and copies its
//! organisation and institute onto the procedure. After creation only the
//! name can change.

use serde_json::json;

use super::{decode, decode_all};
use crate::errors::{AppError, Result};
use crate::id::DocumentId;
use crate::models::{CreateProcedure, Department, Procedure, UpdateProcedure};
use crate::store::{Collection, SharedStore};

#[derive(Clone)]
pub struct ProcedureService {
    store: SharedStore,
}

impl ProcedureService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Procedure>> {
        decode_all(self.store.find_all(Collection::Procedures).await?)
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Procedure> {
        let doc = self
            .store
            .find_by_id(Collection::Procedures, id)
            .await?
            .ok_or_else(|| AppError::not_found("Procedure"))?;
        decode(doc)
    }

    pub async fn create(&self, input: CreateProcedure) -> Result<Procedure> {
        let name = input.name.as_deref().filter(|n| !n.trim().is_empty());
        let departments = input.department.as_deref().filter(|d| !d.is_empty());
        let labs = input.lab.as_deref().filter(|l| !l.is_empty());
        let (name, departments, labs) = match (name, departments, labs) {
            (Some(name), Some(departments), Some(labs)) => (name, departments, labs),
            _ => {
                return Err(AppError::validation(
                    "All fields are required: name, department, lab (all IDs)",
                ))
            }
        };

        // Organisation and institute come from the first department
        let department: Department = decode(
            self.store
                .find_by_id(Collection::Departments, &departments[0])
                .await?
                .ok_or_else(|| AppError::not_found("Department"))?,
        )?;

        let doc = json!({
            "name": name,
            "department": departments,
            "lab": labs,
            "organisation": department.organisation_id,
            "institute": department.institute_id,
            "createdOn": input.created_on.unwrap_or_else(chrono::Utc::now),
            "isActive": true,
            "isDeleted": false,
        });

        decode(self.store.insert(Collection::Procedures, doc).await?)
    }

    pub async fn update(&self, id: &DocumentId, input: UpdateProcedure) -> Result<Procedure> {
        let name = input
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::validation("Only procedure name can be updated"))?;

        let doc = self
            .store
            .merge(Collection::Procedures, id, json!({ "name": name }))
            .await?
            .ok_or_else(|| AppError::not_found("Procedure"))?;
        decode(doc)
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<()> {
        if !self.store.remove(Collection::Procedures, id).await? {
            return Err(AppError::not_found("Procedure"));
        }
        Ok(())
    }
}
