//! User service
//!
//! Users soft-delete: the record stays in the store but disappears from
//! list and get, and the status flips to Inactive. Updates accept only the
//! restricted field set in `UpdateUser`.

use serde_json::json;
use validator::Validate;

use super::{decode, decode_all, is_deleted, to_patch};
use crate::errors::{AppError, Result};
use crate::id::DocumentId;
use crate::models::{CreateUser, UpdateUser, User};
use crate::store::{Collection, SharedStore};

const REQUIRED_MESSAGE: &str = "All fields are required: firstName, lastName, email, role, institute, organisation, department, lab (all IDs)";

#[derive(Clone)]
pub struct UserService {
    store: SharedStore,
}

impl UserService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let docs = self.store.find_all(Collection::Users).await?;
        decode_all(docs.into_iter().filter(|d| !is_deleted(d)).collect())
    }

    pub async fn get(&self, id: &DocumentId) -> Result<User> {
        let doc = self
            .store
            .find_by_id(Collection::Users, id)
            .await?
            .filter(|d| !is_deleted(d))
            .ok_or_else(|| AppError::not_found("User"))?;
        decode(doc)
    }

    pub async fn create(&self, input: CreateUser) -> Result<User> {
        let complete = input.first_name.as_deref().is_some_and(|s| !s.is_empty())
            && input.last_name.as_deref().is_some_and(|s| !s.is_empty())
            && input.email.as_deref().is_some_and(|s| !s.is_empty())
            && input.role.is_some()
            && input.institute.is_some()
            && input.organisation.is_some()
            && input.department.as_ref().is_some_and(|d| !d.is_empty())
            && input.lab.as_ref().is_some_and(|l| !l.is_empty());
        if !complete {
            return Err(AppError::validation(REQUIRED_MESSAGE));
        }

        input
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        let doc = json!({
            "firstName": input.first_name,
            "lastName": input.last_name,
            "email": input.email,
            "role": input.role,
            "institute": input.institute,
            "organisation": input.organisation,
            "department": input.department,
            "lab": input.lab,
            "status": "Active",
            "isActive": true,
            "isDeleted": false,
        });

        decode(self.store.insert(Collection::Users, doc).await?)
    }

    pub async fn update(&self, id: &DocumentId, input: UpdateUser) -> Result<User> {
        let existing = self
            .store
            .find_by_id(Collection::Users, id)
            .await?
            .filter(|d| !is_deleted(d));
        if existing.is_none() {
            return Err(AppError::not_found("User"));
        }

        let doc = self
            .store
            .merge(Collection::Users, id, to_patch(&input)?)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        decode(doc)
    }

    /// Soft delete: flags the record deleted, deactivates it, and flips the
    /// status to Inactive.
    pub async fn delete(&self, id: &DocumentId) -> Result<()> {
        let existing = self
            .store
            .find_by_id(Collection::Users, id)
            .await?
            .filter(|d| !is_deleted(d));
        if existing.is_none() {
            return Err(AppError::not_found_message(
                "User not found or already deleted",
            ));
        }

        self.store
            .merge(
                Collection::Users,
                id,
                json!({ "isDeleted": true, "isActive": false, "status": "Inactive" }),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::services::testing::memory_store;
    use crate::store::SharedStore;

    fn setup() -> (UserService, SharedStore) {
        let store = memory_store();
        (UserService::new(store.clone()), store)
    }

    fn valid_input() -> CreateUser {
        CreateUser {
            first_name: Some("Rosalind".to_string()),
            last_name: Some("Franklin".to_string()),
            email: Some("rosalind@example.org".to_string()),
            role: Some(DocumentId::generate()),
            institute: Some(DocumentId::generate()),
            organisation: Some(DocumentId::generate()),
            department: Some(vec![DocumentId::generate()]),
            lab: Some(vec![DocumentId::generate()]),
        }
    }

    #[tokio::test]
    async fn test_create_requires_every_field() {
        let (svc, _) = setup();
        let mut input = valid_input();
        input.lab = None;
        let err = svc.create(input).await.unwrap_err();
        assert_eq!(err.to_string(), REQUIRED_MESSAGE);
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_bad_email() {
        let (svc, _) = setup();
        let mut input = valid_input();
        input.email = Some("not-an-email".to_string());
        let err = svc.create(input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let (svc, _) = setup();
        let user = svc.create(valid_input()).await.unwrap();
        assert_eq!(user.status, "Active");
        assert!(user.is_active);
        assert!(!user.is_deleted);
    }

    #[tokio::test]
    async fn test_update_restricted_fields() {
        let (svc, _) = setup();
        let user = svc.create(valid_input()).await.unwrap();

        let updated = svc
            .update(
                &user.id,
                UpdateUser {
                    first_name: Some("Ada".to_string()),
                    status: Some("On Leave".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.first_name, "Ada");
        assert_eq!(updated.last_name, "Franklin");
        assert_eq!(updated.status, "On Leave");
    }

    #[tokio::test]
    async fn test_soft_delete_flips_status_and_hides() {
        let (svc, store) = setup();
        let user = svc.create(valid_input()).await.unwrap();

        svc.delete(&user.id).await.unwrap();

        assert!(svc.list().await.unwrap().is_empty());
        let err = svc.get(&user.id).await.unwrap_err();
        assert_eq!(err.to_string(), "User not found");

        let raw = store
            .find_by_id(Collection::Users, &user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(raw["isDeleted"], true);
        assert_eq!(raw["isActive"], false);
        assert_eq!(raw["status"], "Inactive");
    }

    #[tokio::test]
    async fn test_delete_twice_reports_already_deleted() {
        let (svc, _) = setup();
        let user = svc.create(valid_input()).await.unwrap();

        svc.delete(&user.id).await.unwrap();
        let err = svc.delete(&user.id).await.unwrap_err();
        assert_eq!(err.to_string(), "User not found or already deleted");
    }
}
