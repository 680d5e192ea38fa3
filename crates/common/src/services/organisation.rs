//! Organisation service
//!
//! The one entity whose create path verifies a reference (the institute),
//! and the one whose delete is a soft delete that list and get both honor.

use serde_json::json;

use super::{decode, decode_all, is_deleted, to_patch};
use crate::errors::{AppError, Result};
use crate::id::DocumentId;
use crate::models::{CreateOrganisation, Organisation};
use crate::store::{Collection, SharedStore};

#[derive(Clone)]
pub struct OrganisationService {
    store: SharedStore,
}

impl OrganisationService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Soft-deleted organisations are excluded.
    pub async fn list(&self) -> Result<Vec<Organisation>> {
        let docs = self.store.find_all(Collection::Organisations).await?;
        decode_all(docs.into_iter().filter(|d| !is_deleted(d)).collect())
    }

    /// Absent and soft-deleted both read as not found.
    pub async fn get(&self, id: &DocumentId) -> Result<Organisation> {
        let doc = self
            .store
            .find_by_id(Collection::Organisations, id)
            .await?
            .filter(|d| !is_deleted(d))
            .ok_or_else(|| AppError::not_found("Organisation"))?;
        decode(doc)
    }

    pub async fn create(&self, input: CreateOrganisation) -> Result<Organisation> {
        let name = input.name.as_deref().filter(|n| !n.trim().is_empty());
        let (name, institute) = match (name, input.institute.as_ref()) {
            (Some(name), Some(institute)) => (name, institute),
            _ => return Err(AppError::validation("Name and institute are required.")),
        };

        if self
            .store
            .find_by_id(Collection::Institutes, institute)
            .await?
            .is_none()
        {
            return Err(AppError::validation(
                "Invalid institute ID. Institute not found.",
            ));
        }

        let doc = json!({
            "name": name,
            "institute": institute,
            "isActive": input.is_active.unwrap_or(true),
            "isDeleted": input.is_deleted.unwrap_or(false),
        });

        decode(self.store.insert(Collection::Organisations, doc).await?)
    }

    pub async fn update(&self, id: &DocumentId, input: CreateOrganisation) -> Result<Organisation> {
        let doc = self
            .store
            .merge(Collection::Organisations, id, to_patch(&input)?)
            .await?
            .ok_or_else(|| AppError::not_found("Organisation"))?;
        decode(doc)
    }

    /// Soft delete: the record stays in the store with `isDeleted` set.
    pub async fn delete(&self, id: &DocumentId) -> Result<()> {
        let doc = self
            .store
            .find_by_id(Collection::Organisations, id)
            .await?
            .filter(|d| !is_deleted(d));
        if doc.is_none() {
            return Err(AppError::not_found("Organisation"));
        }

        self.store
            .merge(Collection::Organisations, id, json!({ "isDeleted": true }))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateInstitute;
    use crate::services::testing::memory_store;
    use crate::services::InstituteService;
    use crate::store::SharedStore;

    async fn setup() -> (OrganisationService, DocumentId, SharedStore) {
        let store = memory_store();
        let institutes = InstituteService::new(store.clone());
        let institute = institutes
            .create(CreateInstitute {
                name: Some("Test Institute".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        (OrganisationService::new(store.clone()), institute.id, store)
    }

    fn valid_input(institute: &DocumentId) -> CreateOrganisation {
        CreateOrganisation {
            name: Some("Acme Labs".to_string()),
            institute: Some(institute.clone()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_requires_name_and_institute() {
        let (svc, _, _) = setup().await;
        let err = svc.create(CreateOrganisation::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Name and institute are required.");
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_institute() {
        let (svc, _, _) = setup().await;
        let err = svc
            .create(valid_input(&DocumentId::generate()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid institute ID. Institute not found.");
        // Nothing persisted on the failed create
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_list_and_get() {
        let (svc, institute, store) = setup().await;
        let org = svc.create(valid_input(&institute)).await.unwrap();

        svc.delete(&org.id).await.unwrap();

        assert!(svc.list().await.unwrap().is_empty());
        let err = svc.get(&org.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Organisation not found");

        // Record still exists underneath, flagged deleted
        let raw = store
            .find_by_id(Collection::Organisations, &org.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(raw["isDeleted"], true);
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let (svc, institute, _) = setup().await;
        let org = svc.create(valid_input(&institute)).await.unwrap();

        svc.delete(&org.id).await.unwrap();
        let err = svc.delete(&org.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Organisation not found");
    }

    #[tokio::test]
    async fn test_update_merges() {
        let (svc, institute, _) = setup().await;
        let org = svc.create(valid_input(&institute)).await.unwrap();

        let updated = svc
            .update(
                &org.id,
                CreateOrganisation {
                    name: Some("Renamed Labs".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Renamed Labs");
        assert_eq!(updated.institute, institute);
    }
}
