//! Institute service
//!
//! Institutes are the root of the containment hierarchy. Deletes are hard.

use serde_json::json;

use super::{decode, decode_all, to_patch};
use crate::errors::{AppError, Result};
use crate::id::DocumentId;
use crate::models::{CreateInstitute, Institute};
use crate::store::{Collection, SharedStore};

#[derive(Clone)]
pub struct InstituteService {
    store: SharedStore,
}

impl InstituteService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Institute>> {
        decode_all(self.store.find_all(Collection::Institutes).await?)
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Institute> {
        let doc = self
            .store
            .find_by_id(Collection::Institutes, id)
            .await?
            .ok_or_else(|| AppError::not_found("Institute"))?;
        decode(doc)
    }

    pub async fn create(&self, input: CreateInstitute) -> Result<Institute> {
        let name = input
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::validation("Institute name is required."))?;

        let doc = json!({
            "name": name,
            "isActive": input.is_active.unwrap_or(true),
            "isDeleted": input.is_deleted.unwrap_or(false),
        });

        decode(self.store.insert(Collection::Institutes, doc).await?)
    }

    pub async fn update(&self, id: &DocumentId, input: CreateInstitute) -> Result<Institute> {
        let doc = self
            .store
            .merge(Collection::Institutes, id, to_patch(&input)?)
            .await?
            .ok_or_else(|| AppError::not_found("Institute"))?;
        decode(doc)
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<()> {
        if !self.store.remove(Collection::Institutes, id).await? {
            return Err(AppError::not_found("Institute"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::memory_store;

    fn service() -> InstituteService {
        InstituteService::new(memory_store())
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let svc = service();
        let err = svc.create(CreateInstitute::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Institute name is required.");
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let svc = service();
        let created = svc
            .create(CreateInstitute {
                name: Some("Pasteur Institute".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(created.is_active);
        assert!(!created.is_deleted);

        let fetched = svc.get(&created.id).await.unwrap();
        assert_eq!(fetched.name, "Pasteur Institute");
    }

    #[tokio::test]
    async fn test_update_merges() {
        let svc = service();
        let created = svc
            .create(CreateInstitute {
                name: Some("old name".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let updated = svc
            .update(
                &created.id,
                CreateInstitute {
                    name: Some("new name".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "new name");
        assert!(updated.is_active);
    }

    #[tokio::test]
    async fn test_delete_is_hard() {
        let svc = service();
        let created = svc
            .create(CreateInstitute {
                name: Some("doomed".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        svc.delete(&created.id).await.unwrap();
        let err = svc.get(&created.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Institute not found");

        let err = svc.delete(&created.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Institute not found");
    }
}
