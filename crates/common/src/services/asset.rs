//! Asset service
//!
//! Beyond plain CRUD this carries the filtered search the agent tools
//! expose, plus a soft-delete variant alongside the hard delete. The HTTP
//! list endpoint intentionally returns every record, soft-deleted included;
//! search hides deleted assets unless asked.

use serde_json::json;

use super::{decode, decode_all, to_patch};
use crate::errors::{AppError, Result};
use crate::id::DocumentId;
use crate::models::{Asset, CreateAsset};
use crate::store::{Collection, SharedStore};

pub const SEARCH_LIMIT_DEFAULT: usize = 20;
pub const SEARCH_LIMIT_MAX: usize = 100;

/// Search filters. Every filter is optional; filters combine with AND, and
/// the id-list filters match when the asset references any of the given ids.
#[derive(Debug, Clone, Default)]
pub struct AssetSearch {
    pub organisation_id: Option<DocumentId>,
    pub institute_id: Option<DocumentId>,
    pub status: Option<String>,
    /// Case-insensitive substring match on the asset name
    pub name: Option<String>,
    pub department_ids: Vec<DocumentId>,
    pub laboratory_ids: Vec<DocumentId>,
    pub include_deleted: bool,
    pub limit: Option<usize>,
}

impl AssetSearch {
    fn matches(&self, asset: &Asset) -> bool {
        if !self.include_deleted && asset.is_deleted {
            return false;
        }
        if let Some(org) = &self.organisation_id {
            if &asset.organisation_id != org {
                return false;
            }
        }
        if let Some(institute) = &self.institute_id {
            if asset.institute_id.as_ref() != Some(institute) {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if asset.status.as_deref() != Some(status.as_str()) {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if !asset.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if !self.department_ids.is_empty()
            && !asset
                .department_id
                .iter()
                .any(|d| self.department_ids.contains(d))
        {
            return false;
        }
        if !self.laboratory_ids.is_empty()
            && !asset
                .laboratory_id
                .iter()
                .any(|l| self.laboratory_ids.contains(l))
        {
            return false;
        }
        true
    }

    fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(SEARCH_LIMIT_DEFAULT)
            .clamp(1, SEARCH_LIMIT_MAX)
    }
}

#[derive(Clone)]
pub struct AssetService {
    store: SharedStore,
}

impl AssetService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Every asset, soft-deleted ones included.
    pub async fn list(&self) -> Result<Vec<Asset>> {
        decode_all(self.store.find_all(Collection::Assets).await?)
    }

    pub async fn search(&self, filters: &AssetSearch) -> Result<Vec<Asset>> {
        let all: Vec<Asset> = decode_all(self.store.find_all(Collection::Assets).await?)?;
        Ok(all
            .into_iter()
            .filter(|a| filters.matches(a))
            .take(filters.effective_limit())
            .collect())
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Asset> {
        let doc = self
            .store
            .find_by_id(Collection::Assets, id)
            .await?
            .ok_or_else(|| AppError::not_found("Asset"))?;
        decode(doc)
    }

    pub async fn create(&self, input: CreateAsset) -> Result<Asset> {
        let name = input.name.as_deref().filter(|n| !n.trim().is_empty());
        let (name, organisation_id) = match (name, input.organisation_id.as_ref()) {
            (Some(name), Some(org)) => (name, org),
            _ => {
                return Err(AppError::validation(
                    "name and organisationId are required.",
                ))
            }
        };

        let doc = json!({
            "name": name,
            "assetNumber": input.asset_number,
            "departmentId": input.department_id.unwrap_or_default(),
            "laboratoryId": input.laboratory_id.unwrap_or_default(),
            "instituteId": input.institute_id,
            "organisationId": organisation_id,
            "purchasedDate": input.purchased_date,
            "lastUsedDate": input.last_used_date,
            "status": input.status,
            "availability": input.availability,
            "expiryDate": input.expiry_date,
            "isActive": input.is_active.unwrap_or(true),
            "isDeleted": input.is_deleted.unwrap_or(false),
        });

        decode(self.store.insert(Collection::Assets, doc).await?)
    }

    pub async fn update(&self, id: &DocumentId, input: CreateAsset) -> Result<Asset> {
        let doc = self
            .store
            .merge(Collection::Assets, id, to_patch(&input)?)
            .await?
            .ok_or_else(|| AppError::not_found("Asset"))?;
        decode(doc)
    }

    /// Hard delete, matching the HTTP surface.
    pub async fn delete(&self, id: &DocumentId) -> Result<()> {
        if !self.store.remove(Collection::Assets, id).await? {
            return Err(AppError::not_found("Asset"));
        }
        Ok(())
    }

    /// Soft delete: the record stays, flagged deleted.
    pub async fn soft_delete(&self, id: &DocumentId) -> Result<Asset> {
        let doc = self
            .store
            .merge(Collection::Assets, id, json!({ "isDeleted": true }))
            .await?
            .ok_or_else(|| AppError::not_found("Asset"))?;
        decode(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::memory_store;

    fn service() -> AssetService {
        AssetService::new(memory_store())
    }

    fn input(name: &str, org: &DocumentId) -> CreateAsset {
        CreateAsset {
            name: Some(name.to_string()),
            organisation_id: Some(org.clone()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_requires_name_and_organisation() {
        let svc = service();
        let err = svc
            .create(CreateAsset {
                name: Some("Centrifuge".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "name and organisationId are required.");
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_includes_soft_deleted() {
        let svc = service();
        let org = DocumentId::generate();
        let asset = svc.create(input("Centrifuge", &org)).await.unwrap();

        svc.soft_delete(&asset.id).await.unwrap();

        let all = svc.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_deleted);
    }

    #[tokio::test]
    async fn test_search_excludes_soft_deleted_by_default() {
        let svc = service();
        let org = DocumentId::generate();
        let kept = svc.create(input("Microscope", &org)).await.unwrap();
        let dropped = svc.create(input("Centrifuge", &org)).await.unwrap();
        svc.soft_delete(&dropped.id).await.unwrap();

        let results = svc.search(&AssetSearch::default()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, kept.id);

        let results = svc
            .search(&AssetSearch {
                include_deleted: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_search_name_is_case_insensitive_substring() {
        let svc = service();
        let org = DocumentId::generate();
        svc.create(input("Optical Microscope", &org)).await.unwrap();
        svc.create(input("Centrifuge", &org)).await.unwrap();

        let results = svc
            .search(&AssetSearch {
                name: Some("MICRO".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Optical Microscope");
    }

    #[tokio::test]
    async fn test_search_department_matches_any() {
        let svc = service();
        let org = DocumentId::generate();
        let dept_a = DocumentId::generate();
        let dept_b = DocumentId::generate();

        let mut shared = input("Shared Scope", &org);
        shared.department_id = Some(vec![dept_a.clone(), dept_b.clone()]);
        svc.create(shared).await.unwrap();

        let mut other = input("Other Scope", &org);
        other.department_id = Some(vec![DocumentId::generate()]);
        svc.create(other).await.unwrap();

        let results = svc
            .search(&AssetSearch {
                department_ids: vec![dept_b],
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Shared Scope");
    }

    #[tokio::test]
    async fn test_search_organisation_filter() {
        let svc = service();
        let org_a = DocumentId::generate();
        let org_b = DocumentId::generate();
        svc.create(input("A asset", &org_a)).await.unwrap();
        svc.create(input("B asset", &org_b)).await.unwrap();

        let results = svc
            .search(&AssetSearch {
                organisation_id: Some(org_a.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].organisation_id, org_a);
    }

    #[tokio::test]
    async fn test_search_limit_clamped() {
        let svc = service();
        let org = DocumentId::generate();
        for i in 0..25 {
            svc.create(input(&format!("asset {i}"), &org)).await.unwrap();
        }

        // Default limit
        let results = svc.search(&AssetSearch::default()).await.unwrap();
        assert_eq!(results.len(), SEARCH_LIMIT_DEFAULT);

        // Zero clamps up to one
        let results = svc
            .search(&AssetSearch {
                limit: Some(0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(results.len(), 1);

        // Oversized clamps down to the max
        let results = svc
            .search(&AssetSearch {
                limit: Some(10_000),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(results.len(), 25);
    }

    #[tokio::test]
    async fn test_hard_delete_removes_record() {
        let svc = service();
        let org = DocumentId::generate();
        let asset = svc.create(input("Doomed", &org)).await.unwrap();

        svc.delete(&asset.id).await.unwrap();
        assert!(svc.list().await.unwrap().is_empty());

        let err = svc.delete(&asset.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Asset not found");
    }
}
