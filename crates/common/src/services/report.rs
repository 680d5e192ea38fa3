//! Report service

use serde_json::json;

use super::{decode, decode_all, to_patch};
use crate::errors::{AppError, Result};
use crate::id::DocumentId;
use crate::models::{CreateReport, Report};
use crate::store::{Collection, SharedStore};

#[derive(Clone)]
pub struct ReportService {
    store: SharedStore,
}

impl ReportService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Report>> {
        decode_all(self.store.find_all(Collection::Reports).await?)
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Report> {
        let doc = self
            .store
            .find_by_id(Collection::Reports, id)
            .await?
            .ok_or_else(|| AppError::not_found("Report"))?;
        decode(doc)
    }

    pub async fn create(&self, input: CreateReport) -> Result<Report> {
        let report_name = input.report_name.as_deref().filter(|n| !n.trim().is_empty());
        let (report_name, analytics_id) = match (report_name, input.analytics_id.as_ref()) {
            (Some(name), Some(analytics)) => (name, analytics),
            _ => {
                return Err(AppError::validation(
                    "reportName and analyticsId are required.",
                ))
            }
        };

        let doc = json!({
            "reportName": report_name,
            "analyticsId": analytics_id,
            "content": input.content,
            "createdOn": input.created_on,
            "createdBy": input.created_by,
        });

        decode(self.store.insert(Collection::Reports, doc).await?)
    }

    pub async fn update(&self, id: &DocumentId, input: CreateReport) -> Result<Report> {
        let doc = self
            .store
            .merge(Collection::Reports, id, to_patch(&input)?)
            .await?
            .ok_or_else(|| AppError::not_found("Report"))?;
        decode(doc)
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<()> {
        if !self.store.remove(Collection::Reports, id).await? {
            return Err(AppError::not_found("Report"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::memory_store;

    fn service() -> ReportService {
        ReportService::new(memory_store())
    }

    #[tokio::test]
    async fn test_create_requires_name_and_analytics() {
        let svc = service();
        let err = svc
            .create(CreateReport {
                report_name: Some("Monthly usage".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "reportName and analyticsId are required.");
    }

    #[tokio::test]
    async fn test_create_persists_every_field() {
        let svc = service();
        let analytics = vec![DocumentId::generate(), DocumentId::generate()];
        let report = svc
            .create(CreateReport {
                report_name: Some("Monthly usage".to_string()),
                analytics_id: Some(analytics.clone()),
                content: Some("Usage rose 12% month over month.".to_string()),
                created_on: Some("2026-08-01".to_string()),
                created_by: Some("Marie".to_string()),
            })
            .await
            .unwrap();

        let fetched = svc.get(&report.id).await.unwrap();
        assert_eq!(fetched.report_name, "Monthly usage");
        assert_eq!(fetched.analytics_id, analytics);
        assert_eq!(
            fetched.content.as_deref(),
            Some("Usage rose 12% month over month.")
        );
        assert_eq!(fetched.created_on.as_deref(), Some("2026-08-01"));
        assert_eq!(fetched.created_by.as_deref(), Some("Marie"));
    }

    #[tokio::test]
    async fn test_update_keeps_content() {
        let svc = service();
        let report = svc
            .create(CreateReport {
                report_name: Some("Quarterly".to_string()),
                analytics_id: Some(vec![DocumentId::generate()]),
                content: Some("Full text".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let updated = svc
            .update(
                &report.id,
                CreateReport {
                    report_name: Some("Quarterly v2".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.report_name, "Quarterly v2");
        assert_eq!(updated.content.as_deref(), Some("Full text"));
    }

    #[tokio::test]
    async fn test_delete_is_hard() {
        let svc = service();
        let report = svc
            .create(CreateReport {
                report_name: Some("tmp".to_string()),
                analytics_id: Some(vec![DocumentId::generate()]),
                ..Default::default()
            })
            .await
            .unwrap();

        svc.delete(&report.id).await.unwrap();
        let err = svc.get(&report.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Report not found");
    }
}
