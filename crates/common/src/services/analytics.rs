//! Analytics service

use serde_json::json;

use super::{decode, decode_all, to_patch};
use crate::errors::{AppError, Result};
use crate::id::DocumentId;
use crate::models::{Analytics, CreateAnalytics};
use crate::store::{Collection, SharedStore};

#[derive(Clone)]
pub struct AnalyticsService {
    store: SharedStore,
}

impl AnalyticsService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Analytics>> {
        decode_all(self.store.find_all(Collection::Analytics).await?)
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Analytics> {
        let doc = self
            .store
            .find_by_id(Collection::Analytics, id)
            .await?
            .ok_or_else(|| AppError::not_found("Analytics"))?;
        decode(doc)
    }

    pub async fn create(&self, input: CreateAnalytics) -> Result<Analytics> {
        let name = input
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::validation("Name is required."))?;

        let doc = json!({
            "name": name,
            "runsId": input.runs_id.unwrap_or_default(),
            "runsNumber": input.runs_number.unwrap_or_default(),
            "createdOn": input.created_on.unwrap_or_else(chrono::Utc::now),
            "createdByName": input.created_by_name,
            "results": input.results.unwrap_or_default(),
            "imageUrls": input.image_urls.unwrap_or_default(),
            "analyticsChartsList": input.analytics_charts_list.unwrap_or_default(),
            "isActive": true,
            "isDeleted": false,
        });

        decode(self.store.insert(Collection::Analytics, doc).await?)
    }

    pub async fn update(&self, id: &DocumentId, input: CreateAnalytics) -> Result<Analytics> {
        let doc = self
            .store
            .merge(Collection::Analytics, id, to_patch(&input)?)
            .await?
            .ok_or_else(|| AppError::not_found("Analytics"))?;
        decode(doc)
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<()> {
        if !self.store.remove(Collection::Analytics, id).await? {
            return Err(AppError::not_found("Analytics"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalyticsChart, AnalyticsChannel};
    use crate::services::testing::memory_store;

    fn service() -> AnalyticsService {
        AnalyticsService::new(memory_store())
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let svc = service();
        let err = svc.create(CreateAnalytics::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Name is required.");
    }

    #[tokio::test]
    async fn test_create_defaults_collections_empty() {
        let svc = service();
        let analytics = svc
            .create(CreateAnalytics {
                name: Some("Q3 throughput".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(analytics.runs_id.is_empty());
        assert!(analytics.results.is_empty());
        assert!(analytics.image_urls.is_empty());
        assert!(analytics.analytics_charts_list.is_empty());
    }

    #[tokio::test]
    async fn test_create_with_chart_config() {
        let svc = service();
        let chart = AnalyticsChart {
            run_number: Some("RUN-042".to_string()),
            analytics_assets: vec![DocumentId::generate()],
            analytics_channels: vec![AnalyticsChannel {
                is_visible: true,
                sensor: Some("temperature".to_string()),
                axis: Some("left".to_string()),
                color: Some("#ff0000".to_string()),
                annotations: vec![],
            }],
            window_period: Some("5m".to_string()),
            aggregate_function: Some("avg".to_string()),
        };

        let analytics = svc
            .create(CreateAnalytics {
                name: Some("Temp drift".to_string()),
                analytics_charts_list: Some(vec![chart]),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(analytics.analytics_charts_list.len(), 1);
        let channel = &analytics.analytics_charts_list[0].analytics_channels[0];
        assert_eq!(channel.sensor.as_deref(), Some("temperature"));
    }

    #[tokio::test]
    async fn test_delete_is_hard() {
        let svc = service();
        let analytics = svc
            .create(CreateAnalytics {
                name: Some("ephemeral".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        svc.delete(&analytics.id).await.unwrap();
        let err = svc.get(&analytics.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Analytics not found");
    }
}
