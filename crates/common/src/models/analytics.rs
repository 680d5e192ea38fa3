//! Analytics entity with its nested chart configuration types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::default_true;
use crate::id::DocumentId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartAnnotation {
    #[serde(default)]
    pub x: Option<String>,

    #[serde(default)]
    pub y: Option<f64>,

    #[serde(default, rename = "type")]
    pub annotation_type: Option<String>,

    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub row_index: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsChannel {
    #[serde(default = "default_true")]
    pub is_visible: bool,

    #[serde(default)]
    pub sensor: Option<String>,

    #[serde(default)]
    pub axis: Option<String>,

    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub annotations: Vec<ChartAnnotation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsChart {
    #[serde(default)]
    pub run_number: Option<String>,

    #[serde(default)]
    pub analytics_assets: Vec<DocumentId>,

    #[serde(default)]
    pub analytics_channels: Vec<AnalyticsChannel>,

    #[serde(default)]
    pub window_period: Option<String>,

    #[serde(default)]
    pub aggregate_function: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub id: DocumentId,

    pub name: String,

    #[serde(default)]
    pub runs_id: Vec<DocumentId>,

    #[serde(default)]
    pub runs_number: Vec<String>,

    pub created_on: DateTime<Utc>,

    #[serde(default)]
    pub created_by_name: Option<String>,

    #[serde(default)]
    pub results: Vec<serde_json::Value>,

    #[serde(default)]
    pub image_urls: Vec<String>,

    #[serde(default)]
    pub analytics_charts_list: Vec<AnalyticsChart>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnalytics {
    pub name: Option<String>,
    pub runs_id: Option<Vec<DocumentId>>,
    pub runs_number: Option<Vec<String>>,
    pub created_on: Option<DateTime<Utc>>,
    pub created_by_name: Option<String>,
    pub results: Option<Vec<serde_json::Value>>,
    pub image_urls: Option<Vec<String>>,
    pub analytics_charts_list: Option<Vec<AnalyticsChart>>,
}
