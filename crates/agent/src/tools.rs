//! Asset tools and resources exposed over MCP.
//!
//! Every tool delegates to the same `AssetService` the HTTP gateway uses;
//! this module only parses tool arguments and renders plain-text replies.
//! Tool failures come back as flagged results, never protocol errors, so
//! the calling agent always gets readable text. Assets are additionally
//! published as `labvault://assets/{id}` resources.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    AnnotateAble, CallToolResult, Content, Implementation, ListResourcesResult,
    PaginatedRequestParam,
    RawResource, ReadResourceRequestParam, ReadResourceResult, Resource, ResourceContents,
    ServerCapabilities, ServerInfo,
};
use rmcp::schemars;
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;

use crate::activity::ActivityTracker;
use crate::format;
use labvault_common::id::DocumentId;
use labvault_common::metrics::record_tool_call;
use labvault_common::models::{Asset, CreateAsset};
use labvault_common::services::{AssetSearch, Services};

/// A reference field that accepts either a single id or a list of ids.
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum IdFilter {
    One(String),
    Many(Vec<String>),
}

impl IdFilter {
    fn into_vec(self) -> Vec<String> {
        match self {
            IdFilter::One(id) if id.trim().is_empty() => Vec::new(),
            IdFilter::One(id) => vec![id],
            IdFilter::Many(ids) => ids.into_iter().filter(|id| !id.trim().is_empty()).collect(),
        }
    }
}

fn parse_id(value: &str) -> Result<DocumentId, String> {
    DocumentId::parse(value).map_err(|e| e.to_string())
}

fn parse_optional_id(value: Option<String>) -> Result<Option<DocumentId>, String> {
    value.as_deref().map(parse_id).transpose()
}

fn parse_id_filter(filter: Option<IdFilter>) -> Result<Vec<DocumentId>, String> {
    filter
        .map(IdFilter::into_vec)
        .unwrap_or_default()
        .iter()
        .map(|id| parse_id(id))
        .collect()
}

fn parse_date(field: &str, value: Option<String>) -> Result<Option<DateTime<Utc>>, String> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|d| d.with_timezone(&Utc))
                .map_err(|_| format!("invalid {field}: {raw}"))
        })
        .transpose()
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchAssetsRequest {
    #[schemars(description = "Filter by organisation id.")]
    pub organisation_id: Option<String>,
    #[schemars(description = "Filter by institute id.")]
    pub institute_id: Option<String>,
    #[schemars(description = "Filter by one or more department ids (matches any).")]
    pub department_id: Option<IdFilter>,
    #[schemars(description = "Filter by one or more laboratory ids (matches any).")]
    pub laboratory_id: Option<IdFilter>,
    #[schemars(description = "Filter by asset status.")]
    pub status: Option<String>,
    #[schemars(description = "Case-insensitive substring match on the asset name.")]
    pub name: Option<String>,
    #[schemars(description = "Set true to include assets where isDeleted=true. Defaults to false.")]
    pub include_deleted: Option<bool>,
    #[schemars(description = "Maximum number of results to return. Defaults to 20, maximum 100.")]
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetRequest {
    #[schemars(description = "Asset name.")]
    pub name: Option<String>,
    #[schemars(description = "Unique asset number.")]
    pub asset_number: Option<String>,
    #[schemars(description = "Organisation id (required).")]
    pub organisation_id: Option<String>,
    #[schemars(description = "Institute id.")]
    pub institute_id: Option<String>,
    #[schemars(description = "Department id(s).")]
    pub department_id: Option<IdFilter>,
    #[schemars(description = "Laboratory id(s).")]
    pub laboratory_id: Option<IdFilter>,
    #[schemars(description = "Asset status.")]
    pub status: Option<String>,
    #[schemars(description = "Purchase date (RFC 3339).")]
    pub purchased_date: Option<String>,
    #[schemars(description = "Last used date (RFC 3339).")]
    pub last_used_date: Option<String>,
    #[schemars(description = "Asset availability.")]
    pub availability: Option<String>,
    #[schemars(description = "Expiry date (RFC 3339).")]
    pub expiry_date: Option<String>,
    #[schemars(description = "Whether the asset is active (default: true).")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetAssetRequest {
    #[schemars(description = "Asset id to retrieve.")]
    pub id: String,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetRequest {
    #[schemars(description = "Asset id to update.")]
    pub id: Option<String>,
    #[schemars(description = "Asset name.")]
    pub name: Option<String>,
    #[schemars(description = "Unique asset number.")]
    pub asset_number: Option<String>,
    #[schemars(description = "Organisation id.")]
    pub organisation_id: Option<String>,
    #[schemars(description = "Institute id.")]
    pub institute_id: Option<String>,
    #[schemars(description = "Department id(s).")]
    pub department_id: Option<IdFilter>,
    #[schemars(description = "Laboratory id(s).")]
    pub laboratory_id: Option<IdFilter>,
    #[schemars(description = "Asset status.")]
    pub status: Option<String>,
    #[schemars(description = "Purchase date (RFC 3339).")]
    pub purchased_date: Option<String>,
    #[schemars(description = "Last used date (RFC 3339).")]
    pub last_used_date: Option<String>,
    #[schemars(description = "Asset availability.")]
    pub availability: Option<String>,
    #[schemars(description = "Expiry date (RFC 3339).")]
    pub expiry_date: Option<String>,
    #[schemars(description = "Whether the asset is active.")]
    pub is_active: Option<bool>,
    #[schemars(description = "Whether the asset is deleted.")]
    pub is_deleted: Option<bool>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAssetRequest {
    #[schemars(description = "Asset id to delete.")]
    pub id: Option<String>,
    #[schemars(
        description = "If true, performs soft delete (sets isDeleted=true). Default: false (hard delete)."
    )]
    pub soft_delete: Option<bool>,
}

/// Uri prefix for the asset resource namespace.
const ASSET_URI_PREFIX: &str = "labvault://assets/";

pub struct AssetToolServer {
    services: Services,
    activity: Arc<ActivityTracker>,
    tool_router: ToolRouter<Self>,
}

impl AssetToolServer {
    pub fn new(services: Services, activity: Arc<ActivityTracker>) -> Self {
        Self {
            services,
            activity,
            tool_router: Self::tool_router(),
        }
    }

    fn success(tool: &str, text: String) -> Result<CallToolResult, McpError> {
        record_tool_call(tool, true);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    fn failure(tool: &str, text: String) -> Result<CallToolResult, McpError> {
        record_tool_call(tool, false);
        Ok(CallToolResult::error(vec![Content::text(text)]))
    }

    async fn run_search(&self, request: SearchAssetsRequest) -> Result<Vec<Asset>, String> {
        let filters = AssetSearch {
            organisation_id: parse_optional_id(request.organisation_id)?,
            institute_id: parse_optional_id(request.institute_id)?,
            status: request.status,
            name: request.name,
            department_ids: parse_id_filter(request.department_id)?,
            laboratory_ids: parse_id_filter(request.laboratory_id)?,
            include_deleted: request.include_deleted.unwrap_or(false),
            limit: request.limit,
        };
        self.services
            .assets
            .search(&filters)
            .await
            .map_err(|e| e.to_string())
    }

    async fn run_create(&self, request: CreateAssetRequest) -> Result<Asset, String> {
        let input = CreateAsset {
            name: request.name,
            asset_number: request.asset_number,
            department_id: Some(parse_id_filter(request.department_id)?),
            laboratory_id: Some(parse_id_filter(request.laboratory_id)?),
            institute_id: parse_optional_id(request.institute_id)?,
            organisation_id: parse_optional_id(request.organisation_id)?,
            purchased_date: parse_date("purchasedDate", request.purchased_date)?,
            last_used_date: parse_date("lastUsedDate", request.last_used_date)?,
            status: request.status,
            availability: request.availability,
            expiry_date: parse_date("expiryDate", request.expiry_date)?,
            is_active: request.is_active,
            is_deleted: None,
        };
        self.services
            .assets
            .create(input)
            .await
            .map_err(|e| e.to_string())
    }

    async fn run_update(
        &self,
        id: &DocumentId,
        request: UpdateAssetRequest,
    ) -> Result<Asset, String> {
        let input = CreateAsset {
            name: request.name,
            asset_number: request.asset_number,
            department_id: match request.department_id {
                Some(filter) => Some(parse_id_filter(Some(filter))?),
                None => None,
            },
            laboratory_id: match request.laboratory_id {
                Some(filter) => Some(parse_id_filter(Some(filter))?),
                None => None,
            },
            institute_id: parse_optional_id(request.institute_id)?,
            organisation_id: parse_optional_id(request.organisation_id)?,
            purchased_date: parse_date("purchasedDate", request.purchased_date)?,
            last_used_date: parse_date("lastUsedDate", request.last_used_date)?,
            status: request.status,
            availability: request.availability,
            expiry_date: parse_date("expiryDate", request.expiry_date)?,
            is_active: request.is_active,
            is_deleted: request.is_deleted,
        };
        self.services
            .assets
            .update(id, input)
            .await
            .map_err(|e| e.to_string())
    }

    /// Every non-deleted asset, as a `labvault://assets/{id}` resource.
    async fn asset_resources(&self) -> Result<Vec<Resource>, McpError> {
        let assets = self
            .services
            .assets
            .list()
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(assets
            .iter()
            .filter(|asset| !asset.is_deleted)
            .map(|asset| {
                let mut resource = RawResource::new(
                    format!("{ASSET_URI_PREFIX}{}", asset.id),
                    asset.name.clone(),
                );
                resource.mime_type = Some("application/json".to_string());
                resource.no_annotation()
            })
            .collect())
    }

    /// One asset rendered as JSON resource contents.
    async fn asset_resource(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        let raw_id = uri
            .strip_prefix(ASSET_URI_PREFIX)
            .ok_or_else(|| McpError::resource_not_found(format!("Unknown resource: {uri}"), None))?;
        let id = DocumentId::parse(raw_id)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let asset = self
            .services
            .assets
            .get(&id)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))?;
        let json = serde_json::to_string_pretty(&asset)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(json, uri)],
        })
    }
}

#[tool_router]
impl AssetToolServer {
    #[tool(
        name = "assets-search",
        description = "Query the asset collection using optional filters such as organisationId, status, or name."
    )]
    pub async fn search_assets(
        &self,
        Parameters(request): Parameters<SearchAssetsRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.activity.touch();
        match self.run_search(request).await {
            Ok(assets) if assets.is_empty() => Self::success(
                "assets-search",
                "No assets matched the provided filters.".to_string(),
            ),
            Ok(assets) => Self::success("assets-search", format::search_summary(&assets)),
            Err(message) => {
                Self::failure("assets-search", format!("Error searching assets: {message}"))
            }
        }
    }

    #[tool(name = "assets-create", description = "Create a new asset in the database.")]
    pub async fn create_asset(
        &self,
        Parameters(request): Parameters<CreateAssetRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.activity.touch();
        match self.run_create(request).await {
            Ok(asset) => Self::success("assets-create", format::created(&asset)),
            Err(message) => {
                Self::failure("assets-create", format!("Error creating asset: {message}"))
            }
        }
    }

    #[tool(name = "assets-get", description = "Retrieve a single asset by its ID.")]
    pub async fn get_asset(
        &self,
        Parameters(request): Parameters<GetAssetRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.activity.touch();
        let result = match parse_id(&request.id) {
            Ok(id) => self
                .services
                .assets
                .get(&id)
                .await
                .map_err(|e| e.to_string()),
            Err(message) => Err(message),
        };
        match result {
            Ok(asset) => Self::success("assets-get", format::details(&asset)),
            Err(message) => {
                Self::failure("assets-get", format!("Error retrieving asset: {message}"))
            }
        }
    }

    #[tool(name = "assets-update", description = "Update an existing asset by ID.")]
    pub async fn update_asset(
        &self,
        Parameters(request): Parameters<UpdateAssetRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.activity.touch();
        let Some(raw_id) = request.id.clone() else {
            return Self::failure(
                "assets-update",
                "Error: Asset ID is required for update.".to_string(),
            );
        };
        let result = match parse_id(&raw_id) {
            Ok(id) => self.run_update(&id, request).await,
            Err(message) => Err(message),
        };
        match result {
            Ok(asset) => Self::success("assets-update", format::updated(&asset)),
            Err(message) => {
                Self::failure("assets-update", format!("Error updating asset: {message}"))
            }
        }
    }

    #[tool(
        name = "assets-delete",
        description = "Delete an asset by ID. Supports both hard delete and soft delete (sets isDeleted=true)."
    )]
    pub async fn delete_asset(
        &self,
        Parameters(request): Parameters<DeleteAssetRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.activity.touch();
        let Some(raw_id) = request.id else {
            return Self::failure(
                "assets-delete",
                "Error: Asset ID is required for deletion.".to_string(),
            );
        };
        let soft = request.soft_delete.unwrap_or(false);
        let result = match parse_id(&raw_id) {
            Ok(id) => {
                let outcome = if soft {
                    self.services.assets.soft_delete(&id).await.map(|_| ())
                } else {
                    self.services.assets.delete(&id).await
                };
                outcome.map(|()| id).map_err(|e| e.to_string())
            }
            Err(message) => Err(message),
        };
        match result {
            Ok(id) => {
                let message = if soft {
                    "Asset soft deleted successfully"
                } else {
                    "Asset deleted successfully"
                };
                Self::success("assets-delete", format::deleted(message, &id))
            }
            Err(message) => {
                Self::failure("assets-delete", format!("Error deleting asset: {message}"))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for AssetToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "LabVault exposes the laboratory asset registry. Use 'assets-search' to filter \
                 assets, 'assets-get' for a single record, and 'assets-create', 'assets-update', \
                 'assets-delete' to change the collection. Individual assets are also readable \
                 as labvault://assets/{id} resources."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        self.activity.touch();
        Ok(ListResourcesResult {
            resources: self.asset_resources().await?,
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        self.activity.touch();
        self.asset_resource(&request.uri).await
    }
}
