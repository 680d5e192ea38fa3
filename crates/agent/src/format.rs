//! Plain-text rendering of assets for tool responses.
//!
//! Agents get one field per line, missing values shown as "N/A" and id
//! arrays comma-joined, with search result blocks separated by `---`.

use chrono::{DateTime, SecondsFormat, Utc};

use labvault_common::id::DocumentId;
use labvault_common::models::Asset;

/// Separator between per-asset blocks in search output.
pub const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

fn opt(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

fn ids(values: &[DocumentId]) -> String {
    if values.is_empty() {
        return "N/A".to_string();
    }
    values
        .iter()
        .map(DocumentId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn date(value: Option<DateTime<Utc>>) -> String {
    value.map(timestamp).unwrap_or_else(|| "N/A".to_string())
}

fn display_name(asset: &Asset) -> &str {
    if asset.name.trim().is_empty() {
        "(unnamed)"
    } else {
        &asset.name
    }
}

/// One search result block, id first, lowerCamel field labels.
pub fn search_block(asset: &Asset) -> String {
    [
        format!("id: {}", asset.id),
        format!("name: {}", display_name(asset)),
        format!("status: {}", opt(asset.status.as_deref())),
        format!("assetNumber: {}", opt(asset.asset_number.as_deref())),
        format!("organisationId: {}", asset.organisation_id),
        format!("departmentId: {}", ids(&asset.department_id)),
        format!("laboratoryId: {}", ids(&asset.laboratory_id)),
        format!(
            "instituteId: {}",
            opt(asset.institute_id.as_ref().map(DocumentId::as_str))
        ),
        format!("purchasedDate: {}", date(asset.purchased_date)),
        format!("lastUsedDate: {}", date(asset.last_used_date)),
        format!("availability: {}", opt(asset.availability.as_deref())),
        format!("expiryDate: {}", date(asset.expiry_date)),
        format!("isActive: {}", asset.is_active),
        format!("isDeleted: {}", asset.is_deleted),
        format!("createdAt: {}", timestamp(asset.created_at)),
        format!("updatedAt: {}", timestamp(asset.updated_at)),
    ]
    .join("\n")
}

pub fn search_summary(assets: &[Asset]) -> String {
    assets
        .iter()
        .map(search_block)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

/// Full detail sheet returned by the get tool.
pub fn details(asset: &Asset) -> String {
    format!(
        "Asset Details:\n\n\
         ID: {}\n\
         Name: {}\n\
         Asset Number: {}\n\
         Status: {}\n\
         Organisation ID: {}\n\
         Institute ID: {}\n\
         Department ID(s): {}\n\
         Laboratory ID(s): {}\n\
         Purchased Date: {}\n\
         Last Used Date: {}\n\
         Availability: {}\n\
         Expiry Date: {}\n\
         Is Active: {}\n\
         Is Deleted: {}\n\
         Created At: {}\n\
         Updated At: {}",
        asset.id,
        asset.name,
        opt(asset.asset_number.as_deref()),
        opt(asset.status.as_deref()),
        asset.organisation_id,
        opt(asset.institute_id.as_ref().map(DocumentId::as_str)),
        ids(&asset.department_id),
        ids(&asset.laboratory_id),
        date(asset.purchased_date),
        date(asset.last_used_date),
        opt(asset.availability.as_deref()),
        date(asset.expiry_date),
        asset.is_active,
        asset.is_deleted,
        timestamp(asset.created_at),
        timestamp(asset.updated_at),
    )
}

pub fn created(asset: &Asset) -> String {
    format!(
        "Asset created successfully!\n\n\
         ID: {}\n\
         Name: {}\n\
         Asset Number: {}\n\
         Status: {}\n\
         Organisation ID: {}",
        asset.id,
        asset.name,
        opt(asset.asset_number.as_deref()),
        opt(asset.status.as_deref()),
        asset.organisation_id,
    )
}

pub fn updated(asset: &Asset) -> String {
    format!(
        "Asset updated successfully!\n\n\
         ID: {}\n\
         Name: {}\n\
         Asset Number: {}\n\
         Status: {}",
        asset.id,
        asset.name,
        opt(asset.asset_number.as_deref()),
        opt(asset.status.as_deref()),
    )
}

pub fn deleted(message: &str, id: &DocumentId) -> String {
    format!("{message}\n\nAsset ID: {id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn asset() -> Asset {
        let when = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        Asset {
            id: DocumentId::generate(),
            name: "Centrifuge".to_string(),
            asset_number: Some("CF-100".to_string()),
            department_id: vec![DocumentId::generate(), DocumentId::generate()],
            laboratory_id: vec![],
            institute_id: None,
            organisation_id: DocumentId::generate(),
            purchased_date: None,
            last_used_date: None,
            status: Some("Operational".to_string()),
            availability: None,
            expiry_date: None,
            is_active: true,
            is_deleted: false,
            created_at: when,
            updated_at: when,
        }
    }

    #[test]
    fn test_search_block_field_order_and_fallbacks() {
        let asset = asset();
        let block = search_block(&asset);
        let lines: Vec<&str> = block.lines().collect();

        assert_eq!(lines[0], format!("id: {}", asset.id));
        assert_eq!(lines[1], "name: Centrifuge");
        assert_eq!(lines[2], "status: Operational");
        assert_eq!(lines[3], "assetNumber: CF-100");
        assert_eq!(
            lines[5],
            format!(
                "departmentId: {}, {}",
                asset.department_id[0], asset.department_id[1]
            )
        );
        assert_eq!(lines[6], "laboratoryId: N/A");
        assert_eq!(lines[7], "instituteId: N/A");
        assert_eq!(lines[8], "purchasedDate: N/A");
        assert_eq!(lines[12], "isActive: true");
        assert_eq!(lines[15], "updatedAt: 2025-06-01T12:00:00.000Z");
    }

    #[test]
    fn test_search_summary_joins_blocks() {
        let a = asset();
        let b = asset();
        let summary = search_summary(&[a, b]);
        assert_eq!(summary.matches("\n\n---\n\n").count(), 1);
    }

    #[test]
    fn test_blank_name_shows_unnamed_in_search_only() {
        let mut asset = asset();
        asset.name = "  ".to_string();
        assert!(search_block(&asset).contains("name: (unnamed)"));
        assert!(!details(&asset).contains("(unnamed)"));
    }

    #[test]
    fn test_details_layout() {
        let asset = asset();
        let text = details(&asset);
        assert!(text.starts_with("Asset Details:\n\n"));
        assert!(text.contains(&format!("ID: {}\n", asset.id)));
        assert!(text.contains("Institute ID: N/A\n"));
        assert!(text.contains("Laboratory ID(s): N/A\n"));
        assert!(text.ends_with("Updated At: 2025-06-01T12:00:00.000Z"));
    }

    #[test]
    fn test_created_and_updated_summaries() {
        let asset = asset();
        let text = created(&asset);
        assert!(text.starts_with("Asset created successfully!\n\n"));
        assert!(text.ends_with(&format!("Organisation ID: {}", asset.organisation_id)));

        let text = updated(&asset);
        assert!(text.starts_with("Asset updated successfully!\n\n"));
        assert!(text.ends_with("Status: Operational"));
    }

    #[test]
    fn test_deleted_message() {
        let id = DocumentId::generate();
        assert_eq!(
            deleted("Asset soft deleted successfully", &id),
            format!("Asset soft deleted successfully\n\nAsset ID: {id}")
        );
    }
}
