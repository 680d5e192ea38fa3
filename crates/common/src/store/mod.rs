//! Document storage layer
//!
//! Provides:
//! - The `DocumentStore` trait every backend implements
//! - An in-memory backend for tests and local development
//! - A Postgres backend storing documents as JSONB rows
//!
//! Records travel through this layer as raw `serde_json::Value` objects so
//! the services can apply merge-style updates without a rigid column schema.
//! The store owns three fields on every document: `id`, `createdAt`, and
//! `updatedAt`. Inserts assign them, merges refresh `updatedAt`, and patches
//! can never overwrite any of the three.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::errors::Result;
use crate::id::DocumentId;

/// Logical collection names, one per entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Institutes,
    Organisations,
    Departments,
    Laboratories,
    Users,
    Roles,
    Assets,
    Procedures,
    Runs,
    Analytics,
    Reports,
    Scripts,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Institutes => "institutes",
            Collection::Organisations => "organisations",
            Collection::Departments => "departments",
            Collection::Laboratories => "laboratories",
            Collection::Users => "users",
            Collection::Roles => "roles",
            Collection::Assets => "assets",
            Collection::Procedures => "procedures",
            Collection::Runs => "runs",
            Collection::Analytics => "analytics",
            Collection::Reports => "reports",
            Collection::Scripts => "scripts",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend-agnostic document operations
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document. The store assigns `id`, `createdAt`, and
    /// `updatedAt`, and returns the stored record.
    async fn insert(&self, collection: Collection, doc: Value) -> Result<Value>;

    /// All documents in a collection, in creation order.
    async fn find_all(&self, collection: Collection) -> Result<Vec<Value>>;

    /// A single document by id, if present.
    async fn find_by_id(&self, collection: Collection, id: &DocumentId) -> Result<Option<Value>>;

    /// Shallow-merge `patch` into an existing document and bump `updatedAt`.
    /// Returns the updated record, or `None` if the id is absent.
    async fn merge(
        &self,
        collection: Collection,
        id: &DocumentId,
        patch: Value,
    ) -> Result<Option<Value>>;

    /// Delete a document. Returns whether anything was removed.
    async fn remove(&self, collection: Collection, id: &DocumentId) -> Result<bool>;
}

pub type SharedStore = Arc<dyn DocumentStore>;

pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Stamp a fresh document with its store-owned fields.
pub(crate) fn stamp_new(doc: Value, id: &DocumentId) -> Value {
    let mut object = match doc {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            if !other.is_null() {
                map.insert("value".to_string(), other);
            }
            map
        }
    };
    let now = now_timestamp();
    object.insert("id".to_string(), Value::String(id.to_string()));
    object.insert("createdAt".to_string(), Value::String(now.clone()));
    object.insert("updatedAt".to_string(), Value::String(now));
    Value::Object(object)
}

/// Shallow merge of `patch` into `existing`. Store-owned fields in the patch
/// are ignored; `updatedAt` is refreshed.
pub(crate) fn apply_merge(existing: &mut Value, patch: Value) {
    let Value::Object(target) = existing else {
        return;
    };
    if let Value::Object(changes) = patch {
        for (key, value) in changes {
            if matches!(key.as_str(), "id" | "createdAt" | "updatedAt") {
                continue;
            }
            target.insert(key, value);
        }
    }
    target.insert("updatedAt".to_string(), Value::String(now_timestamp()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stamp_new_assigns_store_fields() {
        let id = DocumentId::generate();
        let stamped = stamp_new(json!({ "name": "Bio Lab" }), &id);
        assert_eq!(stamped["id"], id.to_string());
        assert_eq!(stamped["name"], "Bio Lab");
        assert_eq!(stamped["createdAt"], stamped["updatedAt"]);
    }

    #[test]
    fn test_merge_ignores_store_owned_fields() {
        let id = DocumentId::generate();
        let mut doc = stamp_new(json!({ "name": "old" }), &id);
        let created_at = doc["createdAt"].clone();

        apply_merge(
            &mut doc,
            json!({ "name": "new", "id": "forged", "createdAt": "forged" }),
        );

        assert_eq!(doc["name"], "new");
        assert_eq!(doc["id"], id.to_string());
        assert_eq!(doc["createdAt"], created_at);
    }
}
