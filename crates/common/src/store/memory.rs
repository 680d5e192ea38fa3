//! In-memory document store
//!
//! Backing for tests and local development. Documents are keyed by id inside
//! a `BTreeMap`, and ids sort lexicographically in creation order, so
//! `find_all` iteration order matches insertion order for free.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use super::{apply_merge, stamp_new, Collection, DocumentStore};
use crate::errors::Result;
use crate::id::DocumentId;

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: Collection, doc: Value) -> Result<Value> {
        let id = DocumentId::generate();
        let stamped = stamp_new(doc, &id);

        let mut collections = self.collections.write().await;
        collections
            .entry(collection)
            .or_default()
            .insert(id.to_string(), stamped.clone());

        Ok(stamped)
    }

    async fn find_all(&self, collection: Collection) -> Result<Vec<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_by_id(&self, collection: Collection, id: &DocumentId) -> Result<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.get(id.as_str()))
            .cloned())
    }

    async fn merge(
        &self,
        collection: Collection,
        id: &DocumentId,
        patch: Value,
    ) -> Result<Option<Value>> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(id.as_str()))
        else {
            return Ok(None);
        };

        apply_merge(doc, patch);
        Ok(Some(doc.clone()))
    }

    async fn remove(&self, collection: Collection, id: &DocumentId) -> Result<bool> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(&collection)
            .and_then(|docs| docs.remove(id.as_str()))
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryStore::new();
        let created = store
            .insert(Collection::Institutes, json!({ "name": "MIT" }))
            .await
            .unwrap();

        let id: DocumentId = created["id"].as_str().unwrap().parse().unwrap();
        let fetched = store
            .find_by_id(Collection::Institutes, &id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched["name"], "MIT");
    }

    #[tokio::test]
    async fn test_find_all_preserves_creation_order() {
        let store = MemoryStore::new();
        for name in ["first", "second", "third"] {
            store
                .insert(Collection::Assets, json!({ "name": name }))
                .await
                .unwrap();
        }

        let all = store.find_all(Collection::Assets).await.unwrap();
        let names: Vec<_> = all.iter().map(|d| d["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_merge_updates_and_bumps_timestamp() {
        let store = MemoryStore::new();
        let created = store
            .insert(Collection::Assets, json!({ "name": "scope", "status": "Active" }))
            .await
            .unwrap();
        let id: DocumentId = created["id"].as_str().unwrap().parse().unwrap();

        let updated = store
            .merge(Collection::Assets, &id, json!({ "status": "Retired" }))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated["name"], "scope");
        assert_eq!(updated["status"], "Retired");
        assert_eq!(updated["createdAt"], created["createdAt"]);
    }

    #[tokio::test]
    async fn test_merge_missing_returns_none() {
        let store = MemoryStore::new();
        let id = DocumentId::generate();
        let result = store
            .merge(Collection::Assets, &id, json!({ "name": "x" }))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_remove() {
        let store = MemoryStore::new();
        let created = store
            .insert(Collection::Scripts, json!({ "name": "cleanup" }))
            .await
            .unwrap();
        let id: DocumentId = created["id"].as_str().unwrap().parse().unwrap();

        assert!(store.remove(Collection::Scripts, &id).await.unwrap());
        assert!(!store.remove(Collection::Scripts, &id).await.unwrap());
        assert!(store
            .find_by_id(Collection::Scripts, &id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryStore::new();
        store
            .insert(Collection::Users, json!({ "firstName": "Ada" }))
            .await
            .unwrap();

        assert!(store.find_all(Collection::Roles).await.unwrap().is_empty());
    }
}
