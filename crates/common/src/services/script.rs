//! Script service — the only entity with no required create fields

use serde_json::json;

use super::{decode, decode_all, to_patch};
use crate::errors::{AppError, Result};
use crate::id::DocumentId;
use crate::models::{CreateScript, Script};
use crate::store::{Collection, SharedStore};

#[derive(Clone)]
pub struct ScriptService {
    store: SharedStore,
}

impl ScriptService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Script>> {
        decode_all(self.store.find_all(Collection::Scripts).await?)
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Script> {
        let doc = self
            .store
            .find_by_id(Collection::Scripts, id)
            .await?
            .ok_or_else(|| AppError::not_found("Script"))?;
        decode(doc)
    }

    pub async fn create(&self, input: CreateScript) -> Result<Script> {
        let doc = json!({
            "name": input.name,
            "script": input.script,
            "type": input.script_type,
            "createdby": input.created_by,
            "isActive": true,
            "isDeleted": false,
        });

        decode(self.store.insert(Collection::Scripts, doc).await?)
    }

    pub async fn update(&self, id: &DocumentId, input: CreateScript) -> Result<Script> {
        let doc = self
            .store
            .merge(Collection::Scripts, id, to_patch(&input)?)
            .await?
            .ok_or_else(|| AppError::not_found("Script"))?;
        decode(doc)
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<()> {
        if !self.store.remove(Collection::Scripts, id).await? {
            return Err(AppError::not_found("Script"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::memory_store;

    fn service() -> ScriptService {
        ScriptService::new(memory_store())
    }

    #[tokio::test]
    async fn test_create_accepts_empty_input() {
        let svc = service();
        let script = svc.create(CreateScript::default()).await.unwrap();
        assert!(script.name.is_none());
        assert!(script.is_active);
    }

    #[tokio::test]
    async fn test_create_keeps_legacy_field_names() {
        let svc = service();
        let author = DocumentId::generate();
        let script = svc
            .create(CreateScript {
                name: Some("nightly-cleanup".to_string()),
                script: Some("print('hi')".to_string()),
                script_type: Some("python".to_string()),
                created_by: Some(author.clone()),
            })
            .await
            .unwrap();

        assert_eq!(script.script_type.as_deref(), Some("python"));
        assert_eq!(script.created_by, Some(author));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let svc = service();
        let script = svc.create(CreateScript::default()).await.unwrap();

        let updated = svc
            .update(
                &script.id,
                CreateScript {
                    name: Some("renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("renamed"));

        svc.delete(&script.id).await.unwrap();
        let err = svc.get(&script.id).await.unwrap_err();
        assert_eq!(err.to_string(), "Script not found");
    }
}
