//! Postgres document store
//!
//! All collections share a single `documents` table keyed by
//! `(collection, id)` with the record body in a JSONB column. Queries go
//! through raw SeaORM statements since the schema is fixed and tiny.

use async_trait::async_trait;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement,
};
use serde_json::Value;
use std::time::Duration;
use tracing::info;

use super::{apply_merge, stamp_new, Collection, DocumentStore};
use crate::config::StoreConfig;
use crate::errors::{AppError, Result};
use crate::id::DocumentId;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    collection TEXT NOT NULL,
    id TEXT NOT NULL,
    doc JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (collection, id)
)
"#;

pub struct PgStore {
    db: DatabaseConnection,
}

impl PgStore {
    /// Connect to Postgres and make sure the documents table exists.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let url = config.url.as_deref().ok_or_else(|| AppError::Configuration {
            message: "store.url is required for the postgres backend".to_string(),
        })?;

        info!("Connecting to document store...");

        let mut opts = ConnectOptions::new(url);
        opts.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .sqlx_logging(true);

        let db = Database::connect(opts)
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Failed to connect to store: {}", e),
            })?;

        let store = Self { db };
        store.ensure_schema().await?;

        info!("Document store ready");
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.db.execute_unprepared(SCHEMA_SQL).await?;
        Ok(())
    }

    /// Ping the database to check connectivity
    pub async fn ping(&self) -> Result<()> {
        self.db
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Store ping failed: {}", e),
            })?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert(&self, collection: Collection, doc: Value) -> Result<Value> {
        let id = DocumentId::generate();
        let stamped = stamp_new(doc, &id);

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            INSERT INTO documents (collection, id, doc)
            VALUES ($1, $2, $3)
            "#,
            vec![
                collection.as_str().into(),
                id.to_string().into(),
                stamped.clone().into(),
            ],
        );
        self.db.execute(stmt).await?;

        Ok(stamped)
    }

    async fn find_all(&self, collection: Collection) -> Result<Vec<Value>> {
        // Ids sort lexicographically in creation order
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT doc FROM documents
            WHERE collection = $1
            ORDER BY id
            "#,
            vec![collection.as_str().into()],
        );

        let rows = self.db.query_all(stmt).await?;
        let mut docs = Vec::with_capacity(rows.len());
        for row in rows {
            docs.push(row.try_get::<Value>("", "doc").map_err(|e| {
                AppError::Internal {
                    message: format!("Malformed document row: {}", e),
                }
            })?);
        }
        Ok(docs)
    }

    async fn find_by_id(&self, collection: Collection, id: &DocumentId) -> Result<Option<Value>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT doc FROM documents
            WHERE collection = $1 AND id = $2
            "#,
            vec![collection.as_str().into(), id.to_string().into()],
        );

        let row = self.db.query_one(stmt).await?;
        match row {
            Some(row) => {
                let doc = row
                    .try_get::<Value>("", "doc")
                    .map_err(|e| AppError::Internal {
                        message: format!("Malformed document row: {}", e),
                    })?;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    async fn merge(
        &self,
        collection: Collection,
        id: &DocumentId,
        patch: Value,
    ) -> Result<Option<Value>> {
        // Read-merge-write so the merge semantics stay identical across
        // backends. Last write wins on concurrent merges of the same id.
        let Some(mut doc) = self.find_by_id(collection, id).await? else {
            return Ok(None);
        };

        apply_merge(&mut doc, patch);

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            UPDATE documents
            SET doc = $3, updated_at = NOW()
            WHERE collection = $1 AND id = $2
            "#,
            vec![
                collection.as_str().into(),
                id.to_string().into(),
                doc.clone().into(),
            ],
        );
        self.db.execute(stmt).await?;

        Ok(Some(doc))
    }

    async fn remove(&self, collection: Collection, id: &DocumentId) -> Result<bool> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            DELETE FROM documents
            WHERE collection = $1 AND id = $2
            "#,
            vec![collection.as_str().into(), id.to_string().into()],
        );

        let result = self.db.execute(stmt).await?;
        Ok(result.rows_affected() > 0)
    }
}
