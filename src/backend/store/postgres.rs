/**
 * PostgreSQL Document Store
 *
 * Persists documents to the `documents` table created by
 * `migrations/20160513185112_create_documents.sql`. Timestamps are set by the
 * database with `NOW()`.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::backend::store::{DocumentStore, StoreError};
use crate::shared::document::validate_title;
use crate::shared::{Document, DocumentId};

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: i64,
    title: String,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            title: row.title,
            body: row.body,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Document store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an already-migrated pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn create(&self, title: &str) -> Result<Document, StoreError> {
        let title = validate_title(Some(title))?;

        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (title, body, created_at, updated_at)
            VALUES ($1, '', NOW(), NOW())
            RETURNING id, title, body, created_at, updated_at
            "#,
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("[Store] Inserted document {}", row.id);
        Ok(row.into())
    }

    async fn list_all(&self) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, title, body, created_at, updated_at
            FROM documents
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn find_by_id(&self, id: DocumentId) -> Result<Document, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, title, body, created_at, updated_at
            FROM documents
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Document::from).ok_or(StoreError::NotFound(id))
    }

    async fn update_body(&self, id: DocumentId, body: &str) -> Result<Document, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            UPDATE documents
            SET body = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, body, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(body)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Document::from).ok_or(StoreError::NotFound(id))
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
