//! PostgreSQL implementation of the document repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::rows::{DocumentRow, convert_all};
use crate::domain::entities::{Document, DocumentKind, DocumentPatch, NewDocument};
use crate::domain::repositories::DocumentRepository;
use crate::error::AppError;

const DOCUMENT_COLUMNS: &str =
    "id, user_id, idea_id, title, kind, content, created_at, updated_at";

/// PostgreSQL repository for documents.
pub struct PgDocumentRepository {
    pool: Arc<PgPool>,
}

impl PgDocumentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn list_by_user(
        &self,
        user_id: Uuid,
        kind: Option<DocumentKind>,
    ) -> Result<Vec<Document>, AppError> {
        let rows: Vec<DocumentRow> = sqlx::query_as(&format!(
            r#"
            SELECT {DOCUMENT_COLUMNS}
            FROM documents
            WHERE user_id = $1
              AND ($2::text IS NULL OR kind = $2)
            ORDER BY updated_at DESC, id DESC
            "#
        ))
        .bind(user_id)
        .bind(kind.map(|k| k.as_str()))
        .fetch_all(self.pool.as_ref())
        .await?;

        convert_all(rows)
    }

    async fn find_by_id(&self, user_id: Uuid, id: i64) -> Result<Option<Document>, AppError> {
        let row: Option<DocumentRow> = sqlx::query_as(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Document::try_from).transpose()
    }

    async fn create(&self, document: NewDocument) -> Result<Document, AppError> {
        let row: DocumentRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO documents (user_id, idea_id, title, kind, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {DOCUMENT_COLUMNS}
            "#
        ))
        .bind(document.user_id)
        .bind(document.idea_id)
        .bind(document.title)
        .bind(document.kind.as_str())
        .bind(document.content)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: i64,
        patch: DocumentPatch,
    ) -> Result<Option<Document>, AppError> {
        let row: Option<DocumentRow> = sqlx::query_as(&format!(
            r#"
            UPDATE documents
            SET title = COALESCE($3, title),
                content = COALESCE($4, content),
                idea_id = CASE WHEN $5 THEN $6 ELSE idea_id END,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {DOCUMENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(patch.title)
        .bind(patch.content)
        .bind(patch.idea_id.is_some())
        .bind(patch.idea_id.flatten())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Document::try_from).transpose()
    }

    async fn delete(&self, user_id: Uuid, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
