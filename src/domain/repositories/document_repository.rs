//! Repository trait for documents.

use crate::domain::entities::{Document, DocumentKind, DocumentPatch, NewDocument};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for documents, scoped to the owning user like
/// [`super::IdeaRepository`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Lists the user's documents, most recently updated first.
    async fn list_by_user(
        &self,
        user_id: Uuid,
        kind: Option<DocumentKind>,
    ) -> Result<Vec<Document>, AppError>;

    async fn find_by_id(&self, user_id: Uuid, id: i64) -> Result<Option<Document>, AppError>;

    async fn create(&self, document: NewDocument) -> Result<Document, AppError>;

    async fn update(
        &self,
        user_id: Uuid,
        id: i64,
        patch: DocumentPatch,
    ) -> Result<Option<Document>, AppError>;

    async fn delete(&self, user_id: Uuid, id: i64) -> Result<bool, AppError>;
}
