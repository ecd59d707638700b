//! Document service.

use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Document, DocumentKind, DocumentPatch, NewDocument};
use crate::domain::repositories::{DocumentRepository, IdeaRepository};
use crate::error::AppError;
use crate::infrastructure::cache::ReadThroughCache;
use crate::infrastructure::cache::namespace::{
    DOCS, DOCUMENTS_TTL, GET_DOCUMENTS, GET_SYSTEM_STATS, WORKSPACE,
};

const MAX_TITLE_LEN: usize = 200;

/// Service for the caller's documents.
///
/// A document may be linked to one of the caller's ideas; linking to an idea
/// the caller does not own is rejected as not found.
pub struct DocumentService {
    repository: Arc<dyn DocumentRepository>,
    ideas: Arc<dyn IdeaRepository>,
    cache: Arc<ReadThroughCache>,
}

impl DocumentService {
    pub fn new(
        repository: Arc<dyn DocumentRepository>,
        ideas: Arc<dyn IdeaRepository>,
        cache: Arc<ReadThroughCache>,
    ) -> Self {
        Self {
            repository,
            ideas,
            cache,
        }
    }

    pub async fn list_documents(
        &self,
        user_id: Uuid,
        kind: Option<DocumentKind>,
    ) -> Result<Vec<Document>, AppError> {
        self.cache
            .get_or_fetch(
                GET_DOCUMENTS,
                &json!({ "user_id": user_id, "kind": kind }),
                Some(DOCUMENTS_TTL),
                || self.repository.list_by_user(user_id, kind),
            )
            .await
    }

    pub async fn get_document(&self, user_id: Uuid, id: i64) -> Result<Document, AppError> {
        self.repository
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| document_not_found(id))
    }

    /// Creates a document.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the title is blank or too long.
    /// Returns [`AppError::NotFound`] if `idea_id` is not one of the caller's ideas.
    pub async fn create_document(&self, mut document: NewDocument) -> Result<Document, AppError> {
        document.title = normalize_title(&document.title)?;
        if let Some(idea_id) = document.idea_id {
            self.require_idea(document.user_id, idea_id).await?;
        }

        let created = self.repository.create(document).await?;

        self.invalidate();
        tracing::info!(
            "Document {} ({}) created by {}",
            created.id,
            created.kind,
            created.user_id
        );

        Ok(created)
    }

    pub async fn update_document(
        &self,
        user_id: Uuid,
        id: i64,
        mut patch: DocumentPatch,
    ) -> Result<Document, AppError> {
        if patch.title.is_none() && patch.content.is_none() && patch.idea_id.is_none() {
            return Err(AppError::bad_request(
                "No fields to update",
                json!({ "id": id }),
            ));
        }

        patch.title = patch.title.as_deref().map(normalize_title).transpose()?;
        if let Some(Some(idea_id)) = patch.idea_id {
            self.require_idea(user_id, idea_id).await?;
        }

        let document = self
            .repository
            .update(user_id, id, patch)
            .await?
            .ok_or_else(|| document_not_found(id))?;

        self.invalidate();

        Ok(document)
    }

    pub async fn delete_document(&self, user_id: Uuid, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(user_id, id).await? {
            return Err(document_not_found(id));
        }

        self.invalidate();

        Ok(())
    }

    async fn require_idea(&self, user_id: Uuid, idea_id: i64) -> Result<(), AppError> {
        match self.ideas.find_by_id(user_id, idea_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(
                "Idea not found",
                json!({ "idea_id": idea_id }),
            )),
        }
    }

    fn invalidate(&self) {
        self.cache
            .invalidate_all_of(&[DOCS, WORKSPACE, GET_SYSTEM_STATS]);
    }
}

fn document_not_found(id: i64) -> AppError {
    AppError::not_found("Document not found", json!({ "id": id }))
}

fn normalize_title(title: &str) -> Result<String, AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::bad_request(
            "Title must be 1-200 characters",
            json!({ "field": "title" }),
        ));
    }
    Ok(title.to_string())
}
