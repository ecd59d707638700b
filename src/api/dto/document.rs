//! DTOs for document endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use validator::Validate;

use crate::domain::entities::{Document, DocumentKind, DocumentPatch};

#[derive(Debug, Serialize)]
pub struct DocumentItem {
    pub id: i64,
    pub idea_id: Option<i64>,
    pub title: String,
    pub kind: DocumentKind,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Document> for DocumentItem {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            idea_id: doc.idea_id,
            title: doc.title,
            kind: doc.kind,
            content: doc.content,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub items: Vec<DocumentItem>,
}

/// Query parameters for `GET /api/documents`.
#[derive(Debug, Deserialize)]
pub struct DocumentListQuery {
    pub kind: Option<DocumentKind>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDocumentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub kind: DocumentKind,

    #[serde(default)]
    #[validate(length(max = 100000))]
    pub content: String,

    pub idea_id: Option<i64>,
}

/// Request body for `PATCH /api/documents/{id}`.
///
/// `idea_id: null` unlinks the document from its idea.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDocumentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 100000))]
    pub content: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub idea_id: Option<Option<i64>>,
}

impl From<UpdateDocumentRequest> for DocumentPatch {
    fn from(req: UpdateDocumentRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            idea_id: req.idea_id,
        }
    }
}
