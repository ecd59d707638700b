//! Handlers for documents.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::document::{
    CreateDocumentRequest, DocumentItem, DocumentListQuery, DocumentListResponse,
    UpdateDocumentRequest,
};
use crate::domain::entities::{CurrentUser, NewDocument};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/documents?kind=pitch_deck`
pub async fn list_documents_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<DocumentListQuery>,
) -> Result<Json<DocumentListResponse>, AppError> {
    let documents = state
        .document_service
        .list_documents(user.id, query.kind)
        .await?;

    Ok(Json(DocumentListResponse {
        items: documents.into_iter().map(DocumentItem::from).collect(),
    }))
}

/// `GET /api/documents/{id}`
pub async fn get_document_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<DocumentItem>, AppError> {
    let document = state.document_service.get_document(user.id, id).await?;
    Ok(Json(document.into()))
}

/// Creates a document, optionally linked to one of the caller's ideas.
///
/// # Endpoint
///
/// `POST /api/documents`
///
/// # Errors
///
/// Returns 404 if `idea_id` is not one of the caller's ideas.
pub async fn create_document_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentItem>), AppError> {
    payload.validate()?;

    let document = state
        .document_service
        .create_document(NewDocument {
            user_id: user.id,
            idea_id: payload.idea_id,
            title: payload.title,
            kind: payload.kind,
            content: payload.content,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(document.into())))
}

/// `PATCH /api/documents/{id}` - `idea_id: null` unlinks the idea.
pub async fn update_document_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UpdateDocumentRequest>,
) -> Result<Json<DocumentItem>, AppError> {
    payload.validate()?;

    let document = state
        .document_service
        .update_document(user.id, id, payload.into())
        .await?;

    Ok(Json(document.into()))
}

/// `DELETE /api/documents/{id}`
pub async fn delete_document_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    state.document_service.delete_document(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
