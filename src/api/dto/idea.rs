//! DTOs for the idea vault endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{Idea, IdeaPatch, IdeaStatus};

/// Idea as returned by the API.
#[derive(Debug, Serialize)]
pub struct IdeaItem {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: IdeaStatus,
    pub score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Idea> for IdeaItem {
    fn from(idea: Idea) -> Self {
        Self {
            id: idea.id,
            user_id: idea.user_id,
            title: idea.title,
            description: idea.description,
            category: idea.category,
            status: idea.status,
            score: idea.score,
            created_at: idea.created_at,
            updated_at: idea.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IdeaListResponse {
    pub items: Vec<IdeaItem>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub items: Vec<String>,
}

/// Query parameters for `GET /api/ideas`.
#[derive(Debug, Deserialize)]
pub struct IdeaListQuery {
    pub category: Option<String>,
}

/// Request body for `POST /api/ideas`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateIdeaRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 10000))]
    pub description: String,

    /// Normalized to lowercase by the service.
    #[validate(length(min = 1, max = 50))]
    pub category: String,

    pub status: Option<IdeaStatus>,

    #[validate(range(min = 0, max = 100))]
    pub score: Option<i32>,
}

/// Request body for `PATCH /api/ideas/{id}`.
///
/// `score: null` clears the score; an absent field is left unchanged.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateIdeaRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 10000))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,

    pub status: Option<IdeaStatus>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub score: Option<Option<i32>>,
}

impl From<UpdateIdeaRequest> for IdeaPatch {
    fn from(req: UpdateIdeaRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            category: req.category,
            status: req.status,
            score: req.score,
        }
    }
}
