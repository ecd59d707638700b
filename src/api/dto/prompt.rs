//! DTOs for AI generation endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /api/ideaforge/brainstorm`.
#[derive(Debug, Deserialize, Validate)]
pub struct BrainstormRequest {
    #[validate(length(min = 1, max = 500))]
    pub topic: String,

    /// Number of ideas, default 5.
    #[validate(range(min = 1, max = 10))]
    pub count: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct BrainstormResponse {
    pub ideas: Vec<String>,
}

/// Request body for `POST /api/ideas/{id}/mvp-prompt`. Both fields are optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct MvpPromptRequest {
    #[validate(length(max = 100))]
    pub target_platform: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}
