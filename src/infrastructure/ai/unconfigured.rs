//! Generator used when AI features are disabled.

use async_trait::async_trait;
use serde_json::json;

use super::generator::{GenerationParams, TextGenerator};
use crate::error::AppError;

/// Answers every request with `service_unavailable`.
///
/// Installed when `AI_API_KEY` is not set, so the rest of the API keeps
/// working while AI endpoints report that they are disabled.
pub struct UnconfiguredGenerator;

#[async_trait]
impl TextGenerator for UnconfiguredGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, AppError> {
        Err(AppError::unavailable(
            "AI generation is not configured",
            json!({ "reason": "AI_API_KEY is not set" }),
        ))
    }

    fn is_configured(&self) -> bool {
        false
    }

    fn provider_name(&self) -> &'static str {
        "none"
    }
}
