//! Text generation contract.

use async_trait::async_trait;

use crate::error::AppError;

/// Per-call generation settings. `None` fields use the provider defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationParams {
    /// Overrides the configured model.
    pub model: Option<String>,
    /// Sampling temperature in `0.0..=2.0`.
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// An opaque remote text generator: prompt in, text out.
///
/// Failures are returned as [`AppError::Unavailable`] and never retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a completion for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the provider cannot be reached,
    /// rejects the request, or returns no text.
    async fn generate(&self, prompt: &str, params: &GenerationParams)
    -> Result<String, AppError>;

    /// Whether a provider is configured at all.
    fn is_configured(&self) -> bool;

    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}
