//! OpenAI-compatible chat completions client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use super::generator::{GenerationParams, TextGenerator};
use crate::error::AppError;

const SYSTEM_PROMPT: &str = "You are an experienced startup advisor helping founders \
turn ideas into products. Answer concisely and concretely.";

/// Provider error bodies are cut to this many characters in error details.
const MAX_ERROR_BODY: usize = 500;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Calls `POST {base_url}/chat/completions` with bearer authentication.
///
/// Works with OpenAI and any provider exposing the same API shape. Errors are
/// mapped to [`AppError::Unavailable`]; nothing is retried.
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// - `base_url` - API root such as `https://api.openai.com/v1`
    /// - `api_key` - bearer token sent with every request
    /// - `model` - default model when a call does not override it
    /// - `timeout` - whole-request timeout
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            AppError::internal(
                "Failed to create HTTP client",
                json!({ "reason": e.to_string() }),
            )
        })?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            model,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request<'a>(&'a self, prompt: &'a str, params: &'a GenerationParams) -> ChatRequest<'a> {
        ChatRequest {
            model: params.model.as_deref().unwrap_or(&self.model),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }
}

/// Returns the first non-empty choice of a completion response.
fn first_choice(response: ChatResponse) -> Result<String, AppError> {
    response
        .choices
        .into_iter()
        .filter_map(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .find(|content| !content.is_empty())
        .ok_or_else(|| {
            AppError::unavailable(
                "AI provider returned an empty completion",
                json!({ "reason": "no choices with content" }),
            )
        })
}

fn truncate(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY).collect()
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, AppError> {
        let request = self.build_request(prompt, params);
        debug!(
            "AI request: model={} prompt_chars={}",
            request.model,
            prompt.chars().count()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("AI provider request failed: {}", e);
                AppError::unavailable(
                    "AI provider unreachable",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("AI provider returned {}", status);
            return Err(AppError::unavailable(
                "AI provider rejected the request",
                json!({ "status": status.as_u16(), "body": truncate(&body) }),
            ));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            AppError::unavailable(
                "AI provider returned an unreadable response",
                json!({ "reason": e.to_string() }),
            )
        })?;

        first_choice(parsed)
    }

    fn is_configured(&self) -> bool {
        true
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
