//! OpenAI-compatible chat-completion client.
//!
//! Sends the recommendation prompt as a two-message conversation (system
//! instruction + user prompt) to `POST {base_url}/chat/completions` and
//! returns the first choice's message content.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use wastecast_core::prompt::SYSTEM_INSTRUCTION;
use wastecast_core::provider::{GenerativeProvider, ProviderOutcome};

use crate::error::LlmError;

/// Default API root for chat completions.
pub const DEFAULT_CHAT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default chat model.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

const SAMPLING_TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 600;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Subset of the chat-completion response body that we read.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Trimmed content of the first choice.
    pub fn into_content(self) -> Result<String, LlmError> {
        let content = self
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(content)
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for an OpenAI-compatible chat-completion endpoint.
pub struct ChatCompletionClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatCompletionClient {
    /// Create a client reusing an existing [`reqwest::Client`]
    /// (which carries the request timeout).
    ///
    /// * `base_url` - API root, e.g. `https://api.openai.com/v1`.
    pub fn new(client: reqwest::Client, base_url: String, api_key: String, model: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request a completion for `prompt` and return the generated text.
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: SAMPLING_TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let response = LlmError::ensure_success(response).await?;
        tracing::debug!(status = %response.status(), model = %self.model, "Chat completion response");

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Malformed(e.to_string()))?;
        parsed.into_content()
    }
}

#[async_trait]
impl GenerativeProvider for ChatCompletionClient {
    fn name(&self) -> &'static str {
        "chat"
    }

    async fn generate(&self, prompt: &str) -> ProviderOutcome {
        self.complete(prompt).await.into()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
