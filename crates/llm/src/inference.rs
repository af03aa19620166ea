//! Hosted text-generation inference client (Hugging Face style).
//!
//! Posts the prompt to `POST {base_url}/models/{model}` and reads the
//! `generated_text` field from either the list or the single-object response
//! form.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use wastecast_core::provider::{GenerativeProvider, ProviderOutcome};

use crate::error::LlmError;

/// Default inference API root.
pub const DEFAULT_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co";
/// Default text-generation model.
pub const DEFAULT_INFERENCE_MODEL: &str = "microsoft/phi-3-mini-128k-instruct";

const MAX_NEW_TOKENS: u32 = 600;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

/// The inference API answers with a list, a bare object, or an error object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InferenceResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
    Error { error: String },
}

impl InferenceResponse {
    pub fn into_text(self) -> Result<String, LlmError> {
        let text = match self {
            Self::Batch(items) => items
                .into_iter()
                .next()
                .map(|g| g.generated_text)
                .unwrap_or_default(),
            Self::Single(item) => item.generated_text,
            Self::Error { error } => return Err(LlmError::Malformed(error)),
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

/// HTTP client for a hosted text-generation model.
pub struct HostedInferenceClient {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
    model: String,
}

impl HostedInferenceClient {
    pub fn new(client: reqwest::Client, base_url: String, api_token: String, model: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        let body = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                return_full_text: false,
            },
        };

        let response = self
            .client
            .post(format!("{}/models/{}", self.base_url, self.model))
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await?;

        let response = LlmError::ensure_success(response).await?;

        let parsed: InferenceResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Malformed(e.to_string()))?;
        parsed.into_text()
    }
}

#[async_trait]
impl GenerativeProvider for HostedInferenceClient {
    fn name(&self) -> &'static str {
        "inference"
    }

    async fn generate(&self, prompt: &str) -> ProviderOutcome {
        self.generate_text(prompt).await.into()
    }
}
