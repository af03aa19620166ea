//! Provider selection and construction.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use wastecast_core::provider::{DisabledProvider, GenerativeProvider};
use wastecast_core::recommend::DEFAULT_PROVIDER_TIMEOUT;

use crate::chat::{ChatCompletionClient, DEFAULT_CHAT_BASE_URL, DEFAULT_CHAT_MODEL};
use crate::inference::{
    HostedInferenceClient, DEFAULT_INFERENCE_BASE_URL, DEFAULT_INFERENCE_MODEL,
};

/// Keys shorter than this are treated as placeholders.
pub const MIN_API_KEY_LEN: usize = 11;

/// Which generative backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderBackend {
    ChatCompletion,
    HostedInference,
    Disabled,
}

impl ProviderBackend {
    /// Parse the `GENERATIVE_PROVIDER` value (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "chat" | "openai" => Some(Self::ChatCompletion),
            "inference" | "huggingface" | "hf" => Some(Self::HostedInference),
            "disabled" | "none" | "" => Some(Self::Disabled),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChatCompletion => "chat",
            Self::HostedInference => "inference",
            Self::Disabled => "disabled",
        }
    }
}

/// Generative provider configuration loaded from environment variables.
#[derive(Clone)]
pub struct ProviderConfig {
    pub backend: ProviderBackend,
    /// Bearer credential for the selected backend.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Per-request HTTP timeout, also used as the orchestrator deadline.
    pub timeout: Duration,
}

// The API key must never reach the logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("backend", &self.backend)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ProviderConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                                   |
    /// |-------------------------------|-------------------------------------------|
    /// | `GENERATIVE_PROVIDER`         | `disabled`                                |
    /// | `RECOMMENDATION_TIMEOUT_SECS` | `8`                                       |
    /// | `OPENAI_API_KEY`              | none                                      |
    /// | `OPENAI_MODEL`                | `gpt-3.5-turbo`                           |
    /// | `OPENAI_BASE_URL`             | `https://api.openai.com/v1`               |
    /// | `HF_TOKEN`                    | none                                      |
    /// | `HF_MODEL_ID`                 | `microsoft/phi-3-mini-128k-instruct`      |
    /// | `HF_BASE_URL`                 | `https://api-inference.huggingface.co`    |
    ///
    /// Only the variables of the selected backend are read.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from an arbitrary
    /// key/value source.
    ///
    /// Panics on an unknown backend name or a non-numeric timeout so that
    /// misconfiguration fails at startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let raw_backend = lookup("GENERATIVE_PROVIDER").unwrap_or_default();
        let backend = ProviderBackend::parse(&raw_backend).unwrap_or_else(|| {
            panic!(
                "GENERATIVE_PROVIDER must be one of chat, inference, disabled (got '{raw_backend}')"
            )
        });

        let timeout = lookup("RECOMMENDATION_TIMEOUT_SECS")
            .map(|v| {
                v.parse::<u64>()
                    .expect("RECOMMENDATION_TIMEOUT_SECS must be a valid u64")
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_PROVIDER_TIMEOUT);

        let (key_var, model_var, url_var, default_model, default_url) = match backend {
            ProviderBackend::ChatCompletion => (
                "OPENAI_API_KEY",
                "OPENAI_MODEL",
                "OPENAI_BASE_URL",
                DEFAULT_CHAT_MODEL,
                DEFAULT_CHAT_BASE_URL,
            ),
            ProviderBackend::HostedInference => (
                "HF_TOKEN",
                "HF_MODEL_ID",
                "HF_BASE_URL",
                DEFAULT_INFERENCE_MODEL,
                DEFAULT_INFERENCE_BASE_URL,
            ),
            ProviderBackend::Disabled => return Self::disabled(timeout),
        };

        Self {
            backend,
            api_key: lookup(key_var).map(|k| k.trim().to_string()),
            model: lookup(model_var).unwrap_or_else(|| default_model.into()),
            base_url: lookup(url_var).unwrap_or_else(|| default_url.into()),
            timeout,
        }
    }

    /// A configuration that never calls out.
    pub fn disabled(timeout: Duration) -> Self {
        Self {
            backend: ProviderBackend::Disabled,
            api_key: None,
            model: String::new(),
            base_url: String::new(),
            timeout,
        }
    }

    /// The API key, if present and long enough to be a real credential.
    fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|k| k.len() >= MIN_API_KEY_LEN)
    }
}

/// Build the provider described by `config`.
///
/// Falls back to [`DisabledProvider`] (with a warning) when the selected
/// backend has no usable API key or the HTTP client cannot be created, so
/// the service always starts with template recommendations available.
pub fn build_provider(config: &ProviderConfig) -> Arc<dyn GenerativeProvider> {
    if config.backend == ProviderBackend::Disabled {
        tracing::info!("Generative provider disabled, serving template recommendations only");
        return Arc::new(DisabledProvider);
    }

    let Some(api_key) = config.usable_api_key() else {
        tracing::warn!(
            backend = config.backend.as_str(),
            "API key missing or too short, generative provider disabled",
        );
        return Arc::new(DisabledProvider);
    };

    let client = match reqwest::Client::builder().timeout(config.timeout).build() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client, generative provider disabled");
            return Arc::new(DisabledProvider);
        }
    };

    tracing::info!(
        backend = config.backend.as_str(),
        model = %config.model,
        base_url = %config.base_url,
        timeout_secs = config.timeout.as_secs(),
        "Generative provider configured",
    );

    match config.backend {
        ProviderBackend::ChatCompletion => Arc::new(ChatCompletionClient::new(
            client,
            config.base_url.clone(),
            api_key.to_string(),
            config.model.clone(),
        )),
        ProviderBackend::HostedInference => Arc::new(HostedInferenceClient::new(
            client,
            config.base_url.clone(),
            api_key.to_string(),
            config.model.clone(),
        )),
        ProviderBackend::Disabled => Arc::new(DisabledProvider),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ProviderConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ProviderConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn backend_parse_accepts_aliases() {
        assert_eq!(ProviderBackend::parse("Chat"), Some(ProviderBackend::ChatCompletion));
        assert_eq!(ProviderBackend::parse("hf"), Some(ProviderBackend::HostedInference));
        assert_eq!(ProviderBackend::parse(""), Some(ProviderBackend::Disabled));
        assert_eq!(ProviderBackend::parse("gemini"), None);
    }

    #[test]
    fn defaults_to_disabled() {
        let config = config_from(&[]);
        assert_eq!(config.backend, ProviderBackend::Disabled);
        assert_eq!(config.timeout, Duration::from_secs(8));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn chat_backend_reads_openai_vars() {
        let config = config_from(&[
            ("GENERATIVE_PROVIDER", "chat"),
            ("OPENAI_API_KEY", "sk-0123456789abcdef"),
            ("HF_TOKEN", "hf_should_not_be_read"),
        ]);
        assert_eq!(config.backend, ProviderBackend::ChatCompletion);
        assert_eq!(config.api_key.as_deref(), Some("sk-0123456789abcdef"));
        assert_eq!(config.model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.base_url, DEFAULT_CHAT_BASE_URL);
    }

    #[test]
    fn inference_backend_reads_hf_vars() {
        let config = config_from(&[
            ("GENERATIVE_PROVIDER", "inference"),
            ("HF_TOKEN", "hf_abcdefghijklmnop"),
            ("HF_MODEL_ID", "org/model"),
            ("RECOMMENDATION_TIMEOUT_SECS", "3"),
        ]);
        assert_eq!(config.backend, ProviderBackend::HostedInference);
        assert_eq!(config.model, "org/model");
        assert_eq!(config.base_url, DEFAULT_INFERENCE_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    #[should_panic(expected = "GENERATIVE_PROVIDER")]
    fn unknown_backend_panics() {
        config_from(&[("GENERATIVE_PROVIDER", "gemini")]);
    }

    #[test]
    fn debug_output_redacts_key() {
        let config = config_from(&[
            ("GENERATIVE_PROVIDER", "chat"),
            ("OPENAI_API_KEY", "sk-supersecretvalue"),
        ]);
        let debug = format!("{config:?}");
        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn missing_key_downgrades_to_disabled() {
        let config = config_from(&[("GENERATIVE_PROVIDER", "chat")]);
        assert_eq!(build_provider(&config).name(), "disabled");
    }

    #[test]
    fn short_key_downgrades_to_disabled() {
        let config = config_from(&[
            ("GENERATIVE_PROVIDER", "inference"),
            ("HF_TOKEN", "hf_short"),
        ]);
        assert_eq!(build_provider(&config).name(), "disabled");
    }

    #[test]
    fn key_length_boundary() {
        let ten_chars = config_from(&[
            ("GENERATIVE_PROVIDER", "chat"),
            ("OPENAI_API_KEY", "sk-1234567"),
        ]);
        assert_eq!(build_provider(&ten_chars).name(), "disabled");

        let eleven_chars = config_from(&[
            ("GENERATIVE_PROVIDER", "chat"),
            ("OPENAI_API_KEY", "sk-12345678"),
        ]);
        assert_eq!(build_provider(&eleven_chars).name(), "chat");
    }

    #[test]
    fn usable_key_builds_selected_backend() {
        let chat = config_from(&[
            ("GENERATIVE_PROVIDER", "chat"),
            ("OPENAI_API_KEY", "sk-0123456789abcdef"),
        ]);
        assert_eq!(build_provider(&chat).name(), "chat");

        let inference = config_from(&[
            ("GENERATIVE_PROVIDER", "inference"),
            ("HF_TOKEN", "hf_0123456789abcdef"),
        ]);
        assert_eq!(build_provider(&inference).name(), "inference");
    }
}
