//! OpenAI-compatible LLM client with graceful degradation.
//!
//! Provider selection follows key configuration: an `OPENAI_API_KEY` picks
//! the OpenAI chat-completions path, otherwise an `ANTHROPIC_API_KEY` is
//! acknowledged but not yet wired, and with neither the client is disabled.
//! Keys prefixed with "placeholder" count as absent so seeded dev
//! environments do not make real API calls.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use intellex_core::defaults;

/// Response used whenever no usable LLM is configured.
pub const LLM_DISABLED_MESSAGE: &str = "I'm not connected to the model right now. \
    Please set OPENAI_API_KEY (and OPENAI_MODEL/OPENAI_TEMPERATURE as needed).";

/// Response used when a configured LLM call fails at runtime.
pub const LLM_FALLBACK_MESSAGE: &str =
    "I'm having trouble connecting to my brain right now. Please check my API keys.";

/// Which backend the client will route generation requests to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    /// Key present but no backend wired yet; behaves as disabled.
    Anthropic,
    Disabled,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
            Self::Anthropic => write!(f, "anthropic"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// Configuration for the LLM client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::OPENAI_BASE_URL.to_string(),
            model: defaults::OPENAI_MODEL.to_string(),
            temperature: defaults::OPENAI_TEMPERATURE,
            openai_api_key: None,
            anthropic_api_key: None,
        }
    }
}

impl LlmConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `OPENAI_BASE_URL` | `https://api.openai.com` | Chat-completions endpoint base |
    /// | `OPENAI_MODEL` | `gpt-4-turbo-preview` | Generation model |
    /// | `OPENAI_TEMPERATURE` | `0.7` | Sampling temperature |
    /// | `OPENAI_API_KEY` | unset | Enables the OpenAI provider |
    /// | `ANTHROPIC_API_KEY` | unset | Reserved |
    pub fn from_env() -> Self {
        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| defaults::OPENAI_BASE_URL.to_string());
        let model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| defaults::OPENAI_MODEL.to_string());
        let temperature = std::env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(defaults::OPENAI_TEMPERATURE);

        Self {
            base_url,
            model,
            temperature,
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
        }
    }

    /// Resolve which provider the configured keys select.
    pub fn provider(&self) -> Provider {
        if Self::usable_key(&self.openai_api_key) {
            Provider::OpenAi
        } else if Self::usable_key(&self.anthropic_api_key) {
            Provider::Anthropic
        } else {
            Provider::Disabled
        }
    }

    fn usable_key(key: &Option<String>) -> bool {
        match key {
            Some(k) => !k.is_empty() && !k.to_lowercase().starts_with("placeholder"),
            None => false,
        }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// LLM client used by the agent orchestrator.
///
/// `generate` never returns an error: expected degraded conditions resolve
/// to [`LLM_DISABLED_MESSAGE`] or [`LLM_FALLBACK_MESSAGE`] so a missing or
/// flaky model does not fail the job.
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
    provider: Provider,
}

impl LlmClient {
    /// Create a client from explicit configuration.
    pub fn new(config: LlmConfig) -> Self {
        let provider = config.provider();
        info!(provider = %provider, model = %config.model, "Initializing LLM client");

        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::GEN_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config,
            provider,
        }
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Self {
        Self::new(LlmConfig::from_env())
    }

    /// The provider resolved at construction time.
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Generate a response for `user_content` under `system_prompt`.
    pub async fn generate(&self, system_prompt: &str, user_content: &str) -> String {
        match self.provider {
            Provider::OpenAi => match self.chat_completion(system_prompt, user_content).await {
                Ok(content) => content,
                Err(e) => {
                    warn!(error = %e, model = %self.config.model, "LLM request failed");
                    LLM_FALLBACK_MESSAGE.to_string()
                }
            },
            Provider::Anthropic | Provider::Disabled => LLM_DISABLED_MESSAGE.to_string(),
        }
    }

    async fn chat_completion(
        &self,
        system_prompt: &str,
        user_content: &str,
    ) -> Result<String, reqwest::Error> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let request = ChatCompletionRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.openai_api_key.as_deref().unwrap_or_default())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatCompletionResponse>()
            .await?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_keys(openai: Option<&str>, anthropic: Option<&str>) -> LlmConfig {
        LlmConfig {
            openai_api_key: openai.map(String::from),
            anthropic_api_key: anthropic.map(String::from),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn test_provider_openai_when_key_set() {
        let config = config_with_keys(Some("sk-test"), None);
        assert_eq!(config.provider(), Provider::OpenAi);
    }

    #[test]
    fn test_provider_anthropic_when_only_anthropic_key() {
        let config = config_with_keys(None, Some("sk-ant-test"));
        assert_eq!(config.provider(), Provider::Anthropic);
    }

    #[test]
    fn test_provider_disabled_without_keys() {
        let config = config_with_keys(None, None);
        assert_eq!(config.provider(), Provider::Disabled);
    }

    #[test]
    fn test_placeholder_key_counts_as_absent() {
        let config = config_with_keys(Some("PLACEHOLDER-abc"), None);
        assert_eq!(config.provider(), Provider::Disabled);

        let config = config_with_keys(Some("placeholder"), Some("sk-ant-test"));
        assert_eq!(config.provider(), Provider::Anthropic);
    }

    #[test]
    fn test_empty_key_counts_as_absent() {
        let config = config_with_keys(Some(""), None);
        assert_eq!(config.provider(), Provider::Disabled);
    }

    #[tokio::test]
    async fn test_generate_disabled_returns_sentinel() {
        let client = LlmClient::new(config_with_keys(None, None));
        let out = client.generate("system", "hello").await;
        assert_eq!(out, LLM_DISABLED_MESSAGE);
    }

    #[tokio::test]
    async fn test_generate_anthropic_not_wired_returns_sentinel() {
        let client = LlmClient::new(config_with_keys(None, Some("sk-ant-test")));
        let out = client.generate("system", "hello").await;
        assert_eq!(out, LLM_DISABLED_MESSAGE);
    }

    #[test]
    fn test_provider_display() {
        assert_eq!(Provider::OpenAi.to_string(), "openai");
        assert_eq!(Provider::Anthropic.to_string(), "anthropic");
        assert_eq!(Provider::Disabled.to_string(), "disabled");
    }
}
