//! HTTP client for the Anthropic Messages and OpenAI Chat Completions APIs.

use async_trait::async_trait;
use daggerkeep_core::error::DomainError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::credentials::Provider;
use crate::domain::ports::TextGenerator;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Endpoints and models for each provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Base URL of the Anthropic API.
    pub anthropic_base_url: String,
    /// Anthropic model name.
    pub anthropic_model: String,
    /// Base URL of the OpenAI API.
    pub openai_base_url: String,
    /// OpenAI model name.
    pub openai_model: String,
    /// Upper bound on reply length, in tokens.
    pub max_tokens: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            anthropic_base_url: "https://api.anthropic.com".to_owned(),
            anthropic_model: "claude-sonnet-4-20250514".to_owned(),
            openai_base_url: "https://api.openai.com".to_owned(),
            openai_model: "gpt-4o".to_owned(),
            max_tokens: 4096,
        }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicContent>,
}

#[derive(Deserialize)]
struct AnthropicContent {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    #[serde(default)]
    content: Option<String>,
}

/// [`TextGenerator`] backed by the providers' HTTP APIs.
#[derive(Debug, Clone)]
pub struct HttpTextGenerator {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl HttpTextGenerator {
    /// Create a generator using `config`.
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn send(
        &self,
        provider: Provider,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, DomainError> {
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Generation(format!("{provider} request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(DomainError::Generation(format!(
                "{provider} rejected the API key"
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Generation(format!(
                "{provider} returned {status}: {body}"
            )));
        }
        Ok(response)
    }

    async fn anthropic(&self, api_key: &str, prompt: &str) -> Result<String, DomainError> {
        let url = format!(
            "{}/v1/messages",
            self.config.anthropic_base_url.trim_end_matches('/')
        );
        let body = AnthropicRequest {
            model: &self.config.anthropic_model,
            max_tokens: self.config.max_tokens,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        let request = self
            .client
            .post(url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        let reply: AnthropicResponse = self
            .send(Provider::Anthropic, request)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::Generation(format!("anthropic reply unreadable: {e}")))?;

        reply
            .content
            .into_iter()
            .next()
            .and_then(|c| c.text)
            .ok_or_else(|| DomainError::Generation("anthropic reply had no text".to_owned()))
    }

    async fn openai(&self, api_key: &str, prompt: &str) -> Result<String, DomainError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.openai_base_url.trim_end_matches('/')
        );
        let body = OpenAiRequest {
            model: &self.config.openai_model,
            max_tokens: self.config.max_tokens,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        let request = self.client.post(url).bearer_auth(api_key).json(&body);

        let reply: OpenAiResponse = self
            .send(Provider::OpenAi, request)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::Generation(format!("openai reply unreadable: {e}")))?;

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| DomainError::Generation("openai reply had no text".to_owned()))
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    #[instrument(skip(self, api_key, prompt), fields(prompt_len = prompt.len()))]
    async fn generate(
        &self,
        provider: Provider,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, DomainError> {
        let reply = match provider {
            Provider::Anthropic => self.anthropic(api_key, prompt).await?,
            Provider::OpenAi => self.openai(api_key, prompt).await?,
        };
        debug!(reply_len = reply.len(), "provider replied");
        Ok(reply)
    }
}
