//! Chat-completion boundary for OpenAI-compatible providers.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::core::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Anything that can turn a message list into a reply.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<String>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// HTTP client for `POST {base}/v1/chat/completions` with bearer auth.
pub struct ChatCompletionClient {
    client: Client,
    endpoint: String,
    api_key: SecretString,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl std::fmt::Debug for ChatCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl ChatCompletionClient {
    pub fn new(api_base: &str, api_key: SecretString, model: impl Into<String>) -> AppResult<Self> {
        let client = Client::builder().timeout(config::llm::timeout()).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/v1/chat/completions", api_base.trim_end_matches('/')),
            api_key,
            model: model.into(),
            temperature: config::llm::TEMPERATURE,
            max_tokens: config::llm::MAX_TOKENS,
        })
    }

    /// Builds a client from `LLM_API_KEY` / `LLM_API_BASE` / `LLM_MODEL`.
    ///
    /// Returns `Ok(None)` when no API key is configured.
    pub fn from_env() -> AppResult<Option<Self>> {
        match config::llm::API_KEY.as_ref() {
            Some(key) => Self::new(&config::llm::API_BASE, key.clone(), config::llm::MODEL.as_str()).map(Some),
            None => {
                log::info!("LLM_API_KEY not set, assistant answers from the knowledge base only");
                Ok(None)
            }
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatModel for ChatCompletionClient {
    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<String> {
        let body = CompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        log::debug!("Chat completion request: model={}, messages={}", self.model, messages.len());

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Chat completion returned status {}", status);
            return Err(AppError::HttpStatus(status));
        }

        let parsed: CompletionResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AppError::LanguageModel("response has no message content".to_string()))
    }
}
