//! Chat completion client for OpenAI-compatible endpoints.
//!
//! One blocking POST per call with a fixed timeout. Nothing is retried or cached; every failure
//! comes back as a [`CompletionError`] and the caller decides what to do with it.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_MODEL: &str = "OPENAI_MODEL";

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("missing {key}", key = ENV_API_KEY)]
    MissingCredential,
    #[error("llm request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error(
        "llm http 401 unauthorized: {0}. Check that {key} is valid and that {base} \
points at the provider that issued the key.",
        key = ENV_API_KEY,
        base = ENV_BASE_URL
    )]
    Unauthorized(String),
    #[error(
        "llm http 404 not found: {0}. Check that {base}/chat/completions is the right path.",
        base = ENV_BASE_URL
    )]
    EndpointNotFound(String),
    #[error("llm http 429 rate limited: {0}. Retry later or lower the request rate.")]
    RateLimited(String),
    #[error("llm http {code}: {message}")]
    Http { code: u16, message: String },
    #[error("llm response is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("llm empty choices")]
    EmptyChoices,
    #[error("llm empty content")]
    EmptyContent,
}

/// Endpoint settings, resolved from the environment on every call.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).map(|v| clean_env_value(&v)).unwrap_or_default();
        let or_default = |v: String, default: &str| {
            if v.is_empty() {
                default.to_string()
            } else {
                v
            }
        };
        Self {
            api_key: read(ENV_API_KEY),
            base_url: or_default(read(ENV_BASE_URL), DEFAULT_BASE_URL),
            model: or_default(read(ENV_MODEL), DEFAULT_MODEL),
        }
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Strips whitespace and quote characters that tend to leak in from `.env` files and shell exports.
pub fn clean_env_value(s: &str) -> String {
    s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n' | '"' | '\'' | '`'))
        .to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
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
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Anything that can answer a chat request with raw text.
pub trait ChatCompletion {
    fn complete(&self, request: &ChatRequest) -> Result<String, CompletionError>;
}

/// Talks to `<base_url>/chat/completions` with bearer auth.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: LlmConfig,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }
}

impl ChatCompletion for OpenAiClient {
    fn complete(&self, request: &ChatRequest) -> Result<String, CompletionError> {
        if self.config.api_key.trim().is_empty() {
            return Err(CompletionError::MissingCredential);
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(CompletionError::Network)?;

        let url = self.config.completions_url();
        debug!(%url, model = %request.model, "sending chat completion request");
        let response = http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .map_err(CompletionError::Network)?;

        let status = response.status();
        let body = response.text().map_err(CompletionError::Network)?;
        debug!(status = status.as_u16(), bytes = body.len(), "chat completion response");

        if !status.is_success() {
            return Err(classify_failure(status, &body));
        }
        extract_content(&body)
    }
}

/// Maps a non-2xx response to an error, preferring the provider's `error.message`.
pub fn classify_failure(status: StatusCode, body: &str) -> CompletionError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_owned)
        })
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| status_text(status));

    match status.as_u16() {
        401 => CompletionError::Unauthorized(message),
        404 => CompletionError::EndpointNotFound(message),
        429 => CompletionError::RateLimited(message),
        code => CompletionError::Http { code, message },
    }
}

/// Pulls the trimmed content of the first choice out of a 2xx body.
pub fn extract_content(body: &str) -> Result<String, CompletionError> {
    let parsed: ChatResponse = serde_json::from_str(body).map_err(CompletionError::Decode)?;
    let first = parsed
        .choices
        .into_iter()
        .next()
        .ok_or(CompletionError::EmptyChoices)?;
    let content = first.message.content.unwrap_or_default();
    let content = content.trim();
    if content.is_empty() {
        return Err(CompletionError::EmptyContent);
    }
    Ok(content.to_string())
}

fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}
