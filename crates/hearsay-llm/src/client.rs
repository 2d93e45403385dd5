//! Blocking chat-completions client

use hearsay_core::TextGenerator;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

pub const DEFAULT_MODEL: &str = "gpt-4.1";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);
const TEMPERATURE: f64 = 0.2;

/// Failure categories at the text-generation boundary.
///
/// Every variant is fatal to the current run; the pipeline performs no
/// retries of its own.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OPENAI_API_KEY is not set; configure it before running the pipeline")]
    MissingApiKey,

    #[error("authentication with the text-generation service failed: {0}")]
    Authentication(String),

    #[error("could not reach the text-generation service: {0}")]
    Connectivity(String),

    #[error("text-generation request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response from the text-generation service: {0}")]
    Unexpected(String),
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Lightweight client for system/user prompt pairs.
#[derive(Debug)]
pub struct LlmClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl LlmClient {
    /// Build a client from environment configuration.
    ///
    /// A missing `OPENAI_API_KEY` is a configuration error raised here,
    /// before any pipeline work happens. Model resolution order: explicit
    /// argument, `OPENAI_MODEL`, then the built-in default.
    pub fn from_env(model: Option<String>) -> Result<Self, LlmError> {
        let api_key = non_empty_env("OPENAI_API_KEY").ok_or(LlmError::MissingApiKey)?;
        let model = model
            .filter(|m| !m.trim().is_empty())
            .or_else(|| non_empty_env("OPENAI_MODEL"))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url =
            non_empty_env("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| LlmError::Unexpected(err.to_string()))?;

        Ok(Self {
            http,
            api_key,
            base_url,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one system/user prompt pair and return the model's text response.
    pub fn chat_completion(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let payload = serde_json::json!({
            "model": self.model,
            "temperature": TEMPERATURE,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt},
            ],
        });

        info!(model = %self.model, "chat completion request started");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .map_err(|err| {
                error!(error = %err, "chat completion transport failure");
                LlmError::Connectivity(err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            error!(status = status.as_u16(), "chat completion rejected");
            return Err(classify_status(status, message));
        }

        let body: ChatResponse = response
            .json()
            .map_err(|err| LlmError::Unexpected(err.to_string()))?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        info!(
            model = %self.model,
            response_chars = content.chars().count(),
            "chat completion finished"
        );
        Ok(content)
    }
}

impl TextGenerator for LlmClient {
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> anyhow::Result<String> {
        Ok(self.chat_completion(system_prompt, user_prompt)?)
    }
}

fn classify_status(status: StatusCode, message: String) -> LlmError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return LlmError::Authentication(format!("service returned {status}"));
    }
    LlmError::Status {
        status: status.as_u16(),
        message: truncate(&message, 500).to_string(),
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
