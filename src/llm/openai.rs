use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::LlmSettings;
use crate::llm::client::LlmProvider;
use crate::llm::profile::ProviderProfile;

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct ChatCompletionsClient {
    http: Client,
    api_key: String,
    profile: ProviderProfile,
    temperature: f32,
    max_tokens: u32,
    max_attempts: u32,
    retry_delay: Duration,
}

impl ChatCompletionsClient {
    pub fn new(profile: ProviderProfile, api_key: String, settings: &LlmSettings) -> Result<Self> {
        Ok(Self {
            http: Client::builder()
                .timeout(Duration::from_secs(settings.timeout_secs))
                .build()
                .context("Failed to build LLM HTTP client")?,
            api_key,
            profile,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            max_attempts: settings.max_retries.max(1),
            retry_delay: Duration::from_secs(settings.retry_delay_secs),
        })
    }

    async fn post(&self, body: &ChatRequest<'_>) -> Result<reqwest::Response> {
        let response = self
            .http
            .post(self.profile.chat_completions_url())
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .context("LLM request failed")?;

        response
            .error_for_status()
            .context("LLM returned an error status")
    }

    /// Send the request, retrying transport failures and error statuses.
    async fn post_with_retry(&self, body: &ChatRequest<'_>) -> Result<reqwest::Response> {
        let mut attempt = 1;
        loop {
            match self.post(body).await {
                Ok(response) => return Ok(response),
                Err(e) if attempt < self.max_attempts => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        "LLM attempt failed, retrying: {:#}",
                        e
                    );
                    tokio::time::sleep(self.retry_delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    return Err(e.context(format!("LLM failed after {} attempts", attempt)));
                }
            }
        }
    }
}

#[async_trait]
impl LlmProvider for ChatCompletionsClient {
    fn name(&self) -> &str {
        self.profile.kind.as_str()
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.profile.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(
            provider = self.name(),
            model = %self.profile.model,
            "requesting chat completion"
        );
        let response = self.post_with_retry(&body).await?;

        let payload: ChatResponse = response
            .json()
            .await
            .context("Failed to parse LLM response")?;

        payload
            .choices
            .into_iter()
            .filter_map(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .find(|text| !text.is_empty())
            .context("LLM response did not contain any text")
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}
