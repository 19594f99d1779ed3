use anyhow::Result;
use async_trait::async_trait;

use crate::config::Settings;
use crate::llm::openai::ChatCompletionsClient;
use crate::llm::profile;

/// A text-generation backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Send a single user prompt and return the model's answer.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Box<dyn LlmProvider>> {
    let (profile, api_key) = profile::resolve(&settings.llm)?;
    tracing::debug!(provider = profile.kind.as_str(), "LLM provider selected");
    Ok(Box::new(ChatCompletionsClient::new(
        profile,
        api_key,
        &settings.llm,
    )?))
}
