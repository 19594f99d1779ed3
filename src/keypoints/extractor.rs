//! Key-point extraction with an optional LLM in front of the heuristic

use thiserror::Error;
use tracing::{debug, warn};

use super::segment::char_len;
use super::tables::ExtractorConfig;
use super::{extract_key_points, MIN_TRANSCRIPT_CHARS, TOO_SHORT};
use crate::config::Settings;
use crate::llm::{build_key_points_prompt, build_provider, parse_key_points, LlmProvider};

/// Why the LLM path handed over to the fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DegradeReason {
    #[error("no LLM provider is configured")]
    NoProvider,

    #[error("LLM request failed: {0}")]
    Request(String),

    #[error("LLM answer contained no key points")]
    EmptyResponse,
}

/// Outcome of an extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Complete(Vec<String>),
    Degraded {
        points: Vec<String>,
        reason: DegradeReason,
    },
}

impl Extraction {
    pub fn points(&self) -> &[String] {
        match self {
            Self::Complete(points) | Self::Degraded { points, .. } => points,
        }
    }

    pub fn into_points(self) -> Vec<String> {
        match self {
            Self::Complete(points) | Self::Degraded { points, .. } => points,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

pub struct KeyPointExtractor {
    config: ExtractorConfig,
    provider: Option<Box<dyn LlmProvider>>,
    prompt_char_limit: usize,
}

impl KeyPointExtractor {
    /// Heuristic-only extractor.
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            provider: None,
            prompt_char_limit: 8000,
        }
    }

    pub fn with_provider(mut self, provider: Box<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_prompt_char_limit(mut self, limit: usize) -> Self {
        self.prompt_char_limit = limit;
        self
    }

    /// Heuristic-only extractor using the tables from `settings`.
    pub fn heuristic_from_settings(settings: &Settings) -> Self {
        let config = ExtractorConfig::new(
            settings.extraction.themes.clone(),
            settings.extraction.scoring.clone(),
        );
        Self::new(config).with_prompt_char_limit(settings.llm.prompt_char_limit)
    }

    /// Build from settings. A provider is attached only when an API key is
    /// configured and the provider resolves; otherwise LLM mode degrades.
    pub fn from_settings(settings: &Settings) -> Self {
        let extractor = Self::heuristic_from_settings(settings);
        if !settings.llm.has_api_key() {
            return extractor;
        }

        match build_provider(settings) {
            Ok(provider) => extractor.with_provider(provider),
            Err(e) => {
                warn!("LLM provider unavailable: {:#}", e);
                extractor
            }
        }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Rule-based key points.
    pub fn heuristic(&self, text: &str) -> Vec<String> {
        extract_key_points(text, &self.config)
    }

    /// Key points for `text`. With `use_llm`, the model is asked first and
    /// any failure degrades to the heuristic result. Never fails.
    pub async fn extract(&self, text: &str, use_llm: bool) -> Extraction {
        if char_len(text) < MIN_TRANSCRIPT_CHARS {
            return Extraction::Complete(vec![TOO_SHORT.to_string()]);
        }

        if !use_llm {
            return Extraction::Complete(self.heuristic(text));
        }

        match self.llm_points(text).await {
            Ok(points) => Extraction::Complete(points),
            Err(reason) => self.degrade(self.heuristic(text), reason),
        }
    }

    /// LLM key points, or `fallback` if the model cannot deliver.
    pub async fn llm_points_or(&self, text: &str, fallback: Vec<String>) -> Extraction {
        match self.llm_points(text).await {
            Ok(points) => Extraction::Complete(points),
            Err(reason) => self.degrade(fallback, reason),
        }
    }

    async fn llm_points(&self, text: &str) -> std::result::Result<Vec<String>, DegradeReason> {
        let provider = self.provider.as_ref().ok_or(DegradeReason::NoProvider)?;

        let prompt = build_key_points_prompt(text, self.prompt_char_limit);
        let answer = provider
            .complete(&prompt)
            .await
            .map_err(|e| DegradeReason::Request(format!("{:#}", e)))?;

        let points = parse_key_points(&answer);
        debug!(
            provider = provider.name(),
            points = points.len(),
            "LLM key points parsed"
        );
        if points.is_empty() {
            return Err(DegradeReason::EmptyResponse);
        }
        Ok(points)
    }

    fn degrade(&self, points: Vec<String>, reason: DegradeReason) -> Extraction {
        warn!("Falling back to heuristic key points: {}", reason);
        Extraction::Degraded { points, reason }
    }
}
