//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::keypoints::{ScoringWeights, Theme};
use crate::APP_NAME;

/// Environment variables that carry capability keys. They win over the
/// config file when set.
pub const SILICONFLOW_KEY_ENV: &str = "SILICONFLOW_API_KEY";
pub const OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// LLM settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Heuristic extraction tables and weights
    #[serde(default)]
    pub extraction: ExtractionSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Directory that `report --save` writes into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (auto, siliconflow, openai)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// SiliconFlow API key
    #[serde(default)]
    pub siliconflow_api_key: String,

    /// OpenAI API key
    #[serde(default)]
    pub openai_api_key: String,

    /// Model name (empty = provider default)
    #[serde(default)]
    pub model: String,

    /// API base URL (empty = provider default)
    #[serde(default)]
    pub endpoint: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Upper bound on generated tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-attempt request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per request, including the first
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Pause between attempts in seconds
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,

    /// How much of the transcript goes into the prompt, in chars
    #[serde(default = "default_prompt_char_limit")]
    pub prompt_char_limit: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// Theme table (empty = built-in themes)
    #[serde(default)]
    pub themes: Vec<Theme>,

    /// Scoring weights
    #[serde(default)]
    pub scoring: ScoringWeights,
}

// Default value functions

fn default_output_dir() -> PathBuf {
    ProjectDirs::from("com", APP_NAME, APP_NAME)
        .map(|dirs| dirs.data_dir().join("reports"))
        .unwrap_or_else(|| PathBuf::from("reports"))
}

fn default_llm_provider() -> String {
    "auto".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    2
}

fn default_prompt_char_limit() -> usize {
    8000
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            siliconflow_api_key: String::new(),
            openai_api_key: String::new(),
            model: String::new(),
            endpoint: String::new(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
            prompt_char_limit: default_prompt_char_limit(),
        }
    }
}

impl LlmSettings {
    /// Whether any capability key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.siliconflow_api_key.trim().is_empty() || !self.openai_api_key.trim().is_empty()
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut settings = Self::load_from(&config_path)?;
        settings.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(settings)
    }

    /// Read a settings file, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config file found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(SILICONFLOW_KEY_ENV) {
            self.llm.siliconflow_api_key = key;
        }
        if let Some(key) = non_empty(OPENAI_KEY_ENV) {
            self.llm.openai_api_key = key;
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", APP_NAME, APP_NAME)
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Config as TOML with API keys masked.
    pub fn to_redacted_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        for key in [
            &mut shown.llm.siliconflow_api_key,
            &mut shown.llm.openai_api_key,
        ] {
            if !key.is_empty() {
                *key = "********".to_string();
            }
        }
        Ok(toml::to_string_pretty(&shown)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_llm_behaviour() {
        let settings = Settings::default();
        assert_eq!(settings.llm.provider, "auto");
        assert_eq!(settings.llm.temperature, 0.7);
        assert_eq!(settings.llm.timeout_secs, 120);
        assert_eq!(settings.llm.max_retries, 3);
        assert_eq!(settings.llm.prompt_char_limit, 8000);
        assert!(!settings.llm.has_api_key());
    }

    #[test]
    fn environment_wins_over_file() {
        let mut settings = Settings::default();
        settings.llm.siliconflow_api_key = "from-file".to_string();
        settings.llm.openai_api_key = "file-openai".to_string();

        settings.apply_env_overrides(|name| match name {
            SILICONFLOW_KEY_ENV => Some("from-env".to_string()),
            OPENAI_KEY_ENV => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(settings.llm.siliconflow_api_key, "from-env");
        assert_eq!(settings.llm.openai_api_key, "file-openai");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[llm]
provider = "openai"
openai_api_key = "sk-test"

[extraction.scoring]
filler_penalty = 3

[[extraction.themes]]
name = "AI"
keywords = ["模型", "model"]
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.llm.provider, "openai");
        assert_eq!(settings.llm.max_tokens, 1000);
        assert_eq!(settings.extraction.scoring.filler_penalty, 3);
        assert_eq!(settings.extraction.scoring.marker_bonus, 2);
        assert_eq!(settings.extraction.themes.len(), 1);
        assert_eq!(settings.extraction.themes[0].keywords, vec!["模型", "model"]);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.llm.max_retries, 3);
    }

    #[test]
    fn default_file_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Settings::write_default(&path).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.llm.provider, "auto");
        assert!(settings.extraction.themes.is_empty());
    }

    #[test]
    fn redacted_toml_hides_keys() {
        let mut settings = Settings::default();
        settings.llm.openai_api_key = "sk-secret".to_string();
        let shown = settings.to_redacted_toml().unwrap();
        assert!(!shown.contains("sk-secret"));
        assert!(shown.contains("openai_api_key = \"********\""));
    }
}
