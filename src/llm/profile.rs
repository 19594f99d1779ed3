//! Provider profiles: which endpoint and model a capability key unlocks

use anyhow::Result;

use crate::config::LlmSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    SiliconFlow,
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SiliconFlow => "siliconflow",
            Self::OpenAi => "openai",
        }
    }
}

/// Where to send chat completions for a provider, and with which model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub kind: ProviderKind,
    pub base_url: String,
    pub model: String,
}

impl ProviderProfile {
    /// Built-in defaults for a provider.
    pub fn for_kind(kind: ProviderKind) -> Self {
        let (base_url, model) = match kind {
            ProviderKind::SiliconFlow => ("https://api.siliconflow.cn/v1", "Qwen/QwQ-32B"),
            ProviderKind::OpenAi => ("https://api.openai.com/v1", "gpt-3.5-turbo"),
        };
        Self {
            kind,
            base_url: base_url.to_string(),
            model: model.to_string(),
        }
    }

    /// Apply the `llm.endpoint` and `llm.model` overrides, if set.
    pub fn with_overrides(mut self, settings: &LlmSettings) -> Self {
        let endpoint = settings.endpoint.trim().trim_end_matches('/');
        if !endpoint.is_empty() {
            self.base_url = endpoint.to_string();
        }
        let model = settings.model.trim();
        if !model.is_empty() {
            self.model = model.to_string();
        }
        self
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Pick the provider and its key from settings.
///
/// `auto` prefers SiliconFlow when both keys are present.
pub fn resolve(settings: &LlmSettings) -> Result<(ProviderProfile, String)> {
    let silicon = settings.siliconflow_api_key.trim();
    let openai = settings.openai_api_key.trim();

    let (kind, key) = match settings.provider.to_lowercase().as_str() {
        "auto" => {
            if !silicon.is_empty() {
                (ProviderKind::SiliconFlow, silicon)
            } else if !openai.is_empty() {
                (ProviderKind::OpenAi, openai)
            } else {
                anyhow::bail!(
                    "LLM API key is missing. Set SILICONFLOW_API_KEY or OPENAI_API_KEY, or llm.siliconflow_api_key / llm.openai_api_key in config."
                );
            }
        }
        "siliconflow" => {
            if silicon.is_empty() {
                anyhow::bail!(
                    "SiliconFlow API key is missing. Set llm.siliconflow_api_key in config or SILICONFLOW_API_KEY."
                );
            }
            (ProviderKind::SiliconFlow, silicon)
        }
        "openai" => {
            if openai.is_empty() {
                anyhow::bail!(
                    "OpenAI API key is missing. Set llm.openai_api_key in config or OPENAI_API_KEY."
                );
            }
            (ProviderKind::OpenAi, openai)
        }
        other => anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: auto, siliconflow, openai",
            other
        ),
    };

    let profile = ProviderProfile::for_kind(kind).with_overrides(settings);
    Ok((profile, key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(provider: &str, silicon: &str, openai: &str) -> LlmSettings {
        LlmSettings {
            provider: provider.to_string(),
            siliconflow_api_key: silicon.to_string(),
            openai_api_key: openai.to_string(),
            ..LlmSettings::default()
        }
    }

    #[test]
    fn auto_prefers_siliconflow() {
        let (profile, key) = resolve(&settings("auto", "sf-key", "oa-key")).unwrap();
        assert_eq!(profile.kind, ProviderKind::SiliconFlow);
        assert_eq!(profile.model, "Qwen/QwQ-32B");
        assert_eq!(key, "sf-key");
    }

    #[test]
    fn auto_falls_back_to_openai() {
        let (profile, key) = resolve(&settings("auto", "  ", "oa-key")).unwrap();
        assert_eq!(profile.kind, ProviderKind::OpenAi);
        assert_eq!(
            profile.chat_completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(key, "oa-key");
    }

    #[test]
    fn missing_keys_are_reported() {
        let err = resolve(&settings("auto", "", "")).unwrap_err().to_string();
        assert!(err.contains("LLM API key is missing"));

        let err = resolve(&settings("openai", "sf-key", ""))
            .unwrap_err()
            .to_string();
        assert!(err.contains("OpenAI API key is missing"));
    }

    #[test]
    fn unsupported_provider_returns_error() {
        let err = resolve(&settings("gemini", "sf-key", ""))
            .unwrap_err()
            .to_string();
        assert!(err.contains("Unsupported llm.provider"));
    }

    #[test]
    fn overrides_replace_endpoint_and_model() {
        let mut llm = settings("siliconflow", "sf-key", "");
        llm.endpoint = "http://localhost:8080/v1/".to_string();
        llm.model = "local-model".to_string();

        let (profile, _) = resolve(&llm).unwrap();
        assert_eq!(
            profile.chat_completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(profile.model, "local-model");
    }
}
