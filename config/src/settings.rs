//! Provider settings resolved from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `WEFT_PROVIDER` | `openai` |
//! | `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `OPENAI_MODEL` | -, `https://api.openai.com/v1`, `gpt-4o-mini` |
//! | `OPENROUTER_API_KEY`, `OPENROUTER_BASE_URL`, `OPENROUTER_MODEL` | -, `https://openrouter.ai/api/v1`, `openai/gpt-4o-mini` |
//! | `MISTRAL_API_KEY`, `MISTRAL_BASE_URL`, `MISTRAL_MODEL` | -, `https://api.mistral.ai/v1`, `mistral-small-latest` |
//!
//! Empty values count as unset.

use std::fmt;
use std::str::FromStr;

use crate::LoadError;

/// Generation backend selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Provider {
    #[default]
    OpenAi,
    OpenRouter,
    Mistral,
    /// Offline echo backend; needs no key.
    Mock,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::OpenRouter => "openrouter",
            Provider::Mistral => "mistral",
            Provider::Mock => "mock",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "openrouter" => Ok(Provider::OpenRouter),
            "mistral" => Ok(Provider::Mistral),
            "mock" => Ok(Provider::Mock),
            other => Err(LoadError::UnknownProvider(other.to_string())),
        }
    }
}

/// Connection details for one OpenAI-compatible provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

/// All provider settings plus the default choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub default_provider: Provider,
    pub openai: ProviderSettings,
    pub openrouter: ProviderSettings,
    pub mistral: ProviderSettings,
}

impl Settings {
    /// Reads settings from the process environment (call [`load_and_apply`](crate::load_and_apply) first).
    pub fn from_env() -> Result<Self, LoadError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, so callers and tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let provider = |prefix: &str, base_url: &str, model: &str| ProviderSettings {
            api_key: get(&format!("{prefix}_API_KEY")),
            base_url: get(&format!("{prefix}_BASE_URL"))
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| base_url.to_string()),
            model: get(&format!("{prefix}_MODEL")).unwrap_or_else(|| model.to_string()),
        };

        let default_provider = match get("WEFT_PROVIDER") {
            Some(name) => name.parse()?,
            None => Provider::default(),
        };

        Ok(Self {
            default_provider,
            openai: provider("OPENAI", "https://api.openai.com/v1", "gpt-4o-mini"),
            openrouter: provider(
                "OPENROUTER",
                "https://openrouter.ai/api/v1",
                "openai/gpt-4o-mini",
            ),
            mistral: provider("MISTRAL", "https://api.mistral.ai/v1", "mistral-small-latest"),
        })
    }

    /// Settings for `provider`; `None` for [`Provider::Mock`].
    pub fn provider(&self, provider: Provider) -> Option<&ProviderSettings> {
        match provider {
            Provider::OpenAi => Some(&self.openai),
            Provider::OpenRouter => Some(&self.openrouter),
            Provider::Mistral => Some(&self.mistral),
            Provider::Mock => None,
        }
    }
}
