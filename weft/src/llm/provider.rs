//! Builds a [`GenerationClient`] for a provider from explicit [`Settings`].

use std::sync::Arc;

use async_openai::config::OpenAIConfig;
use env_config::{Provider, Settings};
use tracing::debug;

use super::{ChatOpenAI, GenerationClient, GenerationError, MockGeneration};

/// Returns the client for `provider`.
///
/// `Provider::Mock` yields [`MockGeneration::echo_body`] and needs no key. The other
/// providers share [`ChatOpenAI`] with their own base URL, key and model; a missing
/// key is a [`GenerationError::Config`].
pub fn client_from_settings(
    settings: &Settings,
    provider: Provider,
) -> Result<Arc<dyn GenerationClient>, GenerationError> {
    let Some(p) = settings.provider(provider) else {
        debug!(provider = %provider, "using mock generation client");
        return Ok(Arc::new(MockGeneration::echo_body()));
    };

    let api_key = p.api_key.as_deref().ok_or_else(|| {
        GenerationError::Config(format!(
            "{} needs {}_API_KEY",
            provider,
            provider.as_str().to_uppercase()
        ))
    })?;

    debug!(provider = %provider, base_url = %p.base_url, model = %p.model, "building chat client");
    let config = OpenAIConfig::new()
        .with_api_key(api_key)
        .with_api_base(&p.base_url);
    Ok(Arc::new(ChatOpenAI::with_config(config, p.model.clone())))
}
