//! OpenAI-compatible Chat Completions client implementing `GenerationClient`.
//!
//! Each prompt becomes one single-user-message chat completion. OpenRouter and
//! Mistral expose the same API, so one client covers all three providers; only
//! the base URL, key and model differ (see [`client_from_settings`](super::client_from_settings)).
//!
//! **Interaction**: Implements `GenerationClient`; used by the route nodes like `MockGeneration`.

use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::{debug, trace};

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequestArgs,
    },
    Client,
};

use super::{GenerationClient, GenerationError};

/// Chat Completions client for one model.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
}

impl ChatOpenAI {
    /// Build client with default config (API key from `OPENAI_API_KEY` env).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
        }
    }

    /// Build client with custom config (API key, base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, GenerationError> {
        let trace_id = uuid::Uuid::new_v4().to_string();
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(vec![ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessage::from(prompt),
            )])
            .temperature(temperature)
            .build()
            .map_err(|e| GenerationError::Backend(format!("request build failed: {}", e)))?;

        debug!(
            trace_id = %trace_id,
            model = %self.model,
            prompt_len = prompt.len(),
            temperature,
            "chat completion create"
        );
        trace!(trace_id = %trace_id, prompt = %prompt, "chat completion prompt");

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| GenerationError::Backend(format!("chat completion API error: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::Backend("backend returned no choices".into()))?;
        let content = choice.message.content.unwrap_or_default();
        trace!(trace_id = %trace_id, out_len = content.len(), "chat completion done");
        Ok(content)
    }
}

#[async_trait]
impl GenerationClient for ChatOpenAI {
    async fn generate(
        &self,
        prompts: &[String],
        temperature: f32,
    ) -> Result<Vec<String>, GenerationError> {
        try_join_all(prompts.iter().map(|p| self.complete(p, temperature))).await
    }
}
