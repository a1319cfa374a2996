//! Generation client abstraction used by the router and answer nodes.
//!
//! A [`GenerationClient`] maps a batch of prompts plus a sampling temperature to a
//! batch of generated strings (same length, same order). Nodes always send a
//! single prompt through [`GenerationClient::generate_one`].
//!
//! Implementations: [`MockGeneration`] (scripted or echo, for tests and offline runs)
//! and [`ChatOpenAI`] (OpenAI-compatible Chat Completions: OpenAI, OpenRouter, Mistral).
//! [`client_from_settings`] picks one from an explicit [`Settings`](env_config::Settings) value.

mod mock;
mod openai;
mod provider;

pub use mock::{GenerationCall, MockGeneration};
pub use openai::ChatOpenAI;
pub use provider::client_from_settings;

use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a generation backend.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The backend call failed (transport, HTTP status, API error).
    #[error("backend error: {0}")]
    Backend(String),

    /// The backend returned a different number of outputs than prompts sent.
    #[error("backend returned {got} outputs for {expected} prompts")]
    LengthMismatch { expected: usize, got: usize },

    /// The client could not be built (missing API key, unknown provider).
    #[error("client configuration: {0}")]
    Config(String),
}

/// Text-generation backend: prompts + temperature in, one string per prompt out.
///
/// Must accept a one-element batch. Concurrency safety is the implementation's
/// concern; the graph engine never calls a client from two nodes at once within a run.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generates one output per prompt, in input order.
    async fn generate(
        &self,
        prompts: &[String],
        temperature: f32,
    ) -> Result<Vec<String>, GenerationError>;

    /// Sends exactly one prompt and returns its output.
    ///
    /// Fails with `LengthMismatch` when the backend returns no output.
    async fn generate_one(&self, prompt: String, temperature: f32) -> Result<String, GenerationError> {
        let outputs = self.generate(std::slice::from_ref(&prompt), temperature).await?;
        let got = outputs.len();
        outputs
            .into_iter()
            .next()
            .ok_or(GenerationError::LengthMismatch { expected: 1, got })
    }
}
