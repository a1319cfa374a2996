//! Mock generation client for tests, examples and the CLI `mock` provider.
//!
//! Response modes: a fixed script (returned in order, last one repeated), echo
//! (the prompt itself), echo-body (the prompt minus its leading instruction
//! paragraph), or a caller-supplied function of the prompt.
//! Every call is recorded so tests can assert on prompts and temperatures.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenerationClient, GenerationError};

/// One recorded prompt sent to the mock.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationCall {
    pub prompt: String,
    pub temperature: f32,
}

type ResponderFn = dyn Fn(&str, f32) -> Result<String, GenerationError> + Send + Sync;

enum Mode {
    Script(Vec<String>),
    Echo,
    EchoBody,
    Responder(Box<ResponderFn>),
}

/// Scriptable [`GenerationClient`].
///
/// **Interaction**: injected into `RouteRunner` in place of a real backend; the
/// router consumes the first scripted response, the answer node the second.
pub struct MockGeneration {
    mode: Mode,
    /// Prompts with index >= this value fail with a backend error.
    fail_from: Option<usize>,
    counter: AtomicUsize,
    calls: Mutex<Vec<GenerationCall>>,
}

impl MockGeneration {
    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            fail_from: None,
            counter: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the given responses in order; once exhausted the last one repeats.
    /// With no responses every prompt yields an empty string.
    pub fn with_responses<I, T>(responses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::with_mode(Mode::Script(
            responses.into_iter().map(Into::into).collect(),
        ))
    }

    /// Returns each prompt unchanged.
    pub fn echo() -> Self {
        Self::with_mode(Mode::Echo)
    }

    /// Returns each prompt with everything up to its first blank line removed,
    /// so the reply shows what the prompt was about rather than its instructions.
    /// Used by the `mock` provider.
    pub fn echo_body() -> Self {
        Self::with_mode(Mode::EchoBody)
    }

    /// Computes each response from the prompt and temperature.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&str, f32) -> Result<String, GenerationError> + Send + Sync + 'static,
    {
        Self::with_mode(Mode::Responder(Box::new(f)))
    }

    /// Fails every prompt with a backend error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::from_fn(move |_, _| Err(GenerationError::Backend(message.clone())))
    }

    /// Makes the `n`-th prompt (0-based) and every later one fail (builder).
    pub fn fail_from_call(mut self, n: usize) -> Self {
        self.fail_from = Some(n);
        self
    }

    /// All prompts received so far, in order.
    pub fn calls(&self) -> Vec<GenerationCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of prompts received so far.
    pub fn call_count(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }

    fn respond(&self, index: usize, prompt: &str, temperature: f32) -> Result<String, GenerationError> {
        if self.fail_from.is_some_and(|n| index >= n) {
            return Err(GenerationError::Backend(format!(
                "mock failure on call {}",
                index
            )));
        }
        match &self.mode {
            Mode::Script(responses) => Ok(responses
                .get(index)
                .or_else(|| responses.last())
                .cloned()
                .unwrap_or_default()),
            Mode::Echo => Ok(prompt.to_string()),
            Mode::EchoBody => Ok(prompt
                .split_once("\n\n")
                .map_or(prompt, |(_, body)| body)
                .to_string()),
            Mode::Responder(f) => f(prompt, temperature),
        }
    }
}

#[async_trait]
impl GenerationClient for MockGeneration {
    async fn generate(
        &self,
        prompts: &[String],
        temperature: f32,
    ) -> Result<Vec<String>, GenerationError> {
        let mut outputs = Vec::with_capacity(prompts.len());
        for prompt in prompts {
            let index = self.counter.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(GenerationCall {
                    prompt: prompt.clone(),
                    temperature,
                });
            }
            outputs.push(self.respond(index, prompt, temperature)?);
        }
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_responses_come_back_in_order_then_repeat_last() {
        let llm = MockGeneration::with_responses(["quiz", "the answer"]);
        let prompts = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let out = llm.generate(&prompts, 0.0).await.unwrap();
        assert_eq!(out, vec!["quiz", "the answer", "the answer"]);
        assert_eq!(llm.call_count(), 3);
    }

    #[tokio::test]
    async fn empty_script_yields_empty_strings() {
        let llm = MockGeneration::with_responses(Vec::<String>::new());
        let out = llm.generate_one("x".into(), 0.2).await.unwrap();
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn echo_returns_prompt_and_records_temperature() {
        let llm = MockGeneration::echo();
        let out = llm.generate_one("hello".into(), 0.3).await.unwrap();
        assert_eq!(out, "hello");
        assert_eq!(
            llm.calls(),
            vec![GenerationCall {
                prompt: "hello".into(),
                temperature: 0.3
            }]
        );
    }

    #[tokio::test]
    async fn echo_body_drops_instruction_paragraph() {
        let llm = MockGeneration::echo_body();
        let out = llm
            .generate_one("Be brief.\n\nQuestion: why?\n\nAnswer:".into(), 0.2)
            .await
            .unwrap();
        assert_eq!(out, "Question: why?\n\nAnswer:");
        assert_eq!(llm.generate_one("plain".into(), 0.0).await.unwrap(), "plain");
    }

    /// **Scenario**: fail_from_call(1) lets the first prompt through and fails the second.
    #[tokio::test]
    async fn fail_from_call_fails_later_prompts_only() {
        let llm = MockGeneration::with_responses(["rag"]).fail_from_call(1);
        assert_eq!(llm.generate_one("p0".into(), 0.0).await.unwrap(), "rag");
        let err = llm.generate_one("p1".into(), 0.2).await.unwrap_err();
        assert!(matches!(err, GenerationError::Backend(_)));
        assert_eq!(llm.calls().len(), 2);
    }

    #[tokio::test]
    async fn from_fn_sees_prompt_and_temperature() {
        let llm = MockGeneration::from_fn(|p, t| Ok(format!("{}@{}", p.len(), t)));
        assert_eq!(llm.generate_one("abcd".into(), 0.5).await.unwrap(), "4@0.5");
    }
}
