//! Answer nodes: one per route, each making exactly one generation call.
//!
//! Every node reads `question` (empty when unset) and writes `answer` only.
//! Generation failures propagate and fail the run.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::content::ContentSource;
use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::GenerationClient;
use crate::state::RouteState;

use super::prompt::{
    direct_prompt, quiz_prompt, rag_prompt, DIRECT_TEMPERATURE, QUIZ_TEMPERATURE,
    RAG_TEMPERATURE,
};

async fn answer(
    llm: &dyn GenerationClient,
    node_id: &str,
    prompt: String,
    temperature: f32,
) -> Result<(RouteState, Next), AgentError> {
    let out = llm.generate_one(prompt, temperature).await?;
    debug!(node_id, out_len = out.chars().count(), "answer generated");
    Ok((RouteState::answer_update(out), Next::Continue))
}

/// Answers the question directly under a brevity instruction.
pub struct DirectAnswerNode {
    llm: Arc<dyn GenerationClient>,
}

impl DirectAnswerNode {
    pub fn new(llm: Arc<dyn GenerationClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<RouteState> for DirectAnswerNode {
    fn id(&self) -> &str {
        "answer_direct"
    }

    async fn run(&self, state: RouteState) -> Result<(RouteState, Next), AgentError> {
        let prompt = direct_prompt(state.question().trim());
        answer(self.llm.as_ref(), self.id(), prompt, DIRECT_TEMPERATURE).await
    }
}

/// Retrieves context for the question and answers from it.
pub struct RagAnswerNode {
    llm: Arc<dyn GenerationClient>,
    content: Arc<dyn ContentSource>,
}

impl RagAnswerNode {
    pub fn new(llm: Arc<dyn GenerationClient>, content: Arc<dyn ContentSource>) -> Self {
        Self { llm, content }
    }
}

#[async_trait]
impl Node<RouteState> for RagAnswerNode {
    fn id(&self) -> &str {
        "answer_rag"
    }

    async fn run(&self, state: RouteState) -> Result<(RouteState, Next), AgentError> {
        let question = state.question().trim();
        let context = self.content.retrieve_context(question);
        debug!(ctx_len = context.chars().count(), "context retrieved");
        let prompt = rag_prompt(&context, question);
        answer(self.llm.as_ref(), self.id(), prompt, RAG_TEMPERATURE).await
    }
}

/// Builds a quiz skeleton for the question's topic and has it annotated.
pub struct QuizAnswerNode {
    llm: Arc<dyn GenerationClient>,
    content: Arc<dyn ContentSource>,
}

impl QuizAnswerNode {
    pub fn new(llm: Arc<dyn GenerationClient>, content: Arc<dyn ContentSource>) -> Self {
        Self { llm, content }
    }
}

#[async_trait]
impl Node<RouteState> for QuizAnswerNode {
    fn id(&self) -> &str {
        "answer_quiz"
    }

    async fn run(&self, state: RouteState) -> Result<(RouteState, Next), AgentError> {
        let skeleton = self.content.build_quiz_skeleton(state.question().trim());
        let prompt = quiz_prompt(&skeleton);
        answer(self.llm.as_ref(), self.id(), prompt, QUIZ_TEMPERATURE).await
    }
}
