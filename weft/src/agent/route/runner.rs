//! Route graph runner: builds the graph once, then answers questions.
//!
//! Graph: START → router → [route_edge] → answer_direct | answer_rag | answer_quiz → END.
//! Nodes return partial states merged by `MergeUpdater`; every node runs inside
//! `TimingNodeMiddleware`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::info;

use crate::channels::MergeUpdater;
use crate::content::{ContentSource, StubContent};
use crate::error::AgentError;
use crate::graph::{
    CompilationError, CompiledStateGraph, StateGraph, TimingNodeMiddleware, END, START,
};
use crate::llm::GenerationClient;
use crate::state::{Route, RouteState};
use crate::stream::{StreamEvent, StreamMode};

use super::answer_nodes::{DirectAnswerNode, QuizAnswerNode, RagAnswerNode};
use super::router_node::RouterNode;

pub const ROUTER: &str = "router";
pub const ANSWER_DIRECT: &str = "answer_direct";
pub const ANSWER_RAG: &str = "answer_rag";
pub const ANSWER_QUIZ: &str = "answer_quiz";

/// Conditional edge out of the router: next node for the state's route.
///
/// Missing or unrecognized routes go to `answer_direct`.
pub fn route_edge(state: &RouteState) -> &'static str {
    match state.route {
        Some(Route::Rag) => ANSWER_RAG,
        Some(Route::Quiz) => ANSWER_QUIZ,
        Some(Route::Direct) | None => ANSWER_DIRECT,
    }
}

/// Error type for RouteRunner operations.
#[derive(Debug, thiserror::Error)]
pub enum RouteRunError {
    #[error("compilation failed: {0}")]
    Compilation(#[from] CompilationError),
    #[error("execution failed: {0}")]
    Execution(#[from] AgentError),
}

/// Compiled route graph bound to one generation client and content source.
///
/// Holds no per-run state, so one runner can serve concurrent runs.
pub struct RouteRunner {
    compiled: CompiledStateGraph<RouteState>,
}

impl RouteRunner {
    /// Builds and compiles the route graph.
    pub fn new(
        llm: Arc<dyn GenerationClient>,
        content: Arc<dyn ContentSource>,
    ) -> Result<Self, CompilationError> {
        let path_map: HashMap<String, String> = [ANSWER_DIRECT, ANSWER_RAG, ANSWER_QUIZ]
            .into_iter()
            .map(|id| (id.to_string(), id.to_string()))
            .collect();

        let mut graph = StateGraph::<RouteState>::new()
            .with_state_updater(Arc::new(MergeUpdater))
            .with_middleware(Arc::new(TimingNodeMiddleware::<RouteState>::default()));
        graph
            .add_node(ROUTER, Arc::new(RouterNode::new(Arc::clone(&llm))))
            .add_node(ANSWER_DIRECT, Arc::new(DirectAnswerNode::new(Arc::clone(&llm))))
            .add_node(
                ANSWER_RAG,
                Arc::new(RagAnswerNode::new(Arc::clone(&llm), Arc::clone(&content))),
            )
            .add_node(ANSWER_QUIZ, Arc::new(QuizAnswerNode::new(llm, content)))
            .add_edge(START, ROUTER)
            .add_conditional_edges(
                ROUTER,
                Arc::new(|state: &RouteState| route_edge(state).to_string()),
                Some(path_map),
            )
            .add_edge(ANSWER_DIRECT, END)
            .add_edge(ANSWER_RAG, END)
            .add_edge(ANSWER_QUIZ, END);

        Ok(Self {
            compiled: graph.compile()?,
        })
    }

    /// Same as [`new`](Self::new) with [`StubContent`].
    pub fn with_stub_content(llm: Arc<dyn GenerationClient>) -> Result<Self, CompilationError> {
        Self::new(llm, Arc::new(StubContent))
    }

    /// The compiled graph (for rendering or custom streaming).
    pub fn graph(&self) -> &CompiledStateGraph<RouteState> {
        &self.compiled
    }

    /// Runs one question and returns the final state.
    pub async fn invoke(&self, question: &str) -> Result<RouteState, RouteRunError> {
        Ok(self
            .compiled
            .invoke(RouteState::with_question(question))
            .await?)
    }

    /// Runs one question and returns the answer text (empty if the backend replied empty).
    pub async fn run(&self, question: &str) -> Result<String, RouteRunError> {
        let started = Instant::now();
        let state = self.invoke(question).await?;
        let answer = state.answer.unwrap_or_default();
        info!(
            route = %state.route.unwrap_or_default(),
            q_len = question.chars().count(),
            out_len = answer.chars().count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "run complete"
        );
        Ok(answer)
    }

    /// Streams one run on a spawned task.
    pub fn stream(
        &self,
        question: &str,
        stream_mode: impl Into<HashSet<StreamMode>>,
    ) -> ReceiverStream<StreamEvent<RouteState>> {
        self.compiled
            .stream(RouteState::with_question(question), stream_mode)
    }

    /// Runs one question with all stream modes, handing each event to `on_event`,
    /// and returns the final state or the run's error.
    pub async fn stream_with_callback<F>(
        &self,
        question: &str,
        mut on_event: F,
    ) -> Result<RouteState, RouteRunError>
    where
        F: FnMut(StreamEvent<RouteState>),
    {
        let (tx, mut rx) = mpsc::channel(32);
        let modes = HashSet::from([StreamMode::Tasks, StreamMode::Updates, StreamMode::Values]);
        let run = self
            .compiled
            .invoke_with_events(RouteState::with_question(question), modes, tx);
        let drain = async {
            while let Some(event) = rx.recv().await {
                on_event(event);
            }
        };
        let (result, ()) = tokio::join!(run, drain);
        Ok(result?)
    }
}
