//! Router node: asks the generation client for a route label and classifies it.
//!
//! Reads `question`, writes `route` only. A failed or empty classification call
//! falls back to [`Route::Direct`]; the router never fails the run.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::GenerationClient;
use crate::state::{Route, RouteState};

use super::prompt::{router_prompt, ROUTER_TEMPERATURE};

/// Substrings that select the quiz branch. Checked first.
pub const QUIZ_TOKENS: &[&str] = &["quiz", "виктор", "тест"];

/// Substrings that select the rag branch when no quiz token matched.
pub const CONTEXT_TOKENS: &[&str] = &["rag", "context", "контекст", "поиск"];

/// Maps a raw classifier reply to a route: quiz > rag > direct.
///
/// The reply is trimmed and lowercased, then searched for any token as a
/// substring. Anything unrecognized, including the empty string, is direct.
pub fn classify_route(raw: &str) -> Route {
    let label = raw.trim().to_lowercase();
    if QUIZ_TOKENS.iter().any(|t| label.contains(t)) {
        Route::Quiz
    } else if CONTEXT_TOKENS.iter().any(|t| label.contains(t)) {
        Route::Rag
    } else {
        Route::Direct
    }
}

/// Classifies the question with one generation call at temperature 0.
pub struct RouterNode {
    llm: Arc<dyn GenerationClient>,
}

impl RouterNode {
    pub fn new(llm: Arc<dyn GenerationClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<RouteState> for RouterNode {
    fn id(&self) -> &str {
        "router"
    }

    async fn run(&self, state: RouteState) -> Result<(RouteState, Next), AgentError> {
        let question = state.question().trim();
        let route = match self
            .llm
            .generate_one(router_prompt(question), ROUTER_TEMPERATURE)
            .await
        {
            Ok(raw) => classify_route(&raw),
            Err(e) => {
                warn!(error = %e, "route classification failed, using direct");
                Route::Direct
            }
        };

        info!(
            route = %route,
            q_len = question.chars().count(),
            "router classified question"
        );
        Ok((RouteState::route_update(route), Next::Continue))
    }
}
