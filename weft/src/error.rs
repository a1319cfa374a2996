//! Graph execution error types.
//!
//! Returned by `Node::run` and `CompiledStateGraph::invoke`. Backend failures from a
//! [`GenerationClient`](crate::llm::GenerationClient) are wrapped as `Generation`.

use thiserror::Error;

use crate::llm::GenerationError;

/// Error raised while running a node or driving a compiled graph.
///
/// A failed node stops the run; the caller receives exactly one of these and no
/// partial state.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. empty graph, node-specific failure).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The generation backend failed while a node was producing output.
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// Routing produced a node id that is not registered in the compiled graph.
    #[error("node not found at runtime: {0}")]
    NodeNotFound(String),

    /// The run took more steps than the configured recursion limit.
    #[error("recursion limit of {0} steps reached without hitting END")]
    RecursionLimit(usize),
}
