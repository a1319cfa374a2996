//! Graph compilation error.

use thiserror::Error;

/// Returned by `StateGraph::compile` when the declared topology cannot run.
#[derive(Debug, Error)]
pub enum CompilationError {
    /// An edge or conditional source names a node that was never added.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No edge leaves START.
    #[error("graph must have exactly one edge from START")]
    MissingStart,

    /// Nothing can reach END: no static edge to END and no conditional edge that may resolve to it.
    #[error("graph must have an edge to END")]
    MissingEnd,

    /// Edges branch where they must not, or a purely static chain has a cycle.
    #[error("invalid edge layout: {0}")]
    InvalidChain(String),

    /// A node has both an outgoing edge and conditional edges.
    #[error("node has both edge and conditional edges: {0}")]
    NodeHasBothEdgeAndConditional(String),

    /// A value in a conditional path map is neither a node id nor END.
    #[error("conditional path_map invalid target: {0}")]
    InvalidConditionalPathMap(String),
}
