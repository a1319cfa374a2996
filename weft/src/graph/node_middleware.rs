//! Node middleware: wraps every `Node::run` call (around pattern).
//!
//! Set via `StateGraph::with_middleware` or `compile_with_middleware`.

use async_trait::async_trait;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

use crate::error::AgentError;

use super::Next;

/// Boxed future returned by the wrapped node call.
pub type NodeFuture<S> = Pin<Box<dyn Future<Output = Result<(S, Next), AgentError>> + Send>>;

/// The wrapped node call handed to [`NodeMiddleware::around_run`].
pub type NodeCall<S> = Box<dyn FnOnce(S) -> NodeFuture<S> + Send>;

/// Async middleware around each node execution.
#[async_trait]
pub trait NodeMiddleware<S>: Send + Sync
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// - `node_id`: current node id
    /// - `state`: state passed to the node
    /// - `inner`: the node call; must be invoked for the node to run
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: NodeCall<S>,
    ) -> Result<(S, Next), AgentError>;
}
