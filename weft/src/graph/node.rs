//! Graph node trait: one step in a `StateGraph`.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::AgentError;

use super::Next;

/// One step in a graph: state in, (update out, next step).
///
/// The returned state is folded into the running state by the graph's
/// `StateUpdater`; with `MergeUpdater` a node returns only the fields it writes.
///
/// **Interaction**: Registered with `StateGraph::add_node`; driven by
/// `CompiledStateGraph::invoke` and `CompiledStateGraph::stream`.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Node id (e.g. `"router"`). Must be unique within a graph.
    fn id(&self) -> &str;

    /// Runs the step on a snapshot of the current state.
    async fn run(&self, state: S) -> Result<(S, Next), AgentError>;
}
