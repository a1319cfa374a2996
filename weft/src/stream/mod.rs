//! Streaming types for graph runs.
//!
//! `CompiledStateGraph::stream` emits [`StreamEvent`]s over a channel; the
//! [`StreamMode`] set picks which kinds are sent.

use std::fmt::Debug;

/// Stream mode selector: which kinds of events to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamMode {
    /// Emit full state after each node completes.
    Values,
    /// Emit the node id with the merged state after that node.
    Updates,
    /// Emit task start/end events for each node execution.
    Tasks,
}

/// One streamed event.
#[derive(Clone, Debug)]
pub enum StreamEvent<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Full state snapshot after a node finishes.
    Values(S),
    /// Node id and state after that node.
    Updates { node_id: String, state: S },
    /// A node began execution.
    TaskStart { node_id: String },
    /// A node finished: `Ok(())` or `Err(message)`.
    TaskEnd {
        node_id: String,
        result: Result<(), String>,
    },
}

impl<S> StreamEvent<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Node id for node-scoped events; `None` for `Values`.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            StreamEvent::Values(_) => None,
            StreamEvent::Updates { node_id, .. }
            | StreamEvent::TaskStart { node_id }
            | StreamEvent::TaskEnd { node_id, .. } => Some(node_id),
        }
    }
}
