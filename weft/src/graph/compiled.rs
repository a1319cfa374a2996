//! Compiled state graph: immutable, supports invoke and stream.
//!
//! Built by `StateGraph::compile`. Holds the nodes, the first node, the next-node
//! table derived from static and conditional edges, optional middleware, the state
//! updater and the recursion limit.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::channels::BoxedStateUpdater;
use crate::error::AgentError;
use crate::stream::{StreamEvent, StreamMode};

use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_node_state, log_routing, log_state_update, log_stream_cancelled,
};
use super::node_middleware::NodeMiddleware;
use super::state_graph::END;
use super::{Next, NextEntry, Node};

/// Compiled graph: immutable structure, cheap to clone, shareable across tasks.
///
/// Runs from the first node; after each node the state updater folds the node
/// output into the state, then the conditional router (if the node has one) or the
/// node's `Next` picks the following node. Stops at END.
#[derive(Clone)]
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// First node to run (target of the START edge).
    pub(super) first_node_id: String,
    /// Linear order of nodes; only the first node when the graph has conditional edges.
    pub(super) edge_order: Vec<String>,
    pub(super) next_map: HashMap<String, NextEntry<S>>,
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    pub(super) state_updater: BoxedStateUpdater<S>,
    pub(super) recursion_limit: usize,
}

/// Channel plus selected modes for one streamed run.
struct EventSink<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    tx: mpsc::Sender<StreamEvent<S>>,
    modes: HashSet<StreamMode>,
}

impl<S> EventSink<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    async fn emit(&self, mode: StreamMode, event: impl FnOnce() -> StreamEvent<S>) {
        if self.modes.contains(&mode) {
            // A dropped receiver only means nobody is listening.
            let _ = self.tx.send(event()).await;
        }
    }

    fn receiver_dropped(&self) -> bool {
        self.tx.is_closed()
    }
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    async fn execute_node(&self, node: Arc<dyn Node<S>>, state: S) -> Result<(S, Next), AgentError> {
        match &self.middleware {
            Some(middleware) => {
                let node_id = node.id().to_string();
                middleware
                    .around_run(
                        &node_id,
                        state,
                        Box::new(move |s| Box::pin(async move { node.run(s).await })),
                    )
                    .await
            }
            None => node.run(state).await,
        }
    }

    /// Next node id after `current_id`, or `None` to stop.
    fn resolve_next(&self, current_id: &str, next: Next, state: &S) -> Option<String> {
        match self.next_map.get(current_id) {
            Some(NextEntry::Conditional(router)) => {
                let target = router.resolve_next(state);
                log_routing(current_id, &target);
                Some(target)
            }
            entry => match next {
                Next::End => None,
                Next::Node(id) => Some(id),
                Next::Continue => match entry {
                    Some(NextEntry::Unconditional(id)) => Some(id.clone()),
                    _ => {
                        let pos = self.edge_order.iter().position(|x| x == current_id)?;
                        self.edge_order.get(pos + 1).cloned()
                    }
                },
            },
        }
    }

    /// Shared run loop used by invoke() and stream(). Returns the number of steps taken.
    async fn run_loop(&self, state: &mut S, sink: Option<&EventSink<S>>) -> Result<usize, AgentError> {
        log_graph_start();
        let mut current_id = self.first_node_id.clone();
        let mut steps = 0usize;

        loop {
            if sink.is_some_and(EventSink::receiver_dropped) {
                log_stream_cancelled(&current_id, steps);
                return Err(AgentError::ExecutionFailed("event receiver dropped".into()));
            }
            let Some(node) = self.nodes.get(&current_id).cloned() else {
                let err = AgentError::NodeNotFound(current_id);
                log_graph_error(&err);
                return Err(err);
            };
            if steps >= self.recursion_limit {
                let err = AgentError::RecursionLimit(self.recursion_limit);
                log_graph_error(&err);
                return Err(err);
            }
            steps += 1;

            log_node_start(&current_id);
            log_node_state(&current_id, state);
            if let Some(sink) = sink {
                sink.emit(StreamMode::Tasks, || StreamEvent::TaskStart {
                    node_id: current_id.clone(),
                })
                .await;
            }

            let (update, next) = match self.execute_node(node, state.clone()).await {
                Ok(output) => output,
                Err(e) => {
                    if let Some(sink) = sink {
                        sink.emit(StreamMode::Tasks, || StreamEvent::TaskEnd {
                            node_id: current_id.clone(),
                            result: Err(e.to_string()),
                        })
                        .await;
                    }
                    log_graph_error(&e);
                    return Err(e);
                }
            };

            if let Some(sink) = sink {
                sink.emit(StreamMode::Tasks, || StreamEvent::TaskEnd {
                    node_id: current_id.clone(),
                    result: Ok(()),
                })
                .await;
            }
            log_node_complete(&current_id, &next);

            self.state_updater.apply_update(state, &update);
            log_state_update(&current_id);

            if let Some(sink) = sink {
                sink.emit(StreamMode::Values, || StreamEvent::Values(state.clone()))
                    .await;
                sink.emit(StreamMode::Updates, || StreamEvent::Updates {
                    node_id: current_id.clone(),
                    state: state.clone(),
                })
                .await;
            }

            match self.resolve_next(&current_id, next, state) {
                Some(id) if id != END => current_id = id,
                _ => {
                    log_graph_complete(steps);
                    return Ok(steps);
                }
            }
        }
    }

    fn ensure_runnable(&self) -> Result<(), AgentError> {
        if self.nodes.is_empty() || !self.nodes.contains_key(&self.first_node_id) {
            return Err(AgentError::ExecutionFailed("empty graph".into()));
        }
        Ok(())
    }

    /// Runs the graph to END and returns the final state.
    ///
    /// - `Next::Continue`: follow the node's edge (or linear order), or end if none.
    /// - `Next::Node(id)`: run the node with that id next.
    /// - `Next::End`: stop and return current state.
    ///
    /// Nodes with conditional edges always follow their router.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        self.ensure_runnable()?;
        let mut state = state;
        self.run_loop(&mut state, None).await?;
        Ok(state)
    }

    /// Like [`invoke`](Self::invoke), also sending events for `stream_mode` to `tx`.
    ///
    /// `tx` is dropped when the run ends, so a receiver drained concurrently sees
    /// the channel close. The receiver must be drained while this runs. If the
    /// receiver is dropped, no further node starts and the run returns
    /// `ExecutionFailed`.
    pub async fn invoke_with_events(
        &self,
        state: S,
        stream_mode: impl Into<HashSet<StreamMode>>,
        tx: mpsc::Sender<StreamEvent<S>>,
    ) -> Result<S, AgentError> {
        self.ensure_runnable()?;
        let sink = EventSink {
            tx,
            modes: stream_mode.into(),
        };
        let mut state = state;
        self.run_loop(&mut state, Some(&sink)).await?;
        Ok(state)
    }

    /// Streams graph execution on a spawned task, emitting events via a channel-backed stream.
    ///
    /// The stream ends when the run ends. A failed node shows up as a `TaskEnd`
    /// with `Err` (in `Tasks` mode) and no further events. Dropping the stream
    /// stops the run before its next node.
    pub fn stream(
        &self,
        state: S,
        stream_mode: impl Into<HashSet<StreamMode>>,
    ) -> ReceiverStream<StreamEvent<S>> {
        let (tx, rx) = mpsc::channel(128);
        let graph = self.clone();
        let modes: HashSet<StreamMode> = stream_mode.into();

        tokio::spawn(async move {
            // Errors are already logged by the run loop.
            let _ = graph.invoke_with_events(state, modes, tx).await;
        });

        ReceiverStream::new(rx)
    }

    /// Maximum node executions per run.
    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    /// Id of the node that runs first.
    pub fn first_node_id(&self) -> &str {
        &self.first_node_id
    }

    /// Registered node ids, sorted.
    pub fn node_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
