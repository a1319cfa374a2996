//! Timing middleware: logs node enter/exit with elapsed time around each node.run call.
//!
//! Installed on the route graph by `RouteRunner` so every node is instrumented
//! the same way. Interacts with [`NodeMiddleware`](super::NodeMiddleware).

use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::AgentError;
use crate::graph::Next;

use super::node_middleware::NodeCall;
use super::NodeMiddleware;

/// Logs each node's outcome and wall time via `tracing`. Generic over `S`;
/// only the node id is logged.
pub struct TimingNodeMiddleware<S> {
    _phantom: std::marker::PhantomData<S>,
}

impl<S> Default for TimingNodeMiddleware<S> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<S> NodeMiddleware<S> for TimingNodeMiddleware<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: NodeCall<S>,
    ) -> Result<(S, Next), AgentError> {
        debug!(node_id, "node enter");
        let started = Instant::now();
        let result = inner(state).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok((_, next)) => info!(node_id, elapsed_ms, ?next, "node done"),
            Err(e) => warn!(node_id, elapsed_ms, error = %e, "node failed"),
        }
        result
    }
}
